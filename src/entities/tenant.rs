// 🏠 Tenant Entity - renters and their payment state
//
// A tenant lives in exactly one list (`@RentFlowHQ:tenants`). Identity is the
// caller-generated id; everything else can be patched.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::generate_id;
use crate::storage::{Patch, Record};

// ============================================================================
// PAYMENT STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Rent received for the current period
    Paid,

    /// Rent expected but not yet received
    Pending,

    /// Rent past its due date
    Overdue,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [
        PaymentStatus::Paid,
        PaymentStatus::Pending,
        PaymentStatus::Overdue,
    ];

    /// Wire value stored in JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Overdue => "overdue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Overdue => "Overdue",
        }
    }

    /// Pending and overdue both count as outstanding rent
    pub fn is_outstanding(&self) -> bool {
        matches!(self, PaymentStatus::Pending | PaymentStatus::Overdue)
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

impl FromStr for PaymentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        PaymentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown payment status: {}", s))
    }
}

// ============================================================================
// TENANT ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub phone_number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub property_address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_number: Option<String>,

    /// Monthly rent
    pub rent_amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    pub payment_status: PaymentStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything a caller supplies when creating or editing a tenant
#[derive(Debug, Clone, PartialEq)]
pub struct TenantForm {
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub property_address: String,
    pub unit_number: Option<String>,
    pub rent_amount: f64,
    pub due_date: Option<DateTime<Utc>>,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
}

impl Tenant {
    /// Create a new tenant with a fresh id and both timestamps set to now
    pub fn new(form: TenantForm) -> Self {
        let now = Utc::now();

        Tenant {
            id: generate_id(),
            name: form.name,
            phone_number: form.phone_number,
            email: form.email,
            property_address: form.property_address,
            unit_number: form.unit_number,
            rent_amount: form.rent_amount,
            due_date: form.due_date,
            payment_status: form.payment_status,
            notes: form.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// "12 Allen Avenue, Unit 4B" or just the address
    pub fn property_display(&self) -> String {
        match self.unit_number.as_deref().filter(|unit| !unit.trim().is_empty()) {
            Some(unit) => format!("{}, Unit {}", self.property_address, unit),
            None => self.property_address.clone(),
        }
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    /// Full-record edit payload (everything the edit form can change)
    pub fn to_form(&self) -> TenantForm {
        TenantForm {
            name: self.name.clone(),
            phone_number: self.phone_number.clone(),
            email: self.email.clone(),
            property_address: self.property_address.clone(),
            unit_number: self.unit_number.clone(),
            rent_amount: self.rent_amount,
            due_date: self.due_date,
            payment_status: self.payment_status,
            notes: self.notes.clone(),
        }
    }
}

impl Record for Tenant {
    const STORAGE_KEY: &'static str = "@RentFlowHQ:tenants";
    const KIND: &'static str = "tenant";

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

// ============================================================================
// TENANT PATCH
// ============================================================================

/// Partial update. `None` leaves a field alone; for optional fields
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TenantPatch {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<Option<String>>,
    pub property_address: Option<String>,
    pub unit_number: Option<Option<String>>,
    pub rent_amount: Option<f64>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub payment_status: Option<PaymentStatus>,
    pub notes: Option<Option<String>>,
}

impl TenantPatch {
    pub fn status(status: PaymentStatus) -> Self {
        TenantPatch {
            payment_status: Some(status),
            ..Default::default()
        }
    }

    pub fn due_date(due_date: DateTime<Utc>) -> Self {
        TenantPatch {
            due_date: Some(Some(due_date)),
            ..Default::default()
        }
    }
}

impl From<TenantForm> for TenantPatch {
    fn from(form: TenantForm) -> Self {
        TenantPatch {
            name: Some(form.name),
            phone_number: Some(form.phone_number),
            email: Some(form.email),
            property_address: Some(form.property_address),
            unit_number: Some(form.unit_number),
            rent_amount: Some(form.rent_amount),
            due_date: Some(form.due_date),
            payment_status: Some(form.payment_status),
            notes: Some(form.notes),
        }
    }
}

impl Patch<Tenant> for TenantPatch {
    fn apply(self, tenant: &mut Tenant) {
        if let Some(name) = self.name {
            tenant.name = name;
        }
        if let Some(phone_number) = self.phone_number {
            tenant.phone_number = phone_number;
        }
        if let Some(email) = self.email {
            tenant.email = email;
        }
        if let Some(property_address) = self.property_address {
            tenant.property_address = property_address;
        }
        if let Some(unit_number) = self.unit_number {
            tenant.unit_number = unit_number;
        }
        if let Some(rent_amount) = self.rent_amount {
            tenant.rent_amount = rent_amount;
        }
        if let Some(due_date) = self.due_date {
            tenant.due_date = due_date;
        }
        if let Some(payment_status) = self.payment_status {
            tenant.payment_status = payment_status;
        }
        if let Some(notes) = self.notes {
            tenant.notes = notes;
        }
    }
}

/// Tenant list order used on the tenants tab
pub fn sort_by_name(tenants: &mut [Tenant]) {
    tenants.sort_by_key(|t| t.name.to_lowercase());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_form(name: &str, rent: f64) -> TenantForm {
        TenantForm {
            name: name.to_string(),
            phone_number: "08031234567".to_string(),
            email: None,
            property_address: "12 Allen Avenue, Ikeja".to_string(),
            unit_number: None,
            rent_amount: rent,
            due_date: None,
            payment_status: PaymentStatus::Pending,
            notes: None,
        }
    }

    #[test]
    fn test_tenant_creation() {
        let tenant = Tenant::new(test_form("Ada Obi", 150000.0));

        assert!(!tenant.id.is_empty());
        assert_eq!(tenant.name, "Ada Obi");
        assert_eq!(tenant.payment_status, PaymentStatus::Pending);
        assert_eq!(tenant.created_at, tenant.updated_at);
    }

    #[test]
    fn test_property_display() {
        let mut tenant = Tenant::new(test_form("Ada Obi", 1.0));
        assert_eq!(tenant.property_display(), "12 Allen Avenue, Ikeja");

        tenant.unit_number = Some("4B".to_string());
        assert_eq!(tenant.property_display(), "12 Allen Avenue, Ikeja, Unit 4B");

        tenant.unit_number = Some(String::new());
        assert_eq!(tenant.property_display(), "12 Allen Avenue, Ikeja");
        tenant.unit_number = Some("  ".to_string());
        assert_eq!(tenant.property_display(), "12 Allen Avenue, Ikeja");
    }

    #[test]
    fn test_json_shape_is_camel_case() {
        let tenant = Tenant::new(test_form("Ada Obi", 1200.5));
        let json = serde_json::to_value(&tenant).unwrap();

        assert_eq!(json["phoneNumber"], "08031234567");
        assert_eq!(json["rentAmount"], 1200.5);
        assert_eq!(json["paymentStatus"], "pending");
        assert!(json.get("createdAt").is_some());
        // Absent optionals are not written at all
        assert!(json.get("email").is_none());
        assert!(json.get("dueDate").is_none());
    }

    #[test]
    fn test_deserialize_rejects_unknown_status() {
        let json = serde_json::json!({
            "id": "1", "name": "X", "phoneNumber": "1", "propertyAddress": "A",
            "rentAmount": 1.0, "paymentStatus": "late",
            "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"
        });

        assert!(serde_json::from_value::<Tenant>(json).is_err());
    }

    #[test]
    fn test_patch_sets_and_clears_fields() {
        let mut tenant = Tenant::new(test_form("Ada Obi", 1.0));
        tenant.notes = Some("Quiet tenant".to_string());

        TenantPatch {
            rent_amount: Some(2.0),
            notes: Some(None),
            ..Default::default()
        }
        .apply(&mut tenant);

        assert_eq!(tenant.rent_amount, 2.0);
        assert_eq!(tenant.notes, None);
        assert_eq!(tenant.name, "Ada Obi");
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("overdue".parse::<PaymentStatus>().unwrap(), PaymentStatus::Overdue);
        assert!("Paid".parse::<PaymentStatus>().is_err());
        assert!(PaymentStatus::Overdue.is_outstanding());
        assert!(!PaymentStatus::Paid.is_outstanding());
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let mut tenants = vec![
            Tenant::new(test_form("bola", 1.0)),
            Tenant::new(test_form("Ada", 1.0)),
            Tenant::new(test_form("Chidi", 1.0)),
        ];
        sort_by_name(&mut tenants);

        let names: Vec<&str> = tenants.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "bola", "Chidi"]);
    }
}
