// 📐 Form validation - raw input → typed form data
//
// Mirrors the add/edit forms: required fields, length limits, numeric
// amounts, well-formed email. Text is trimmed and blank optionals become None.

use chrono::{DateTime, NaiveDate, Utc};
use regex_lite::Regex;
use std::sync::OnceLock;

use crate::entities::{
    ArtisanForm, ExpenseCategory, ExpenseForm, PaymentStatus, TenantForm,
};

// ============================================================================
// VALIDATION ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: &str) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = Result<T, Vec<ValidationError>>;

// ============================================================================
// RAW INPUTS
// ============================================================================

/// Tenant form exactly as typed
#[derive(Debug, Clone, Default)]
pub struct TenantInput {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub property_address: String,
    pub unit_number: String,
    pub rent_amount: String,
    pub due_date: String,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct ExpenseInput {
    pub description: String,
    pub amount: String,
    pub category: ExpenseCategory,
    pub date: String,
    pub is_paid: bool,
    pub notes: String,
}

#[derive(Debug, Clone, Default)]
pub struct ArtisanInput {
    pub name: String,
    pub trade: String,
    pub phone_number: String,
    pub email: String,
    pub notes: String,
}

// ============================================================================
// FIELD CHECKS
// ============================================================================

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
            .expect("email pattern is valid")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn required_text(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: &str,
    label: &str,
    max_len: Option<usize>,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(ValidationError::new(field, &format!("{} is required", label)));
    } else if let Some(max) = max_len {
        if trimmed.chars().count() > max {
            errors.push(ValidationError::new(field, &format!("{} is too long", label)));
        }
    }
    trimmed.to_string()
}

fn optional_email(errors: &mut Vec<ValidationError>, value: &str) -> Option<String> {
    let email = optional_text(value)?;
    if !is_valid_email(&email) {
        errors.push(ValidationError::new("email", "Invalid email"));
    }
    Some(email)
}

fn amount(errors: &mut Vec<ValidationError>, field: &str, value: &str, label: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(ValidationError::new(field, &format!("{} is required", label)));
        return 0.0;
    }

    match trimmed.replace(',', "").parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => n,
        _ => {
            errors.push(ValidationError::new(field, &format!("{} must be a positive number", label)));
            0.0
        }
    }
}

/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` (midnight UTC)
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn finish<T>(errors: Vec<ValidationError>, value: T) -> ValidationResult<T> {
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(errors)
    }
}

// ============================================================================
// FORM VALIDATORS
// ============================================================================

/// `existing_status` keeps the current status when editing; new tenants
/// start as pending.
pub fn validate_tenant(
    input: &TenantInput,
    existing_status: Option<PaymentStatus>,
) -> ValidationResult<TenantForm> {
    let mut errors = Vec::new();

    let name = required_text(&mut errors, "name", &input.name, "Name", Some(100));
    let phone_number = required_text(&mut errors, "phoneNumber", &input.phone_number, "Phone number", None);
    let email = optional_email(&mut errors, &input.email);
    let property_address = required_text(
        &mut errors,
        "propertyAddress",
        &input.property_address,
        "Property address",
        None,
    );
    let rent_amount = amount(&mut errors, "rentAmount", &input.rent_amount, "Rent amount");

    let due_date = match optional_text(&input.due_date) {
        Some(raw) => {
            let parsed = parse_date(&raw);
            if parsed.is_none() {
                errors.push(ValidationError::new("dueDate", "Invalid date"));
            }
            parsed
        }
        None => None,
    };

    finish(
        errors,
        TenantForm {
            name,
            phone_number,
            email,
            property_address,
            unit_number: optional_text(&input.unit_number),
            rent_amount,
            due_date,
            payment_status: existing_status.unwrap_or_default(),
            notes: optional_text(&input.notes),
        },
    )
}

pub fn validate_expense(input: &ExpenseInput) -> ValidationResult<ExpenseForm> {
    let mut errors = Vec::new();

    let description = required_text(&mut errors, "description", &input.description, "Description", Some(200));
    let amount = amount(&mut errors, "amount", &input.amount, "Amount");

    let date = if input.date.trim().is_empty() {
        errors.push(ValidationError::new("date", "Date is required"));
        None
    } else {
        let parsed = parse_date(&input.date);
        if parsed.is_none() {
            errors.push(ValidationError::new("date", "Invalid date"));
        }
        parsed
    };

    match date {
        Some(date) if errors.is_empty() => Ok(ExpenseForm {
            description,
            amount,
            category: input.category,
            date,
            is_paid: input.is_paid,
            notes: optional_text(&input.notes),
        }),
        _ => Err(errors),
    }
}

pub fn validate_artisan(input: &ArtisanInput) -> ValidationResult<ArtisanForm> {
    let mut errors = Vec::new();

    let name = required_text(&mut errors, "name", &input.name, "Name", Some(100));
    let trade = required_text(&mut errors, "trade", &input.trade, "Trade/specialty", Some(100));
    let phone_number = required_text(&mut errors, "phoneNumber", &input.phone_number, "Phone number", None);
    let email = optional_email(&mut errors, &input.email);

    finish(
        errors,
        ArtisanForm {
            name,
            trade,
            phone_number,
            email,
            notes: optional_text(&input.notes),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tenant_input() -> TenantInput {
        TenantInput {
            name: "  Ada Obi ".to_string(),
            phone_number: "0803 123 4567".to_string(),
            email: "".to_string(),
            property_address: "12 Allen Avenue".to_string(),
            unit_number: "  ".to_string(),
            rent_amount: "150,000.50".to_string(),
            due_date: "2024-07-01".to_string(),
            notes: "".to_string(),
        }
    }

    fn fields(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_valid_tenant_is_trimmed() {
        let form = validate_tenant(&tenant_input(), None).unwrap();

        assert_eq!(form.name, "Ada Obi");
        assert_eq!(form.unit_number, None);
        assert_eq!(form.email, None);
        assert_eq!(form.rent_amount, 150000.5);
        assert_eq!(form.due_date, Some(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()));
        assert_eq!(form.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_edit_keeps_existing_status() {
        let form = validate_tenant(&tenant_input(), Some(PaymentStatus::Overdue)).unwrap();
        assert_eq!(form.payment_status, PaymentStatus::Overdue);
    }

    #[test]
    fn test_tenant_errors_are_collected() {
        let input = TenantInput {
            name: "x".repeat(101),
            email: "not-an-email".to_string(),
            rent_amount: "abc".to_string(),
            due_date: "someday".to_string(),
            ..Default::default()
        };

        let errors = validate_tenant(&input, None).unwrap_err();

        assert_eq!(
            fields(&errors),
            vec!["name", "phoneNumber", "email", "propertyAddress", "rentAmount", "dueDate"]
        );
        assert_eq!(errors[0].message, "Name is too long");
        assert_eq!(errors[0].to_string(), "name: Name is too long");
    }

    #[test]
    fn test_expense_validation() {
        let input = ExpenseInput {
            description: "Generator service".to_string(),
            amount: "35000".to_string(),
            category: ExpenseCategory::Maintenance,
            date: "2024-05-20T14:30:00.000Z".to_string(),
            is_paid: true,
            notes: " monthly ".to_string(),
        };

        let form = validate_expense(&input).unwrap();

        assert_eq!(form.amount, 35000.0);
        assert_eq!(form.date, Utc.with_ymd_and_hms(2024, 5, 20, 14, 30, 0).unwrap());
        assert_eq!(form.notes.as_deref(), Some("monthly"));
    }

    #[test]
    fn test_expense_missing_fields() {
        let input = ExpenseInput {
            description: String::new(),
            amount: "-5".to_string(),
            category: ExpenseCategory::Other,
            date: String::new(),
            is_paid: false,
            notes: String::new(),
        };

        let errors = validate_expense(&input).unwrap_err();
        assert_eq!(fields(&errors), vec!["description", "amount", "date"]);
    }

    #[test]
    fn test_artisan_validation() {
        let ok = validate_artisan(&ArtisanInput {
            name: "Musa".to_string(),
            trade: "Plumber".to_string(),
            phone_number: "0809".to_string(),
            email: "musa@pipes.ng".to_string(),
            notes: String::new(),
        })
        .unwrap();
        assert_eq!(ok.email.as_deref(), Some("musa@pipes.ng"));

        let errors = validate_artisan(&ArtisanInput::default()).unwrap_err();
        assert_eq!(fields(&errors), vec!["name", "trade", "phoneNumber"]);
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a.b+c@example.co.uk"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("@example.com"));
    }
}
