// 🧾 Expense Entity - categorized property costs
//
// Expenses are not linked to tenants or properties. A paid flag is the only
// state they carry besides their values.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::generate_id;
use crate::storage::{Patch, Record};

// ============================================================================
// EXPENSE CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Maintenance,
    Repairs,
    Utilities,
    Insurance,
    Taxes,
    Supplies,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 7] = [
        ExpenseCategory::Maintenance,
        ExpenseCategory::Repairs,
        ExpenseCategory::Utilities,
        ExpenseCategory::Insurance,
        ExpenseCategory::Taxes,
        ExpenseCategory::Supplies,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Maintenance => "maintenance",
            ExpenseCategory::Repairs => "repairs",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Insurance => "insurance",
            ExpenseCategory::Taxes => "taxes",
            ExpenseCategory::Supplies => "supplies",
            ExpenseCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Maintenance => "Maintenance",
            ExpenseCategory::Repairs => "Repairs",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::Taxes => "Taxes",
            ExpenseCategory::Supplies => "Supplies",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl FromStr for ExpenseCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ExpenseCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown expense category: {}", s))
    }
}

// ============================================================================
// EXPENSE ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub category: ExpenseCategory,

    /// When the cost was incurred (not when it was logged)
    pub date: DateTime<Utc>,

    pub is_paid: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseForm {
    pub description: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub date: DateTime<Utc>,
    pub is_paid: bool,
    pub notes: Option<String>,
}

impl Expense {
    pub fn new(form: ExpenseForm) -> Self {
        let now = Utc::now();

        Expense {
            id: generate_id(),
            description: form.description,
            amount: form.amount,
            category: form.category,
            date: form.date,
            is_paid: form.is_paid,
            notes: form.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Expense {
    const STORAGE_KEY: &'static str = "@RentFlowHQ:expenses";
    const KIND: &'static str = "expense";

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

// ============================================================================
// EXPENSE PATCH
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<ExpenseCategory>,
    pub date: Option<DateTime<Utc>>,
    pub is_paid: Option<bool>,
    pub notes: Option<Option<String>>,
}

impl ExpensePatch {
    pub fn paid(is_paid: bool) -> Self {
        ExpensePatch {
            is_paid: Some(is_paid),
            ..Default::default()
        }
    }
}

impl From<ExpenseForm> for ExpensePatch {
    fn from(form: ExpenseForm) -> Self {
        ExpensePatch {
            description: Some(form.description),
            amount: Some(form.amount),
            category: Some(form.category),
            date: Some(form.date),
            is_paid: Some(form.is_paid),
            notes: Some(form.notes),
        }
    }
}

impl Patch<Expense> for ExpensePatch {
    fn apply(self, expense: &mut Expense) {
        if let Some(description) = self.description {
            expense.description = description;
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(date) = self.date {
            expense.date = date;
        }
        if let Some(is_paid) = self.is_paid {
            expense.is_paid = is_paid;
        }
        if let Some(notes) = self.notes {
            expense.notes = notes;
        }
    }
}

/// Newest `date` first, as the expenses tab lists them
pub fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
}
