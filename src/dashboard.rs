// 📊 Dashboard - headline figures and recent activity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::calculate_total_expenses;
use crate::entities::{Expense, Tenant};

pub const DEFAULT_RECENT_ACTIVITIES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Tenant,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardActivity {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub description: String,
    pub date: DateTime<Utc>,
}

pub fn calculate_total_tenants(tenants: &[Tenant]) -> usize {
    tenants.len()
}

/// Tenants whose rent is pending or overdue
pub fn calculate_pending_payments(tenants: &[Tenant]) -> usize {
    tenants
        .iter()
        .filter(|t| t.payment_status.is_outstanding())
        .count()
}

/// Expected rent this month (every tenant pays monthly)
pub fn calculate_monthly_revenue(tenants: &[Tenant]) -> f64 {
    tenants.iter().map(|t| t.rent_amount).sum()
}

/// Newest additions across tenants and expenses, by creation time
pub fn get_recent_activities(
    tenants: &[Tenant],
    expenses: &[Expense],
    limit: usize,
) -> Vec<DashboardActivity> {
    let tenant_activities = tenants.iter().map(|tenant| DashboardActivity {
        id: tenant.id.clone(),
        activity_type: ActivityType::Tenant,
        description: format!("Added {} as tenant", tenant.name),
        date: tenant.created_at,
    });

    let expense_activities = expenses.iter().map(|expense| DashboardActivity {
        id: expense.id.clone(),
        activity_type: ActivityType::Expense,
        description: format!("Logged expense: {}", expense.description),
        date: expense.created_at,
    });

    let mut activities: Vec<DashboardActivity> =
        tenant_activities.chain(expense_activities).collect();
    activities.sort_by(|a, b| b.date.cmp(&a.date));
    activities.truncate(limit);
    activities
}

/// Everything the dashboard cards show, computed in one pass over the lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_tenants: usize,
    pub pending_payments: usize,
    pub monthly_revenue: f64,
    pub total_expenses: f64,
    pub recent_activities: Vec<DashboardActivity>,
}

impl DashboardSummary {
    pub fn compute(tenants: &[Tenant], expenses: &[Expense]) -> Self {
        DashboardSummary {
            total_tenants: calculate_total_tenants(tenants),
            pending_payments: calculate_pending_payments(tenants),
            monthly_revenue: calculate_monthly_revenue(tenants),
            total_expenses: calculate_total_expenses(expenses),
            recent_activities: get_recent_activities(tenants, expenses, DEFAULT_RECENT_ACTIVITIES),
        }
    }
}
