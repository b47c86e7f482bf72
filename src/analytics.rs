// 📈 Analytics - derived figures for the analytics tab
//
// Pure functions over already-loaded lists. Nothing is cached; callers
// recompute from scratch whenever they reload data.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Expense, ExpenseCategory, PaymentStatus, Tenant};

pub const DEFAULT_MONTHS: usize = 6;
pub const DEFAULT_TOP_EXPENSES: usize = 5;

/// Naira sign used by every currency display
pub const CURRENCY_SYMBOL: &str = "₦";

// ============================================================================
// RESULT TYPES
// ============================================================================

/// One chart point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyData {
    /// "2024-03"
    pub month: String,
    pub value: f64,
    /// Short label, "Mar"
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBreakdownItem {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub category: ExpenseCategory,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatusBreakdown {
    pub paid: usize,
    pub pending: usize,
    pub overdue: usize,
}

impl PaymentStatusBreakdown {
    pub fn total(&self) -> usize {
        self.paid + self.pending + self.overdue
    }
}

/// Paid/unpaid split shown above the expense list
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub total: f64,
    pub paid: f64,
    pub unpaid: f64,
    pub paid_count: usize,
    pub unpaid_count: usize,
}

// ============================================================================
// TOTALS
// ============================================================================

/// Sum of all rent amounts
pub fn calculate_total_revenue(tenants: &[Tenant]) -> f64 {
    tenants.iter().map(|t| t.rent_amount).sum()
}

pub fn calculate_total_expenses(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

pub fn calculate_net_income(revenue: f64, expenses: f64) -> f64 {
    revenue - expenses
}

pub fn get_expense_summary(expenses: &[Expense]) -> ExpenseSummary {
    let total = calculate_total_expenses(expenses);
    let paid: f64 = expenses.iter().filter(|e| e.is_paid).map(|e| e.amount).sum();
    let paid_count = expenses.iter().filter(|e| e.is_paid).count();

    ExpenseSummary {
        total,
        paid,
        unpaid: total - paid,
        paid_count,
        unpaid_count: expenses.len() - paid_count,
    }
}

// ============================================================================
// MONTHLY SERIES
// ============================================================================

/// Longest series the monthly charts will build (100 years)
pub const MAX_MONTHS: u32 = 1200;

/// Empty buckets for the last `months_count` months (at most `MAX_MONTHS`),
/// oldest first, the last one being the month of `now`
fn month_window(months_count: usize, now: DateTime<Utc>) -> Vec<MonthlyData> {
    let count = u32::try_from(months_count).unwrap_or(MAX_MONTHS).min(MAX_MONTHS);

    (0..count)
        .rev()
        .filter_map(|back| now.checked_sub_months(Months::new(back)))
        .map(|date| MonthlyData {
            month: date.format("%Y-%m").to_string(),
            value: 0.0,
            label: date.format("%b").to_string(),
        })
        .collect()
}

/// Revenue per month. Rent is assumed monthly and constant, so every bucket
/// holds the current total rent roll.
pub fn get_monthly_revenue_data(
    tenants: &[Tenant],
    months_count: usize,
    now: DateTime<Utc>,
) -> Vec<MonthlyData> {
    let monthly_revenue = calculate_total_revenue(tenants);

    let mut data = month_window(months_count, now);
    for point in data.iter_mut() {
        point.value = monthly_revenue;
    }
    data
}

/// Expenses bucketed by the month of their `date`. Expenses outside the
/// window are ignored.
pub fn get_monthly_expenses_data(
    expenses: &[Expense],
    months_count: usize,
    now: DateTime<Utc>,
) -> Vec<MonthlyData> {
    let mut data = month_window(months_count, now);

    for expense in expenses {
        let month = expense.date.format("%Y-%m").to_string();
        if let Some(point) = data.iter_mut().find(|p| p.month == month) {
            point.value += expense.amount;
        }
    }

    data
}

// ============================================================================
// RANKINGS & BREAKDOWNS
// ============================================================================

/// Highest `limit` expenses, largest first. Ties keep list order.
pub fn get_top_expenses(expenses: &[Expense], limit: usize) -> Vec<ExpenseBreakdownItem> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    sorted
        .into_iter()
        .take(limit)
        .map(|e| ExpenseBreakdownItem {
            id: e.id.clone(),
            description: e.description.clone(),
            amount: e.amount,
            category: e.category,
        })
        .collect()
}

pub fn get_payment_status_breakdown(tenants: &[Tenant]) -> PaymentStatusBreakdown {
    tenants
        .iter()
        .fold(PaymentStatusBreakdown::default(), |mut breakdown, tenant| {
            match tenant.payment_status {
                PaymentStatus::Paid => breakdown.paid += 1,
                PaymentStatus::Pending => breakdown.pending += 1,
                PaymentStatus::Overdue => breakdown.overdue += 1,
            }
            breakdown
        })
}

/// Total spent per category, categories in declaration order, empty ones
/// skipped
pub fn get_category_totals(expenses: &[Expense]) -> Vec<(ExpenseCategory, f64)> {
    ExpenseCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let matching: Vec<&Expense> =
                expenses.iter().filter(|e| e.category == category).collect();
            if matching.is_empty() {
                None
            } else {
                Some((category, matching.iter().map(|e| e.amount).sum::<f64>()))
            }
        })
        .collect()
}

// ============================================================================
// FORMATTING
// ============================================================================

/// "₦1,234,567.89"
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return format!("{}NaN", CURRENCY_SYMBOL);
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{}{}∞", CURRENCY_SYMBOL, sign);
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // "-0.00" is still zero
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", CURRENCY_SYMBOL, sign, grouped, fraction)
}
