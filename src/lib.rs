// Rent Flow - Core Library
// Local property-management data: storage, metrics, migration and letters.
// Used by the CLI and by tests.

pub mod db;
pub mod config;
pub mod entities;
pub mod storage;
pub mod migration;
pub mod analytics;
pub mod dashboard;
pub mod letter;
pub mod validation;
pub mod export;

// Re-export commonly used types
pub use db::{setup_database, KeyValueStore, MemoryStore, SqliteStore};
pub use config::Config;
pub use entities::{
    generate_id,
    Tenant, TenantForm, TenantPatch, PaymentStatus,
    Expense, ExpenseForm, ExpensePatch, ExpenseCategory,
    Artisan, ArtisanForm, ArtisanPatch,
};
pub use storage::{Collection, Patch, Record, Storage};
pub use migration::{check_tenants_migration, migrate_tenants, MigrationReport};
pub use analytics::{
    calculate_net_income, calculate_total_expenses, calculate_total_revenue,
    format_currency, get_category_totals, get_expense_summary, get_monthly_expenses_data,
    get_monthly_revenue_data, get_payment_status_breakdown, get_top_expenses,
    ExpenseBreakdownItem, ExpenseSummary, MonthlyData, PaymentStatusBreakdown,
};
pub use dashboard::{
    calculate_monthly_revenue, calculate_pending_payments, calculate_total_tenants,
    get_recent_activities, ActivityType, DashboardActivity, DashboardSummary,
};
pub use letter::{generate_letter_html, LetterData, LetterTone, LetterToneConfig};
pub use validation::{
    validate_artisan, validate_expense, validate_tenant, ArtisanInput, ExpenseInput,
    TenantInput, ValidationError,
};
pub use export::{export_artisans_csv, export_expenses_csv, export_tenants_csv, ExportList};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
