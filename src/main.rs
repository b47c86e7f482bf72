use anyhow::{bail, Context, Result};
use chrono::Utc;
use std::env;
use std::fs::File;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Use library instead of local modules
use rent_flow::analytics::{DEFAULT_MONTHS, DEFAULT_TOP_EXPENSES};
use rent_flow::entities::{artisan, expense, tenant};
use rent_flow::{
    calculate_net_income, calculate_total_expenses, calculate_total_revenue, export_artisans_csv,
    export_expenses_csv, export_tenants_csv, format_currency, generate_letter_html,
    get_expense_summary, get_monthly_expenses_data, get_monthly_revenue_data,
    get_payment_status_breakdown, get_top_expenses, migrate_tenants, Config, DashboardSummary,
    ExportList, LetterData, LetterTone, SqliteStore, Storage,
};

const USAGE: &str = "Usage: rent-flow <command>

Commands:
  dashboard                                   Headline figures and recent activity
  analytics                                   Revenue/expense series and breakdowns
  tenants                                     List tenants by name
  expenses                                    List expenses, newest first
  contacts                                    List artisans by name
  letter <tenant-id> [tone] [out.html]        Render a payment reminder
  export <tenants|expenses|contacts> <file>   Write a list to CSV
  migrate                                     Repair stored tenant records
  reset                                       Delete all stored data";

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rent_flow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();
    let cfg = Config::load();

    tracing::debug!("Database: {}", cfg.db_path.display());
    let storage = Storage::new(SqliteStore::open(&cfg.db_path)?);

    // Data repair always runs before anything reads tenants
    let report = migrate_tenants(&storage);
    if !report.success {
        tracing::warn!("Tenant migration failed; tenant data may be incomplete");
    }

    let command = args.get(1).map(String::as_str).unwrap_or("dashboard");
    match command {
        "dashboard" => run_dashboard(&storage),
        "analytics" => run_analytics(&storage),
        "tenants" => run_list_tenants(&storage),
        "expenses" => run_list_expenses(&storage),
        "contacts" => run_list_contacts(&storage),
        "letter" => run_letter(&storage, &cfg, &args[2..]),
        "export" => run_export(&storage, &args[2..]),
        "migrate" => {
            println!(
                "✓ Migration: {} of {} tenants updated",
                report.migrated_count, report.total_count
            );
            Ok(())
        }
        "reset" => {
            if !storage.clear_all_data() {
                bail!("Failed to clear data");
            }
            println!("✓ All data cleared");
            Ok(())
        }
        "help" | "--help" | "-h" => {
            println!("{}", USAGE);
            Ok(())
        }
        other => {
            eprintln!("❌ Unknown command: {}\n", other);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

fn run_dashboard(storage: &Storage<SqliteStore>) -> Result<()> {
    let tenants = storage.tenants().get_all();
    let expenses = storage.expenses().get_all();
    let summary = DashboardSummary::compute(&tenants, &expenses);

    println!("🏠 Dashboard - {}", Utc::now().format("%A, %B %d, %Y"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Total tenants:     {}", summary.total_tenants);
    println!("Pending payments:  {}", summary.pending_payments);
    println!("Monthly revenue:   {}", format_currency(summary.monthly_revenue));
    println!("Total expenses:    {}", format_currency(summary.total_expenses));

    println!("\nRecent activity:");
    if summary.recent_activities.is_empty() {
        println!("  (nothing yet)");
    }
    for activity in &summary.recent_activities {
        println!("  {}  {}", activity.date.format("%b %d, %Y"), activity.description);
    }

    Ok(())
}

fn run_analytics(storage: &Storage<SqliteStore>) -> Result<()> {
    let tenants = storage.tenants().get_all();
    let expenses = storage.expenses().get_all();
    let now = Utc::now();

    let revenue = calculate_total_revenue(&tenants);
    let spent = calculate_total_expenses(&expenses);

    println!("📈 Analytics");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Total revenue:  {}", format_currency(revenue));
    println!("Total expenses: {}", format_currency(spent));
    println!("Net income:     {}", format_currency(calculate_net_income(revenue, spent)));

    println!("\nMonth     Revenue            Expenses");
    let revenue_series = get_monthly_revenue_data(&tenants, DEFAULT_MONTHS, now);
    let expense_series = get_monthly_expenses_data(&expenses, DEFAULT_MONTHS, now);
    for (rev, exp) in revenue_series.iter().zip(expense_series.iter()) {
        println!(
            "{} {}  {:>16}  {:>16}",
            rev.label,
            rev.month,
            format_currency(rev.value),
            format_currency(exp.value)
        );
    }

    println!("\nTop expenses:");
    for item in get_top_expenses(&expenses, DEFAULT_TOP_EXPENSES) {
        println!(
            "  {:<30} {:<12} {}",
            item.description,
            item.category.label(),
            format_currency(item.amount)
        );
    }

    let status = get_payment_status_breakdown(&tenants);
    println!(
        "\nPayment status: {} paid, {} pending, {} overdue",
        status.paid, status.pending, status.overdue
    );

    let summary = get_expense_summary(&expenses);
    println!(
        "Expenses: {} paid ({}), {} unpaid ({})",
        summary.paid_count,
        format_currency(summary.paid),
        summary.unpaid_count,
        format_currency(summary.unpaid)
    );

    Ok(())
}

fn run_list_tenants(storage: &Storage<SqliteStore>) -> Result<()> {
    let mut tenants = storage.tenants().get_all();
    tenant::sort_by_name(&mut tenants);

    println!("👥 {} tenants", tenants.len());
    for t in &tenants {
        println!(
            "  {:<24} {:<8} {:>16}  {}  [{}]",
            t.name,
            t.payment_status.label(),
            format_currency(t.rent_amount),
            t.property_display(),
            t.id
        );
    }

    Ok(())
}

fn run_list_expenses(storage: &Storage<SqliteStore>) -> Result<()> {
    let mut expenses = storage.expenses().get_all();
    expense::sort_newest_first(&mut expenses);

    println!("🧾 {} expenses", expenses.len());
    for e in &expenses {
        println!(
            "  {}  {:<30} {:<12} {:>16}  {}",
            e.date.format("%Y-%m-%d"),
            e.description,
            e.category.label(),
            format_currency(e.amount),
            if e.is_paid { "paid" } else { "unpaid" }
        );
    }

    Ok(())
}

fn run_list_contacts(storage: &Storage<SqliteStore>) -> Result<()> {
    let mut artisans = storage.artisans().get_all();
    artisan::sort_by_name(&mut artisans);

    println!("🔧 {} contacts", artisans.len());
    for a in &artisans {
        println!(
            "  {:<24} {:<16} {}{}",
            a.name,
            a.trade,
            a.phone_number,
            a.email.as_deref().map(|e| format!("  {}", e)).unwrap_or_default()
        );
    }

    Ok(())
}

fn run_letter(storage: &Storage<SqliteStore>, cfg: &Config, args: &[String]) -> Result<()> {
    let Some(tenant_id) = args.first() else {
        bail!("letter needs a tenant id\n\n{}", USAGE);
    };

    let tenant = storage
        .tenants()
        .get_by_id(tenant_id)
        .with_context(|| format!("Tenant not found: {}", tenant_id))?;

    let tone = match args.get(1) {
        Some(tone) => tone.parse::<LetterTone>()?,
        None => LetterTone::Friendly,
    };

    let mut data = LetterData::new(&tenant, tone);
    data.landlord_name = cfg.landlord_name.clone();
    data.landlord_contact = cfg.landlord_contact.clone();

    let html = generate_letter_html(&data, Utc::now().date_naive());

    match args.get(2) {
        Some(out) => {
            std::fs::write(out, &html).with_context(|| format!("Failed to write {}", out))?;
            println!("✓ {} for {} written to {}", tone.config().label, tenant.name, out);
        }
        None => println!("{}", html),
    }

    Ok(())
}

fn run_export(storage: &Storage<SqliteStore>, args: &[String]) -> Result<()> {
    let (Some(kind), Some(out)) = (args.first(), args.get(1)) else {
        bail!("export needs a list name and an output file\n\n{}", USAGE);
    };

    // Resolve the list before touching the output file
    let list: ExportList = kind.parse()?;
    let file = File::create(Path::new(out)).with_context(|| format!("Failed to create {}", out))?;

    let written = match list {
        ExportList::Tenants => export_tenants_csv(file, &storage.tenants().get_all())?,
        ExportList::Expenses => export_expenses_csv(file, &storage.expenses().get_all())?,
        ExportList::Artisans => export_artisans_csv(file, &storage.artisans().get_all())?,
    };

    println!("✓ Exported {} {} to {}", written, kind, out);
    Ok(())
}
