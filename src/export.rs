// CSV export of stored lists, one flat row per record

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::entities::{Artisan, Expense, Tenant};

/// Which stored list to export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportList {
    Tenants,
    Expenses,
    Artisans,
}

impl std::str::FromStr for ExportList {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tenants" => Ok(ExportList::Tenants),
            "expenses" => Ok(ExportList::Expenses),
            "contacts" | "artisans" => Ok(ExportList::Artisans),
            other => anyhow::bail!("Unknown list: {}", other),
        }
    }
}

#[derive(Debug, Serialize)]
struct TenantRow<'a> {
    #[serde(rename = "ID")]
    id: &'a str,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Phone")]
    phone_number: &'a str,
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Property")]
    property: String,
    #[serde(rename = "Rent_Amount")]
    rent_amount: f64,
    #[serde(rename = "Due_Date")]
    due_date: String,
    #[serde(rename = "Payment_Status")]
    payment_status: &'static str,
    #[serde(rename = "Notes")]
    notes: &'a str,
}

#[derive(Debug, Serialize)]
struct ExpenseRow<'a> {
    #[serde(rename = "ID")]
    id: &'a str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Paid")]
    is_paid: bool,
    #[serde(rename = "Notes")]
    notes: &'a str,
}

#[derive(Debug, Serialize)]
struct ArtisanRow<'a> {
    #[serde(rename = "ID")]
    id: &'a str,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Trade")]
    trade: &'a str,
    #[serde(rename = "Phone")]
    phone_number: &'a str,
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Notes")]
    notes: &'a str,
}

fn write_rows<W: Write, R: Serialize>(writer: W, rows: impl Iterator<Item = R>) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut written = 0;

    for row in rows {
        wtr.serialize(row).context("Failed to write CSV row")?;
        written += 1;
    }

    wtr.flush()?;
    Ok(written)
}

/// Returns the number of data rows written
pub fn export_tenants_csv<W: Write>(writer: W, tenants: &[Tenant]) -> Result<usize> {
    write_rows(
        writer,
        tenants.iter().map(|t| TenantRow {
            id: &t.id,
            name: &t.name,
            phone_number: &t.phone_number,
            email: t.email.as_deref().unwrap_or(""),
            property: t.property_display(),
            rent_amount: t.rent_amount,
            due_date: t
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            payment_status: t.payment_status.as_str(),
            notes: t.notes.as_deref().unwrap_or(""),
        }),
    )
}

pub fn export_expenses_csv<W: Write>(writer: W, expenses: &[Expense]) -> Result<usize> {
    write_rows(
        writer,
        expenses.iter().map(|e| ExpenseRow {
            id: &e.id,
            date: e.date.format("%Y-%m-%d").to_string(),
            description: &e.description,
            category: e.category.as_str(),
            amount: e.amount,
            is_paid: e.is_paid,
            notes: e.notes.as_deref().unwrap_or(""),
        }),
    )
}

pub fn export_artisans_csv<W: Write>(writer: W, artisans: &[Artisan]) -> Result<usize> {
    write_rows(
        writer,
        artisans.iter().map(|a| ArtisanRow {
            id: &a.id,
            name: &a.name,
            trade: &a.trade,
            phone_number: &a.phone_number,
            email: a.email.as_deref().unwrap_or(""),
            notes: a.notes.as_deref().unwrap_or(""),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ArtisanForm, ExpenseCategory, ExpenseForm, PaymentStatus, TenantForm};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_export_list_names() {
        assert_eq!("tenants".parse::<ExportList>().unwrap(), ExportList::Tenants);
        assert_eq!("expenses".parse::<ExportList>().unwrap(), ExportList::Expenses);
        assert_eq!("contacts".parse::<ExportList>().unwrap(), ExportList::Artisans);
        assert_eq!("artisans".parse::<ExportList>().unwrap(), ExportList::Artisans);

        let err = "bogus".parse::<ExportList>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown list: bogus");
    }

    #[test]
    fn test_export_expenses() {
        let expense = Expense::new(ExpenseForm {
            description: "Borehole repair, pump".to_string(),
            amount: 42000.5,
            category: ExpenseCategory::Repairs,
            date: Utc.with_ymd_and_hms(2024, 4, 9, 0, 0, 0).unwrap(),
            is_paid: true,
            notes: None,
        });

        let mut out = Vec::new();
        let written = export_expenses_csv(&mut out, &[expense.clone()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(written, 1);
        assert_eq!(lines[0], "ID,Date,Description,Category,Amount,Paid,Notes");
        assert_eq!(
            lines[1],
            format!("{},2024-04-09,\"Borehole repair, pump\",repairs,42000.5,true,", expense.id)
        );
    }

    #[test]
    fn test_export_tenants_uses_property_display() {
        let tenant = Tenant::new(TenantForm {
            name: "Ada".to_string(),
            phone_number: "0803".to_string(),
            email: Some("ada@example.com".to_string()),
            property_address: "12 Allen Avenue".to_string(),
            unit_number: Some("3".to_string()),
            rent_amount: 1000.0,
            due_date: None,
            payment_status: PaymentStatus::Paid,
            notes: None,
        });

        let mut out = Vec::new();
        export_tenants_csv(&mut out, &[tenant]).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("\"12 Allen Avenue, Unit 3\""));
        assert!(text.contains(",paid,"));
    }

    #[test]
    fn test_export_artisans_and_empty_lists() {
        let artisan = Artisan::new(ArtisanForm {
            name: "Musa".to_string(),
            trade: "Plumber".to_string(),
            phone_number: "0809".to_string(),
            email: None,
            notes: Some("Fast".to_string()),
        });

        let mut out = Vec::new();
        assert_eq!(export_artisans_csv(&mut out, &[artisan]).unwrap(), 1);
        assert!(String::from_utf8(out).unwrap().ends_with(",Musa,Plumber,0809,,Fast\n"));

        let mut empty = Vec::new();
        assert_eq!(export_expenses_csv(&mut empty, &[]).unwrap(), 0);
    }
}
