// ✉️ Payment reminder letters
//
// Renders a tenant + tone into a self-contained HTML page. Printing or
// converting to PDF is left to the caller.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::analytics::CURRENCY_SYMBOL;
use crate::entities::Tenant;

const DATE_FORMAT: &str = "%B %d, %Y";
const DEFAULT_LANDLORD: &str = "Property Management";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterTone {
    Friendly,
    Formal,
    Urgent,
}

/// Display metadata for the tone picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterToneConfig {
    pub label: &'static str,
    pub description: &'static str,
    /// Accent color, hex
    pub color: &'static str,
}

impl LetterTone {
    pub const ALL: [LetterTone; 3] = [LetterTone::Friendly, LetterTone::Formal, LetterTone::Urgent];

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterTone::Friendly => "friendly",
            LetterTone::Formal => "formal",
            LetterTone::Urgent => "urgent",
        }
    }

    pub fn config(&self) -> LetterToneConfig {
        match self {
            LetterTone::Friendly => LetterToneConfig {
                label: "Friendly Reminder",
                description: "Warm and courteous tone",
                color: "#22C55E",
            },
            LetterTone::Formal => LetterToneConfig {
                label: "Formal Notice",
                description: "Professional and official tone",
                color: "#4F46E5",
            },
            LetterTone::Urgent => LetterToneConfig {
                label: "Urgent Notice",
                description: "Firm and direct tone",
                color: "#F43F5E",
            },
        }
    }

    /// Body paragraph used when the caller gives no custom message
    pub fn default_message(&self) -> &'static str {
        match self {
            LetterTone::Friendly => "I hope this letter finds you well. This is a friendly reminder that your rent payment is due soon. We appreciate your continued tenancy and look forward to receiving your payment.",
            LetterTone::Formal => "This letter serves as a formal reminder regarding your upcoming rent payment. As per your lease agreement, payment is due on the specified date. We kindly request your prompt attention to this matter.",
            LetterTone::Urgent => "This is an urgent reminder regarding your overdue rent payment. Immediate payment is required to avoid any further action. Please contact us immediately to discuss payment arrangements if needed.",
        }
    }
}

impl FromStr for LetterTone {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        LetterTone::ALL
            .into_iter()
            .find(|tone| tone.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown letter tone: {}", s))
    }
}

/// Everything one letter is built from
#[derive(Debug, Clone)]
pub struct LetterData<'a> {
    pub tenant: &'a Tenant,
    pub tone: LetterTone,
    pub custom_message: Option<String>,
    pub landlord_name: Option<String>,
    pub landlord_contact: Option<String>,
}

impl<'a> LetterData<'a> {
    pub fn new(tenant: &'a Tenant, tone: LetterTone) -> Self {
        LetterData {
            tenant,
            tone,
            custom_message: None,
            landlord_name: None,
            landlord_contact: None,
        }
    }

    /// Custom message if set and not empty, else the tone default.
    /// Whitespace is kept as written.
    pub fn message(&self) -> &str {
        match self.custom_message.as_deref() {
            Some(message) if !message.is_empty() => message,
            _ => self.tone.default_message(),
        }
    }

    pub fn landlord(&self) -> &str {
        non_empty(self.landlord_name.as_deref()).unwrap_or(DEFAULT_LANDLORD)
    }

    /// Landlord contact, falling back to the tenant's phone
    pub fn contact(&self) -> Option<&str> {
        non_empty(self.landlord_contact.as_deref())
            .or_else(|| non_empty(Some(self.tenant.phone_number.as_str())))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Minimal escaping for text placed inside HTML elements
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const LETTER_STYLES: &str = r#"
      * { margin: 0; padding: 0; box-sizing: border-box; }
      body {
        font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif;
        font-size: 12pt;
        line-height: 1.6;
        color: #0F172A;
        padding: 40px 60px;
        background: white;
      }
      .header { margin-bottom: 30px; padding-bottom: 20px; border-bottom: 2px solid #4F46E5; }
      .title { font-size: 20pt; font-weight: bold; color: #4F46E5; margin-bottom: 5px; }
      .subtitle { font-size: 10pt; color: #64748B; }
      .date { margin-bottom: 30px; font-size: 11pt; color: #64748B; }
      .recipient { margin-bottom: 30px; }
      .recipient-name { font-weight: bold; font-size: 13pt; margin-bottom: 5px; }
      .recipient-address { color: #64748B; font-size: 11pt; }
      .subject { margin-bottom: 25px; padding: 15px; background: #F1F5F9; border-left: 4px solid #4F46E5; }
      .subject-label { font-weight: bold; font-size: 11pt; margin-bottom: 5px; }
      .subject-text { font-size: 12pt; }
      .salutation { margin-bottom: 20px; font-size: 12pt; }
      .body-text { margin-bottom: 20px; text-align: justify; line-height: 1.8; }
      .details-box { margin: 25px 0; padding: 20px; background: #F8FAFC; border: 1px solid #E2E8F0; border-radius: 8px; }
      .details-title { font-weight: bold; font-size: 13pt; margin-bottom: 15px; color: #1E293B; }
      .detail-row { display: flex; justify-content: space-between; padding: 8px 0; border-bottom: 1px solid #E2E8F0; }
      .detail-row:last-child { border-bottom: none; }
      .detail-label { font-weight: 600; color: #64748B; font-size: 11pt; }
      .detail-value { font-weight: bold; color: #0F172A; font-size: 11pt; }
      .amount { font-size: 16pt; color: #4F46E5; font-weight: bold; }
      .closing { margin-top: 30px; margin-bottom: 15px; }
      .signature { margin-top: 40px; }
      .signature-name { font-weight: bold; font-size: 12pt; margin-bottom: 3px; }
      .signature-title { color: #64748B; font-size: 10pt; margin-bottom: 10px; }
      .contact-info { color: #64748B; font-size: 10pt; }
      .footer { margin-top: 50px; padding-top: 20px; border-top: 1px solid #E2E8F0; text-align: center; color: #94A3B8; font-size: 9pt; }
      @media print { body { padding: 20px; } }
"#;

/// Full HTML document for a payment reminder dated `today`
pub fn generate_letter_html(data: &LetterData<'_>, today: NaiveDate) -> String {
    let tenant = data.tenant;

    let today = today.format(DATE_FORMAT).to_string();
    let due_date = tenant
        .due_date
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "Not specified".to_string());

    let name = escape_html(&tenant.name);
    let property = escape_html(&tenant.property_display());
    let message = escape_html(data.message());
    let landlord = escape_html(data.landlord());
    let contact_line = data
        .contact()
        .map(|contact| {
            format!(
                r#"<div class="contact-info">Contact: {}</div>"#,
                escape_html(contact)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>{styles}</style>
  </head>
  <body>
    <div class="header">
      <div class="title">Payment Reminder Notice</div>
      <div class="subtitle">Rent Flow HQ - Property Management</div>
    </div>

    <div class="date">{today}</div>

    <div class="recipient">
      <div class="recipient-name">{name}</div>
      <div class="recipient-address">{property}</div>
    </div>

    <div class="subject">
      <div class="subject-label">RE:</div>
      <div class="subject-text">Rent Payment Reminder</div>
    </div>

    <div class="salutation">Dear {name},</div>

    <div class="body-text">
      {message}
    </div>

    <div class="details-box">
      <div class="details-title">Payment Details</div>
      <div class="detail-row">
        <span class="detail-label">Property Address:</span>
        <span class="detail-value">{property}</span>
      </div>
      <div class="detail-row">
        <span class="detail-label">Rent Amount:</span>
        <span class="detail-value amount">{currency}{rent:.2}</span>
      </div>
      <div class="detail-row">
        <span class="detail-label">Due Date:</span>
        <span class="detail-value">{due_date}</span>
      </div>
    </div>

    <div class="body-text">
      Please ensure payment is made by the due date to avoid any late fees.
      If you have any questions or concerns regarding this payment, please do not hesitate to contact us.
    </div>

    <div class="closing">
      Thank you for your prompt attention to this matter.
    </div>

    <div class="closing">
      Sincerely,
    </div>

    <div class="signature">
      <div class="signature-name">{landlord}</div>
      <div class="signature-title">Property Manager</div>
      {contact_line}
    </div>

    <div class="footer">
      This document was generated on {today} using Rent Flow HQ
    </div>
  </body>
</html>"#,
        styles = LETTER_STYLES,
        today = today,
        name = name,
        property = property,
        message = message,
        currency = CURRENCY_SYMBOL,
        rent = tenant.rent_amount,
        due_date = due_date,
        landlord = landlord,
        contact_line = contact_line,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{PaymentStatus, TenantForm};
    use chrono::{TimeZone, Utc};

    fn tenant() -> Tenant {
        Tenant::new(TenantForm {
            name: "Ngozi Eze".to_string(),
            phone_number: "08012345678".to_string(),
            email: None,
            property_address: "7 Awolowo Road".to_string(),
            unit_number: Some("2A".to_string()),
            rent_amount: 250000.0,
            due_date: Some(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()),
            payment_status: PaymentStatus::Overdue,
            notes: None,
        })
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()
    }

    #[test]
    fn test_letter_contains_tenant_details() {
        let tenant = tenant();
        let html = generate_letter_html(&LetterData::new(&tenant, LetterTone::Formal), today());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("June 05, 2024"));
        assert!(html.contains("Dear Ngozi Eze,"));
        assert!(html.contains("7 Awolowo Road, Unit 2A"));
        assert!(html.contains("₦250000.00"));
        assert!(html.contains("July 01, 2024"));
        assert!(html.contains(LetterTone::Formal.default_message()));
        assert!(html.contains("Property Management"));
        // Contact falls back to the tenant's phone
        assert!(html.contains("Contact: 08012345678"));
    }

    #[test]
    fn test_custom_message_and_landlord() {
        let tenant = tenant();
        let mut data = LetterData::new(&tenant, LetterTone::Urgent);
        data.custom_message = Some("Please pay by Friday.".to_string());
        data.landlord_name = Some("Kunle Ade".to_string());
        data.landlord_contact = Some("kunle@example.com".to_string());

        let html = generate_letter_html(&data, today());

        assert!(html.contains("Please pay by Friday."));
        assert!(!html.contains(LetterTone::Urgent.default_message()));
        assert!(html.contains("Kunle Ade"));
        assert!(html.contains("Contact: kunle@example.com"));
    }

    #[test]
    fn test_empty_custom_message_uses_default() {
        let tenant = tenant();
        let mut data = LetterData::new(&tenant, LetterTone::Friendly);
        data.custom_message = Some(String::new());
        assert_eq!(data.message(), LetterTone::Friendly.default_message());

        data.custom_message = Some("   ".to_string());
        assert_eq!(data.message(), "   ");
    }

    #[test]
    fn test_missing_due_date_and_contact() {
        let mut tenant = tenant();
        tenant.due_date = None;
        tenant.phone_number = String::new();

        let html = generate_letter_html(&LetterData::new(&tenant, LetterTone::Friendly), today());

        assert!(html.contains("Not specified"));
        assert!(!html.contains("contact-info\">"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut tenant = tenant();
        tenant.name = "<script>alert('x')</script>".to_string();

        let html = generate_letter_html(&LetterData::new(&tenant, LetterTone::Formal), today());

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn test_tone_parsing_and_config() {
        assert_eq!("urgent".parse::<LetterTone>().unwrap(), LetterTone::Urgent);
        assert!("angry".parse::<LetterTone>().is_err());
        assert_eq!(LetterTone::Formal.config().label, "Formal Notice");
        assert_eq!(LetterTone::Friendly.config().color, "#22C55E");
    }
}
