// 🔧 Artisan Entity - service-provider contacts
//
// Plumbers, electricians, painters... A plain contact card with a trade.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::generate_id;
use crate::storage::{Patch, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artisan {
    pub id: String,
    pub name: String,

    /// Free text, e.g. "Plumber", "Electrician"
    pub trade: String,

    pub phone_number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtisanForm {
    pub name: String,
    pub trade: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl Artisan {
    pub fn new(form: ArtisanForm) -> Self {
        let now = Utc::now();

        Artisan {
            id: generate_id(),
            name: form.name,
            trade: form.trade,
            phone_number: form.phone_number,
            email: form.email,
            notes: form.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Artisan {
    const STORAGE_KEY: &'static str = "@RentFlowHQ:artisans";
    const KIND: &'static str = "artisan";

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtisanPatch {
    pub name: Option<String>,
    pub trade: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl From<ArtisanForm> for ArtisanPatch {
    fn from(form: ArtisanForm) -> Self {
        ArtisanPatch {
            name: Some(form.name),
            trade: Some(form.trade),
            phone_number: Some(form.phone_number),
            email: Some(form.email),
            notes: Some(form.notes),
        }
    }
}

impl Patch<Artisan> for ArtisanPatch {
    fn apply(self, artisan: &mut Artisan) {
        if let Some(name) = self.name {
            artisan.name = name;
        }
        if let Some(trade) = self.trade {
            artisan.trade = trade;
        }
        if let Some(phone_number) = self.phone_number {
            artisan.phone_number = phone_number;
        }
        if let Some(email) = self.email {
            artisan.email = email;
        }
        if let Some(notes) = self.notes {
            artisan.notes = notes;
        }
    }
}

pub fn sort_by_name(artisans: &mut [Artisan]) {
    artisans.sort_by_key(|a| a.name.to_lowercase());
}
