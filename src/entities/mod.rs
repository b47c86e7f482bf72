// Entity Models
//
// Each entity has:
// - Caller-generated identity (`generate_id`) that never changes
// - A form type (fields a user edits) and a patch type (partial update)
// - A fixed storage key, one JSON list per entity

pub mod tenant;
pub mod expense;
pub mod artisan;

pub use tenant::{PaymentStatus, Tenant, TenantForm, TenantPatch};
pub use expense::{Expense, ExpenseCategory, ExpenseForm, ExpensePatch};
pub use artisan::{Artisan, ArtisanForm, ArtisanPatch};

use chrono::Utc;

/// Record id: "<unix-millis>-<7 random chars>"
///
/// Not collision-proof, but two records would need the same millisecond and
/// the same random suffix.
pub fn generate_id() -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", Utc::now().timestamp_millis(), &random[..7])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        let (millis, suffix) = id.split_once('-').unwrap();

        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), 7);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_id_unique() {
        let ids: std::collections::HashSet<String> = (0..100).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 100);
    }
}
