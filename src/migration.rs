// 🔁 Tenant migration - backfill payment status
//
// Older tenant records were written before `paymentStatus` existed, or with a
// value outside paid/pending/overdue. The typed model refuses those records,
// so the migration works on the raw JSON list. Run once at startup; a second
// run finds nothing to fix and writes nothing.

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::KeyValueStore;
use crate::entities::{PaymentStatus, Tenant};
use crate::storage::{load_raw, save_raw, Record, Storage};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationReport {
    pub success: bool,
    pub migrated_count: usize,
    pub total_count: usize,
}

impl MigrationReport {
    fn failed() -> Self {
        MigrationReport {
            success: false,
            migrated_count: 0,
            total_count: 0,
        }
    }
}

/// True when the record has no usable payment status
fn needs_status_backfill(tenant: &Value) -> bool {
    match tenant.get("paymentStatus").and_then(Value::as_str) {
        Some(status) => status.parse::<PaymentStatus>().is_err(),
        None => true,
    }
}

/// Backfill missing or invalid `paymentStatus` with the default (pending)
pub fn migrate_tenants<S: KeyValueStore>(storage: &Storage<S>) -> MigrationReport {
    match run_migration(storage.store()) {
        Ok(report) => {
            if report.migrated_count > 0 {
                tracing::info!(
                    "Migrated {} out of {} tenants",
                    report.migrated_count,
                    report.total_count
                );
            }
            report
        }
        Err(e) => {
            tracing::error!("Error migrating tenants: {:#}", e);
            MigrationReport::failed()
        }
    }
}

fn run_migration<S: KeyValueStore>(store: &S) -> Result<MigrationReport> {
    let mut tenants = load_raw(store, Tenant::STORAGE_KEY)?;
    let now = Utc::now().to_rfc3339();
    let mut migrated_count = 0;

    for tenant in tenants.iter_mut() {
        if !needs_status_backfill(tenant) {
            continue;
        }

        // Non-object entries cannot be repaired, leave them for the typed
        // reader to reject
        let Some(fields) = tenant.as_object_mut() else {
            continue;
        };

        fields.insert(
            "paymentStatus".to_string(),
            Value::String(PaymentStatus::default().as_str().to_string()),
        );
        fields.insert("updatedAt".to_string(), Value::String(now.clone()));
        migrated_count += 1;
    }

    if migrated_count > 0 {
        save_raw(store, Tenant::STORAGE_KEY, &tenants)?;
    }

    Ok(MigrationReport {
        success: true,
        migrated_count,
        total_count: tenants.len(),
    })
}

/// Whether any stored tenant still needs `migrate_tenants`
pub fn check_tenants_migration<S: KeyValueStore>(storage: &Storage<S>) -> bool {
    match load_raw(storage.store(), Tenant::STORAGE_KEY) {
        Ok(tenants) => tenants
            .iter()
            .any(|t| t.is_object() && needs_status_backfill(t)),
        Err(e) => {
            tracing::error!("Error checking tenants migration: {:#}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use serde_json::json;
    use std::cell::Cell;

    /// Memory store that counts writes
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: Cell<usize>,
    }

    impl KeyValueStore for CountingStore {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<()> {
            self.writes.set(self.writes.get() + 1);
            self.inner.set_item(key, value)
        }

        fn remove_items(&self, keys: &[&str]) -> Result<()> {
            self.inner.remove_items(keys)
        }
    }

    fn legacy_tenant(id: &str, status: Option<Value>) -> Value {
        let mut tenant = json!({
            "id": id,
            "name": format!("Tenant {}", id),
            "phoneNumber": "0803",
            "propertyAddress": "1 Broad Street",
            "rentAmount": 50000.0,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        });
        if let Some(status) = status {
            tenant["paymentStatus"] = status;
        }
        tenant
    }

    fn seeded(tenants: Vec<Value>) -> Storage<CountingStore> {
        let store = CountingStore::default();
        store
            .inner
            .set_item(Tenant::STORAGE_KEY, &serde_json::to_string(&tenants).unwrap())
            .unwrap();
        Storage::new(store)
    }

    #[test]
    fn test_backfills_missing_and_invalid_status() {
        let storage = seeded(vec![
            legacy_tenant("1", None),
            legacy_tenant("2", Some(json!("paid"))),
            legacy_tenant("3", Some(json!("late"))),
            legacy_tenant("4", Some(json!(7))),
        ]);

        assert!(check_tenants_migration(&storage));

        let report = migrate_tenants(&storage);
        assert_eq!(
            report,
            MigrationReport {
                success: true,
                migrated_count: 3,
                total_count: 4
            }
        );
        assert_eq!(storage.store().writes.get(), 1);

        // Every record now loads through the typed model
        let tenants = storage.tenants().get_all();
        assert_eq!(tenants.len(), 4);
        let statuses: Vec<PaymentStatus> = tenants.iter().map(|t| t.payment_status).collect();
        assert_eq!(
            statuses,
            vec![
                PaymentStatus::Pending,
                PaymentStatus::Paid,
                PaymentStatus::Pending,
                PaymentStatus::Pending
            ]
        );

        // Untouched record keeps its timestamp, repaired ones get a new one
        assert_eq!(tenants[1].updated_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert!(tenants[0].updated_at > tenants[1].updated_at);
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let storage = seeded(vec![legacy_tenant("1", None), legacy_tenant("2", None)]);

        let first = migrate_tenants(&storage);
        let after_first = storage.store().get_item(Tenant::STORAGE_KEY).unwrap();
        let second = migrate_tenants(&storage);
        let after_second = storage.store().get_item(Tenant::STORAGE_KEY).unwrap();

        assert_eq!(first.migrated_count, 2);
        assert_eq!(second.migrated_count, 0);
        assert_eq!(second.total_count, 2);
        assert!(second.success);
        assert_eq!(after_first, after_second);
        assert_eq!(storage.store().writes.get(), 1);
        assert!(!check_tenants_migration(&storage));
    }

    #[test]
    fn test_empty_store_needs_nothing() {
        let storage = Storage::new(CountingStore::default());

        let report = migrate_tenants(&storage);

        assert!(report.success);
        assert_eq!(report.total_count, 0);
        assert_eq!(storage.store().writes.get(), 0);
    }

    #[test]
    fn test_unparseable_list_reports_failure() {
        let store = CountingStore::default();
        store.inner.set_item(Tenant::STORAGE_KEY, "not json").unwrap();
        let storage = Storage::new(store);

        let report = migrate_tenants(&storage);

        assert!(!report.success);
        assert_eq!(report.migrated_count, 0);
        assert_eq!(storage.store().writes.get(), 0);
    }
}
