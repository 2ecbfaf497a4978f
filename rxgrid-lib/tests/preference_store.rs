//! Durability tests for the SQLite preference backend.

use rxgrid_lib::prefs::{PreferencePatch, PreferenceStore, SqlitePrefs};
use rxgrid_lib::query::SortOrder;

#[tokio::test]
async fn preferences_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("preferences.db");

    {
        let store = PreferenceStore::new(SqlitePrefs::new(&db).await.unwrap());
        store
            .save(
                "purchase_orders",
                PreferencePatch::new()
                    .visible_columns(vec!["po_no".into(), "vendor".into(), "total".into()])
                    .page_size(25)
                    .sort("po_no", SortOrder::Descend),
            )
            .await;
    }

    // Fresh client on the same file simulates a process restart.
    let store = PreferenceStore::new(SqlitePrefs::new(&db).await.unwrap());
    let prefs = store.load("purchase_orders").await.expect("durable record");
    assert_eq!(prefs.page_size, Some(25));
    assert_eq!(
        prefs.visible_columns,
        Some(vec![
            "po_no".to_string(),
            "vendor".to_string(),
            "total".to_string()
        ])
    );
    assert_eq!(prefs.sort_field.as_deref(), Some("po_no"));
    assert_eq!(prefs.sort_order, Some(SortOrder::Descend));
}

#[tokio::test]
async fn merge_on_disk_preserves_unpatched_fields() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("preferences.db");

    let store = PreferenceStore::new(SqlitePrefs::new(&db).await.unwrap());
    store
        .save("invoices", PreferencePatch::new().page_size(50))
        .await;
    store
        .save(
            "invoices",
            PreferencePatch::new().visible_columns(vec!["invoice_no".into()]),
        )
        .await;

    let prefs = store.load("invoices").await.unwrap();
    assert_eq!(prefs.page_size, Some(50));
    assert_eq!(prefs.visible_columns, Some(vec!["invoice_no".to_string()]));
}
