//! End-to-end scenarios for the grid controller.

use std::sync::{Arc, Mutex};

use rxgrid_lib::grid::{Callbacks, GridConfig, GridController};
use rxgrid_lib::model::{Column, GridRow, Value};
use rxgrid_lib::prefs::{MemoryPrefs, PreferenceStore};
use rxgrid_lib::query::SortOrder;

#[derive(Debug, Clone, PartialEq)]
struct Vendor {
    vendor_no: String,
    name: String,
    email: Option<String>,
    city: String,
}

impl GridRow for Vendor {
    fn id(&self) -> String {
        self.vendor_no.clone()
    }
}

fn columns() -> Vec<Column<Vendor>> {
    vec![
        Column::new("vendor_no", "Vendor No", |v: &Vendor| {
            Value::from(v.vendor_no.as_str())
        }),
        Column::new("name", "Name", |v: &Vendor| Value::from(v.name.as_str())),
        Column::new("email", "Email", |v: &Vendor| {
            Value::from(v.email.clone())
        }),
        Column::new("city", "City", |v: &Vendor| Value::from(v.city.as_str())),
    ]
}

fn vendor(no: usize, name: &str, city: &str) -> Vendor {
    Vendor {
        vendor_no: format!("V-{no:03}"),
        name: name.to_string(),
        email: Some(format!("contact{no}@example.test")),
        city: city.to_string(),
    }
}

fn twelve_vendors() -> Vec<Vendor> {
    (1..=12)
        .map(|i| {
            let city = if i % 4 == 0 { "Basel" } else { "Vienna" };
            vendor(i, &format!("Vendor {i:02}"), city)
        })
        .collect()
}

fn store() -> PreferenceStore {
    PreferenceStore::new(MemoryPrefs::new())
}

async fn mounted(rows: Vec<Vendor>) -> GridController<Vendor> {
    GridController::mount(GridConfig::new("vendors", columns()).rows(rows), store()).await
}

// Scenario 1: filtering narrows the window and resets the page.
#[tokio::test]
async fn filter_narrows_window_and_resets_page() {
    let mut grid = mounted(twelve_vendors()).await;

    assert_eq!(grid.visible_rows().len(), 10);
    assert_eq!(grid.state().pagination.total(), 12);

    grid.change_page(2, 10).await;
    assert_eq!(grid.visible_rows().len(), 2);

    // "Basel" matches vendors 4, 8 and 12.
    grid.set_global_filter("basel");
    assert_eq!(grid.state().pagination.page(), 1);
    assert_eq!(grid.state().pagination.total(), 3);
    assert_eq!(grid.visible_rows().len(), 3);
}

// Scenario 2: a hidden column disappears from exports and comes back.
#[tokio::test]
async fn hidden_column_never_reaches_an_export() {
    let mut grid = mounted(twelve_vendors()).await;

    let before = String::from_utf8(grid.export_csv().unwrap().bytes).unwrap();
    assert!(before.lines().next().unwrap().contains("Email"));

    grid.toggle_column("email").await;
    let artifact = grid.export_csv().unwrap();
    let header = String::from_utf8(artifact.bytes).unwrap();
    assert!(!header.lines().next().unwrap().contains("Email"));
    assert_eq!(artifact.row_count, 12);

    // Spreadsheet export follows the same projection.
    let sheet = grid.export_xlsx().unwrap();
    assert_eq!(&sheet.bytes[..2], b"PK");

    grid.toggle_column("email").await;
    let after = String::from_utf8(grid.export_csv().unwrap().bytes).unwrap();
    assert!(after.lines().next().unwrap().contains("Email"));
}

// Scenario 3: bulk delete receives resolved row objects, not identifiers.
#[tokio::test]
async fn bulk_delete_resolves_full_rows() {
    let received: Arc<Mutex<Vec<Vendor>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);

    let config = GridConfig::new("vendors", columns())
        .rows((1..=20).map(|i| vendor(i, &format!("Vendor {i:02}"), "Vienna")).collect())
        .callbacks(Callbacks::new().on_bulk_delete(move |rows| {
            sink.lock().unwrap().extend(rows);
        }));
    let mut grid = GridController::mount(config, store()).await;

    for id in ["V-001", "V-003", "V-005", "V-007", "V-009"] {
        grid.toggle_row(id);
    }
    let count = grid.bulk_delete();
    assert_eq!(count, 5);

    let rows = received.lock().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].name, "Vendor 01");
    assert!(rows.iter().all(|v| !v.vendor_no.is_empty()));
}

// Scenario 4: a saved page size is restored on a fresh mount.
#[tokio::test]
async fn saved_page_size_survives_remount() {
    let shared = store();

    let mut grid = GridController::mount(
        GridConfig::new("vendors", columns()).rows(twelve_vendors()),
        shared.clone(),
    )
    .await;
    grid.change_page(1, 25).await;
    drop(grid);

    let grid = GridController::mount(
        GridConfig::new("vendors", columns()).rows(twelve_vendors()),
        shared,
    )
    .await;
    assert_eq!(grid.state().pagination.page_size(), 25);
    assert_eq!(grid.visible_rows().len(), 12);
}

#[tokio::test]
async fn selection_is_reset_when_data_is_replaced() {
    let mut grid = mounted(twelve_vendors()).await;
    grid.toggle_row("V-001");
    grid.toggle_row("V-002");
    assert_eq!(grid.selection().len(), 2);

    grid.set_data(twelve_vendors());
    assert!(grid.selection().is_empty());
    assert!(grid.selected_rows().is_empty());
}

#[tokio::test]
async fn select_all_spans_every_filtered_page() {
    let mut grid = mounted(twelve_vendors()).await;
    grid.select_all();
    // All 12 matching rows, not just the 10 on the current page.
    assert_eq!(grid.selection().len(), 12);

    grid.clear_selection();
    grid.set_global_filter("basel");
    grid.select_all();
    assert_eq!(grid.selection().len(), 3);

    grid.invert_selection();
    assert!(grid.selection().is_empty());
}

#[tokio::test]
async fn filtered_out_selection_is_excluded_from_bulk_resolution() {
    let mut grid = mounted(twelve_vendors()).await;
    grid.toggle_row("V-001"); // Vienna
    grid.toggle_row("V-004"); // Basel
    grid.set_global_filter("basel");

    let resolved = grid.selected_rows();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].vendor_no, "V-004");
}

#[tokio::test]
async fn stale_preference_columns_are_dropped_on_mount() {
    let shared = store();
    let mut grid = GridController::mount(
        GridConfig::new("vendors", columns()).rows(twelve_vendors()),
        shared.clone(),
    )
    .await;
    grid.toggle_column("city").await;
    drop(grid);

    // Remount with a schema that no longer has "city".
    let slim: Vec<Column<Vendor>> = columns()
        .into_iter()
        .filter(|c| c.key() != "city")
        .collect();
    let grid =
        GridController::mount(GridConfig::new("vendors", slim).rows(twelve_vendors()), shared)
            .await;

    let keys: Vec<_> = grid
        .effective_columns()
        .iter()
        .map(|c| c.key().to_string())
        .collect();
    assert_eq!(keys, vec!["vendor_no", "name", "email"]);
}

#[tokio::test]
async fn saved_sort_is_restored_and_applied() {
    let shared = store();
    let mut grid = GridController::mount(
        GridConfig::new("vendors", columns()).rows(twelve_vendors()),
        shared.clone(),
    )
    .await;
    grid.set_sort("name", SortOrder::Descend).await;
    drop(grid);

    let grid = GridController::mount(
        GridConfig::new("vendors", columns()).rows(twelve_vendors()),
        shared,
    )
    .await;
    assert_eq!(
        grid.state().sort,
        Some(("name".to_string(), SortOrder::Descend))
    );
    assert_eq!(grid.filtered_rows()[0].name, "Vendor 12");
}

#[tokio::test]
async fn server_mode_passes_rows_through_and_forwards_page_changes() {
    let forwarded: Arc<Mutex<Vec<(usize, usize)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&forwarded);

    let first_page: Vec<Vendor> = (1..=10)
        .map(|i| vendor(i, &format!("Vendor {i:02}"), "Vienna"))
        .collect();
    let config = GridConfig::new("vendors", columns())
        .rows(first_page)
        .server_paging(57)
        .callbacks(Callbacks::new().on_page_change(move |page, size| {
            sink.lock().unwrap().push((page, size));
        }));
    let mut grid = GridController::mount(config, store()).await;

    assert_eq!(grid.state().pagination.total(), 57);
    // No local slicing: the supplied rows are rendered as-is.
    assert_eq!(grid.visible_rows().len(), 10);

    grid.change_page(3, 10).await;
    assert_eq!(forwarded.lock().unwrap().as_slice(), &[(3, 10)]);
}

#[tokio::test]
async fn absent_callbacks_omit_affordances() {
    let grid = mounted(twelve_vendors()).await;
    let actions = grid.actions();
    assert!(!actions.add);
    assert!(!actions.delete);
    assert!(!actions.bulk_delete);

    // Without a callback, bulk delete is a no-op.
    let mut grid = grid;
    grid.select_all();
    assert_eq!(grid.bulk_delete(), 0);
}

#[tokio::test]
async fn pdf_selection_only_mode_exports_just_the_selection() {
    let mut grid = mounted(twelve_vendors()).await;
    grid.toggle_row("V-002");
    grid.toggle_row("V-006");

    let artifact = grid
        .export_pdf(
            rxgrid_lib::export::PdfOptions::new("Vendors").subtitle("selected rows"),
            true,
        )
        .unwrap();
    assert_eq!(artifact.row_count, 2);
    assert_eq!(&artifact.bytes[..5], b"%PDF-");
    assert!(artifact.file_name.ends_with(".pdf"));
}

#[tokio::test]
async fn background_pdf_export_can_be_cancelled() {
    let grid = mounted(twelve_vendors()).await;

    let task = grid.spawn_pdf_export(rxgrid_lib::export::PdfOptions::new("Vendors"), false);
    let artifact = task.join().await.unwrap();
    assert_eq!(artifact.row_count, 12);

    let task = grid.spawn_pdf_export(rxgrid_lib::export::PdfOptions::new("Vendors"), false);
    task.cancel();
    // Either the worker saw the cancellation, or it had already finished.
    match task.join().await {
        Ok(artifact) => assert_eq!(&artifact.bytes[..5], b"%PDF-"),
        Err(e) => assert!(matches!(e, rxgrid_lib::export::ExportError::Cancelled)),
    }
}

#[tokio::test]
async fn print_markup_reflects_the_current_view() {
    let mut grid = mounted(twelve_vendors()).await;
    grid.set_global_filter("basel");
    grid.toggle_column("email").await;

    let html = grid.print_markup("Vendors", Some("Basel only"));
    assert!(html.contains("<h1>Vendors</h1>"));
    assert!(!html.contains("<th>Email</th>"));
    assert!(html.contains("Vendor 04"));
    assert!(!html.contains("Vendor 01"));
}
