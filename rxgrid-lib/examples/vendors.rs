//! Drives a vendor grid end to end: mount, filter, select, export.
//!
//! Run with `cargo run --example vendors`.

use std::fs::File;

use simplelog::{Config, LevelFilter, WriteLogger};

use rxgrid_lib::export::PdfOptions;
use rxgrid_lib::grid::{Callbacks, GridConfig, GridController};
use rxgrid_lib::model::{Column, GridRow, Money, Value};
use rxgrid_lib::prefs::{MemoryPrefs, PreferenceStore};
use rxgrid_lib::query::SortOrder;

#[derive(Debug, Clone)]
struct Vendor {
    vendor_no: String,
    name: String,
    city: String,
    balance: Money,
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
        })
        .width(12),
        Column::new("name", "Name", |v: &Vendor| Value::from(v.name.as_str())).width(30),
        Column::new("city", "City", |v: &Vendor| Value::from(v.city.as_str())).width(16),
        Column::new("balance", "Balance", |v: &Vendor| Value::from(v.balance)).width(12),
    ]
}

fn vendors() -> Vec<Vendor> {
    [
        ("V-001", "Contoso Pharma", "Basel", 12_500),
        ("V-002", "Helvetia Medical", "Zurich", 0),
        ("V-003", "Danube Biotech", "Vienna", 4_200),
        ("V-004", "Rhine Labs", "Basel", 860),
    ]
    .into_iter()
    .map(|(no, name, city, balance)| Vendor {
        vendor_no: no.to_string(),
        name: name.to_string(),
        city: city.to_string(),
        balance: Money::from_int(balance),
    })
    .collect()
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Set up file logging
    let log_file = File::create("vendors.log").expect("create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let config = GridConfig::new("vendors", columns())
        .rows(vendors())
        .callbacks(Callbacks::new().on_view(|v: &Vendor| println!("view {}", v.vendor_no)));
    let mut grid = GridController::mount(config, PreferenceStore::new(MemoryPrefs::new())).await;

    grid.set_sort("name", SortOrder::Ascend).await;
    grid.set_global_filter("basel");
    println!("{} vendors match", grid.state().pagination.total());

    for row in grid.visible_rows() {
        println!(
            "  {}  {}  {}",
            row.vendor_no,
            row.name,
            row.balance.value()
        );
    }

    let csv = grid.export_csv().expect("csv export");
    println!("{} -> {} bytes", csv.file_name, csv.bytes.len());

    grid.select_all();
    let pdf = grid
        .export_pdf(PdfOptions::new("Vendors").subtitle("Basel only"), true)
        .expect("pdf export");
    println!("{} -> {} bytes", pdf.file_name, pdf.bytes.len());
}
