//! Output formatting module

use stockroom_app::importer::ImportReport;
use stockroom_types::{OutputFormat, Result};

pub fn print_import_report(format: OutputFormat, report: &ImportReport) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("\nImport Report");
    println!("=============");
    println!("Dataset:           {}", report.dataset.unwrap_or("none"));
    println!("Imported at:       {}", report.imported_at.to_rfc3339());
    if report.cleared_inventory {
        println!("Cleared previous inventory records");
    }

    let counters = &report.counters;
    let rows = [
        ("Vendors", counters.vendors),
        ("Locations", counters.locations),
        ("Items", counters.items),
        ("Barcodes", counters.barcodes),
        ("Inventory records", counters.inventory_records),
        ("Customers", counters.customers),
        ("Sales", counters.sales),
        ("Purchase orders", counters.purchase_orders),
    ];
    for (label, value) in rows {
        if value > 0 {
            println!("{:<18} {}", format!("{label}:"), value);
        }
    }

    if !counters.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &counters.warnings {
            println!("  - {warning}");
        }
    }

    Ok(())
}
