//! CSV dataset importer
//!
//! Operators hand us exported spreadsheets whose headers vary by source
//! system. Each supported dataset declares the field spellings it
//! accepts; the dataset itself is either named by the caller or inferred
//! from which alias table matches the header row best. Rows that cannot
//! be imported are reported as warnings, never dropped silently.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use stockroom_domain::service::short_code_for_sku;
use stockroom_domain::VendorAddress;
use stockroom_store::{NewItem, NewPoLine, Store};
use stockroom_types::{BarcodeKind, Error, LocationKind, PoStatus, Result, SaleStatus};

pub const NO_IMPORTABLE_ROWS_WARNING: &str = "No importable rows were found in the spreadsheet.";

const DEFAULT_LOCATION: &str = "Main Warehouse";

/// Datasets an upload can carry. One CSV holds one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Vendors,
    Products,
    Customers,
    Orders,
    PurchaseOrders,
}

impl Dataset {
    pub const ALL: [Dataset; 5] = [
        Dataset::Vendors,
        Dataset::Products,
        Dataset::Customers,
        Dataset::Orders,
        Dataset::PurchaseOrders,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Vendors => "vendors",
            Dataset::Products => "products",
            Dataset::Customers => "customers",
            Dataset::Orders => "orders",
            Dataset::PurchaseOrders => "purchase_orders",
        }
    }

    pub fn parse(value: &str) -> Option<Dataset> {
        match normalize_header(value).as_str() {
            "vendors" => Some(Dataset::Vendors),
            "products" => Some(Dataset::Products),
            "customers" => Some(Dataset::Customers),
            "orders" => Some(Dataset::Orders),
            "purchase_orders" => Some(Dataset::PurchaseOrders),
            _ => None,
        }
    }

    /// Accepted header spellings per canonical field.
    fn aliases(&self) -> &'static [(&'static str, &'static [&'static str])] {
        match self {
            Dataset::Products => &[
                ("sku", &["sku", "product_sku", "item_sku", "item_number"]),
                (
                    "description",
                    &[
                        "description",
                        "product_description",
                        "name",
                        "product_name",
                        "item_name",
                        "item_description",
                    ],
                ),
                ("category", &["category"]),
                ("subcategory", &["subcategory", "sub_category"]),
                ("vendor_model", &["vendor_model", "model"]),
                ("unit_cost", &["unit_cost", "cost"]),
                ("price", &["price", "retail", "sale_price"]),
                ("tax_code", &["tax_code"]),
                ("barcode", &["barcode", "upc"]),
                (
                    "qty_on_hand",
                    &["qty_on_hand", "quantity", "qty", "on_hand", "inventory"],
                ),
                (
                    "location_name",
                    &["location", "location_name", "warehouse", "store", "site"],
                ),
                ("vendor_name", &["vendor", "vendor_name"]),
            ],
            Dataset::Customers => &[
                ("name", &["name", "customer_name"]),
                ("email", &["email", "customer_email"]),
                ("phone", &["phone", "customer_phone"]),
            ],
            Dataset::Orders => &[
                (
                    "external_ref",
                    &["order_number", "order_no", "order_id", "external_ref"],
                ),
                ("status", &["status"]),
                ("created_by", &["created_by", "sales_rep", "owner"]),
                ("customer_email", &["customer_email", "email"]),
                ("customer_name", &["customer_name", "name"]),
                ("customer_phone", &["customer_phone", "phone"]),
                ("item_sku", &["item_sku", "product_sku", "sku"]),
                ("qty", &["qty", "quantity"]),
                ("unit_price", &["unit_price", "line_price"]),
                ("location_name", &["location", "location_name"]),
            ],
            Dataset::PurchaseOrders => &[
                (
                    "external_ref",
                    &["po_number", "po_no", "reference", "external_ref"],
                ),
                ("vendor_name", &["vendor_name", "vendor"]),
                ("status", &["status"]),
                ("expected_date", &["expected_date", "eta", "due_date"]),
                ("created_by", &["created_by", "buyer"]),
                ("terms", &["terms"]),
                ("notes", &["notes"]),
                ("item_sku", &["item_sku", "product_sku", "sku"]),
                ("item_description", &["item_description", "description"]),
                ("qty_ordered", &["qty_ordered", "quantity", "qty"]),
                ("unit_cost", &["unit_cost", "cost"]),
            ],
            Dataset::Vendors => &[
                ("name", &["vendor_name", "name"]),
                ("email", &["vendor_email", "email"]),
                ("phone", &["vendor_phone", "phone"]),
                ("terms", &["terms"]),
                ("address_line1", &["address", "address_line1", "street"]),
                ("address_line2", &["address_line2", "suite", "apt"]),
                ("city", &["city"]),
                ("state", &["state", "province", "region"]),
                ("postal_code", &["postal_code", "zip", "zip_code"]),
                ("country", &["country"]),
            ],
        }
    }

    fn resolve_field(&self, header: &str) -> Option<&'static str> {
        for (field, spellings) in self.aliases() {
            if spellings.contains(&header) {
                return Some(field);
            }
        }
        None
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportCounters {
    pub vendors: u32,
    pub locations: u32,
    pub items: u32,
    pub barcodes: u32,
    pub inventory_records: u32,
    pub customers: u32,
    pub sales: u32,
    pub purchase_orders: u32,
    pub receivings: u32,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub dataset: Option<&'static str>,
    pub counters: ImportCounters,
    pub cleared_inventory: bool,
    pub imported_at: DateTime<Utc>,
}

type Row = HashMap<&'static str, String>;

/// Import a CSV upload into the store.
pub async fn import_csv(
    store: &Store,
    data: &[u8],
    filename: &str,
    dataset: Option<&str>,
    replace_inventory: bool,
) -> Result<ImportReport> {
    if !filename.to_lowercase().ends_with(".csv") {
        return Err(Error::Import(
            "Unsupported file type. Upload a CSV spreadsheet.".to_string(),
        ));
    }
    let preferred = match dataset {
        Some(name) => Some(
            Dataset::parse(name)
                .ok_or_else(|| Error::Import(format!("Unsupported dataset '{name}'.")))?,
        ),
        None => None,
    };

    let mut counters = ImportCounters::default();
    let mut cleared_inventory = false;

    let parsed = extract_rows(data, preferred)?;
    let Some((dataset, rows)) = parsed.filter(|(_, rows)| !rows.is_empty()) else {
        counters.warnings.push(NO_IMPORTABLE_ROWS_WARNING.to_string());
        return Ok(ImportReport {
            dataset: None,
            counters,
            cleared_inventory,
            imported_at: Utc::now(),
        });
    };

    if replace_inventory && dataset == Dataset::Products {
        store.clear_inventory().await?;
        cleared_inventory = true;
    }

    match dataset {
        Dataset::Vendors => import_vendors(store, &rows, &mut counters).await?,
        Dataset::Products => import_products(store, &rows, &mut counters).await?,
        Dataset::Customers => import_customers(store, &rows, &mut counters).await?,
        Dataset::Orders => import_orders(store, &rows, &mut counters).await?,
        Dataset::PurchaseOrders => import_purchase_orders(store, &rows, &mut counters).await?,
    }

    Ok(ImportReport {
        dataset: Some(dataset.as_str()),
        counters,
        cleared_inventory,
        imported_at: Utc::now(),
    })
}

/// Parse the CSV and map each record onto the chosen dataset's fields.
fn extract_rows(data: &[u8], preferred: Option<Dataset>) -> Result<Option<(Dataset, Vec<Row>)>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);
    let headers: Vec<String> = match reader.headers() {
        Ok(headers) => headers.iter().map(normalize_header).collect(),
        Err(_) => return Ok(None),
    };

    let dataset = match identify_dataset(&headers, preferred) {
        Some(dataset) => dataset,
        None => return Ok(None),
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => return Err(Error::Import(format!("Malformed CSV row: {err}"))),
        };
        let mut row: Row = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            let Some(field) = dataset.resolve_field(header) else {
                continue;
            };
            let value = record.get(index).unwrap_or("").trim();
            if value.is_empty() {
                continue;
            }
            row.entry(field).or_insert_with(|| value.to_string());
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(Some((dataset, rows)))
}

/// Pick the dataset whose alias table matches the most headers. The
/// preferred dataset wins ties; an unresolvable tie means no import.
fn identify_dataset(headers: &[String], preferred: Option<Dataset>) -> Option<Dataset> {
    let mut best_score = 0;
    let mut best: Vec<Dataset> = Vec::new();
    for dataset in Dataset::ALL {
        let score = headers
            .iter()
            .filter(|header| dataset.resolve_field(header).is_some())
            .count();
        if score > best_score {
            best_score = score;
            best = vec![dataset];
        } else if score == best_score && score > 0 {
            best.push(dataset);
        }
    }
    if best_score == 0 {
        return None;
    }
    if let Some(preferred) = preferred {
        if best.contains(&preferred) {
            return Some(preferred);
        }
        return None;
    }
    if best.len() == 1 {
        return Some(best[0]);
    }
    None
}

async fn import_vendors(store: &Store, rows: &[Row], counters: &mut ImportCounters) -> Result<()> {
    for row in rows {
        let Some(name) = row.get("name") else {
            counters
                .warnings
                .push("Skipped vendor row without a name".to_string());
            continue;
        };
        if store.find_vendor_by_name(name).await?.is_some() {
            continue;
        }
        let address = VendorAddress {
            line1: row.get("address_line1").cloned(),
            line2: row.get("address_line2").cloned(),
            city: row.get("city").cloned(),
            state: row.get("state").cloned(),
            postal_code: row.get("postal_code").cloned(),
            country: row.get("country").cloned(),
        };
        store
            .create_vendor(
                name,
                row.get("terms").map(String::as_str),
                row.get("phone").map(String::as_str),
                row.get("email").map(String::as_str),
                Some(&address),
            )
            .await?;
        counters.vendors += 1;
    }
    Ok(())
}

async fn import_products(store: &Store, rows: &[Row], counters: &mut ImportCounters) -> Result<()> {
    let mut short_codes = store.short_codes_in_use().await?;

    for row in rows {
        let (Some(sku), Some(description)) = (row.get("sku"), row.get("description")) else {
            counters
                .warnings
                .push("Skipped product row without SKU and description".to_string());
            continue;
        };

        let unit_cost = row.get("unit_cost").and_then(|raw| parse_number(raw));
        let price = row.get("price").and_then(|raw| parse_number(raw));
        let price = price.or(unit_cost).unwrap_or(0.0);
        let unit_cost = unit_cost.unwrap_or(price);

        let item = match store.find_item_by_sku(sku).await? {
            Some(mut existing) => {
                existing.description = description.clone();
                if let Some(category) = row.get("category") {
                    existing.category = Some(category.clone());
                }
                if let Some(subcategory) = row.get("subcategory") {
                    existing.subcategory = Some(subcategory.clone());
                }
                if let Some(model) = row.get("vendor_model") {
                    existing.vendor_model = Some(model.clone());
                }
                if let Some(tax_code) = row.get("tax_code") {
                    existing.tax_code = Some(tax_code.clone());
                }
                existing.unit_cost = unit_cost;
                existing.price = price;
                store.update_item(&existing).await?;
                existing
            }
            None => {
                let short_code = short_code_for_sku(sku, &short_codes);
                short_codes.insert(short_code.clone());
                let item = store
                    .create_item(&NewItem {
                        sku: sku.clone(),
                        upc: None,
                        description: description.clone(),
                        category: row.get("category").cloned(),
                        subcategory: row.get("subcategory").cloned(),
                        vendor_model: row.get("vendor_model").cloned(),
                        unit_cost,
                        price,
                        tax_code: row.get("tax_code").cloned(),
                        short_code,
                    })
                    .await?;
                counters.items += 1;
                item
            }
        };

        if let Some(vendor_name) = row.get("vendor_name") {
            let (_, created) = store.get_or_create_vendor(vendor_name).await?;
            if created {
                counters.vendors += 1;
            }
        }

        if let Some(barcode) = row.get("barcode") {
            store
                .add_barcode(item.item_id, barcode, BarcodeKind::Item)
                .await?;
            counters.barcodes += 1;
        }

        if let Some(qty) = row.get("qty_on_hand").and_then(|raw| parse_number(raw)) {
            if qty != 0.0 {
                let location_name = row
                    .get("location_name")
                    .map(String::as_str)
                    .unwrap_or(DEFAULT_LOCATION);
                let (location, created) = store
                    .get_or_create_location(location_name, LocationKind::Warehouse)
                    .await?;
                if created {
                    counters.locations += 1;
                }
                store
                    .set_inventory_level(item.item_id, location.location_id, qty, unit_cost)
                    .await?;
                counters.inventory_records += 1;
            }
        }
    }
    Ok(())
}

async fn import_customers(
    store: &Store,
    rows: &[Row],
    counters: &mut ImportCounters,
) -> Result<()> {
    for row in rows {
        let Some(name) = row.get("name") else {
            counters
                .warnings
                .push("Skipped customer row without a name".to_string());
            continue;
        };
        let email = row.get("email").map(String::as_str);
        let phone = row.get("phone").map(String::as_str);
        if store.find_customer(email, phone, Some(name)).await?.is_some() {
            continue;
        }
        store.create_customer(name, phone, email).await?;
        counters.customers += 1;
    }
    Ok(())
}

async fn import_orders(store: &Store, rows: &[Row], counters: &mut ImportCounters) -> Result<()> {
    let mut sales: HashMap<String, i64> = HashMap::new();

    for (index, row) in rows.iter().enumerate() {
        let key = row
            .get("external_ref")
            .or_else(|| row.get("customer_name"))
            .map(|value| value.to_lowercase())
            .unwrap_or_else(|| format!("order-{index}"));

        let sale_id = match sales.get(&key) {
            Some(sale_id) => *sale_id,
            None => {
                let customer_email = row.get("customer_email").map(String::as_str);
                let customer_phone = row.get("customer_phone").map(String::as_str);
                let customer_name = row.get("customer_name").map(String::as_str);
                let customer_id = match store
                    .find_customer(customer_email, customer_phone, customer_name)
                    .await?
                {
                    Some(customer) => Some(customer.customer_id),
                    None => match customer_name {
                        Some(name) => {
                            let customer = store
                                .create_customer(name, customer_phone, customer_email)
                                .await?;
                            counters.customers += 1;
                            Some(customer.customer_id)
                        }
                        None => None,
                    },
                };

                let created_by = row
                    .get("created_by")
                    .map(String::as_str)
                    .unwrap_or("import.orders");
                let sale = store
                    .create_sale(customer_id, Some(created_by), Some("import"))
                    .await?;
                counters.sales += 1;

                let status = row
                    .get("status")
                    .and_then(|raw| raw.to_lowercase().parse::<SaleStatus>().ok())
                    .unwrap_or(SaleStatus::Open);
                if status != SaleStatus::Draft {
                    store.set_sale_status(sale.sale_id, status).await?;
                }

                sales.insert(key, sale.sale_id);
                sale.sale_id
            }
        };

        let Some(sku) = row.get("item_sku") else {
            continue;
        };
        let Some(item) = store.find_item_by_sku(sku).await? else {
            counters
                .warnings
                .push(format!("Skipped order line for unknown product SKU '{sku}'"));
            continue;
        };
        let qty = row.get("qty").and_then(|raw| parse_number(raw)).unwrap_or(1.0);
        let unit_price = row.get("unit_price").and_then(|raw| parse_number(raw));
        let location_name = row
            .get("location_name")
            .map(String::as_str)
            .unwrap_or(DEFAULT_LOCATION);
        let (location, created) = store
            .get_or_create_location(location_name, LocationKind::Warehouse)
            .await?;
        if created {
            counters.locations += 1;
        }
        store
            .add_sale_line(sale_id, &item, location.location_id, qty, unit_price)
            .await?;
    }
    Ok(())
}

async fn import_purchase_orders(
    store: &Store,
    rows: &[Row],
    counters: &mut ImportCounters,
) -> Result<()> {
    let mut purchase_orders: HashMap<String, i64> = HashMap::new();

    for row in rows {
        let vendor_name = row
            .get("vendor_name")
            .map(String::as_str)
            .unwrap_or("Imported Vendor");
        let (vendor, created) = store.get_or_create_vendor(vendor_name).await?;
        if created {
            counters.vendors += 1;
        }

        let external_ref = row.get("external_ref").map(String::as_str);
        let key = external_ref.unwrap_or(vendor_name).to_lowercase();
        let po_id = match purchase_orders.get(&key) {
            Some(po_id) => *po_id,
            None => {
                let status = row
                    .get("status")
                    .and_then(|raw| raw.to_lowercase().parse::<PoStatus>().ok())
                    .unwrap_or(PoStatus::Open);
                let created_by = row
                    .get("created_by")
                    .map(String::as_str)
                    .unwrap_or("import.purchase_orders");
                let po = store
                    .insert_po(
                        vendor.vendor_id,
                        status,
                        row.get("expected_date").and_then(|raw| parse_date(raw)),
                        row.get("terms").map(String::as_str),
                        row.get("notes").map(String::as_str),
                        created_by,
                        external_ref,
                    )
                    .await?;
                counters.purchase_orders += 1;
                purchase_orders.insert(key, po.po_id);
                po.po_id
            }
        };

        let Some(sku) = row.get("item_sku") else {
            continue;
        };
        let Some(item) = store.find_item_by_sku(sku).await? else {
            counters.warnings.push(format!(
                "Skipped purchase order line for unknown product SKU '{sku}'"
            ));
            continue;
        };
        store
            .add_po_line(
                po_id,
                &NewPoLine {
                    item_id: item.item_id,
                    description: row
                        .get("item_description")
                        .cloned()
                        .unwrap_or_else(|| item.description.clone()),
                    qty_ordered: row
                        .get("qty_ordered")
                        .and_then(|raw| parse_number(raw))
                        .unwrap_or(0.0),
                    unit_cost: row
                        .get("unit_cost")
                        .and_then(|raw| parse_number(raw))
                        .unwrap_or(item.unit_cost),
                },
            )
            .await?;
    }
    Ok(())
}

fn normalize_header(value: &str) -> String {
    let mut normalized = String::with_capacity(value.len());
    let mut last_was_sep = true;
    for c in value.trim().chars() {
        if c.is_ascii_alphanumeric() {
            normalized.push(c.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            normalized.push('_');
            last_was_sep = true;
        }
    }
    while normalized.ends_with('_') {
        normalized.pop();
    }
    normalized
}

fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ','))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(parsed) = NaiveDate::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&parsed.and_hms_opt(0, 0, 0)?));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn products_import_builds_catalog_inventory_and_vendors() {
        let store = Store::in_memory().await.unwrap();
        let csv = "SKU,Description,Cost,Price,Barcode,Qty On Hand,Location,Vendor\n\
                   WID-001,Widget,5.00,$10.00,012345678905,12,Backroom,Widget Co\n\
                   ,missing sku,1,2,,,,\n";

        let report = import_csv(&store, csv.as_bytes(), "catalog.csv", Some("products"), false)
            .await
            .unwrap();

        assert_eq!(report.dataset, Some("products"));
        assert_eq!(report.counters.items, 1);
        assert_eq!(report.counters.vendors, 1);
        assert_eq!(report.counters.barcodes, 1);
        assert_eq!(report.counters.inventory_records, 1);
        assert_eq!(report.counters.locations, 1);
        assert_eq!(report.counters.warnings.len(), 1);

        let item = store.find_item_by_sku("WID-001").await.unwrap().unwrap();
        assert_eq!(item.price, 10.0);
        assert_eq!(item.short_code.len(), 4);
        let location = store.find_location_by_name("Backroom").await.unwrap().unwrap();
        assert_eq!(
            store
                .qty_on_hand(item.item_id, location.location_id)
                .await
                .unwrap(),
            12.0
        );
    }

    #[tokio::test]
    async fn dataset_is_inferred_from_headers() {
        let store = Store::in_memory().await.unwrap();
        let csv = "Vendor Name,Vendor Email,Terms,City\n\
                   Widget Co,sales@widget.example,Net 30,Tulsa\n";

        let report = import_csv(&store, csv.as_bytes(), "vendors.csv", None, false)
            .await
            .unwrap();

        assert_eq!(report.dataset, Some("vendors"));
        assert_eq!(report.counters.vendors, 1);
        let vendor = store.find_vendor_by_name("Widget Co").await.unwrap().unwrap();
        assert_eq!(vendor.address().unwrap().city.as_deref(), Some("Tulsa"));
    }

    #[tokio::test]
    async fn purchase_order_rows_group_by_reference_and_warn_on_unknown_sku() {
        let store = Store::in_memory().await.unwrap();
        import_csv(
            &store,
            "sku,description,cost,price\nWID-001,Widget,5,10\n".as_bytes(),
            "items.csv",
            Some("products"),
            false,
        )
        .await
        .unwrap();

        let csv = "PO Number,Vendor,Status,SKU,Qty Ordered,Unit Cost\n\
                   PO-1001,Widget Co,open,WID-001,4,5.00\n\
                   PO-1001,Widget Co,open,GHOST-1,2,1.00\n";
        let report = import_csv(&store, csv.as_bytes(), "po.csv", Some("purchase_orders"), false)
            .await
            .unwrap();

        assert_eq!(report.counters.purchase_orders, 1);
        assert_eq!(report.counters.warnings.len(), 1);
        assert!(report.counters.warnings[0].contains("GHOST-1"));

        let hits = store.search_po_lines("po-1001", 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].po_number, "PO-1001");
    }

    #[tokio::test]
    async fn unsupported_inputs_are_rejected_or_warned() {
        let store = Store::in_memory().await.unwrap();

        let err = import_csv(&store, b"x", "workbook.xlsx", None, false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Import(_)));

        let err = import_csv(&store, b"a,b\n1,2\n", "data.csv", Some("mystery"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Import(_)));

        let report = import_csv(&store, b"alpha,beta\n1,2\n", "data.csv", None, false)
            .await
            .unwrap();
        assert_eq!(
            report.counters.warnings,
            vec![NO_IMPORTABLE_ROWS_WARNING.to_string()]
        );
    }

    #[tokio::test]
    async fn replace_inventory_clears_previous_levels() {
        let store = Store::in_memory().await.unwrap();
        import_csv(
            &store,
            "sku,description,cost,price,qty,location\nOLD-1,Old,1,2,7,Backroom\n".as_bytes(),
            "items.csv",
            Some("products"),
            false,
        )
        .await
        .unwrap();

        let report = import_csv(
            &store,
            "sku,description,cost,price,qty,location\nNEW-1,New,1,2,3,Backroom\n".as_bytes(),
            "items.csv",
            Some("products"),
            true,
        )
        .await
        .unwrap();
        assert!(report.cleared_inventory);

        let old = store.find_item_by_sku("OLD-1").await.unwrap().unwrap();
        let location = store.find_location_by_name("Backroom").await.unwrap().unwrap();
        assert_eq!(
            store
                .qty_on_hand(old.item_id, location.location_id)
                .await
                .unwrap(),
            0.0
        );
    }
}
