//! View models derived from the reshaped mappings.
//!
//! Pure, side-effect-free transforms: the fetch layer hands over a
//! reference-keyed mapping and these functions turn it into the row
//! sequences and chart datasets the views render. Listing order is the
//! mapping's iteration order (sorted by `referencia`); only the warehouse
//! aggregate applies its own sort.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use invdash_core::currency::{format_mxn, parse_money};
use invdash_gloma::reshape::{ProductEntry, StockEntry, WarehouseEntry};

/// One row of the product catalog table, money already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub referencia: String,
    pub nombre: String,
    pub sku: String,
    pub costo: String,
    pub gtin: String,
    pub marca: String,
    pub categoria: String,
    pub grupo: String,
    pub subcategoria: String,
}

/// One row of the stock/price table with its warehouse breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct StockRow {
    pub referencia: String,
    pub existencia: i64,
    pub costo: String,
    pub oferta: String,
    pub almacenes: BTreeMap<String, WarehouseEntry>,
}

/// One bar of the product-cost chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CostPoint {
    pub referencia: String,
    pub costo: f64,
}

/// One bar of the stock-per-product chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockPoint {
    pub referencia: String,
    pub existencia: i64,
}

/// Summed stock for one warehouse across all products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseTotal {
    pub nombre: String,
    pub stock: i64,
}

/// Converts the catalog mapping into table rows, formatting `costo` as MXN.
#[must_use]
pub fn product_rows(entries: &BTreeMap<String, ProductEntry>) -> Vec<ProductRow> {
    entries
        .iter()
        .map(|(referencia, item)| ProductRow {
            referencia: referencia.clone(),
            nombre: item.nombre.clone(),
            sku: item.sku.clone(),
            costo: format_mxn(parse_money(&item.costo)),
            gtin: item.gtin.clone(),
            marca: item.marca.clone(),
            categoria: item.categoria.clone(),
            grupo: item.grupo.clone(),
            subcategoria: item.subcategoria.clone(),
        })
        .collect()
}

/// Converts the stock mapping into table rows, formatting money as MXN.
#[must_use]
pub fn stock_rows(entries: &BTreeMap<String, StockEntry>) -> Vec<StockRow> {
    entries
        .iter()
        .map(|(referencia, item)| StockRow {
            referencia: referencia.clone(),
            existencia: item.existencia,
            costo: format_mxn(item.costo),
            oferta: format_mxn(item.oferta),
            almacenes: item.almacenes.clone(),
        })
        .collect()
}

/// Chart dataset: cost per product reference.
#[must_use]
pub fn cost_points(entries: &BTreeMap<String, ProductEntry>) -> Vec<CostPoint> {
    entries
        .iter()
        .map(|(referencia, item)| CostPoint {
            referencia: referencia.clone(),
            costo: parse_money(&item.costo),
        })
        .collect()
}

/// Chart dataset: total stock per product reference.
#[must_use]
pub fn stock_points(entries: &BTreeMap<String, StockEntry>) -> Vec<StockPoint> {
    entries
        .iter()
        .map(|(referencia, item)| StockPoint {
            referencia: referencia.clone(),
            existencia: item.existencia,
        })
        .collect()
}

/// Folds every product's warehouse sub-mapping into total stock per
/// warehouse name.
///
/// Names are trimmed before accumulation; entries whose trimmed name is
/// empty (or absent) are skipped entirely — they contribute to no total and
/// never appear as a row. The result is sorted ascending by name.
#[must_use]
pub fn warehouse_totals(entries: &BTreeMap<String, StockEntry>) -> Vec<WarehouseTotal> {
    let mut acc: HashMap<String, i64> = HashMap::new();
    for entry in entries.values() {
        for info in entry.almacenes.values() {
            let Some(nombre) = info.nombre.as_deref() else {
                continue;
            };
            let nombre = nombre.trim();
            if nombre.is_empty() {
                continue;
            }
            *acc.entry(nombre.to_owned()).or_insert(0) += info.stock;
        }
    }

    let mut totals: Vec<WarehouseTotal> = acc
        .into_iter()
        .map(|(nombre, stock)| WarehouseTotal { nombre, stock })
        .collect();
    totals.sort_by(|a, b| name_cmp(&a.nombre, &b.nombre));
    totals
}

/// Case-insensitive ordering standing in for the browser's locale-aware
/// string comparison; ties break on the raw string so the sort is total.
fn name_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
