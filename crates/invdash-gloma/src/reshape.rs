//! Reshaping of raw Gloma record arrays into reference-keyed mappings.
//!
//! Both reshapers iterate the upstream array in order and insert at the
//! record's `referencia`, so a duplicated reference keeps the last
//! occurrence only — including records that all fall back to the
//! `"Sin Referencia"` placeholder, which collapse into one entry. The
//! output is a `BTreeMap`, so iteration order is the sorted key order;
//! consumers must not assume anything beyond that.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{ProductRecord, StockRecord};

/// A catalog entry keyed by `referencia`, with every optional upstream
/// field replaced by its placeholder when absent or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    pub marca: String,
    pub categoria: String,
    pub grupo: String,
    pub subcategoria: String,
    pub referencia: String,
    pub nombre: String,
    pub sku: String,
    /// Upstream `precio` passed through as-is (number or string), or the
    /// string `"0.00"` when absent, blank, or zero. The display layer
    /// coerces this numerically; see `invdash-core::currency`.
    pub costo: Value,
    pub gtin: String,
}

/// A stock/price entry keyed by `referencia`, numerically coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    pub referencia: String,
    pub existencia: i64,
    pub costo: f64,
    pub oferta: f64,
    pub almacenes: BTreeMap<String, WarehouseEntry>,
}

/// Per-warehouse stock inside a [`StockEntry`], keyed by `almacen_clave`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseEntry {
    pub nombre: Option<String>,
    pub stock: i64,
}

/// Converts the flat product array into a `referencia -> ProductEntry`
/// mapping. Last write wins on duplicate references.
#[must_use]
pub fn reshape_products(records: Vec<ProductRecord>) -> BTreeMap<String, ProductEntry> {
    let mut out = BTreeMap::new();
    for record in records {
        let referencia = text_or(record.referencia.as_deref(), "Sin Referencia");
        let entry = ProductEntry {
            marca: text_or(record.marca_nombre.as_deref(), "Sin Marca"),
            categoria: text_or(record.categoria_nombre.as_deref(), "Sin Categoria"),
            grupo: text_or(record.grupo.as_deref(), "Sin Grupo"),
            subcategoria: text_or(record.subcategoria.as_deref(), "Sin Subcategoria"),
            referencia: referencia.clone(),
            nombre: text_or(record.nombre.as_deref(), "Sin Nombre"),
            sku: text_or(record.sku.as_deref(), "Sin SKU"),
            costo: price_or_default(record.precio),
            gtin: text_or(record.gtin.as_deref(), "Sin Gtin"),
        };
        out.insert(referencia, entry);
    }
    out
}

/// Converts the stock array into a `referencia -> StockEntry` mapping,
/// coercing `stock`/`precio`/`precio_oferta` to numbers and folding each
/// record's `almacenes` array into a per-warehouse sub-mapping.
#[must_use]
pub fn reshape_stocks(records: Vec<StockRecord>) -> BTreeMap<String, StockEntry> {
    let mut out = BTreeMap::new();
    for record in records {
        let referencia = text_or(record.referencia.as_deref(), "Sin Referencia");

        let mut almacenes = BTreeMap::new();
        for warehouse in record.almacenes {
            almacenes.insert(
                warehouse.almacen_clave,
                WarehouseEntry {
                    nombre: warehouse.almacen,
                    stock: coerce_int(warehouse.stock.as_ref()),
                },
            );
        }

        let entry = StockEntry {
            referencia: referencia.clone(),
            existencia: coerce_int(record.stock.as_ref()),
            costo: coerce_float(record.precio.as_ref()),
            oferta: coerce_float(record.precio_oferta.as_ref()),
            almacenes,
        };
        out.insert(referencia, entry);
    }
    out
}

/// The upstream value if present and non-empty, otherwise the placeholder.
fn text_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_owned(),
        _ => fallback.to_owned(),
    }
}

/// Passes a truthy upstream price through with its original JSON type;
/// absent, empty, and zero prices all become the string `"0.00"`.
fn price_or_default(precio: Option<Value>) -> Value {
    match precio {
        Some(Value::String(s)) if !s.is_empty() => Value::String(s),
        Some(Value::Number(n)) if n.as_f64().is_some_and(|v| v != 0.0) => Value::Number(n),
        _ => Value::String("0.00".to_owned()),
    }
}

/// Integer coercion: base-10 parse for strings (after trimming), truncation
/// for numbers, `0` for everything else. Never fails.
fn coerce_int(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i
            } else {
                #[allow(clippy::cast_possible_truncation)]
                let truncated = n.as_f64().map_or(0, |v| v.trunc() as i64);
                truncated
            }
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    }
}

/// Float coercion: parse for strings (after trimming), passthrough for
/// numbers, `0.0` for everything else. Never yields NaN or infinity.
fn coerce_float(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
    .unwrap_or(0.0)
}
