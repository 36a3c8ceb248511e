//! Gloma API response types.
//!
//! All types model the JSON the Gloma ERP actually sends, not what a clean
//! API would send: every scalar field can be absent or null, and numeric
//! fields arrive as numbers on some records and as strings on others. Those
//! loose fields are `Option<serde_json::Value>` here; coercion happens in
//! [`crate::reshape`].

use serde::Deserialize;
use serde_json::Value;

/// Top-level envelope for both Gloma endpoints: `{ "datos": [ ... ] }`.
///
/// `datos` is required — a payload without it is structurally malformed and
/// fails the whole request.
#[derive(Debug, Deserialize)]
pub struct Datos<T> {
    pub datos: Vec<T>,
}

/// A flat product record from `GET /productos`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub referencia: Option<String>,
    #[serde(default)]
    pub marca_nombre: Option<String>,
    #[serde(default)]
    pub categoria_nombre: Option<String>,
    #[serde(default)]
    pub grupo: Option<String>,
    #[serde(default)]
    pub subcategoria: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    /// Number or string on the wire, depending on the record.
    #[serde(default)]
    pub precio: Option<Value>,
    #[serde(default)]
    pub gtin: Option<String>,
}

/// A product record with embedded warehouse stock from
/// `GET /productos_almacenes`.
#[derive(Debug, Clone, Deserialize)]
pub struct StockRecord {
    #[serde(default)]
    pub referencia: Option<String>,
    #[serde(default)]
    pub stock: Option<Value>,
    #[serde(default)]
    pub precio: Option<Value>,
    #[serde(default)]
    pub precio_oferta: Option<Value>,
    /// No serde default: a record without `almacenes` fails
    /// deserialization of the whole payload, which aborts the request.
    pub almacenes: Vec<WarehouseRecord>,
}

/// One warehouse entry inside a [`StockRecord`].
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseRecord {
    /// Missing keys collapse onto the empty-string key, last-write-wins.
    #[serde(default)]
    pub almacen_clave: String,
    /// Display name of the warehouse.
    #[serde(default)]
    pub almacen: Option<String>,
    #[serde(default)]
    pub stock: Option<Value>,
}
