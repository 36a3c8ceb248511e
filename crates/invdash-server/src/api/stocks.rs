use std::collections::BTreeMap;

use axum::{extract::State, Extension, Json};
use invdash_gloma::reshape::{reshape_stocks, StockEntry};

use crate::middleware::RequestId;

use super::{AppState, ProxyError};

/// `GET /api/stocksprecios`: fetches products with per-warehouse stock and
/// serves them re-keyed by `referencia` with numeric coercion applied.
///
/// Reshaping is all-or-nothing: one structurally malformed record (missing
/// `almacenes`) fails the whole request with a 500.
pub(super) async fn proxy_stocksprecios(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<BTreeMap<String, StockEntry>>, ProxyError> {
    tracing::debug!(request_id = %req_id.0, "proxying stock and prices");
    let records = state
        .gloma
        .fetch_warehouse_stocks()
        .await
        .map_err(ProxyError::from_gloma)?;
    Ok(Json(reshape_stocks(records)))
}
