use std::collections::BTreeMap;

use axum::{extract::State, Extension, Json};
use invdash_gloma::reshape::{reshape_products, ProductEntry};

use crate::middleware::RequestId;

use super::{AppState, ProxyError};

/// `GET /api/productos`: fetches the flat catalog from the upstream and
/// serves it re-keyed by `referencia` with placeholder-filled fields.
pub(super) async fn proxy_productos(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<BTreeMap<String, ProductEntry>>, ProxyError> {
    tracing::debug!(request_id = %req_id.0, "proxying product catalog");
    let records = state
        .gloma
        .fetch_products()
        .await
        .map_err(ProxyError::from_gloma)?;
    Ok(Json(reshape_products(records)))
}
