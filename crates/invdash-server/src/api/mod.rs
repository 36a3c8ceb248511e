mod productos;
mod stocks;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use invdash_gloma::{GlomaClient, GlomaError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub gloma: Arc<GlomaClient>,
}

/// Error body for a failed proxy call.
///
/// Upstream failures carry the upstream's own status code and body text in
/// `status`/`message`; internal failures omit `status` and respond with 500.
#[derive(Debug, Serialize)]
pub struct ProxyError {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
}

impl ProxyError {
    /// Maps a client error to the response the proxy sends.
    ///
    /// Non-2xx upstream answers pass through with the original status and
    /// body; network and deserialization failures become a 500 with the
    /// error's display text.
    pub(super) fn from_gloma(error: GlomaError) -> Self {
        match error {
            GlomaError::UpstreamStatus { status, body } => {
                tracing::warn!(status, "upstream request failed");
                Self {
                    error: "Error al obtener los datos",
                    status: Some(status),
                    message: body,
                }
            }
            other => {
                tracing::error!(error = %other, "proxy request failed");
                Self {
                    error: "Error interno del servidor",
                    status: None,
                    message: other.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> axum::response::Response {
        let status = self
            .status
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/productos", get(productos::proxy_productos))
        .route("/api/stocksprecios", get(stocks::proxy_stocksprecios))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                // Disable response caching end-to-end; every hit must reach
                // the live upstream.
                .layer(SetResponseHeaderLayer::overriding(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-store"),
                ))
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_failure_keeps_upstream_status_and_body() {
        let err = ProxyError::from_gloma(GlomaError::UpstreamStatus {
            status: 404,
            body: "not found".to_string(),
        });
        assert_eq!(err.error, "Error al obtener los datos");
        assert_eq!(err.status, Some(404));
        assert_eq!(err.message, "not found");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_failure_maps_to_500_without_status_field() {
        let parse_err =
            serde_json::from_str::<serde_json::Value>("not json").expect_err("must fail");
        let err = ProxyError::from_gloma(GlomaError::Deserialize {
            context: "http://upstream/productos".to_string(),
            source: parse_err,
        });
        assert_eq!(err.error, "Error interno del servidor");
        assert_eq!(err.status, None);

        let body = serde_json::to_value(&err).expect("serialize");
        assert!(
            body.get("status").is_none(),
            "internal errors must not carry a status field: {body}"
        );

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_upstream_status_code_falls_back_to_500() {
        let err = ProxyError {
            error: "Error al obtener los datos",
            status: Some(99),
            message: "bogus".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    // -------------------------------------------------------------------------
    // Route integration tests (wiremock standing in for the Gloma upstream)
    // -------------------------------------------------------------------------

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_for(upstream: &MockServer) -> Router {
        let gloma = GlomaClient::with_base_url("test-key", 5, &upstream.uri())
            .expect("client construction should not fail");
        build_app(AppState {
            gloma: Arc::new(gloma),
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json parse")
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let upstream = MockServer::start().await;
        let response = app_for(&upstream)
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"].as_str(), Some("ok"));
    }

    #[tokio::test]
    async fn productos_reshapes_upstream_payload() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/productos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&serde_json::json!({
                "datos": [
                    { "referencia": "A-1", "nombre": "Martillo", "precio": "89.50" },
                    { "nombre": "Sin datos" }
                ]
            })))
            .mount(&upstream)
            .await;

        let response = app_for(&upstream)
            .oneshot(
                Request::builder()
                    .uri("/api/productos")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
        assert!(response.headers().contains_key("x-request-id"));

        let json = body_json(response).await;
        assert_eq!(json["A-1"]["nombre"].as_str(), Some("Martillo"));
        assert_eq!(json["A-1"]["marca"].as_str(), Some("Sin Marca"));
        assert_eq!(json["A-1"]["costo"].as_str(), Some("89.50"));
        assert_eq!(
            json["Sin Referencia"]["nombre"].as_str(),
            Some("Sin datos")
        );
    }

    #[tokio::test]
    async fn productos_passes_upstream_404_through() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/productos"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&upstream)
            .await;

        let response = app_for(&upstream)
            .oneshot(
                Request::builder()
                    .uri("/api/productos")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"].as_str(), Some("Error al obtener los datos"));
        assert_eq!(json["status"].as_i64(), Some(404));
        assert_eq!(json["message"].as_str(), Some("not found"));
    }

    #[tokio::test]
    async fn stocksprecios_reshapes_and_coerces() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/productos_almacenes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&serde_json::json!({
                "datos": [{
                    "referencia": "A-1",
                    "stock": "12",
                    "precio": "3.5",
                    "precio_oferta": null,
                    "almacenes": [
                        { "almacen_clave": "CDMX01", "almacen": "CDMX Centro", "stock": "5" }
                    ]
                }]
            })))
            .mount(&upstream)
            .await;

        let response = app_for(&upstream)
            .oneshot(
                Request::builder()
                    .uri("/api/stocksprecios")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["A-1"]["existencia"].as_i64(), Some(12));
        assert_eq!(json["A-1"]["costo"].as_f64(), Some(3.5));
        assert_eq!(json["A-1"]["oferta"].as_f64(), Some(0.0));
        assert_eq!(
            json["A-1"]["almacenes"]["CDMX01"]["stock"].as_i64(),
            Some(5)
        );
    }

    #[tokio::test]
    async fn stocksprecios_fails_whole_request_on_malformed_record() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/productos_almacenes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&serde_json::json!({
                "datos": [
                    { "referencia": "A-1", "stock": 1, "almacenes": [] },
                    { "referencia": "B-2", "stock": 2 }
                ]
            })))
            .mount(&upstream)
            .await;

        let response = app_for(&upstream)
            .oneshot(
                Request::builder()
                    .uri("/api/stocksprecios")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"].as_str(), Some("Error interno del servidor"));
        assert!(json.get("status").is_none());
    }
}
