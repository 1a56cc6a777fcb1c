//! Reference calculation backend for local development and testing.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;

pub mod api;
pub mod calculator;
pub mod log_cache;
pub mod routes;

use log_cache::LogCache;
use routes::HttpResponse;

pub async fn run_server(bind_addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let logs = Arc::new(LogCache::default());
    logs.record(&format!("rs3calc backend listening on http://{bind_addr}"));
    axum::serve(listener, app(logs)).await
}

/// Every request is handed to [routes::route_request].
pub fn app(logs: Arc<LogCache>) -> Router {
    Router::new().fallback(handle_request).with_state(logs)
}

async fn handle_request(
    State(logs): State<Arc<LogCache>>,
    method: Method,
    uri: Uri,
    body: String,
) -> HttpResponse {
    let response = routes::route_request(method.as_str(), uri.path(), &body, &logs);
    if response.status_code >= 400 {
        log::warn!("{method} {} -> {}", uri.path(), response.status_code);
    }
    response
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, self.content_type)
            .body(Body::from(self.body))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}
