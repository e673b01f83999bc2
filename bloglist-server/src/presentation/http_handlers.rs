use axum::{Json, Router, http::StatusCode, middleware, routing::get};
use serde::Serialize;

use super::middleware::auth::token_extractor_middleware;
use super::{AppState, routes};

pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .merge(routes::router(state.clone()))
        .fallback(unknown_endpoint)
        .layer(middleware::from_fn(token_extractor_middleware))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}

#[derive(Debug, Serialize)]
struct UnknownEndpointBody {
    error: &'static str,
}

async fn unknown_endpoint() -> (StatusCode, Json<UnknownEndpointBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(UnknownEndpointBody {
            error: "unknown Endpoint",
        }),
    )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::{health_handler, unknown_endpoint};

    #[tokio::test]
    async fn health_reports_ok() {
        let response = health_handler().await;
        assert_eq!(response.0.status, "ok");
    }

    #[tokio::test]
    async fn unmatched_routes_get_the_fixed_404_body() {
        let (status, body) = unknown_endpoint().await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.0.error, "unknown Endpoint");
    }
}
