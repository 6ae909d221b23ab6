use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Instant;

use crate::school_api::SchoolApi;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the application start time. Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub school_api: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Health check handler. The console is "ok" as long as it runs; the school
/// backend's reachability is reported alongside.
pub async fn health_check(State(api): State<SchoolApi>) -> Json<HealthResponse> {
    let school_status = match api.ping().await {
        Ok(status) => format!("reachable ({status})"),
        Err(e) => {
            tracing::warn!(error = %e, "School backend health check failed");
            format!("error: {}", e.message)
        }
    };

    let uptime = START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0);

    Json(HealthResponse {
        status: "ok".to_string(),
        school_api: school_status,
        uptime_seconds: uptime,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /health`, probing the given school backend.
pub fn health_router(api: SchoolApi) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(api)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use shared_types::SchoolApiConfig;
    use tower::ServiceExt;

    #[tokio::test]
    async fn unreachable_backend_is_reported_not_fatal() {
        let api = SchoolApi::new(&SchoolApiConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 1,
        });
        let response = health_router(api)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert!(body["school_api"].as_str().unwrap().starts_with("error"));
    }
}
