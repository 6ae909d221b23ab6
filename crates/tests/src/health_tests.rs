use axum::body::Body;
use axum::http::{Request, StatusCode};
use server::health::health_router;
use tower::ServiceExt;
use crate::common::{self, FakeSchool};

#[tokio::test]
async fn test_health_reports_reachable_backend() {
    let (api, _state) = common::fake_school(FakeSchool::default()).await;
    let response = health_router(api)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    // The anonymous check is answered with 403, which still proves reachability.
    assert_eq!(body["school_api"], "reachable (403)");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
