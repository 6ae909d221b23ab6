use axum::{
    body::Body,
    extract::Extension,
    http::{Request, StatusCode},
    middleware,
    routing::{get as get_route, post as post_route},
    Json, Router,
};
use server::auth::cookies::{CookieSlot, PendingCookieAction};
use server::auth::middleware::SessionContext;
use server::school_api::SchoolApi;
use shared_types::SchoolApiConfig;
use tower::ServiceExt;

/// School client pointed at a port nothing listens on.
pub fn unreachable_school() -> SchoolApi {
    SchoolApi::new(&SchoolApiConfig {
        base_url: "http://127.0.0.1:9/api".into(),
        timeout_secs: 1,
    })
}

async fn whoami(Extension(session): Extension<SessionContext>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "token": session.token,
        "request_id": session.request_id,
    }))
}

async fn sign_in(Extension(slot): Extension<CookieSlot>) -> StatusCode {
    slot.put(PendingCookieAction::Set {
        token: "tok-123".into(),
        max_age_secs: None,
    });
    StatusCode::OK
}

async fn sign_out(Extension(slot): Extension<CookieSlot>) -> StatusCode {
    slot.put(PendingCookieAction::Clear);
    StatusCode::OK
}

#[allow(dead_code)]
/// Router with the console's middleware stack and stub handlers standing in
/// for server functions.
pub fn test_app() -> Router {
    Router::new()
        .route("/whoami", get_route(whoami))
        .route("/sign-in", post_route(sign_in))
        .route("/sign-out", post_route(sign_out))
        .merge(server::health::health_router(unreachable_school()))
        .layer(middleware::from_fn(
            server::auth::middleware::session_middleware,
        ))
        .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
        .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
            tower_http::request_id::MakeRequestUuid,
        ))
}

#[allow(dead_code)]
/// Send a request and return (status, Set-Cookie values, body).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<String>, String) {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let cookies = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, cookies, String::from_utf8(body.to_vec()).unwrap())
}

#[allow(dead_code)]
/// Helper to make a GET request and return (status, body).
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let (status, _, body) = send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await;
    (status, body)
}

#[allow(dead_code)]
/// Helper to make a GET request with extra headers.
pub async fn get_with_headers(
    app: &Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> (StatusCode, String) {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let (status, _, body) = send(app, builder.body(Body::empty()).unwrap()).await;
    (status, body)
}

#[allow(dead_code)]
/// Helper to make an empty POST and return (status, Set-Cookie values).
pub async fn post(app: &Router, uri: &str) -> (StatusCode, Vec<String>) {
    let (status, cookies, _) = send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    (status, cookies)
}
