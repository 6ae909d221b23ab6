use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use super::cookies::{self, CookieSlot};

/// The caller's school token and request id, as seen by server functions.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    pub token: Option<String>,
    pub request_id: Option<String>,
}

/// Permissive session middleware.
///
/// On each request it records the school token (cookie or Bearer) and the
/// `x-request-id` in a `SessionContext`, inserts a `CookieSlot` so server
/// functions can schedule cookie changes, and after the handler runs applies
/// any scheduled change to the response.
///
/// It never rejects a request; server functions decide what needs a login.
pub async fn session_middleware(mut req: Request, next: Next) -> Response {
    let headers = req.headers();
    let session = SessionContext {
        token: cookies::extract_session_token(headers),
        request_id: headers
            .get("x-request-id")
            .and_then(|v: &HeaderValue| v.to_str().ok())
            .map(str::to_string),
    };
    req.extensions_mut().insert(session);

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    if let Some(action) = cookie_slot.take() {
        cookies::apply_cookie_action(response.headers_mut(), action);
    }

    response
}
