// Server-only helpers shared by all api/* modules: build a school client for
// the current caller and turn client errors into ServerFnErrors.

use dioxus::prelude::*;
use shared_types::{AppError, AppErrorKind};

use crate::auth::cookies;
use crate::auth::middleware::SessionContext;
use crate::error_convert::AppErrorExt;
use crate::school_api::SchoolApi;

/// The caller's token and request id for the current request.
/// Reads the middleware-injected context first, falls back to the headers.
fn session_context() -> SessionContext {
    let Some(ctx) = dioxus::fullstack::FullstackContext::current() else {
        return SessionContext::default();
    };
    let parts = ctx.parts_mut();

    if let Some(session) = parts.extensions.get::<SessionContext>() {
        return session.clone();
    }

    SessionContext {
        token: cookies::extract_session_token(&parts.headers),
        request_id: parts
            .headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    }
}

/// School client without credentials, for login and health checks.
pub(crate) fn anonymous_school() -> SchoolApi {
    let session = session_context();
    SchoolApi::shared().clone().with_request_id(session.request_id)
}

/// School client acting for the signed-in caller.
/// Fails with `Unauthorized` when the request carries no session.
pub(crate) fn school() -> Result<SchoolApi, ServerFnError> {
    let session = session_context();
    let token = session
        .token
        .ok_or_else(|| AppError::unauthorized("Please sign in").into_server_fn_error())?;
    Ok(SchoolApi::shared()
        .with_token(token)
        .with_request_id(session.request_id))
}

/// Log a client error and convert it for the wire.
///
/// An `Unauthorized` answer means the school token expired, so the console
/// cookie is cleared along with it.
pub(crate) fn forward(err: AppError) -> ServerFnError {
    match err.kind {
        AppErrorKind::Unauthorized => {
            tracing::info!(message = %err.message, "School session rejected, clearing cookie");
            cookies::schedule_clear_cookie();
        }
        AppErrorKind::Upstream | AppErrorKind::InternalError => {
            tracing::error!(kind = %err.kind, message = %err.message, "School backend call failed");
        }
        _ => {
            tracing::warn!(kind = %err.kind, message = %err.message, "School backend refused request");
        }
    }
    err.into_server_fn_error()
}
