use dioxus::prelude::*;
use shared_types::{PaginatedResponse, RosterStudent, Session, SessionQuery, SessionRequest};

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use super::auth::*;

// ── Session Server Functions ───────────────────────────

#[server]
pub async fn list_sessions(
    query: SessionQuery,
) -> Result<PaginatedResponse<Session>, ServerFnError> {
    use shared_types::normalize_pagination;

    let (page, limit) = normalize_pagination(query.page, query.limit);
    let result = school()?.list_sessions(&query).await.map_err(forward)?;
    Ok(PaginatedResponse::new(result.sessions, page, limit, result.total))
}

#[server]
pub async fn get_session(id: i64) -> Result<Session, ServerFnError> {
    school()?.get_session(id).await.map_err(forward)
}

#[server]
pub async fn create_session(body: SessionRequest) -> Result<i64, ServerFnError> {
    body.validate_request()
        .map_err(|e| e.into_server_fn_error())?;
    body.check().map_err(|e| e.into_server_fn_error())?;

    school()?.create_session(&body).await.map_err(forward)
}

#[server]
pub async fn update_session(id: i64, body: SessionRequest) -> Result<(), ServerFnError> {
    body.validate_request()
        .map_err(|e| e.into_server_fn_error())?;
    body.check().map_err(|e| e.into_server_fn_error())?;

    school()?.update_session(id, &body).await.map_err(forward)
}

#[server]
pub async fn delete_session(id: i64) -> Result<(), ServerFnError> {
    school()?.delete_session(id).await.map_err(forward)
}

/// Students enrolled in the session, as shown on the grid rows.
#[server]
pub async fn session_roster(session_id: i64) -> Result<Vec<RosterStudent>, ServerFnError> {
    school()?
        .session_roster(session_id)
        .await
        .map_err(forward)
}
