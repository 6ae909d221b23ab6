use dioxus::prelude::*;
use shared_types::ConsoleSettings;

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

#[cfg(feature = "server")]
use super::auth::*;

/// Sign in with the school's staff password. Sets the HTTP-only session
/// cookie on success.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn login(password: String) -> Result<(), ServerFnError> {
    use crate::auth::cookies;
    use shared_types::LoginRequest;

    let req = LoginRequest { password };
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let issued = anonymous_school().login(&req).await.map_err(forward)?;
    cookies::schedule_session_cookie(issued);
    tracing::info!("Staff signed in");
    Ok(())
}

/// Sign out. The console cookie is cleared even if the backend call fails.
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    use crate::auth::cookies;

    cookies::schedule_clear_cookie();
    if let Ok(api) = school() {
        if let Err(e) = api.logout().await {
            tracing::warn!(error = %e, "Backend logout failed");
        }
    }
    Ok(())
}

/// Whether the caller's session is still accepted by the school backend.
#[server]
pub async fn check_session() -> Result<bool, ServerFnError> {
    use crate::auth::cookies;

    let Ok(api) = school() else {
        return Ok(false);
    };
    let authenticated = api.is_authenticated().await.map_err(forward)?;
    if !authenticated {
        cookies::schedule_clear_cookie();
    }
    Ok(authenticated)
}

/// Client-side tuning (search debounce, page size).
#[server]
pub async fn get_console_settings() -> Result<ConsoleSettings, ServerFnError> {
    Ok(crate::config::console_settings().clone())
}
