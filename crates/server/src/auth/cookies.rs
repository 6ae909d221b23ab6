use axum::http::{header, HeaderMap, HeaderValue};
use cookie::Cookie;
use std::sync::{Arc, Mutex};

/// Cookie the console sets on the browser. It carries the school backend's
/// token, which never reaches client-side script.
pub const CONSOLE_SESSION: &str = "ecole_session";

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN")
        .ok()
        .filter(|d| !d.is_empty())
}

/// Build a Set-Cookie header value for the console session.
///
/// Without `max_age_secs` the cookie lives for the browser session, matching
/// the backend cookie it mirrors.
pub fn build_session_cookie(token: &str, max_age_secs: Option<i64>) -> Option<HeaderValue> {
    let mut cookie = Cookie::build((CONSOLE_SESSION, token))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .secure(cookie_secure());

    if let Some(secs) = max_age_secs {
        cookie = cookie.max_age(cookie::time::Duration::seconds(secs));
    }
    if let Some(domain) = cookie_domain() {
        cookie = cookie.domain(domain);
    }

    HeaderValue::from_str(&cookie.build().to_string()).ok()
}

/// Build a Set-Cookie header value that clears the console session.
pub fn build_clear_cookie() -> HeaderValue {
    let cookie = Cookie::build((CONSOLE_SESSION, ""))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::ZERO)
        .build();

    HeaderValue::from_str(&cookie.to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("ecole_session=; Path=/; Max-Age=0"))
}

/// Extract the school token from the console cookie (preferred) or a Bearer
/// header (fallback for scripted clients).
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie(headers, CONSOLE_SESSION).filter(|t| !t.is_empty()) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Parse a specific cookie value from the Cookie header.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for header_value in headers.get_all(header::COOKIE) {
        if let Ok(cookie_str) = header_value.to_str() {
            for piece in cookie_str.split(';') {
                if let Ok(c) = Cookie::parse(piece.trim().to_string()) {
                    if c.name() == name {
                        return Some(c.value().to_string());
                    }
                }
            }
        }
    }
    None
}

/// Token and lifetime from a `Set-Cookie: <name>=...` response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCookie {
    pub value: String,
    pub max_age_secs: Option<i64>,
}

/// Find the cookie called `name` among the response's Set-Cookie headers.
pub fn issued_cookie(headers: &HeaderMap, name: &str) -> Option<IssuedCookie> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|raw| Cookie::parse(raw.to_string()).ok())
        .find(|c| c.name() == name && !c.value().is_empty())
        .map(|c| IssuedCookie {
            value: c.value().to_string(),
            max_age_secs: c.max_age().map(|d| d.whole_seconds()),
        })
}

/// Apply a cookie action to a response.
pub fn apply_cookie_action(headers: &mut HeaderMap, action: PendingCookieAction) {
    match action {
        PendingCookieAction::Set {
            token,
            max_age_secs,
        } => {
            if let Some(value) = build_session_cookie(&token, max_age_secs) {
                headers.append(header::SET_COOKIE, value);
            } else {
                tracing::error!("School token is not a valid cookie value");
            }
        }
        PendingCookieAction::Clear => {
            headers.append(header::SET_COOKIE, build_clear_cookie());
        }
    }
}

/// Pending cookie action to be picked up by the session middleware.
/// Stored in request extensions as `Arc<Mutex<>>` so server functions can populate it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingCookieAction {
    Set {
        token: String,
        max_age_secs: Option<i64>,
    },
    Clear,
}

/// Shared slot for server functions to communicate cookie actions to the middleware.
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn put(&self, action: PendingCookieAction) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(action);
        }
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

fn schedule(action: PendingCookieAction) {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(slot) = parts.extensions.get::<CookieSlot>() {
            slot.put(action);
        }
    }
}

/// Schedule the console session cookie to be set by the middleware.
pub fn schedule_session_cookie(issued: IssuedCookie) {
    schedule(PendingCookieAction::Set {
        token: issued.value,
        max_age_secs: issued.max_age_secs,
    });
}

/// Schedule the console session cookie to be cleared by the middleware.
pub fn schedule_clear_cookie() {
    schedule(PendingCookieAction::Clear);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_prefers_cookie_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; ecole_session=abc.def"),
        );
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer other"));
        assert_eq!(extract_session_token(&headers).as_deref(), Some("abc.def"));
    }

    #[test]
    fn bearer_is_used_without_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        assert_eq!(extract_session_token(&headers).as_deref(), Some("tok"));
        assert_eq!(extract_session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn issued_cookie_reads_backend_set_cookie() {
        let mut headers = HeaderMap::new();
        headers.append(
            header::SET_COOKIE,
            HeaderValue::from_static("csrftoken=zzz; Path=/"),
        );
        headers.append(
            header::SET_COOKIE,
            HeaderValue::from_static("access_token=jwt123; HttpOnly; Max-Age=900; Path=/; Secure"),
        );
        let issued = issued_cookie(&headers, "access_token").unwrap();
        assert_eq!(issued.value, "jwt123");
        assert_eq!(issued.max_age_secs, Some(900));
    }

    #[test]
    fn clear_action_expires_cookie() {
        let mut headers = HeaderMap::new();
        apply_cookie_action(&mut headers, PendingCookieAction::Clear);
        let value = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(value.starts_with("ecole_session=;"));
        assert!(value.contains("Max-Age=0"));
    }

    #[test]
    fn cookie_slot_hands_action_over_once() {
        let slot = CookieSlot::default();
        slot.put(PendingCookieAction::Clear);
        assert_eq!(slot.take(), Some(PendingCookieAction::Clear));
        assert_eq!(slot.take(), None);
    }
}
