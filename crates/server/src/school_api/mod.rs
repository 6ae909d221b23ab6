//! Typed reqwest client for the school backend.
//!
//! One `SchoolApi` value carries the HTTP client, the backend base URL and,
//! per request, the caller's school token and request id. Endpoint methods
//! live in the per-domain files of this module as `impl SchoolApi` blocks.

mod attendance;
mod auth;
mod courses;
mod dashboard;
mod enrollments;
mod invoices;
mod private_lessons;
mod sessions;
mod students;
mod teachers;

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared_types::{AppError, CreatedResponse, SchoolApiConfig};

use crate::error_convert::ReqwestErrorExt;

static SHARED: OnceLock<SchoolApi> = OnceLock::new();

#[derive(Clone, Debug)]
pub struct SchoolApi {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    request_id: Option<String>,
}

impl SchoolApi {
    pub fn new(config: &SchoolApiConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to a default HTTP client");
                reqwest::Client::new()
            });
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
            request_id: None,
        }
    }

    /// Client built from the loaded configuration, shared by all requests.
    pub fn shared() -> &'static SchoolApi {
        SHARED.get_or_init(|| SchoolApi::new(crate::config::school_api_config()))
    }

    /// Copy of this client that authenticates as the holder of `token`.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..self.clone()
        }
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.http.request(method, self.url(path));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(id) = &self.request_id {
            req = req.header("x-request-id", id);
        }
        req
    }

    /// Send and turn any non-2xx answer into an `AppError`.
    async fn send(&self, req: RequestBuilder) -> Result<Response, AppError> {
        let response = req.send().await.map_err(ReqwestErrorExt::into_app_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = error_from_body(status.as_u16(), &body);
        tracing::warn!(status = status.as_u16(), error = %err, "School backend rejected request");
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        response
            .json::<T>()
            .await
            .map_err(ReqwestErrorExt::into_app_error)
    }

    async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.send(self.request(Method::GET, path).query(query)).await?;
        Self::decode(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, AppError> {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        // Some endpoints answer with an empty body.
        let text = response.text().await.map_err(ReqwestErrorExt::into_app_error)?;
        Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
    }

    async fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, AppError> {
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        let text = response.text().await.map_err(ReqwestErrorExt::into_app_error)?;
        Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Reachability check. Any HTTP answer counts, including 403 for the
    /// anonymous auth check.
    #[tracing::instrument(skip(self))]
    pub async fn ping(&self) -> Result<u16, AppError> {
        let response = self
            .request(Method::GET, "/auth/est_authentifie/")
            .send()
            .await
            .map_err(ReqwestErrorExt::into_app_error)?;
        Ok(response.status().as_u16())
    }

    /// PUT to an update endpoint. It answers like a create endpoint.
    async fn update<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let value = self.put_json(path, body).await?;
        parse_created(value)?;
        Ok(())
    }

    /// POST to a create endpoint and read back the new id.
    async fn create<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<i64, AppError> {
        let value = self.post_json(path, body).await?;
        parse_created(value).map(|created| created.id)
    }
}

/// Interpret a create endpoint's answer.
///
/// The backend reports refused creates with a 200 status, so the body has
/// to be inspected: `{"id": ..}` is success, `erreurs` is a validation
/// failure and a bare `detail` is a business rule conflict.
pub fn parse_created(value: Value) -> Result<CreatedResponse, AppError> {
    if let Ok(created) = serde_json::from_value::<CreatedResponse>(value.clone()) {
        return Ok(created);
    }
    Err(error_from_json(None, &value)
        .unwrap_or_else(|| AppError::upstream("The school server did not return an id")))
}

/// Map a non-2xx response body to an `AppError`.
pub fn error_from_body(status: u16, body: &str) -> AppError {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(err) = error_from_json(Some(status), &value) {
            return err;
        }
    }
    let text = body.trim();
    let message = if text.is_empty() || text.starts_with('<') {
        reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Request failed")
            .to_string()
    } else {
        text.to_string()
    };
    AppError::from_status(status, message)
}

fn error_from_json(status: Option<u16>, value: &Value) -> Option<AppError> {
    if let Some(errors) = value.get("erreurs").and_then(Value::as_object) {
        let field_errors = errors
            .iter()
            .map(|(field, messages)| (field.clone(), join_messages(messages)))
            .collect::<std::collections::HashMap<_, _>>();
        let mut summary: Vec<String> = field_errors
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect();
        summary.sort();
        return Some(AppError::validation(summary.join("; "), field_errors));
    }

    match value.get("detail") {
        Some(Value::String(detail)) => {
            return Some(match status {
                Some(code) => AppError::from_status(code, detail.clone()),
                None => AppError::conflict(detail.clone()),
            });
        }
        // Request schema errors: [{"loc": [..], "msg": ".."}]
        Some(Value::Array(items)) => {
            let message = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; ");
            return Some(AppError::bad_request(if message.is_empty() {
                "Invalid request".to_string()
            } else {
                message
            }));
        }
        _ => {}
    }

    let message = value.get("message").and_then(Value::as_str)?;
    Some(match status {
        Some(code) => AppError::from_status(code, message),
        None => AppError::upstream(message),
    })
}

fn join_messages(messages: &Value) -> String {
    match messages {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" "),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared_types::AppErrorKind;

    #[test]
    fn created_id_is_success() {
        let created = parse_created(json!({ "id": 42 })).unwrap();
        assert_eq!(created.id, 42);
    }

    #[test]
    fn validation_body_maps_to_field_errors() {
        let err = parse_created(json!({
            "message": "Erreurs de validation.",
            "erreurs": { "nom": ["Ce champ est obligatoire."], "tarif": ["Trop bas.", "Invalide."] }
        }))
        .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert_eq!(err.field_errors["tarif"], "Trop bas. Invalide.");
        assert!(err.message.starts_with("nom: "));
    }

    #[test]
    fn detail_on_create_is_a_conflict() {
        let err = parse_created(json!({ "detail": "Session complète" })).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);
        assert_eq!(err.message, "Session complète");
    }

    #[test]
    fn sheet_creation_failure_keeps_detail() {
        let err = parse_created(json!({
            "message": "Erreur lors de la création",
            "detail": "UNIQUE constraint failed"
        }))
        .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);
    }

    #[test]
    fn unexpected_create_body_is_upstream() {
        assert_eq!(parse_created(Value::Null).unwrap_err().kind, AppErrorKind::Upstream);
    }

    #[test]
    fn error_bodies_follow_status() {
        let err = error_from_body(404, r#"{"detail":"Not Found"}"#);
        assert_eq!(err.kind, AppErrorKind::NotFound);
        assert_eq!(err.message, "Not Found");

        let err = error_from_body(401, "Non autorisé");
        assert_eq!(err.kind, AppErrorKind::Unauthorized);
        assert_eq!(err.message, "Non autorisé");

        let err = error_from_body(502, "<html>Bad gateway</html>");
        assert_eq!(err.kind, AppErrorKind::Upstream);
        assert_eq!(err.message, "Bad Gateway");
    }

    #[test]
    fn schema_errors_are_bad_requests() {
        let err = error_from_body(
            422,
            r#"{"detail":[{"loc":["body","payload","annee"],"msg":"Input should be a valid integer"}]}"#,
        );
        assert_eq!(err.kind, AppErrorKind::BadRequest);
        assert_eq!(err.message, "Input should be a valid integer");
    }

    #[test]
    fn token_is_attached_as_bearer() {
        let api = SchoolApi::new(&SchoolApiConfig {
            base_url: "http://school.test/api/".into(),
            timeout_secs: 5,
        })
        .with_token("tok")
        .with_request_id(Some("req-1".into()));
        assert_eq!(api.base_url(), "http://school.test/api");
        let req = api.request(Method::GET, "/eleves/pays/").build().unwrap();
        assert_eq!(req.url().as_str(), "http://school.test/api/eleves/pays/");
        assert_eq!(req.headers()["authorization"], "Bearer tok");
        assert_eq!(req.headers()["x-request-id"], "req-1");
    }
}
