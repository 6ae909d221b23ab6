use dioxus::prelude::ServerFnError;
use shared_types::AppError;

/// Convert a transport-level reqwest failure into an AppError.
///
/// Timeouts and connection failures mean the school backend is unreachable;
/// a body that does not decode means it answered with something unexpected.
pub fn reqwest_to_app_error(err: reqwest::Error) -> AppError {
    if let Some(status) = err.status() {
        return AppError::from_status(status.as_u16(), err.to_string());
    }
    if err.is_decode() {
        return AppError::upstream(format!("Unexpected response from the school server: {err}"));
    }
    if err.is_timeout() {
        return AppError::upstream("The school server did not answer in time");
    }
    AppError::upstream(format!("School server unreachable: {err}"))
}

/// Convert an AppError into a ServerFnError by serializing as JSON.
pub fn app_error_to_server_fn_error(err: AppError) -> ServerFnError {
    let json = serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone());
    ServerFnError::new(json)
}

/// Extension trait providing `.into_app_error()` on reqwest::Error.
pub trait ReqwestErrorExt {
    fn into_app_error(self) -> AppError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_app_error(self) -> AppError {
        reqwest_to_app_error(self)
    }
}

/// Extension trait providing `.into_server_fn_error()` on AppError.
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        app_error_to_server_fn_error(self)
    }
}

/// Trait for validating request DTOs before they are forwarded.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{AppErrorKind, TeacherRequest};

    #[test]
    fn server_fn_error_carries_json_payload() {
        let err = AppError::conflict("A sheet already exists for this month");
        let sfe = err.clone().into_server_fn_error();
        let parsed = AppError::from_server_error(&sfe.to_string()).unwrap();
        assert_eq!(parsed, err);
    }

    #[test]
    fn derive_validation_reports_rust_field_names() {
        let req = TeacherRequest {
            last_name: "X".into(),
            first_name: "Marie".into(),
        };
        let err = req.validate_request().unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert!(err.field_errors.contains_key("last_name"));
    }
}
