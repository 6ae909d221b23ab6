use reqwest::{Method, StatusCode};
use shared_types::{AppError, AuthStatus, LoginRequest, ACCESS_TOKEN_COOKIE};

use super::SchoolApi;
use crate::auth::cookies::{issued_cookie, IssuedCookie};
use crate::error_convert::ReqwestErrorExt;

impl SchoolApi {
    /// Exchange the staff password for a school token.
    ///
    /// The backend answers 200 with the token in an `access_token` cookie,
    /// or 401 when the password is wrong.
    #[tracing::instrument(skip(self, req))]
    pub async fn login(&self, req: &LoginRequest) -> Result<IssuedCookie, AppError> {
        let response = self
            .request(Method::POST, "/auth/login/")
            .json(req)
            .send()
            .await
            .map_err(ReqwestErrorExt::into_app_error)?;

        match response.status() {
            s if s.is_success() => issued_cookie(response.headers(), ACCESS_TOKEN_COOKIE)
                .ok_or_else(|| {
                    tracing::error!("Login succeeded but no access token cookie was issued");
                    AppError::upstream("The school server did not issue a session")
                }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::info!("Login refused");
                Err(AppError::unauthorized("Incorrect password"))
            }
            s => {
                let body = response.text().await.unwrap_or_default();
                Err(super::error_from_body(s.as_u16(), &body))
            }
        }
    }

    /// Ask the backend whether the current token is still valid.
    ///
    /// A missing, expired or forged token is reported as 403 by the backend;
    /// both 401 and 403 mean "not authenticated" here.
    #[tracing::instrument(skip(self))]
    pub async fn is_authenticated(&self) -> Result<bool, AppError> {
        if !self.has_token() {
            return Ok(false);
        }
        let response = self
            .request(Method::GET, "/auth/est_authentifie/")
            .send()
            .await
            .map_err(ReqwestErrorExt::into_app_error)?;

        match response.status() {
            s if s.is_success() => {
                let status: AuthStatus = Self::decode(response).await?;
                Ok(status.authenticated)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(false),
            s => {
                let body = response.text().await.unwrap_or_default();
                Err(super::error_from_body(s.as_u16(), &body))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AppError> {
        self.post_json("/auth/logout/", &serde_json::json!({})).await?;
        Ok(())
    }
}
