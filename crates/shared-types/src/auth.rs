use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// Name of the cookie carrying the school API token, on both sides of the console.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// The school uses a single shared staff password.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct LoginRequest {
    #[serde(rename = "mot_de_passe")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
}

/// Response of the authentication check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    #[serde(rename = "authentifie", default)]
    pub authenticated: bool,
}
