use dioxus::prelude::*;

/// Global authentication state.
///
/// Pages only read it. The flag changes through `sign_in`, `sign_out` and
/// `confirm`, all of which go through the server.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    authenticated: Signal<bool>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            authenticated: Signal::new(false),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.read()
    }

    /// Check the password with the school backend. On success the server has
    /// set the session cookie.
    pub async fn sign_in(mut self, password: String) -> Result<(), ServerFnError> {
        server::api::login(password).await?;
        self.authenticated.set(true);
        tracing::info!("Signed in");
        Ok(())
    }

    /// Drop the session locally even when the server call fails.
    pub async fn sign_out(mut self) {
        if let Err(e) = server::api::logout().await {
            tracing::warn!(error = %e, "Logout request failed");
        }
        self.authenticated.set(false);
    }

    /// Record the outcome of a session check made by the route guard.
    pub fn confirm(mut self, authenticated: bool) {
        if *self.authenticated.peek() != authenticated {
            self.authenticated.set(authenticated);
        }
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}
