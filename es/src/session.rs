//! Sign-in state machine
//!
//! A session starts unauthenticated and moves to authenticated exactly once.
//! Credential checking belongs to an [`Authenticator`]; the bundled
//! [`SimulatedAuthenticator`] accepts anything after a fixed delay.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Email and password as typed on the sign-in screen
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
}

/// Sign-in failures reported by an authenticator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Sign-in service unavailable: {0}")]
    Unavailable(String),
}

/// External identity capability
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn attempt_login(&self, credentials: &Credentials) -> Result<Identity, AuthError>;
}

/// Placeholder authenticator: waits, then accepts any credentials
pub struct SimulatedAuthenticator {
    delay: Duration,
}

impl SimulatedAuthenticator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Authenticator for SimulatedAuthenticator {
    async fn attempt_login(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        debug!(delay_ms = self.delay.as_millis() as u64, "SimulatedAuthenticator::attempt_login: called");
        tokio::time::sleep(self.delay).await;
        Ok(Identity {
            email: credentials.email.clone(),
        })
    }
}

/// Which screen the session should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
}

/// Session state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(Identity),
}

/// Two-state session; the only transition is a successful login
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::Authenticated(identity) => Some(identity),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn view(&self) -> View {
        if self.is_authenticated() { View::Dashboard } else { View::Login }
    }

    /// Attempt the unauthenticated -> authenticated transition
    ///
    /// On failure the session stays unauthenticated. Once authenticated,
    /// further calls return the current identity without consulting the
    /// authenticator.
    pub async fn login(
        &mut self,
        authenticator: &dyn Authenticator,
        credentials: &Credentials,
    ) -> Result<&Identity, AuthError> {
        debug!(email = %credentials.email, "login: called");
        if self.is_authenticated() {
            debug!("login: already authenticated");
        } else {
            match authenticator.attempt_login(credentials).await {
                Ok(identity) => {
                    info!(email = %identity.email, "login: authenticated");
                    self.state = SessionState::Authenticated(identity);
                }
                Err(e) => {
                    warn!(email = %credentials.email, error = %e, "login: rejected");
                    return Err(e);
                }
            }
        }

        match &self.state {
            SessionState::Authenticated(identity) => Ok(identity),
            SessionState::Unauthenticated => Err(AuthError::InvalidCredentials),
        }
    }
}
