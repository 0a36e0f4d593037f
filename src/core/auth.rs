//! Authentication collaborator
//!
//! The sign-in action does not check credentials itself. It forwards the submitted
//! form to an [`Authenticator`] together with the name of a strategy, and only
//! interprets the failure it gets back.

use super::error::{AuthError, AuthErrorKind};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Marker an authenticator puts in its error message when credentials are rejected
pub const CREDENTIALS_SIGNIN: &str = "CredentialsSignin";

/// Strategy name for email/password sign-in
pub const CREDENTIALS_STRATEGY: &str = "credentials";

/// A signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
}

/// External authentication provider
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify `credentials` using `strategy`
    ///
    /// Rejected credentials must fail with an error whose message contains
    /// [`CREDENTIALS_SIGNIN`].
    async fn sign_in(
        &self,
        strategy: &str,
        credentials: &HashMap<String, String>,
    ) -> Result<SessionUser, AuthError>;
}

/// Submitted email/password pair
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

impl Credentials {
    /// Read and validate credentials from submitted form values
    pub fn from_form(form: &HashMap<String, String>) -> Option<Self> {
        let credentials = Credentials {
            email: form.get("email")?.clone(),
            password: form.get("password")?.clone(),
        };
        credentials.validate().ok()?;
        Some(credentials)
    }
}

/// A user known to [`CredentialsProvider`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

/// Email/password authenticator over a fixed list of accounts
///
/// Intended for development and tests, like a seeded users table.
#[derive(Debug, Clone, Default)]
pub struct CredentialsProvider {
    users: HashMap<String, UserAccount>,
}

impl CredentialsProvider {
    pub fn new(users: impl IntoIterator<Item = UserAccount>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|u| (u.email.to_lowercase(), u))
                .collect(),
        }
    }
}

#[async_trait]
impl Authenticator for CredentialsProvider {
    async fn sign_in(
        &self,
        strategy: &str,
        credentials: &HashMap<String, String>,
    ) -> Result<SessionUser, AuthError> {
        if strategy != CREDENTIALS_STRATEGY {
            return Err(AuthError::new(
                AuthErrorKind::Configuration,
                format!("Unsupported sign-in strategy '{}'", strategy),
            ));
        }

        let Some(submitted) = Credentials::from_form(credentials) else {
            return Err(AuthError::credentials_signin());
        };

        match self.users.get(&submitted.email.to_lowercase()) {
            Some(user) if user.password == submitted.password => Ok(SessionUser {
                email: user.email.clone(),
                name: user.name.clone(),
            }),
            _ => Err(AuthError::credentials_signin()),
        }
    }
}
