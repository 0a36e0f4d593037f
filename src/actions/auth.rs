use super::InvoiceActions;
use crate::core::auth::{CREDENTIALS_SIGNIN, SessionUser};
use crate::core::error::InvoiceResult;
use crate::core::validation::FormData;
use std::collections::HashMap;

/// Returned to the sign-in form when the credentials were rejected
pub const CREDENTIAL_SIGNIN: &str = "CredentialSignin";

impl InvoiceActions {
    /// Forward submitted credentials to the authenticator
    ///
    /// Returns `Ok(None)` once signed in, `Ok(Some(CREDENTIAL_SIGNIN))` when the
    /// authenticator rejected the credentials, and propagates any other failure
    /// unchanged.
    pub async fn authenticate(
        &self,
        _prev_state: Option<&str>,
        form: &FormData,
    ) -> InvoiceResult<Option<&'static str>> {
        let user = self.sign_in(form).await?;
        Ok(match user {
            Some(_) => None,
            None => Some(CREDENTIAL_SIGNIN),
        })
    }

    /// Like [`authenticate`](Self::authenticate) but keeps the signed-in user
    ///
    /// `Ok(None)` means the credentials were rejected. A field submitted more than
    /// once is forwarded with its last value.
    pub async fn sign_in(&self, form: &FormData) -> InvoiceResult<Option<SessionUser>> {
        let credentials: HashMap<String, String> = form
            .last_values()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        match self
            .authenticator
            .sign_in(&self.auth_strategy, &credentials)
            .await
        {
            Ok(user) => {
                tracing::info!(email = %user.email, "signed in");
                Ok(Some(user))
            }
            Err(e) if e.to_string().contains(CREDENTIALS_SIGNIN) => {
                tracing::debug!("credentials rejected");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::config::AppConfig;
    use crate::core::auth::Authenticator;
    use crate::core::error::{AuthError, AuthErrorKind, InvoiceError};
    use crate::storage::InMemoryInvoiceStore;
    use async_trait::async_trait;
    use std::sync::Arc;

    fn form(email: &str, password: &str) -> FormData {
        [("email", email), ("password", password)].into_iter().collect()
    }

    /// Authenticator failing with a fixed error
    struct FailingAuthenticator {
        kind: AuthErrorKind,
        message: &'static str,
    }

    #[async_trait]
    impl Authenticator for FailingAuthenticator {
        async fn sign_in(
            &self,
            _: &str,
            _: &HashMap<String, String>,
        ) -> Result<SessionUser, AuthError> {
            Err(AuthError::new(self.kind, self.message))
        }
    }

    fn actions_failing_with(kind: AuthErrorKind, message: &'static str) -> InvoiceActions {
        InvoiceActions::new(
            Arc::new(InMemoryInvoiceStore::new()),
            Arc::new(RecordingRevalidator::default()),
            Arc::new(FailingAuthenticator { kind, message }),
        )
    }

    #[tokio::test]
    async fn test_valid_credentials_return_nothing() {
        let (actions, _, _) = in_memory_actions();
        let result = actions
            .authenticate(None, &form("user@nextmail.com", "123456"))
            .await
            .unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_rejected_credentials_return_code() {
        let (actions, _, _) = in_memory_actions();
        let result = actions
            .authenticate(Some("previous"), &form("user@nextmail.com", "nope-nope"))
            .await
            .unwrap();
        assert_eq!(result, Some("CredentialSignin"));
    }

    #[tokio::test]
    async fn test_marker_anywhere_in_message_counts() {
        let actions =
            actions_failing_with(AuthErrorKind::Provider, "upstream said CredentialsSignin (401)");
        let result = actions
            .authenticate(None, &form("a@b.co", "123456"))
            .await
            .unwrap();
        assert_eq!(result, Some(CREDENTIAL_SIGNIN));
    }

    #[tokio::test]
    async fn test_other_failures_propagate() {
        let actions = actions_failing_with(AuthErrorKind::Provider, "connection refused");
        let err = actions
            .authenticate(None, &form("user@nextmail.com", "123456"))
            .await
            .unwrap_err();

        let InvoiceError::Auth(auth) = err else {
            panic!("expected auth error");
        };
        assert_eq!(auth.kind, AuthErrorKind::Provider);
        assert_eq!(auth.message, "connection refused");
    }

    #[tokio::test]
    async fn test_unknown_strategy_propagates() {
        let mut config = AppConfig::default();
        config.auth.provider = "github".to_string();
        let actions = InvoiceActions::from_config(
            Arc::new(InMemoryInvoiceStore::new()),
            Arc::new(RecordingRevalidator::default()),
            provider(),
            &config,
        );

        let err = actions
            .authenticate(None, &form("user@nextmail.com", "123456"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InvoiceError::Auth(AuthError {
                kind: AuthErrorKind::Configuration,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_repeated_field_forwards_last_value() {
        let (actions, _, _) = in_memory_actions();
        let form: FormData = [
            ("email", "user@nextmail.com"),
            ("password", "123456"),
            ("password", "wrong-password"),
        ]
        .into_iter()
        .collect();

        let result = actions.authenticate(None, &form).await.unwrap();
        assert_eq!(result, Some(CREDENTIAL_SIGNIN));
    }

    #[tokio::test]
    async fn test_sign_in_returns_user() {
        let (actions, _, _) = in_memory_actions();
        let user = actions
            .sign_in(&form("user@nextmail.com", "123456"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.name, "User");
    }
}
