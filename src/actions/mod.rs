//! Form actions
//!
//! Each action takes the state previously returned to the form (ignored, kept for
//! the calling convention) and the submitted [`FormData`](crate::core::validation::FormData),
//! validates it, performs at most one store write and reports an
//! [`ActionOutcome`](crate::core::state::ActionOutcome).
//!
//! ```text
//! form ──▶ schema subset ──✗──▶ Failed{Validation}          (no store access)
//!                        └─✓──▶ store write ──✗──▶ Failed{Store}      (no revalidation)
//!                                           └─✓──▶ revalidate listing ──▶ Redirect
//! ```

mod auth;
mod invoices;

pub use auth::CREDENTIAL_SIGNIN;
pub use invoices::{CREATE_STORE_FAILURE, DELETE_STORE_FAILURE, DELETED_MESSAGE, UPDATE_STORE_FAILURE};

use crate::config::AppConfig;
use crate::core::auth::Authenticator;
use crate::core::cache::PathRevalidator;
use crate::core::service::InvoiceStore;
use crate::core::state::ActionOutcome;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

/// Source of the date stamped on new invoices
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Everything the actions need, shared across requests
///
/// Holds no per-request state; every call re-validates from the raw form.
#[derive(Clone)]
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    revalidator: Arc<dyn PathRevalidator>,
    authenticator: Arc<dyn Authenticator>,
    listing_path: String,
    delete_enabled: bool,
    auth_strategy: String,
    clock: Clock,
}

impl InvoiceActions {
    /// Actions with the default settings of [`AppConfig`]
    pub fn new(
        store: Arc<dyn InvoiceStore>,
        revalidator: Arc<dyn PathRevalidator>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self::from_config(store, revalidator, authenticator, &AppConfig::default())
    }

    pub fn from_config(
        store: Arc<dyn InvoiceStore>,
        revalidator: Arc<dyn PathRevalidator>,
        authenticator: Arc<dyn Authenticator>,
        config: &AppConfig,
    ) -> Self {
        Self {
            store,
            revalidator,
            authenticator,
            listing_path: config.invoices.listing_path.clone(),
            delete_enabled: config.invoices.delete_enabled,
            auth_strategy: config.auth.provider.clone(),
            clock: Arc::new(|| Utc::now().date_naive()),
        }
    }

    /// Stamp new invoices with dates from `clock` instead of the current UTC date
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_delete_enabled(mut self, enabled: bool) -> Self {
        self.delete_enabled = enabled;
        self
    }

    pub fn listing_path(&self) -> &str {
        &self.listing_path
    }

    pub fn store(&self) -> &Arc<dyn InvoiceStore> {
        &self.store
    }

    /// Invalidate the listing and send the client to it
    fn finish_write(&self) -> ActionOutcome {
        self.revalidator.revalidate_path(&self.listing_path);
        ActionOutcome::Redirect {
            to: self.listing_path.clone(),
        }
    }
}
