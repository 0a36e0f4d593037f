//! # Invoice Actions
//!
//! Form actions behind an invoice dashboard: create, update and delete invoices,
//! plus credential sign-in.
//!
//! ## Features
//!
//! - **Single Schema**: One rule table for every invoice field; each action validates
//!   a subset of it
//! - **Field-Level Errors**: Rejected forms come back as `{errors, message}` keyed by
//!   field name, never as panics
//! - **Minor Units**: Amounts are submitted in dollars and stored as whole cents
//! - **View Revalidation**: Successful writes invalidate the cached listing and
//!   redirect to it
//! - **Pluggable Stores**: In-memory by default, PostgreSQL behind the `postgres` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoices::prelude::*;
//!
//! let store = InMemoryInvoiceStore::new();
//! let actions = InvoiceActions::new(
//!     Arc::new(store),
//!     Arc::new(ViewCache::new()),
//!     Arc::new(CredentialsProvider::default()),
//! );
//!
//! let form: FormData = [
//!     ("customerId", "3958dc9e-712f-4377-85e9-fec4b6a6442a"),
//!     ("amount", "12.50"),
//!     ("status", "pending"),
//! ]
//! .into_iter()
//! .collect();
//!
//! match actions.create_invoice(&ActionState::default(), &form).await {
//!     ActionOutcome::Redirect { to } => println!("saved, go to {to}"),
//!     other => println!("{:?}", other.state()),
//! }
//! ```

pub mod actions;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Actions ===
    pub use crate::actions::{CREDENTIAL_SIGNIN, Clock, InvoiceActions};

    // === Core ===
    pub use crate::core::{
        auth::{Authenticator, CredentialsProvider, SessionUser, UserAccount},
        cache::{PathRevalidator, ViewCache},
        error::{AuthError, AuthErrorKind, InvoiceError, InvoiceResult, StoreError},
        events::{EventBus, ViewEvent},
        invoice::{Cents, Invoice, InvoiceChanges, InvoiceStatus, NewInvoice},
        service::InvoiceStore,
        state::{ActionOutcome, ActionState, FailureKind, FieldErrors},
        validation::{
            CreateInvoice, DeleteInvoice, FormData, InvoiceSchema, InvoiceSubset, UpdateInvoice,
        },
    };

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresInvoiceStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
