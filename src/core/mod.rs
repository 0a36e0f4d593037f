//! Core module containing the invoice domain, validation and collaborator traits

pub mod auth;
pub mod cache;
pub mod error;
pub mod events;
pub mod invoice;
pub mod service;
pub mod state;
pub mod validation;

pub use auth::{Authenticator, CredentialsProvider, SessionUser, UserAccount};
pub use cache::{PathRevalidator, ViewCache};
pub use error::{InvoiceError, InvoiceResult};
pub use events::{EventBus, ViewEvent};
pub use invoice::{Cents, Invoice, InvoiceChanges, InvoiceStatus, NewInvoice};
pub use service::InvoiceStore;
pub use state::{ActionOutcome, ActionState, FailureKind, FieldErrors};
