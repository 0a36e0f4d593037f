//! HTTP server for the invoice dashboard
//!
//! The [`ServerBuilder`] wires a store, an authenticator and a [`ViewCache`](crate::core::cache::ViewCache)
//! into [`InvoiceActions`](crate::actions::InvoiceActions) and exposes them as form routes.

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{AppState, outcome_response};
pub use router::build_routes;
