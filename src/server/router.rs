//! Route table for the invoice dashboard

use super::handlers::{
    AppState, create_invoice, delete_invoice, health_check, list_invoices, login, update_invoice,
};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Build the application routes
///
/// With the default listing path `/dashboard/invoices`:
/// - GET  /health
/// - GET  /dashboard/invoices         - Cached invoice listing
/// - POST /dashboard/invoices/create  - Create an invoice
/// - POST /dashboard/invoices/update  - Update an invoice (id in the form)
/// - POST /dashboard/invoices/delete  - Delete an invoice (id in the form)
/// - POST /login                      - Credential sign-in
pub fn build_routes(state: AppState) -> Router {
    let base = state.actions.listing_path().trim_end_matches('/').to_string();
    let listing = if base.is_empty() { "/" } else { base.as_str() };

    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route(listing, get(list_invoices))
        .route(&format!("{base}/create"), post(create_invoice))
        .route(&format!("{base}/update"), post(update_invoice))
        .route(&format!("{base}/delete"), post(delete_invoice))
        .route("/login", post(login))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
