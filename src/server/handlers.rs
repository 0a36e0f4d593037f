//! HTTP handlers for the invoice form actions
//!
//! Handlers only translate between HTTP and [`InvoiceActions`]; every decision is
//! taken by the action itself.

use crate::actions::InvoiceActions;
use crate::core::cache::ViewCache;
use crate::core::error::InvoiceResult;
use crate::core::state::{ActionOutcome, ActionState, FailureKind};
use crate::core::validation::FormData;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::{Value, json};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub actions: InvoiceActions,
    /// Rendered listing views, revalidated by the actions after each write
    pub views: ViewCache,
    /// Where a successful sign-in sends the browser
    pub sign_in_redirect: Arc<str>,
}

/// Map an action outcome onto an HTTP response
///
/// - `Redirect` → `303 See Other`
/// - `Completed` → `200` with the state
/// - validation failure → `422` with the state
/// - store failure → `500` with the state
pub fn outcome_response(outcome: ActionOutcome) -> Response {
    match outcome {
        ActionOutcome::Redirect { to } => Redirect::to(&to).into_response(),
        ActionOutcome::Completed(state) => (StatusCode::OK, Json(state)).into_response(),
        ActionOutcome::Failed {
            kind: FailureKind::Validation,
            state,
        } => (StatusCode::UNPROCESSABLE_ENTITY, Json(state)).into_response(),
        ActionOutcome::Failed {
            kind: FailureKind::Store,
            state,
        } => (StatusCode::INTERNAL_SERVER_ERROR, Json(state)).into_response(),
    }
}

pub async fn create_invoice(State(state): State<AppState>, form: FormData) -> Response {
    let outcome = state
        .actions
        .create_invoice(&ActionState::default(), &form)
        .await;
    outcome_response(outcome)
}

pub async fn update_invoice(State(state): State<AppState>, form: FormData) -> Response {
    let outcome = state
        .actions
        .update_invoice(&ActionState::default(), &form)
        .await;
    outcome_response(outcome)
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    form: FormData,
) -> InvoiceResult<Response> {
    let outcome = state.actions.delete_invoice(&form).await?;
    Ok(outcome_response(outcome))
}

pub async fn login(State(state): State<AppState>, form: FormData) -> InvoiceResult<Response> {
    match state.actions.authenticate(None, &form).await? {
        None => Ok(Redirect::to(&state.sign_in_redirect).into_response()),
        Some(code) => Ok((StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response()),
    }
}

/// Invoice listing, served from the view cache until the next revalidation
pub async fn list_invoices(State(state): State<AppState>) -> InvoiceResult<Json<Value>> {
    let path = state.actions.listing_path();
    if let Some(view) = state.views.get(path) {
        tracing::debug!(path, "serving cached listing");
        return Ok(Json(view));
    }

    let generation = state.views.generation(path);
    let invoices = state.actions.store().list().await?;
    let view = json!({
        "invoices": invoices,
        "count": invoices.len(),
        "generation": generation,
    });

    if !state.views.store(path, generation, view.clone()) {
        tracing::debug!(path, generation, "listing revalidated while rendering");
    }
    Ok(Json(view))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoice-actions"
    }))
}
