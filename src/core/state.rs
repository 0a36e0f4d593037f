//! Values returned from form actions to the page that submitted them

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field-keyed error messages, in rule-table order
///
/// Keys are the form field names (`customerId`, `amount`, ...). Each field maps to
/// the ordered list of messages that apply to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to a field's list
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages recorded for a field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Field names carrying at least one error
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// State handed back to the form
///
/// Serializes to `{ "errors"?: {...}, "message"?: string | null }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ActionState {
    /// State carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: None,
            message: Some(message.into()),
        }
    }

    /// State carrying field errors and a top-level message
    pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors: Some(errors),
            message: Some(message.into()),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }
}

/// Why an action returned a failure state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Input was rejected; nothing was written
    Validation,
    /// The store call failed; nothing else happened
    Store,
}

/// Result of running a form action
///
/// Actions never navigate implicitly: a successful write yields `Redirect` after the
/// listing view has been revalidated, and every other outcome carries a state the
/// caller renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The write succeeded; send the client to `to`
    Redirect { to: String },
    /// The write succeeded and the action reports a confirmation instead of navigating
    Completed(ActionState),
    /// The action failed; nothing after the failing step ran
    Failed { kind: FailureKind, state: ActionState },
}

impl ActionOutcome {
    pub fn validation(state: ActionState) -> Self {
        ActionOutcome::Failed {
            kind: FailureKind::Validation,
            state,
        }
    }

    pub fn store(message: &str) -> Self {
        ActionOutcome::Failed {
            kind: FailureKind::Store,
            state: ActionState::message(message),
        }
    }

    /// The state to render, if any
    pub fn state(&self) -> Option<&ActionState> {
        match self {
            ActionOutcome::Redirect { .. } => None,
            ActionOutcome::Completed(state) | ActionOutcome::Failed { state, .. } => Some(state),
        }
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            ActionOutcome::Redirect { to } => Some(to),
            _ => None,
        }
    }
}
