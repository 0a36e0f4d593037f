//! Axum extractor for submitted form data
//!
//! Form posts arrive as `application/x-www-form-urlencoded` bodies. `FormData`
//! keeps them as an untyped string map; turning them into typed records is the
//! job of [`super::schema`].

use crate::core::error::{InvoiceError, ValidationError};
use axum::{
    Form,
    extract::{FromRequest, Request},
};
use indexmap::IndexMap;

/// Raw key/value pairs submitted by a form
///
/// Every value of a repeated key is kept in submission order. Invoice fields read
/// the first one; credentials read the last one (see [`FormData::last_values`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData(IndexMap<String, Vec<String>>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// First value submitted for `name`, if any
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.entry(name.into()).or_default().push(value.into());
    }

    /// Copy of the form restricted to `names`
    pub fn pick(&self, names: &[&str]) -> FormData {
        FormData(
            self.0
                .iter()
                .filter(|(key, _)| names.contains(&key.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Each key with its first value
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.first().map(|first| (k.as_str(), first.as_str())))
    }

    /// Each key with its last value, as an object built entry by entry would hold
    pub fn last_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.last().map(|last| (k.as_str(), last.as_str())))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (k, v) in iter {
            form.append(k, v);
        }
        form
    }
}

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = InvoiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<Vec<(String, String)>>::from_request(req, state).await {
            Ok(Form(pairs)) => Ok(pairs.into_iter().collect()),
            Err(e) => {
                tracing::debug!(error = %e, "unreadable form body");
                Err(InvoiceError::Validation(ValidationError::InvalidForm {
                    message: e.body_text(),
                }))
            }
        }
    }
}
