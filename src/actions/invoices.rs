use super::InvoiceActions;
use crate::core::error::{ActionError, InvoiceResult};
use crate::core::state::{ActionOutcome, ActionState, FieldErrors};
use crate::core::validation::{
    CreateInvoice, DeleteInvoice, FormData, InvoiceSubset, MISSING_FIELDS_MESSAGE, UpdateInvoice,
};

/// Message returned when the insert fails
pub const CREATE_STORE_FAILURE: &str = "Database Error";
/// Message returned when the update fails
pub const UPDATE_STORE_FAILURE: &str = "database Error";
/// Message returned when the delete fails
pub const DELETE_STORE_FAILURE: &str = "Database Error";
/// Confirmation returned after a delete
pub const DELETED_MESSAGE: &str = "Deleted Invoice.";

fn rejected(action: &str, errors: FieldErrors) -> ActionOutcome {
    tracing::debug!(
        action,
        fields = ?errors.fields().collect::<Vec<_>>(),
        "form rejected"
    );
    ActionOutcome::validation(ActionState::invalid(errors, MISSING_FIELDS_MESSAGE))
}

impl InvoiceActions {
    /// Validate a new invoice and insert it, dated today
    ///
    /// On success the listing is revalidated and the outcome redirects to it.
    pub async fn create_invoice(&self, _prev_state: &ActionState, form: &FormData) -> ActionOutcome {
        let invoice = match InvoiceSubset::parse::<CreateInvoice>(form) {
            Ok(invoice) => invoice,
            Err(errors) => return rejected("create", errors),
        };

        let row = invoice.into_new_invoice((self.clock)());
        let amount = row.amount;

        match self.store.insert(row).await {
            Ok(id) => {
                tracing::info!(invoice_id = %id, amount = amount.value(), "invoice created");
                self.finish_write()
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to insert invoice");
                ActionOutcome::store(CREATE_STORE_FAILURE)
            }
        }
    }

    /// Validate and overwrite customer, amount and status of an existing invoice
    ///
    /// The invoice date is never touched.
    pub async fn update_invoice(&self, _prev_state: &ActionState, form: &FormData) -> ActionOutcome {
        let invoice = match InvoiceSubset::parse::<UpdateInvoice>(form) {
            Ok(invoice) => invoice,
            Err(errors) => return rejected("update", errors),
        };

        let (id, changes) = invoice.into_changes();

        match self.store.update(&id, changes).await {
            Ok(()) => {
                tracing::info!(invoice_id = %id, "invoice updated");
                self.finish_write()
            }
            Err(e) => {
                tracing::warn!(invoice_id = %id, error = %e, "failed to update invoice");
                ActionOutcome::store(UPDATE_STORE_FAILURE)
            }
        }
    }

    /// Delete an invoice by id
    ///
    /// While deletes are disabled this fails with [`ActionError::DeleteDisabled`]
    /// before reading the form. Otherwise a successful delete revalidates the listing
    /// and completes with a confirmation message instead of redirecting.
    pub async fn delete_invoice(&self, form: &FormData) -> InvoiceResult<ActionOutcome> {
        if !self.delete_enabled {
            tracing::warn!("delete requested while deletes are disabled");
            return Err(ActionError::DeleteDisabled.into());
        }

        let DeleteInvoice { id } = match InvoiceSubset::parse::<DeleteInvoice>(form) {
            Ok(invoice) => invoice,
            Err(errors) => return Ok(rejected("delete", errors)),
        };

        match self.store.delete(&id).await {
            Ok(()) => {
                tracing::info!(invoice_id = %id, "invoice deleted");
                self.revalidator.revalidate_path(&self.listing_path);
                Ok(ActionOutcome::Completed(ActionState::message(DELETED_MESSAGE)))
            }
            Err(e) => {
                tracing::warn!(invoice_id = %id, error = %e, "failed to delete invoice");
                Ok(ActionOutcome::store(DELETE_STORE_FAILURE))
            }
        }
    }
}
