//! Store trait for invoice persistence

use super::error::StoreError;
use super::invoice::{Invoice, InvoiceChanges, NewInvoice};
use async_trait::async_trait;
use uuid::Uuid;

/// Persistent store for invoices
///
/// Every write is a single statement affecting at most one row. Ids are passed as
/// submitted by the form; a store rejects ids it cannot interpret with a
/// [`StoreError`]. Concurrent writes to the same id are not coordinated: the last
/// one wins.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new row and return its generated id
    async fn insert(&self, invoice: NewInvoice) -> Result<Uuid, StoreError>;

    /// Overwrite customer, amount and status of the row matching `id`
    ///
    /// Updating an id that matches no row is not an error.
    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<(), StoreError>;

    /// Remove the row matching `id`
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Fetch one invoice
    async fn get(&self, id: &str) -> Result<Option<Invoice>, StoreError>;

    /// All invoices, newest date first
    async fn list(&self) -> Result<Vec<Invoice>, StoreError>;
}
