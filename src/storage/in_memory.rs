//! In-memory implementation of InvoiceStore for testing and development

use crate::core::error::StoreError;
use crate::core::invoice::{Invoice, InvoiceChanges, NewInvoice};
use crate::core::service::InvoiceStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

const BACKEND: &str = "in-memory";

/// In-memory invoice store
///
/// Ids must be UUIDs, as with the SQL backend. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<HashMap<Uuid, Invoice>>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `invoices`
    pub fn with_invoices(invoices: impl IntoIterator<Item = Invoice>) -> Self {
        let map = invoices.into_iter().map(|inv| (inv.id, inv)).collect();
        Self {
            invoices: Arc::new(RwLock::new(map)),
        }
    }

    pub fn len(&self) -> usize {
        self.invoices.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn parse_id(id: &str) -> Result<Uuid, StoreError> {
        Uuid::parse_str(id)
            .map_err(|_| StoreError::query(BACKEND, format!("invalid input syntax for type uuid: \"{}\"", id)))
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<Uuid, StoreError> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| StoreError::query(BACKEND, format!("Failed to acquire write lock: {}", e)))?;

        let id = Uuid::new_v4();
        invoices.insert(
            id,
            Invoice {
                id,
                customer_id: invoice.customer_id,
                amount: invoice.amount,
                status: invoice.status,
                date: invoice.date,
            },
        );

        Ok(id)
    }

    async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<(), StoreError> {
        let id = Self::parse_id(id)?;
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| StoreError::query(BACKEND, format!("Failed to acquire write lock: {}", e)))?;

        if let Some(invoice) = invoices.get_mut(&id) {
            invoice.customer_id = changes.customer_id;
            invoice.amount = changes.amount;
            invoice.status = changes.status;
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let id = Self::parse_id(id)?;
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| StoreError::query(BACKEND, format!("Failed to acquire write lock: {}", e)))?;

        invoices.remove(&id);

        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Invoice>, StoreError> {
        let id = Self::parse_id(id)?;
        let invoices = self
            .invoices
            .read()
            .map_err(|e| StoreError::query(BACKEND, format!("Failed to acquire read lock: {}", e)))?;

        Ok(invoices.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| StoreError::query(BACKEND, format!("Failed to acquire read lock: {}", e)))?;

        let mut all: Vec<Invoice> = invoices.values().cloned().collect();
        all.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }
}
