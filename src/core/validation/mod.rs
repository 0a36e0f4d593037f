//! Form validation
//!
//! Raw form submissions are parsed against the invoice schema before any action
//! touches the store.

pub mod extractor;
pub mod schema;
pub mod validators;

pub use extractor::FormData;
pub use schema::{
    CreateInvoice, DeleteInvoice, FieldChecker, InvoiceSchema, InvoiceSubset,
    MISSING_FIELDS_MESSAGE, SubsetRecord, UpdateInvoice,
};
