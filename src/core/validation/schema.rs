//! Invoice field schema
//!
//! One canonical rule per invoice field, plus the subsets each action validates:
//!
//! | subset   | id | customerId | amount | status |
//! |----------|----|------------|--------|--------|
//! | create   |    | x          | x      | x      |
//! | update   | x  | x          | x      | x      |
//! | delete   | x  |            |        |        |
//!
//! `date` is never read from the form: the create action stamps it and updates
//! leave it alone.
//!
//! Parsing is a pure function of the submitted form: it yields either a fully typed
//! record or the field errors, never anything in between.

use super::extractor::FormData;
use super::validators::{coerce_number, greater_than, one_of, present};
use crate::core::invoice::{Cents, InvoiceChanges, InvoiceStatus, NewInvoice};
use crate::core::state::FieldErrors;
use chrono::NaiveDate;

/// Top-level message returned with any field errors
pub const MISSING_FIELDS_MESSAGE: &str = "Missing Fields. Failed to Create Invoice.";

/// Form field names
pub mod fields {
    pub const ID: &str = "id";
    pub const CUSTOMER_ID: &str = "customerId";
    pub const AMOUNT: &str = "amount";
    pub const STATUS: &str = "status";
}

/// A single field's rule: where to read it and how to turn it into `T`
pub struct FieldRule<T> {
    pub field: &'static str,
    check: fn(Option<&str>) -> Result<T, &'static str>,
}

impl<T> FieldRule<T> {
    pub fn check(&self, raw: Option<&str>) -> Result<T, &'static str> {
        (self.check)(raw)
    }
}

/// The canonical rule table
pub struct InvoiceSchema;

impl InvoiceSchema {
    pub const ID: FieldRule<String> = FieldRule {
        field: fields::ID,
        check: check_id,
    };

    pub const CUSTOMER_ID: FieldRule<String> = FieldRule {
        field: fields::CUSTOMER_ID,
        check: check_customer_id,
    };

    /// Strictly positive dollars, converted to `round(dollars * 100)` cents
    pub const AMOUNT: FieldRule<Cents> = FieldRule {
        field: fields::AMOUNT,
        check: check_amount,
    };

    pub const STATUS: FieldRule<InvoiceStatus> = FieldRule {
        field: fields::STATUS,
        check: check_status,
    };
}

fn check_id(raw: Option<&str>) -> Result<String, &'static str> {
    present(raw).map(str::to_string).ok_or("Required")
}

// Any submitted string passes, including ""; the store decides whether it names a customer
fn check_customer_id(raw: Option<&str>) -> Result<String, &'static str> {
    present(raw)
        .map(str::to_string)
        .ok_or("Please select a customer.")
}

fn check_amount(raw: Option<&str>) -> Result<Cents, &'static str> {
    const MESSAGE: &str = "Please enter an amount greater than $0.";

    let dollars = coerce_number(raw);
    if !greater_than(0.0)(dollars) {
        return Err(MESSAGE);
    }
    Cents::from_dollars(dollars).ok_or(MESSAGE)
}

fn check_status(raw: Option<&str>) -> Result<InvoiceStatus, &'static str> {
    const MESSAGE: &str = "Please select an invoice status.";
    const ALLOWED: &[&str] = &["pending", "paid"];

    if !one_of(ALLOWED)(raw) {
        return Err(MESSAGE);
    }
    raw.and_then(|s| s.parse().ok()).ok_or(MESSAGE)
}

/// Which part of the schema an action validates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceSubset {
    /// `customerId`, `amount`, `status`
    Create,
    /// `id`, `customerId`, `amount`, `status`
    Update,
    /// `id`
    Delete,
}

impl InvoiceSubset {
    /// Field names validated by this subset, in rule-table order
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            InvoiceSubset::Create => &[fields::CUSTOMER_ID, fields::AMOUNT, fields::STATUS],
            InvoiceSubset::Update => &[
                fields::ID,
                fields::CUSTOMER_ID,
                fields::AMOUNT,
                fields::STATUS,
            ],
            InvoiceSubset::Delete => &[fields::ID],
        }
    }

    pub fn includes(&self, field: &str) -> bool {
        self.fields().contains(&field)
    }

    /// Validate `form` against the subset of `R`
    ///
    /// Fields outside the subset are dropped before any rule runs, so a stray
    /// `id` can never reach a create.
    pub fn parse<R: SubsetRecord>(form: &FormData) -> Result<R, FieldErrors> {
        let subset = R::SUBSET;
        let picked = form.pick(subset.fields());
        let mut checker = FieldChecker {
            subset,
            form: &picked,
            errors: FieldErrors::new(),
        };

        match R::read(&mut checker) {
            Some(record) if checker.errors.is_empty() => Ok(record),
            _ => Err(checker.errors),
        }
    }
}

/// Typed record produced by one subset of the schema
pub trait SubsetRecord: Sized {
    const SUBSET: InvoiceSubset;

    /// Run the rules of every field in the record
    ///
    /// Must check every field before giving up, so all errors are reported at once.
    fn read(fields: &mut FieldChecker<'_>) -> Option<Self>;
}

/// Runs rules over a form restricted to one subset, collecting field errors
pub struct FieldChecker<'a> {
    subset: InvoiceSubset,
    form: &'a FormData,
    errors: FieldErrors,
}

impl FieldChecker<'_> {
    pub fn check<T>(&mut self, rule: &FieldRule<T>) -> Option<T> {
        debug_assert!(
            self.subset.includes(rule.field),
            "{} is not part of the {:?} subset",
            rule.field,
            self.subset
        );
        match rule.check(self.form.get(rule.field)) {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.push(rule.field, message);
                None
            }
        }
    }
}

/// Fields accepted by the create action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInvoice {
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
}

impl SubsetRecord for CreateInvoice {
    const SUBSET: InvoiceSubset = InvoiceSubset::Create;

    fn read(fields: &mut FieldChecker<'_>) -> Option<Self> {
        let customer_id = fields.check(&InvoiceSchema::CUSTOMER_ID);
        let amount = fields.check(&InvoiceSchema::AMOUNT);
        let status = fields.check(&InvoiceSchema::STATUS);
        Some(Self {
            customer_id: customer_id?,
            amount: amount?,
            status: status?,
        })
    }
}

impl CreateInvoice {
    /// Row to insert, dated `date`
    pub fn into_new_invoice(self, date: NaiveDate) -> NewInvoice {
        NewInvoice {
            customer_id: self.customer_id,
            amount: self.amount,
            status: self.status,
            date,
        }
    }
}

/// Fields accepted by the update action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateInvoice {
    pub id: String,
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
}

impl SubsetRecord for UpdateInvoice {
    const SUBSET: InvoiceSubset = InvoiceSubset::Update;

    fn read(fields: &mut FieldChecker<'_>) -> Option<Self> {
        let id = fields.check(&InvoiceSchema::ID);
        let customer_id = fields.check(&InvoiceSchema::CUSTOMER_ID);
        let amount = fields.check(&InvoiceSchema::AMOUNT);
        let status = fields.check(&InvoiceSchema::STATUS);
        Some(Self {
            id: id?,
            customer_id: customer_id?,
            amount: amount?,
            status: status?,
        })
    }
}

impl UpdateInvoice {
    /// Split into the target id and the columns to overwrite
    pub fn into_changes(self) -> (String, InvoiceChanges) {
        (
            self.id,
            InvoiceChanges {
                customer_id: self.customer_id,
                amount: self.amount,
                status: self.status,
            },
        )
    }
}

/// Fields accepted by the delete action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteInvoice {
    pub id: String,
}

impl SubsetRecord for DeleteInvoice {
    const SUBSET: InvoiceSubset = InvoiceSubset::Delete;

    fn read(fields: &mut FieldChecker<'_>) -> Option<Self> {
        Some(Self {
            id: fields.check(&InvoiceSchema::ID)?,
        })
    }
}
