//! The invoice entity and its value types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Format used for invoice dates (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// Every accepted status, in declaration order
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = ();

    /// Exact match only: `"Paid"` or `" paid"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(())
    }
}

/// Monetary amount stored as an integer count of cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    /// Convert a user-facing amount in dollars to cents.
    ///
    /// Returns `None` for values that are not finite or that do not fit in an `i64`
    /// once scaled.
    pub fn from_dollars(dollars: f64) -> Option<Self> {
        let scaled = (dollars * 100.0).round();
        if !scaled.is_finite() || scaled >= i64::MAX as f64 || scaled <= i64::MIN as f64 {
            return None;
        }
        Some(Cents(scaled as i64))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// A persisted invoice row
///
/// `id` is assigned by the store on insert and never changes afterwards;
/// `date` is set once at creation and untouched by updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

/// Values written by an insert; the store generates the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Values written by an update of an existing row
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
}

mod date_format {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_exact_values_only() {
        assert_eq!("pending".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Pending));
        assert_eq!("paid".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Paid));
        assert!("Paid".parse::<InvoiceStatus>().is_err());
        assert!("overdue".parse::<InvoiceStatus>().is_err());
        assert!("".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_cents_rounds_to_nearest() {
        assert_eq!(Cents::from_dollars(42.5), Some(Cents(4250)));
        assert_eq!(Cents::from_dollars(0.1 + 0.2), Some(Cents(30)));
        assert_eq!(Cents::from_dollars(19.999), Some(Cents(2000)));
        assert_eq!(Cents::from_dollars(0.004), Some(Cents(0)));
    }

    #[test]
    fn test_cents_rejects_non_finite_and_overflow() {
        assert_eq!(Cents::from_dollars(f64::NAN), None);
        assert_eq!(Cents::from_dollars(f64::INFINITY), None);
        assert_eq!(Cents::from_dollars(1e300), None);
    }

    #[test]
    fn test_invoice_serializes_camel_case_with_plain_date() {
        let invoice = Invoice {
            id: Uuid::nil(),
            customer_id: "c1".to_string(),
            amount: Cents(4250),
            status: InvoiceStatus::Paid,
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        };

        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["customerId"], "c1");
        assert_eq!(json["amount"], 4250);
        assert_eq!(json["status"], "paid");
        assert_eq!(json["date"], "2024-03-09");

        let back: Invoice = serde_json::from_value(json).unwrap();
        assert_eq!(back, invoice);
    }
}
