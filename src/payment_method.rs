//! The fixed set of payment methods a bill can be settled with.

use std::{fmt, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

/// How the customer paid for a bill.
///
/// The first variant, [PaymentMethod::Cash], is the default used when a form
/// does not specify a payment method. Bills are stored with the display text
/// of the variant, e.g. "Credit Card", so the table remains readable with
/// plain SQL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Paid with cash.
    #[default]
    Cash,
    /// Paid by credit card.
    #[serde(rename = "Credit Card")]
    CreditCard,
    /// Paid by debit card.
    #[serde(rename = "Debit Card")]
    DebitCard,
    /// Paid via a QR/barcode scanner terminal.
    Scanner,
    /// Paid via UPI transfer.
    #[serde(rename = "UPI")]
    Upi,
}

impl PaymentMethod {
    /// Every payment method, in the order they are presented to the user.
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Scanner,
        PaymentMethod::Upi,
    ];

    /// The user-facing text for the payment method.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Scanner => "Scanner",
            PaymentMethod::Upi => "UPI",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The error returned when text does not name a payment method.
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("unrecognized payment method \"{0}\"")]
pub struct ParsePaymentMethodError(String);

impl FromStr for PaymentMethod {
    type Err = ParsePaymentMethodError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == text)
            .ok_or_else(|| ParsePaymentMethodError(text.to_owned()))
    }
}

impl ToSql for PaymentMethod {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for PaymentMethod {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}
