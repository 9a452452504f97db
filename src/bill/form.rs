//! The raw transaction form and its validation rules.

use serde::{Deserialize, Serialize};

use crate::{Error, bill::BillDraft, payment_method::PaymentMethod};

/// The transaction form exactly as the user submitted it.
///
/// All text fields arrive as raw strings and are validated by
/// [BillForm::validate] before anything touches the store. The payment
/// method is constrained to the fixed set of options by the input widget,
/// so it is not re-validated here.
///
/// The [Default] value is the reset state of the form: every text field
/// empty and the payment method back on [PaymentMethod::Cash], the first
/// option. Clients are expected to place input focus on the name field when
/// showing the reset form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillForm {
    /// The customer's name. Required.
    #[serde(default)]
    pub name: String,
    /// The customer's phone number. Optional.
    #[serde(default)]
    pub phone: String,
    /// What was sold. Required.
    #[serde(default)]
    pub item: String,
    /// How many units were sold. Required, must parse to an integer > 0.
    #[serde(default)]
    pub quantity: String,
    /// The unit price. Required, must parse to a number > 0.
    #[serde(default)]
    pub price: String,
    /// How the customer paid. Defaults to cash when unspecified.
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl BillForm {
    /// Check the submitted fields and produce a draft ready for the store.
    ///
    /// Whitespace is trimmed from every text field first. An empty phone
    /// means "not provided" and becomes `None`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyField] if name, item, quantity, or price is empty
    ///   after trimming,
    /// - or [Error::InvalidNumber] if quantity or price fails to parse, or
    ///   parses to a value that is not positive.
    pub fn validate(&self) -> Result<BillDraft, Error> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        let item = self.item.trim();
        let quantity = self.quantity.trim();
        let price = self.price.trim();

        for (field, value) in [
            ("name", name),
            ("item", item),
            ("quantity", quantity),
            ("price", price),
        ] {
            if value.is_empty() {
                return Err(Error::EmptyField(field));
            }
        }

        let quantity: i64 = quantity.parse().map_err(|_| Error::InvalidNumber)?;
        let price: f64 = price.parse().map_err(|_| Error::InvalidNumber)?;

        if quantity <= 0 || !price.is_finite() || price <= 0.0 {
            return Err(Error::InvalidNumber);
        }

        Ok(BillDraft {
            name: name.to_owned(),
            phone: (!phone.is_empty()).then(|| phone.to_owned()),
            item: item.to_owned(),
            quantity,
            price,
            payment_method: self.payment_method,
        })
    }
}
