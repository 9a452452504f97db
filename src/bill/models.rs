//! Shared view models for the bill listing.
//!
//! Derived values (per-row totals and the revenue summary) are computed
//! here, in the calling layer, from the raw fields the store returns.

use rusqlite::Connection;
use serde::{Serialize, Serializer};

use crate::{
    Error,
    bill::query::{BillRecord, get_bill_records},
    database_id::BillId,
    payment_method::PaymentMethod,
};

/// Renders one bill with its customer as a listing row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillRow {
    /// The ID of the bill.
    pub id: BillId,
    /// The name of the customer the bill was recorded against.
    pub customer_name: String,
    /// The customer's phone number, or an empty string if none was provided.
    pub phone: String,
    /// What was sold.
    pub item: String,
    /// How many units were sold.
    pub quantity: i64,
    /// The unit price, rendered with two decimal places.
    #[serde(serialize_with = "serialize_currency")]
    pub price: f64,
    /// How the customer paid.
    pub payment_method: PaymentMethod,
    /// The row total, `price * quantity`, rendered with two decimal places.
    /// Computed, never stored.
    #[serde(serialize_with = "serialize_currency")]
    pub total: f64,
}

impl BillRow {
    fn from_record(record: BillRecord) -> Self {
        Self {
            id: record.id,
            customer_name: record.customer_name,
            phone: record.phone.unwrap_or_default(),
            item: record.item,
            quantity: record.quantity,
            price: record.price,
            payment_method: record.payment_method,
            total: record.price * record.quantity as f64,
        }
    }
}

/// Every recorded bill, newest-first, with the revenue summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillListing {
    /// The listing rows, newest-first by bill ID.
    pub bills: Vec<BillRow>,
    /// How many bills have been recorded.
    pub transaction_count: usize,
    /// The sum of every row's total, rendered with two decimal places.
    #[serde(serialize_with = "serialize_currency")]
    pub total_revenue: f64,
}

impl BillListing {
    /// Build the listing from raw store records, computing each row's total
    /// and the grand total.
    pub fn from_records(records: Vec<BillRecord>) -> Self {
        let bills: Vec<BillRow> = records.into_iter().map(BillRow::from_record).collect();
        let total_revenue = bills.iter().map(|row| row.total).sum();

        Self {
            transaction_count: bills.len(),
            total_revenue,
            bills,
        }
    }

    /// Query the store and build the listing.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if the query fails.
    pub fn load(connection: &Connection) -> Result<Self, Error> {
        Ok(Self::from_records(get_bill_records(connection)?))
    }
}

fn serialize_currency<S>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{amount:.2}"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        bill::{models::BillListing, query::BillRecord},
        payment_method::PaymentMethod,
    };

    fn record(id: i64, quantity: i64, price: f64) -> BillRecord {
        BillRecord {
            id,
            customer_name: "Alice".to_owned(),
            phone: Some("555-1234".to_owned()),
            item: "Widget".to_owned(),
            quantity,
            price,
            payment_method: PaymentMethod::Upi,
        }
    }

    #[test]
    fn row_total_is_price_times_quantity() {
        let listing = BillListing::from_records(vec![record(1, 3, 9.99)]);

        assert_eq!(listing.bills[0].total, 9.99 * 3.0);
        assert!((listing.bills[0].total - 29.97).abs() < 1e-9);
    }

    #[test]
    fn summary_counts_rows_and_sums_totals() {
        let listing = BillListing::from_records(vec![record(2, 2, 5.0), record(1, 3, 9.99)]);

        assert_eq!(listing.transaction_count, 2);
        assert_eq!(listing.total_revenue, 2.0 * 5.0 + 3.0 * 9.99);
    }

    #[test]
    fn empty_listing_has_zero_revenue() {
        let listing = BillListing::from_records(vec![]);

        assert_eq!(listing.transaction_count, 0);
        assert_eq!(listing.total_revenue, 0.0);
    }

    #[test]
    fn missing_phone_renders_as_empty_string() {
        let mut no_phone = record(1, 1, 1.0);
        no_phone.phone = None;

        let listing = BillListing::from_records(vec![no_phone]);

        assert_eq!(listing.bills[0].phone, "");
    }

    #[test]
    fn currency_fields_serialize_with_two_decimal_places() {
        let listing = BillListing::from_records(vec![record(1, 3, 9.99)]);

        let value = serde_json::to_value(&listing).unwrap();

        assert_eq!(
            value,
            json!({
                "bills": [{
                    "id": 1,
                    "customer_name": "Alice",
                    "phone": "555-1234",
                    "item": "Widget",
                    "quantity": 3,
                    "price": "9.99",
                    "payment_method": "UPI",
                    "total": "29.97",
                }],
                "transaction_count": 1,
                "total_revenue": "29.97",
            })
        );
    }
}
