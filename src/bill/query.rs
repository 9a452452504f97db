//! Database query for the bill listing.

use rusqlite::{Connection, Row};

use crate::{Error, database_id::BillId, payment_method::PaymentMethod};

/// One row of the bill listing as stored, before any derived values are
/// computed.
///
/// The store returns raw fields only; totals are computed by the caller
/// (see [crate::bill::BillListing]) so the store layer stays free of
/// presentation concerns.
#[derive(Debug, Clone, PartialEq)]
pub struct BillRecord {
    /// The ID of the bill.
    pub id: BillId,
    /// The name of the customer the bill was recorded against.
    pub customer_name: String,
    /// The customer's phone number, if one was provided.
    pub phone: Option<String>,
    /// What was sold.
    pub item: String,
    /// How many units were sold.
    pub quantity: i64,
    /// The unit price.
    pub price: f64,
    /// How the customer paid.
    pub payment_method: PaymentMethod,
}

/// Retrieve every bill joined with its customer, newest-first by bill ID.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_bill_records(connection: &Connection) -> Result<Vec<BillRecord>, Error> {
    connection
        .prepare(
            "SELECT b.bill_id, c.name, c.phone, b.item, b.quantity, b.price, b.payment_method
             FROM bills b
             JOIN customers c ON b.customer_id = c.customer_id
             ORDER BY b.bill_id DESC",
        )?
        .query_map([], map_bill_record)?
        .map(|maybe_record| maybe_record.map_err(|error| error.into()))
        .collect()
}

fn map_bill_record(row: &Row) -> Result<BillRecord, rusqlite::Error> {
    Ok(BillRecord {
        id: row.get(0)?,
        customer_name: row.get(1)?,
        phone: row.get(2)?,
        item: row.get(3)?,
        quantity: row.get(4)?,
        price: row.get(5)?,
        payment_method: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        bill::{BillDraft, core::record_bill, query::get_bill_records},
        db::initialize,
        payment_method::PaymentMethod,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn draft(name: &str, item: &str, quantity: i64, price: f64) -> BillDraft {
        BillDraft {
            name: name.to_owned(),
            phone: None,
            item: item.to_owned(),
            quantity,
            price,
            payment_method: PaymentMethod::Cash,
        }
    }

    #[test]
    fn listing_is_empty_with_no_bills() {
        let conn = get_test_connection();

        let records = get_bill_records(&conn).unwrap();

        assert_eq!(records, vec![]);
    }

    #[test]
    fn listing_is_newest_first() {
        let conn = get_test_connection();
        record_bill(&draft("Alice", "Widget", 1, 1.0), &conn).unwrap();
        record_bill(&draft("Bob", "Gadget", 2, 2.0), &conn).unwrap();
        record_bill(&draft("Carol", "Gizmo", 3, 3.0), &conn).unwrap();

        let records = get_bill_records(&conn).unwrap();

        let ids: Vec<i64> = records.iter().map(|record| record.id).collect();
        let mut want = ids.clone();
        want.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(ids, want, "bills are not sorted newest-first");
        assert_eq!(records[0].customer_name, "Carol");
    }

    #[test]
    fn listing_joins_customer_fields() {
        let conn = get_test_connection();
        let mut saved = draft("Alice", "Widget", 3, 9.99);
        saved.phone = Some("555-1234".to_owned());
        record_bill(&saved, &conn).unwrap();

        let records = get_bill_records(&conn).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].customer_name, "Alice");
        assert_eq!(records[0].phone.as_deref(), Some("555-1234"));
        assert_eq!(records[0].item, "Widget");
    }
}
