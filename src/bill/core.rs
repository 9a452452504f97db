//! Defines the core data model and database operations for bills.

use rusqlite::{Connection, Row, Transaction as SqlTransaction, TransactionBehavior};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    Error,
    customer::create_customer,
    database_id::{BillId, CustomerId},
    payment_method::PaymentMethod,
};

// ============================================================================
// MODELS
// ============================================================================

/// One recorded transaction line: a single item sold to a customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bill {
    /// The ID of the bill.
    pub id: BillId,
    /// The ID of the customer the bill was recorded against.
    pub customer_id: CustomerId,
    /// What was sold.
    pub item: String,
    /// How many units were sold. Always greater than zero.
    pub quantity: i64,
    /// The unit price. Always greater than zero.
    pub price: f64,
    /// How the customer paid.
    pub payment_method: PaymentMethod,
    /// When the bill was written to the store. Never updated.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A validated transaction ready to be written to the store.
///
/// Produced by [crate::bill::BillForm::validate]; the recorder never writes
/// unvalidated input.
#[derive(Debug, Clone, PartialEq)]
pub struct BillDraft {
    /// The customer's name.
    pub name: String,
    /// The customer's phone number, if provided.
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

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Record a transaction: create the customer row and the bill row as a unit.
///
/// Both inserts run inside a single store transaction. If the bill insert
/// fails, the transaction is rolled back and the customer row does not
/// persist.
///
/// A new customer row is created on every save, even for a repeat
/// name/phone; there is no lookup of existing customers.
///
/// # Errors
/// This function will return an [Error::SqlError] if either insert or the
/// commit fails. The partial effects of the failed save are rolled back.
pub fn record_bill(draft: &BillDraft, connection: &Connection) -> Result<Bill, Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    let customer = create_customer(&draft.name, draft.phone.as_deref(), &transaction)?;
    let bill = create_bill(customer.id, draft, OffsetDateTime::now_utc(), &transaction)?;

    transaction.commit()?;

    Ok(bill)
}

/// Create a new bill in the database referencing an existing customer.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCustomer] if `customer_id` does not refer to a stored
///   customer,
/// - or [Error::SqlError] if there is some other SQL error.
pub(crate) fn create_bill(
    customer_id: CustomerId,
    draft: &BillDraft,
    created_at: OffsetDateTime,
    connection: &Connection,
) -> Result<Bill, Error> {
    let bill = connection
        .prepare(
            "INSERT INTO bills (customer_id, item, quantity, price, payment_method, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING bill_id, customer_id, item, quantity, price, payment_method, created_at",
        )?
        .query_row(
            (
                customer_id,
                &draft.item,
                draft.quantity,
                draft.price,
                draft.payment_method,
                created_at,
            ),
            map_bill_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCustomer(Some(customer_id)),
            error => error.into(),
        })?;

    Ok(bill)
}

/// Create the bills table in the database.
///
/// The `DEFAULT` clauses are part of the published table schema; the
/// application always binds `payment_method` and `created_at` explicitly.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_bill_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS bills (
                bill_id INTEGER PRIMARY KEY AUTOINCREMENT,
                customer_id INTEGER,
                item TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                price REAL NOT NULL,
                payment_method TEXT NOT NULL DEFAULT 'Cash',
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY(customer_id) REFERENCES customers(customer_id)
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Bill].
pub fn map_bill_row(row: &Row) -> Result<Bill, rusqlite::Error> {
    Ok(Bill {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        item: row.get(2)?,
        quantity: row.get(3)?,
        price: row.get(4)?,
        payment_method: row.get(5)?,
        created_at: row.get(6)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::OffsetDateTime;

    use crate::{
        Error,
        bill::core::{BillDraft, create_bill, record_bill},
        db::initialize,
        payment_method::PaymentMethod,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn widget_draft() -> BillDraft {
        BillDraft {
            name: "Alice".to_owned(),
            phone: Some("555-1234".to_owned()),
            item: "Widget".to_owned(),
            quantity: 3,
            price: 9.99,
            payment_method: PaymentMethod::Upi,
        }
    }

    #[test]
    fn record_creates_one_customer_and_one_bill() {
        let conn = get_test_connection();

        let bill = record_bill(&widget_draft(), &conn).unwrap();

        let customer_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))
            .unwrap();
        let bill_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM bills", [], |row| row.get(0))
            .unwrap();
        assert_eq!(customer_count, 1);
        assert_eq!(bill_count, 1);
        assert_eq!(bill.item, "Widget");
        assert_eq!(bill.quantity, 3);
        assert_eq!(bill.price, 9.99);
        assert_eq!(bill.payment_method, PaymentMethod::Upi);
    }

    #[test]
    fn record_links_bill_to_the_new_customer() {
        let conn = get_test_connection();

        let bill = record_bill(&widget_draft(), &conn).unwrap();

        let stored_customer_id: i64 = conn
            .query_row(
                "SELECT customer_id FROM bills WHERE bill_id = ?1",
                [bill.id],
                |row| row.get(0),
            )
            .unwrap();
        let customer_id: i64 = conn
            .query_row("SELECT customer_id FROM customers", [], |row| row.get(0))
            .unwrap();
        assert_eq!(stored_customer_id, customer_id);
        assert_eq!(bill.customer_id, customer_id);
    }

    #[test]
    fn record_does_not_reuse_customers_across_saves() {
        let conn = get_test_connection();

        record_bill(&widget_draft(), &conn).unwrap();
        record_bill(&widget_draft(), &conn).unwrap();

        let customer_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))
            .unwrap();
        assert_eq!(customer_count, 2);
    }

    #[test]
    fn record_rolls_back_customer_when_bill_insert_fails() {
        let conn = get_test_connection();
        // Force the second insert to fail mid-transaction.
        conn.execute_batch(
            "CREATE TRIGGER bills_unavailable BEFORE INSERT ON bills
             BEGIN SELECT RAISE(ABORT, 'bills table unavailable'); END;",
        )
        .unwrap();

        let result = record_bill(&widget_draft(), &conn);

        assert!(matches!(result, Err(Error::SqlError(_))));
        let customer_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))
            .unwrap();
        assert_eq!(
            customer_count, 0,
            "customer row persisted after the bill insert failed"
        );
    }

    #[test]
    fn create_bill_fails_on_missing_customer() {
        let conn = get_test_connection();

        let result = create_bill(42, &widget_draft(), OffsetDateTime::now_utc(), &conn);

        assert_eq!(result, Err(Error::InvalidCustomer(Some(42))));
    }

    #[test]
    fn created_at_round_trips_through_the_store() {
        let conn = get_test_connection();

        let before = OffsetDateTime::now_utc() - time::Duration::seconds(1);
        let bill = record_bill(&widget_draft(), &conn).unwrap();
        let after = OffsetDateTime::now_utc() + time::Duration::seconds(1);

        assert!(bill.created_at >= before && bill.created_at <= after);
    }
}
