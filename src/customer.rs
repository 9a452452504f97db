//! The customer recorded alongside each bill.
//!
//! Customers are write-once: a new row is created for every saved bill and
//! rows are never updated, deleted, or deduplicated.

use rusqlite::{Connection, Row};
use serde::Serialize;

use crate::{Error, database_id::CustomerId};

/// The name and phone number a bill was recorded against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    /// The ID of the customer.
    pub id: CustomerId,
    /// The customer's name.
    pub name: String,
    /// The customer's phone number. `None` means the phone number was not
    /// provided; it is stored as SQL NULL, never as an empty string.
    pub phone: Option<String>,
}

/// Create a new customer in the database and return it with its generated ID.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_customer(
    name: &str,
    phone: Option<&str>,
    connection: &Connection,
) -> Result<Customer, Error> {
    let customer = connection
        .prepare(
            "INSERT INTO customers (name, phone) VALUES (?1, ?2)
             RETURNING customer_id, name, phone",
        )?
        .query_row((name, phone), map_customer_row)?;

    Ok(customer)
}

/// Create the customers table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_customer_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS customers (
                customer_id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                phone TEXT DEFAULT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Customer].
pub fn map_customer_row(row: &Row) -> Result<Customer, rusqlite::Error> {
    Ok(Customer {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
    })
}
