//! Database schema bootstrap.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, bill::create_bill_table, customer::create_customer_table};

/// Create the application's tables if they do not already exist.
///
/// Table creation runs inside a single exclusive transaction so a partially
/// created schema is never left behind. The bootstrap is idempotent and is
/// run on every startup.
///
/// This function also enables foreign key enforcement, which SQLite leaves
/// off by default, so bills cannot reference a missing customer.
///
/// # Errors
/// Returns an [Error::SqlError] if the schema could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // PRAGMA statements are ignored inside a transaction, so this must come first.
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_customer_table(&transaction)?;
    create_bill_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
