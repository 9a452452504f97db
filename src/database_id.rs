//! Database ID type definitions.

/// The ID of a row in the customers table.
pub type CustomerId = i64;
/// The ID of a row in the bills table.
pub type BillId = i64;
