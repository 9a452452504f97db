//! The API endpoint URIs.

/// The route to list recorded bills (GET) and record a new bill (POST).
pub const BILLS: &str = "/api/bills";
