//! Defines the endpoint for listing recorded transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, bill::BillListing};

/// The state needed to list bills.
#[derive(Debug, Clone)]
pub struct BillListingState {
    /// The database connection for querying bills.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BillListingState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for the bill listing.
///
/// Returns every bill joined with its customer, newest-first, plus the
/// transaction count and total revenue. On a query error the error is
/// returned and the client keeps whatever listing it last displayed.
pub async fn get_bills_endpoint(State(state): State<BillListingState>) -> Response {
    let Ok(connection) = state.db_connection.lock() else {
        return Error::DatabaseLockError.into_response();
    };

    match BillListing::load(&connection) {
        Ok(listing) => Json(listing).into_response(),
        Err(error) => error.into_response(),
    }
}
