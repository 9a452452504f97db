//! Defines the endpoint for recording a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as an empty
// field instead of rejecting the request like axum::Form.
use axum_extra::extract::Form;
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    bill::{BillForm, BillListing, core::record_bill},
};

/// The state needed to record a transaction.
#[derive(Debug, Clone)]
pub struct RecordBillState {
    /// The database connection for recording bills.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RecordBillState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The response body for a successfully recorded transaction.
///
/// Carries everything the client needs to complete the save: a confirmation
/// message, the reset form to display next, and the refreshed listing.
#[derive(Debug, Serialize)]
pub struct RecordBillResponse {
    /// A confirmation message to show to the user.
    pub message: &'static str,
    /// The reset form state: all fields cleared, payment method back to cash.
    pub form: BillForm,
    /// The refreshed listing including the new bill.
    pub listing: BillListing,
}

/// A route handler for recording a new transaction.
///
/// Validates the submitted form, writes the customer and bill rows as one
/// store transaction, and responds with the refreshed listing. On a
/// validation error no mutation is attempted and the client's fields are
/// left for the user to correct; on a store error the save is rolled back
/// and the driver's error text is returned.
pub async fn record_bill_endpoint(
    State(state): State<RecordBillState>,
    Form(form): Form<BillForm>,
) -> Response {
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(error) => return error.into_response(),
    };

    let Ok(connection) = state.db_connection.lock() else {
        return Error::DatabaseLockError.into_response();
    };

    if let Err(error) = record_bill(&draft, &connection) {
        return error.into_response();
    }

    let listing = match BillListing::load(&connection) {
        Ok(listing) => listing,
        Err(error) => return error.into_response(),
    };

    (
        StatusCode::CREATED,
        Json(RecordBillResponse {
            message: "Transaction saved successfully!",
            form: BillForm::default(),
            listing,
        }),
    )
        .into_response()
}
