//! Tillbook is a small web app for recording retail sales.
//!
//! Each recorded transaction captures a customer (name and optional phone
//! number), an item, a quantity, a price, and a payment method. Saved
//! transactions are listed newest-first along with a running revenue total.
//!
//! This library provides the recorder logic, the SQLite store, and a JSON
//! API that serves them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod bill;
mod config;
mod customer;
mod database_id;
mod db;
mod endpoints;
mod payment_method;
mod routing;

pub use app_state::AppState;
pub use config::StoreConfig;
pub use db::initialize as initialize_db;
pub use payment_method::{ParsePaymentMethodError, PaymentMethod};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required form field was empty after trimming whitespace.
    ///
    /// Carries the name of the offending field so the client can tell the
    /// user which field to fill in.
    #[error("{0} is required, please fill in all required fields before saving")]
    EmptyField(&'static str),

    /// Quantity or price could not be parsed as a number, or parsed to a
    /// value that is not positive.
    #[error("please enter valid positive numbers for quantity and price")]
    InvalidNumber,

    /// The customer ID used to create a bill did not match a stored customer.
    #[error("the customer ID {0:?} does not refer to a stored customer")]
    InvalidCustomer(Option<database_id::CustomerId>),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    ///
    /// The store driver's error text is passed through to the user verbatim.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            // Validation errors: the user can correct their input and retry.
            Error::EmptyField(_) | Error::InvalidNumber | Error::InvalidCustomer(_) => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            // Store errors surface the driver's error text.
            error => (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response(),
        }
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn validation_errors_map_to_bad_request() {
        let cases = [Error::EmptyField("name"), Error::InvalidNumber];

        for error in cases {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn sql_errors_map_to_internal_server_error() {
        let response = Error::SqlError(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn query_returned_no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }
}
