//! Application router configuration.

use axum::{Router, routing::get};

use crate::{
    AppState,
    bill::{get_bills_endpoint, record_bill_endpoint},
    endpoints,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::BILLS,
            get(get_bills_endpoint).post(record_bill_endpoint),
        )
        .with_state(state)
}
