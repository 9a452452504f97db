//! Bill recording for the billing application.
//!
//! This module contains everything related to bills:
//! - The `Bill` model and the atomic save that writes a customer row and a
//!   bill row as one store transaction
//! - The raw form type and its validation rules
//! - The listing query and the view models that compute per-row and grand
//!   totals
//! - The API endpoints that serve them

mod core;
mod form;
mod listing_endpoint;
mod models;
mod query;
mod record_endpoint;

pub use self::core::{Bill, BillDraft, create_bill_table, map_bill_row, record_bill};
pub use form::BillForm;
pub use listing_endpoint::get_bills_endpoint;
pub use models::{BillListing, BillRow};
pub use query::get_bill_records;
pub use record_endpoint::{RecordBillResponse, record_bill_endpoint};
