//! Backend access
//!
//! - **api**: async REST client for every endpoint the learner uses
//! - **error**: transport and status errors

mod api;
mod error;

pub use api::ApiClient;
pub use error::{detail_message, ApiError};
