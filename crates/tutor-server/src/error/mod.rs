//! Error handling for the tutor API server.

pub mod response;
pub mod types;

pub use response::{panic_message, panic_response};
pub use types::{ApiError, ApiResult};
