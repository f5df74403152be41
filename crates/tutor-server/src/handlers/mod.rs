//! Request handlers.

pub mod goals;
pub mod roadmap;

pub use goals::structure_goals;
pub use roadmap::generate_roadmap;

use crate::error::{panic_message, ApiError, ApiResult};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Run a core computation, turning a panic into [`ApiError::Processing`].
///
/// The core holds no mutable state, so unwinding cannot leave it
/// half-updated.
pub(crate) fn run_core<T>(operation: &'static str, f: impl FnOnce() -> T) -> ApiResult<T> {
    catch_unwind(AssertUnwindSafe(f))
        .map_err(|payload| ApiError::processing(operation, panic_message(&*payload)))
}
