#![forbid(unsafe_code)]

mod error;
pub mod routes;
mod scheduler;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use scheduler::spawn_reaper;
