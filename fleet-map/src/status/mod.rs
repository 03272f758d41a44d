//! Live station status: concurrent polling and latest-status reduction.

mod error;
mod poller;
mod summary;

pub use error::StatusFetchError;
pub use poller::poll_statuses;
pub use summary::{StatusSummary, reduce_statuses};
