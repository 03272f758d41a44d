//! CSV artifacts: the slim map projection and atomic file writes.

mod error;
mod row;
mod writer;

pub use error::WriteError;
pub use row::{OutputRow, reconcile};
pub use writer::{CsvRow, write_csv};
