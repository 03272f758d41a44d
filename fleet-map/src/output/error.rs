//! CSV artifact errors.

use std::path::PathBuf;

/// Failure to write a CSV artifact. The previous file, if any, is untouched.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to prepare {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}
