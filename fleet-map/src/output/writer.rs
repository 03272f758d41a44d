//! Atomic CSV writes.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use super::error::WriteError;

/// A record type that can be written as one CSV row.
///
/// `HEADER` must list the serialized field names in field order. It is
/// written explicitly so an empty table still gets its header line.
pub trait CsvRow: Serialize {
    const HEADER: &'static [&'static str];
}

/// Write `rows` to `path` with a header line, replacing any existing file.
///
/// Rows go to a temporary `cp_*.csv` file in the same directory, which is
/// renamed over `path` only after everything has been flushed. Readers see
/// either the old file or the complete new one. On failure the temporary
/// file is removed and `path` is left as it was.
pub fn write_csv<R: CsvRow>(path: &Path, rows: &[R]) -> Result<(), WriteError> {
    let io_err = |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };
    let csv_err = |source| WriteError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_err)?;

    let mut tmp = tempfile::Builder::new()
        .prefix("cp_")
        .suffix(".csv")
        .tempfile_in(dir)
        .map_err(io_err)?;

    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file_mut());
        writer.write_record(R::HEADER).map_err(csv_err)?;
        for row in rows {
            writer.serialize(row).map_err(csv_err)?;
        }
        writer.flush().map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;

    debug!(tmp = %tmp.path().display(), target = %path.display(), "Replacing CSV");
    tmp.persist(path).map_err(|source| WriteError::Persist {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
