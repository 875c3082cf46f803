//! CSV export of the weight log.
//!
//! Rows are written oldest-first so the file reads as a time series.

use crate::{Error, Result, WeightLog};
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    date: String,
    weight_kg: f64,
    notes: Option<&'a str>,
}

/// Write the log to `csv_path`, replacing any existing file
///
/// This function:
/// 1. Writes header and rows to a temp file next to the target
/// 2. Syncs the temp file to disk
/// 3. Renames it over `csv_path`
/// 4. Returns the number of rows written
pub fn export_log(log: &WeightLog, csv_path: &Path) -> Result<usize> {
    let dir = match csv_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let temp = NamedTempFile::new_in(dir)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(temp.as_file());

    // Entries are stored newest-first
    let mut count = 0;
    for entry in log.entries().iter().rev() {
        writer.serialize(CsvRow {
            date: entry.date.format("%Y-%m-%d").to_string(),
            weight_kg: entry.weight,
            notes: entry.notes.as_deref(),
        })?;
        count += 1;
    }

    if count == 0 {
        writer.write_record(["date", "weight_kg", "notes"])?;
    }

    writer.flush()?;
    drop(writer);
    temp.as_file().sync_all()?;
    temp.persist(csv_path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Exported {} log entries to {:?}", count, csv_path);
    Ok(count)
}
