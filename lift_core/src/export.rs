//! CSV export of the progress table.
//!
//! The file is written to a temp file beside the target and renamed into
//! place, so readers never see a half-written export.

use crate::progress::{exercise_names, ChartRow, BODYWEIGHT_KEY, DATE_KEY};
use crate::{Error, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write the progress table as CSV
///
/// Columns are `date`, every exercise in sorted order, then `Bodyweight`.
/// Missing values are left as empty cells. Returns the number of data rows.
pub fn write_progress_csv(rows: &[ChartRow], path: &Path) -> Result<usize> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    write_rows(rows, temp.as_file())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Exported {} progress rows to {:?}", rows.len(), path);
    Ok(rows.len())
}

/// Write the progress table as CSV to any writer
pub fn write_rows<W: Write>(rows: &[ChartRow], out: W) -> Result<()> {
    let exercises = exercise_names(rows);
    let mut writer = csv::Writer::from_writer(out);

    let mut header = Vec::with_capacity(exercises.len() + 2);
    header.push(DATE_KEY.to_string());
    header.extend(exercises.iter().cloned());
    header.push(BODYWEIGHT_KEY.to_string());
    writer.write_record(&header)?;

    for row in rows {
        let mut record = Vec::with_capacity(header.len());
        record.push(row.date.to_string());
        for name in &exercises {
            record.push(row.lifts.get(name).map(format_value).unwrap_or_default());
        }
        record.push(row.bodyweight.map(|w| format_value(&w)).unwrap_or_default());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn format_value(value: &f64) -> String {
    value.to_string()
}
