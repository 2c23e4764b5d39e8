use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::filter::FilteredView;

/// Write the view as CSV: the loaded header row, then each record's cells
/// exactly as they were read. Returns the number of data rows written.
pub fn write_csv<W: Write>(view: &FilteredView<'_>, writer: W) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(&view.dataset().headers)
        .context("writing CSV header")?;

    let mut rows = 0;
    for record in view.records() {
        writer
            .write_record(&record.cells)
            .with_context(|| format!("writing CSV row {rows}"))?;
        rows += 1;
    }
    writer.flush().context("flushing CSV writer")?;
    Ok(rows)
}

pub fn export_to_path(view: &FilteredView<'_>, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating export file {}", path.display()))?;
    write_csv(view, file).with_context(|| format!("exporting to {}", path.display()))
}
