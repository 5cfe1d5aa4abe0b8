use crate::Result;
use crate::metrics::{COLUMN_DEFINITIONS, RepositoryMetrics, Thresholds, cells};
use core::fmt::Write;
use ohno::app_err;

/// Write `rows` as CSV: one header row of column titles, then one record per row.
///
/// `thresholds` must be the ones the rows were computed with, since they appear in some titles.
pub fn generate<W: Write>(rows: &[RepositoryMetrics], thresholds: Thresholds, writer: &mut W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(Vec::new());

    csv_writer.write_record(COLUMN_DEFINITIONS.iter().map(|def| def.render_title(thresholds).into_owned()))?;
    for row in rows {
        csv_writer.write_record(cells(row).map(|(_, cell)| cell.to_string()))?;
    }

    let bytes = csv_writer
        .into_inner()
        .map_err(|e| app_err!("unable to finish CSV output: {}", e.error()))?;
    writer.write_str(&String::from_utf8(bytes)?)?;
    Ok(())
}
