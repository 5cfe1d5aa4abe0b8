use crate::Result;
use crate::metrics::{ColumnSection, RepositoryMetrics, Thresholds, cells};
use core::fmt::Write;

const SECTIONS: [ColumnSection; 3] = [ColumnSection::Repository, ColumnSection::AllTime, ColumnSection::ThisPeriod];

const fn section_title(section: ColumnSection) -> &'static str {
    match section {
        ColumnSection::Repository => "Repository",
        ColumnSection::AllTime => "All Time",
        ColumnSection::ThisPeriod => "This Period",
    }
}

/// Write an aligned `title : value` listing of a single row, grouped by section.
pub fn generate<W: Write>(row: &RepositoryMetrics, thresholds: Thresholds, writer: &mut W) -> Result<()> {
    let values: Vec<_> = cells(row).map(|(def, cell)| (def.section, def.render_title(thresholds), cell)).collect();
    let max_title_len = values.iter().map(|(_, title, _)| title.len()).max().unwrap_or(0);

    for (index, section) in SECTIONS.into_iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "{}", section_title(section))?;

        for (_, title, cell) in values.iter().filter(|(s, _, _)| *s == section) {
            writeln!(writer, "  {title:<max_title_len$} : {cell}")?;
        }
    }

    Ok(())
}
