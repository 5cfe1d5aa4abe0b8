use super::contributors::Contributors;
use super::numeric::concatenate;
use super::repository_metrics::{ActivityCounts, RepositoryMetrics};
use crate::Result;
use ohno::bail;

/// Name of the organization-wide row.
pub const TOTAL_ROW_NAME: &str = "TOTAL";

/// Fold per-repository rows into the organization-wide `TOTAL` row.
///
/// Counters are summed. Percentages are recomputed from the summed numerators and
/// denominators, averages from the concatenated durations, and contributor counts from the
/// union of the contributor sets, so nothing is averaged twice or counted twice.
pub fn aggregate(rows: &[RepositoryMetrics]) -> Result<RepositoryMetrics> {
    if rows.is_empty() {
        bail!("no repositories to aggregate");
    }

    let mut counts = ActivityCounts::default();
    for row in rows {
        counts += row.counts;
    }

    Ok(RepositoryMetrics::derive(
        TOTAL_ROW_NAME,
        counts,
        concatenate(rows.iter().map(|r| r.issue_open_times.as_slice())),
        concatenate(rows.iter().map(|r| r.pull_request_open_times.as_slice())),
        Contributors::union(rows.iter().map(|r| &r.issue_contributors)),
        Contributors::union(rows.iter().map(|r| &r.pull_request_contributors)),
    ))
}
