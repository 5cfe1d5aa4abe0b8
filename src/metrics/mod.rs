//! The metrics computation engine
//!
//! This module turns fully materialized [`RepositoryRawData`] values into report rows.
//! It performs no I/O and never reads the clock: the reporting period and the reference
//! time are passed in through a [`ReportWindow`], so identical inputs always produce
//! identical rows.
//!
//! # Implementation Model
//!
//! Each repository's issues and pull requests are processed by independent extractors,
//! whose results are composed into a [`RepositoryMetrics`] row. Rows keep the raw
//! durations and contributor sets they were built from, which lets [`aggregate`] fold
//! any number of rows into the `TOTAL` row without averaging averages or summing
//! overlapping contributor counts.
//!
//! How a row is presented is described by the static [`COLUMN_DEFINITIONS`] table, which
//! every report format walks in order.

mod aggregate;
mod classification;
mod column_def;
mod contributors;
mod issue_metrics;
mod measure;
mod numeric;
mod pull_request_metrics;
mod repository_metrics;
mod timestamp;
mod window;

pub use aggregate::{TOTAL_ROW_NAME, aggregate};
pub use classification::{Affiliation, affiliation, is_external, is_first_time_contributor, is_internal};
pub use column_def::{COLUMN_DEFINITIONS, Cell, ColumnDef, ColumnSection, cells};
pub use contributors::{ContributorCounts, ContributorSet, Contributors, union, union_size};
pub use issue_metrics::{IssueMetrics, extract_issue_metrics};
pub use measure::{Measure, NOT_APPLICABLE};
pub use numeric::{average, concatenate, duration_to_days, percentage_of, sum, to_percentage};
pub use pull_request_metrics::{PullRequestMetrics, extract_pull_request_metrics};
pub use repository_metrics::{ActivityCounts, RepositoryMetrics, compose};
pub use window::{ReportWindow, Thresholds};

use crate::Result;
use crate::facts::RepositoryRawData;

/// Compute one row per repository, in input order, followed by the `TOTAL` row.
pub fn compute_report(repositories: &[RepositoryRawData], window: &ReportWindow) -> Result<Vec<RepositoryMetrics>> {
    let mut rows = repositories
        .iter()
        .map(|raw| compose(raw, window))
        .collect::<Result<Vec<_>>>()?;

    let total = aggregate(&rows)?;
    rows.push(total);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{AuthorAssociation, IssueState, RawIssue};
    use chrono::{TimeZone, Utc};

    fn window() -> ReportWindow {
        ReportWindow::new(
            Utc.with_ymd_and_hms(2019, 12, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn repo(name: &str, closed: &[(&str, &str)], logins: &[&str]) -> RepositoryRawData {
        let mut issues: Vec<RawIssue> = closed
            .iter()
            .map(|(created_at, closed_at)| RawIssue {
                created_at: (*created_at).to_string(),
                closed_at: Some((*closed_at).to_string()),
                state: IssueState::Closed,
                author_login: None,
                author_association: AuthorAssociation::Member,
                timeline_events: Vec::new(),
            })
            .collect();

        issues.extend(logins.iter().map(|login| RawIssue {
            created_at: "2019-12-15T00:00:00Z".to_string(),
            closed_at: None,
            state: IssueState::Open,
            author_login: Some((*login).to_string()),
            author_association: AuthorAssociation::Contributor,
            timeline_events: Vec::new(),
        }));

        RepositoryRawData {
            name: name.to_string(),
            issue_count: issues.len() as u64,
            issues,
            pull_requests: Vec::new(),
            star_count: 1,
            watch_count: 1,
            fork_count: 1,
            pull_request_count: 0,
        }
    }

    #[test]
    fn test_total_row_is_last() {
        let rows = compute_report(&[repo("a", &[], &["alice"]), repo("b", &[], &["bob"])], &window()).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.repo.as_str()).collect();
        assert_eq!(names, ["a", "b", TOTAL_ROW_NAME]);
    }

    #[test]
    fn test_empty_repository_list_is_error() {
        assert!(compute_report(&[], &window()).is_err());
    }

    #[test]
    fn test_unequal_sample_counts() {
        let a = repo(
            "a",
            &[
                ("2019-12-01T00:00:00Z", "2019-12-02T00:00:00Z"),
                ("2019-12-01T00:00:00Z", "2019-12-02T00:00:00Z"),
                ("2019-12-01T00:00:00Z", "2019-12-02T00:00:00Z"),
            ],
            &[],
        );
        let b = repo("b", &[("2019-12-01T00:00:00Z", "2019-12-11T00:00:00Z")], &[]);

        let rows = compute_report(&[a, b], &window()).unwrap();
        assert_eq!(rows[0].average_issue_open_time, Measure::Value(1));
        assert_eq!(rows[1].average_issue_open_time, Measure::Value(10));
        assert_eq!(rows[2].average_issue_open_time, Measure::Value(3));
    }

    #[test]
    fn test_contributor_dedup_across_repositories() {
        let rows = compute_report(&[repo("a", &[], &["alice", "bob"]), repo("b", &[], &["bob", "carol"])], &window()).unwrap();
        assert_eq!(rows[0].contributor_counts.all_time, 2);
        assert_eq!(rows[1].contributor_counts.all_time, 2);
        assert_eq!(rows[2].contributor_counts.all_time, 3);
    }

    #[test]
    fn test_deterministic() {
        let input = [repo("a", &[("2019-12-01T00:00:00Z", "2019-12-05T00:00:00Z")], &["alice"])];
        assert_eq!(compute_report(&input, &window()).unwrap(), compute_report(&input, &window()).unwrap());
    }

    #[test]
    fn test_malformed_timestamp_fails_whole_report() {
        let mut bad = repo("broken", &[], &["alice"]);
        bad.issues[0].created_at = "12/15/2019".to_string();

        let msg = compute_report(&[repo("fine", &[], &[]), bad], &window()).unwrap_err().to_string();
        assert!(msg.contains("broken"), "{msg}");
    }
}
