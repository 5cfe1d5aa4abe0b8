use super::contributors::{ContributorCounts, Contributors};
use super::issue_metrics::extract_issue_metrics;
use super::measure::Measure;
use super::numeric::{average, percentage_of};
use super::pull_request_metrics::extract_pull_request_metrics;
use super::window::ReportWindow;
use crate::Result;
use crate::facts::RepositoryRawData;
use core::ops::AddAssign;

/// Declares the summable counters of a row and how two rows add up.
macro_rules! activity_counts {
    ($($(#[$meta:meta])* $field:ident),+ $(,)?) => {
        /// Counters of one row. Every field is summed when rows are aggregated.
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct ActivityCounts {
            $($(#[$meta])* pub $field: u64,)+
        }

        impl AddAssign for ActivityCounts {
            fn add_assign(&mut self, other: Self) {
                $(self.$field += other.$field;)+
            }
        }
    };
}

activity_counts!(
    stars,
    watches,
    forks,
    /// Issue total reported by the hosting service.
    issues,
    internal_issues,
    external_issues,
    open_issues,
    stale_issues,
    old_issues,
    closed_by_pull_request_issues,
    /// Issues with a close timestamp, regardless of when they were closed.
    closed_issues_total,
    /// Pull request total reported by the hosting service.
    pull_requests,
    internal_pull_requests,
    external_pull_requests,
    open_pull_requests,
    opened_issues,
    opened_issues_internal,
    opened_issues_external,
    opened_issues_first_time_contributor,
    closed_issues,
    opened_pull_requests,
    opened_pull_requests_internal,
    opened_pull_requests_external,
    opened_pull_requests_first_time_contributor,
    merged_pull_requests,
    closed_pull_requests,
);

/// One report row: a repository, or the organization-wide total.
///
/// Besides the reported values, a row keeps the raw durations and contributor sets it was
/// derived from so that rows can be re-aggregated without bias.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryMetrics {
    pub repo: String,
    pub counts: ActivityCounts,

    pub percent_stale_issues: Measure,
    pub percent_old_issues: Measure,
    pub percent_issues_closed_by_pull_request: Measure,
    pub average_issue_open_time: Measure,
    pub average_pull_request_merge_time: Measure,

    pub contributor_counts: ContributorCounts,

    pub issue_open_times: Vec<f64>,

    pub pull_request_open_times: Vec<f64>,

    pub issue_contributors: Contributors,

    pub pull_request_contributors: Contributors,

    /// Union of the issue and pull request contributor sets.
    pub contributors: Contributors,
}

impl RepositoryMetrics {
    /// Compute every derived value of a row from its counters and raw material.
    pub(super) fn derive(
        repo: impl Into<String>,
        counts: ActivityCounts,
        issue_open_times: Vec<f64>,
        pull_request_open_times: Vec<f64>,
        issue_contributors: Contributors,
        pull_request_contributors: Contributors,
    ) -> Self {
        let groups = [&issue_contributors, &pull_request_contributors];
        let contributors = Contributors::union(groups);
        let contributor_counts = ContributorCounts::of_union(&groups);

        Self {
            repo: repo.into(),
            percent_stale_issues: percentage_of(counts.stale_issues, counts.open_issues),
            percent_old_issues: percentage_of(counts.old_issues, counts.open_issues),
            percent_issues_closed_by_pull_request: percentage_of(counts.closed_by_pull_request_issues, counts.closed_issues_total),
            average_issue_open_time: average(&issue_open_times),
            average_pull_request_merge_time: average(&pull_request_open_times),
            counts,
            contributor_counts,
            issue_open_times,
            pull_request_open_times,
            contributors,
            issue_contributors,
            pull_request_contributors,
        }
    }
}

/// Compute the row for one repository.
///
/// Star, watch, fork, issue and pull request totals are taken from the hosting service
/// rather than recounted, since the record lists may have been truncated.
pub fn compose(raw: &RepositoryRawData, window: &ReportWindow) -> Result<RepositoryMetrics> {
    let issues = extract_issue_metrics(&raw.name, &raw.issues, window)?;
    let pulls = extract_pull_request_metrics(&raw.name, &raw.pull_requests, window)?;

    let counts = ActivityCounts {
        stars: raw.star_count,
        watches: raw.watch_count,
        forks: raw.fork_count,
        issues: raw.issue_count,
        internal_issues: issues.internal_issues,
        external_issues: issues.external_issues,
        open_issues: issues.open_issues,
        stale_issues: issues.stale_issues,
        old_issues: issues.old_issues,
        closed_by_pull_request_issues: issues.closed_by_pull_request_issues,
        closed_issues_total: issues.closed_issues_total,
        pull_requests: raw.pull_request_count,
        internal_pull_requests: pulls.internal_pull_requests,
        external_pull_requests: pulls.external_pull_requests,
        open_pull_requests: pulls.open_pull_requests,
        opened_issues: issues.opened_issues,
        opened_issues_internal: issues.opened_issues_internal,
        opened_issues_external: issues.opened_issues_external,
        opened_issues_first_time_contributor: issues.opened_issues_first_time_contributor,
        closed_issues: issues.closed_issues,
        opened_pull_requests: pulls.opened_pull_requests,
        opened_pull_requests_internal: pulls.opened_pull_requests_internal,
        opened_pull_requests_external: pulls.opened_pull_requests_external,
        opened_pull_requests_first_time_contributor: pulls.opened_pull_requests_first_time_contributor,
        merged_pull_requests: pulls.merged_pull_requests,
        closed_pull_requests: pulls.closed_pull_requests,
    };

    Ok(RepositoryMetrics::derive(
        raw.name.clone(),
        counts,
        issues.open_times,
        pulls.open_times,
        issues.contributors,
        pulls.contributors,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{AuthorAssociation, IssueState, PullRequestState, RawIssue, RawPullRequest};
    use chrono::{TimeZone, Utc};

    fn window() -> ReportWindow {
        ReportWindow::new(
            Utc.with_ymd_and_hms(2019, 12, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn raw() -> RepositoryRawData {
        RepositoryRawData {
            name: "code-gov-api".to_string(),
            issues: vec![
                RawIssue {
                    created_at: "2019-12-10T00:00:00Z".to_string(),
                    closed_at: None,
                    state: IssueState::Open,
                    author_login: Some("alice".to_string()),
                    author_association: AuthorAssociation::Member,
                    timeline_events: Vec::new(),
                },
                RawIssue {
                    created_at: "2019-12-01T00:00:00Z".to_string(),
                    closed_at: Some("2019-12-05T00:00:00Z".to_string()),
                    state: IssueState::Closed,
                    author_login: Some("bob".to_string()),
                    author_association: AuthorAssociation::Contributor,
                    timeline_events: Vec::new(),
                },
            ],
            pull_requests: vec![RawPullRequest {
                created_at: "2019-12-02T00:00:00Z".to_string(),
                closed_at: Some("2019-12-03T00:00:00Z".to_string()),
                merged_at: Some("2019-12-03T00:00:00Z".to_string()),
                state: PullRequestState::Merged,
                author_login: Some("bob".to_string()),
                author_association: AuthorAssociation::Contributor,
            }],
            star_count: 40,
            watch_count: 12,
            fork_count: 9,
            issue_count: 500,
            pull_request_count: 300,
        }
    }

    #[test]
    fn test_compose_uses_reported_totals() {
        let m = compose(&raw(), &window()).unwrap();
        assert_eq!(m.repo, "code-gov-api");
        assert_eq!(m.counts.stars, 40);
        assert_eq!(m.counts.watches, 12);
        assert_eq!(m.counts.forks, 9);
        assert_eq!(m.counts.issues, 500);
        assert_eq!(m.counts.pull_requests, 300);
    }

    #[test]
    fn test_compose_derived_values() {
        let m = compose(&raw(), &window()).unwrap();
        assert_eq!(m.counts.open_issues, 1);
        assert_eq!(m.counts.stale_issues, 1);
        assert_eq!(m.percent_stale_issues, Measure::Value(100));
        assert_eq!(m.percent_old_issues, Measure::Value(0));
        assert_eq!(m.percent_issues_closed_by_pull_request, Measure::Value(0));
        assert_eq!(m.average_issue_open_time, Measure::Value(4));
        assert_eq!(m.average_pull_request_merge_time, Measure::Value(1));
    }

    #[test]
    fn test_compose_contributors_are_deduplicated() {
        let m = compose(&raw(), &window()).unwrap();
        assert_eq!(m.contributor_counts.all_time, 2);
        assert_eq!(m.contributor_counts.all_time_internal, 1);
        assert_eq!(m.contributor_counts.all_time_external, 1);
        assert_eq!(m.contributor_counts.this_period, 2);
        assert_eq!(m.contributors.all_time.len(), 2);
    }

    #[test]
    fn test_compose_merge_time_includes_earlier_merges() {
        let mut data = raw();
        data.pull_requests = vec![RawPullRequest {
            created_at: "2019-06-01T00:00:00Z".to_string(),
            closed_at: Some("2019-06-05T00:00:00Z".to_string()),
            merged_at: Some("2019-06-05T00:00:00Z".to_string()),
            state: PullRequestState::Merged,
            author_login: Some("bob".to_string()),
            author_association: AuthorAssociation::Contributor,
        }];

        let m = compose(&data, &window()).unwrap();
        assert_eq!(m.counts.merged_pull_requests, 0);
        assert_eq!(m.average_pull_request_merge_time, Measure::Value(4));
    }

    #[test]
    fn test_compose_empty_repository() {
        let mut data = raw();
        data.issues.clear();
        data.pull_requests.clear();

        let m = compose(&data, &window()).unwrap();
        assert_eq!(m.percent_stale_issues, Measure::NotApplicable);
        assert_eq!(m.percent_old_issues, Measure::NotApplicable);
        assert_eq!(m.percent_issues_closed_by_pull_request, Measure::NotApplicable);
        assert_eq!(m.average_issue_open_time, Measure::NotApplicable);
        assert_eq!(m.average_pull_request_merge_time, Measure::NotApplicable);
        assert_eq!(m.contributor_counts, ContributorCounts::default());
        assert_eq!(m.counts.stars, 40);
    }

    #[test]
    fn test_activity_counts_add_assign() {
        let mut a = ActivityCounts {
            stars: 1,
            merged_pull_requests: 2,
            ..ActivityCounts::default()
        };
        let b = ActivityCounts {
            stars: 10,
            closed_issues_total: 3,
            ..ActivityCounts::default()
        };
        a += b;
        assert_eq!(a.stars, 11);
        assert_eq!(a.merged_pull_requests, 2);
        assert_eq!(a.closed_issues_total, 3);
    }
}
