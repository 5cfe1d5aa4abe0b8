use super::Measure;
use super::RepositoryMetrics;
use super::Thresholds;
use std::borrow::Cow;
use core::fmt::{Display, Formatter};
use serde::{Serialize, Serializer};

/// Which part of a report a column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnSection {
    Repository,

    /// Values as of the time the report was produced.
    AllTime,

    /// Values restricted to the reporting period.
    ThisPeriod,
}

/// The value of one report cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Count(u64),
    Measure(Measure),
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Count(n) => write!(f, "{n}"),
            Self::Measure(m) => write!(f, "{m}"),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Count(n) => serializer.serialize_u64(*n),
            Self::Measure(m) => m.serialize(serializer),
        }
    }
}

#[derive(Debug)]
pub struct ColumnDef {
    /// Stable machine-readable identifier, used as the JSON key.
    pub id: &'static str,

    /// Column header shown to people. `{stale}` and `{old}` stand for the configured thresholds.
    pub title: &'static str,

    pub section: ColumnSection,
    pub extractor: fn(&RepositoryMetrics) -> Cell,
}

impl ColumnDef {
    /// The header of this column in a report produced with `thresholds`.
    #[must_use]
    pub fn render_title(&self, thresholds: Thresholds) -> Cow<'static, str> {
        if self.title.contains('{') {
            Cow::Owned(
                self.title
                    .replace("{stale}", &thresholds.stale_after_days.to_string())
                    .replace("{old}", &thresholds.old_after_days.to_string()),
            )
        } else {
            Cow::Borrowed(self.title)
        }
    }
}

macro_rules! column_def {
    ($id:expr, $title:expr, $section:ident, count: $($field:ident).+) => {
        ColumnDef {
            id: $id,
            title: $title,
            section: ColumnSection::$section,
            extractor: |m| Cell::Count(m.$($field).+),
        }
    };
    ($id:expr, $title:expr, $section:ident, measure: $field:ident) => {
        ColumnDef {
            id: $id,
            title: $title,
            section: ColumnSection::$section,
            extractor: |m| Cell::Measure(m.$field),
        }
    };
}

/// Report columns in output order.
pub const COLUMN_DEFINITIONS: &[ColumnDef] = &[
    ColumnDef {
        id: "repo",
        title: "Repo Name",
        section: ColumnSection::Repository,
        extractor: |m| Cell::Text(m.repo.clone()),
    },
    column_def!("stars", "Stars", AllTime, count: counts.stars),
    column_def!("watches", "Watches", AllTime, count: counts.watches),
    column_def!("forks", "Forks", AllTime, count: counts.forks),
    column_def!("issues", "Issues", AllTime, count: counts.issues),
    column_def!("internalIssues", "Issues (Internal)", AllTime, count: counts.internal_issues),
    column_def!("externalIssues", "Issues (External)", AllTime, count: counts.external_issues),
    column_def!("openIssues", "Open Issues", AllTime, count: counts.open_issues),
    column_def!("staleIssues", "Stale Issues (No activity for >{stale} days)", AllTime, count: counts.stale_issues),
    column_def!("percentStaleIssues", "% Stale Issues", AllTime, measure: percent_stale_issues),
    column_def!("oldIssues", "Old Issues (Open for >{old} days)", AllTime, count: counts.old_issues),
    column_def!("percentOldIssues", "% Old Issues", AllTime, measure: percent_old_issues),
    column_def!(
        "percentIssuesClosedByPullRequest",
        "% Issues Closed by Pull Request",
        AllTime,
        measure: percent_issues_closed_by_pull_request
    ),
    column_def!("averageIssueOpenTime", "Average Issue Open Time (Days)", AllTime, measure: average_issue_open_time),
    column_def!("pullRequests", "Pull Requests", AllTime, count: counts.pull_requests),
    column_def!("internalPullRequests", "Pull Requests (Internal)", AllTime, count: counts.internal_pull_requests),
    column_def!("externalPullRequests", "Pull Requests (External)", AllTime, count: counts.external_pull_requests),
    column_def!("openPullRequests", "Open Pull Requests", AllTime, count: counts.open_pull_requests),
    column_def!(
        "averagePullRequestMergeTime",
        "Average Pull Request Time to Merge (Days)",
        AllTime,
        measure: average_pull_request_merge_time
    ),
    column_def!("contributorsAllTime", "Contributors (All Time)", AllTime, count: contributor_counts.all_time),
    column_def!(
        "contributorsAllTimeInternal",
        "Contributors (All Time - Internal)",
        AllTime,
        count: contributor_counts.all_time_internal
    ),
    column_def!(
        "contributorsAllTimeExternal",
        "Contributors (All Time - External)",
        AllTime,
        count: contributor_counts.all_time_external
    ),
    column_def!("openedIssues", "Issues Opened", ThisPeriod, count: counts.opened_issues),
    column_def!("openedIssuesInternal", "Issues Opened (Internal)", ThisPeriod, count: counts.opened_issues_internal),
    column_def!("openedIssuesExternal", "Issues Opened (External)", ThisPeriod, count: counts.opened_issues_external),
    column_def!(
        "openedIssuesFirstTimeContributor",
        "Issues Opened (First Time Contributor)",
        ThisPeriod,
        count: counts.opened_issues_first_time_contributor
    ),
    column_def!("closedIssues", "Issues Closed", ThisPeriod, count: counts.closed_issues),
    column_def!("openedPullRequests", "Pull Requests Opened", ThisPeriod, count: counts.opened_pull_requests),
    column_def!(
        "openedPullRequestsInternal",
        "Pull Requests Opened (Internal)",
        ThisPeriod,
        count: counts.opened_pull_requests_internal
    ),
    column_def!(
        "openedPullRequestsExternal",
        "Pull Requests Opened (External)",
        ThisPeriod,
        count: counts.opened_pull_requests_external
    ),
    column_def!(
        "openedPullRequestsFirstTimeContributor",
        "Pull Requests Opened (First Time Contributor)",
        ThisPeriod,
        count: counts.opened_pull_requests_first_time_contributor
    ),
    column_def!("mergedPullRequests", "Pull Requests Merged", ThisPeriod, count: counts.merged_pull_requests),
    column_def!("closedPullRequests", "Pull Requests Closed", ThisPeriod, count: counts.closed_pull_requests),
    column_def!("contributorsThisPeriod", "Contributors (This Period)", ThisPeriod, count: contributor_counts.this_period),
    column_def!(
        "contributorsThisPeriodInternal",
        "Contributors (This Period - Internal)",
        ThisPeriod,
        count: contributor_counts.this_period_internal
    ),
    column_def!(
        "contributorsThisPeriodExternal",
        "Contributors (This Period - External)",
        ThisPeriod,
        count: contributor_counts.this_period_external
    ),
    column_def!(
        "contributorsThisPeriodFirstTimeContributor",
        "Contributors (This Period - First Time Contributor)",
        ThisPeriod,
        count: contributor_counts.this_period_first_time_contributor
    ),
];

/// Flatten a row into `(column, value)` pairs in output order.
pub fn cells(row: &RepositoryMetrics) -> impl Iterator<Item = (&'static ColumnDef, Cell)> + '_ {
    COLUMN_DEFINITIONS.iter().map(move |def| (def, (def.extractor)(row)))
}
