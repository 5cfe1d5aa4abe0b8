use super::classification::{Affiliation, affiliation, is_first_time_contributor};
use super::contributors::Contributors;
use super::numeric::duration_to_days;
use super::timestamp::RecordScope;
use super::window::ReportWindow;
use crate::Result;
use crate::facts::{IssueState, RawIssue};

const LOG_TARGET: &str = "    issues";

/// Everything derived from one repository's issue list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueMetrics {
    pub internal_issues: u64,
    pub external_issues: u64,
    pub open_issues: u64,
    pub stale_issues: u64,
    pub old_issues: u64,
    pub closed_by_pull_request_issues: u64,
    pub closed_issues_total: u64,

    pub opened_issues: u64,
    pub opened_issues_internal: u64,
    pub opened_issues_external: u64,
    pub opened_issues_first_time_contributor: u64,
    pub closed_issues: u64,

    /// Days each closed issue stayed open, in input order.
    pub open_times: Vec<f64>,

    pub contributors: Contributors,
}

/// Compute issue metrics for the repository `repo`.
///
/// Fails on the first issue carrying a malformed timestamp.
pub fn extract_issue_metrics(repo: &str, issues: &[RawIssue], window: &ReportWindow) -> Result<IssueMetrics> {
    let mut m = IssueMetrics::default();
    let thresholds = window.thresholds();
    let now = window.now();

    for (index, issue) in issues.iter().enumerate() {
        let scope = RecordScope { repo, kind: "issue", index };
        let created_at = scope.parse("createdAt", &issue.created_at)?;
        let closed_at = scope.parse_optional("closedAt", issue.closed_at.as_deref())?;

        let association = issue.author_association;
        let in_period = window.contains(created_at);
        m.contributors.record(issue.author_login.as_deref(), association, in_period);

        match affiliation(association) {
            Affiliation::Internal => m.internal_issues += 1,
            Affiliation::External => m.external_issues += 1,
        }

        if issue.state == IssueState::Open {
            m.open_issues += 1;

            let last_activity = scope.parse("timeline createdAt", issue.last_activity())?;
            if duration_to_days(last_activity, now) > f64::from(thresholds.stale_after_days) {
                m.stale_issues += 1;
            }

            if duration_to_days(created_at, now) > f64::from(thresholds.old_after_days) {
                m.old_issues += 1;
            }
        }

        if in_period {
            m.opened_issues += 1;
            match affiliation(association) {
                Affiliation::Internal => m.opened_issues_internal += 1,
                Affiliation::External => m.opened_issues_external += 1,
            }
            if is_first_time_contributor(association) {
                m.opened_issues_first_time_contributor += 1;
            }
        }

        if let Some(closed_at) = closed_at {
            m.closed_issues_total += 1;
            if window.contains(closed_at) {
                m.closed_issues += 1;
            }

            m.open_times.push(duration_to_days(created_at, closed_at));

            if issue.last_pull_request_close().is_some() {
                m.closed_by_pull_request_issues += 1;
            }
        }
    }

    log::debug!(
        target: LOG_TARGET,
        "'{repo}': {} issues, {} open ({} stale, {} old), {} opened and {} closed this period",
        issues.len(),
        m.open_issues,
        m.stale_issues,
        m.old_issues,
        m.opened_issues,
        m.closed_issues
    );

    Ok(m)
}
