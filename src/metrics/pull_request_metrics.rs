use super::classification::{Affiliation, affiliation, is_first_time_contributor};
use super::contributors::Contributors;
use super::numeric::duration_to_days;
use super::timestamp::RecordScope;
use super::window::ReportWindow;
use crate::Result;
use crate::facts::{PullRequestState, RawPullRequest};

const LOG_TARGET: &str = "     pulls";

/// Everything derived from one repository's pull request list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PullRequestMetrics {
    pub internal_pull_requests: u64,
    pub external_pull_requests: u64,
    pub open_pull_requests: u64,

    pub opened_pull_requests: u64,
    pub opened_pull_requests_internal: u64,
    pub opened_pull_requests_external: u64,
    pub opened_pull_requests_first_time_contributor: u64,
    pub merged_pull_requests: u64,
    pub closed_pull_requests: u64,

    /// Days from creation to merge for every merged pull request, whenever it was merged.
    pub open_times: Vec<f64>,

    pub contributors: Contributors,
}

/// Compute pull request metrics for the repository `repo`.
///
/// The state decides how a finished pull request is counted: a `MERGED` pull request is
/// never counted as closed even though GitHub also sets its `closedAt`. Merge times cover
/// the whole history while the merged counter covers only the period.
pub fn extract_pull_request_metrics(repo: &str, pull_requests: &[RawPullRequest], window: &ReportWindow) -> Result<PullRequestMetrics> {
    let mut m = PullRequestMetrics::default();

    for (index, pr) in pull_requests.iter().enumerate() {
        let scope = RecordScope {
            repo,
            kind: "pull request",
            index,
        };
        let created_at = scope.parse("createdAt", &pr.created_at)?;
        let closed_at = scope.parse_optional("closedAt", pr.closed_at.as_deref())?;
        let merged_at = scope.parse_optional("mergedAt", pr.merged_at.as_deref())?;

        let association = pr.author_association;
        let in_period = window.contains(created_at);
        m.contributors.record(pr.author_login.as_deref(), association, in_period);

        match affiliation(association) {
            Affiliation::Internal => m.internal_pull_requests += 1,
            Affiliation::External => m.external_pull_requests += 1,
        }

        if in_period {
            m.opened_pull_requests += 1;
            match affiliation(association) {
                Affiliation::Internal => m.opened_pull_requests_internal += 1,
                Affiliation::External => m.opened_pull_requests_external += 1,
            }
            if is_first_time_contributor(association) {
                m.opened_pull_requests_first_time_contributor += 1;
            }
        }

        match (pr.state, merged_at, closed_at) {
            (PullRequestState::Open, _, _) => m.open_pull_requests += 1,
            (PullRequestState::Merged, Some(merged_at), _) => {
                m.open_times.push(duration_to_days(created_at, merged_at));
                if window.contains(merged_at) {
                    m.merged_pull_requests += 1;
                }
            }
            (PullRequestState::Closed, _, Some(closed_at)) if window.contains(closed_at) => m.closed_pull_requests += 1,
            _ => {}
        }
    }

    log::debug!(
        target: LOG_TARGET,
        "'{repo}': {} pull requests, {} open, {} opened, {} merged and {} closed this period",
        pull_requests.len(),
        m.open_pull_requests,
        m.opened_pull_requests,
        m.merged_pull_requests,
        m.closed_pull_requests
    );

    Ok(m)
}
