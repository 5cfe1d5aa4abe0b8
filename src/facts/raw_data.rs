use super::AuthorAssociation;
use serde::{Deserialize, Serialize};

/// Timeline event type name for an issue being closed.
const CLOSED_EVENT: &str = "ClosedEvent";

/// Closer type name for an issue closed by a pull request.
const PULL_REQUEST_CLOSER: &str = "PullRequest";

/// Lifecycle state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueState {
    Open,
    Closed,
}

/// Lifecycle state of a pull request.
///
/// `Closed` means closed without being merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestState {
    Open,
    Closed,
    Merged,
}

/// One entry of an issue's timeline.
///
/// Timestamps are kept as the text supplied by the source and parsed by the metrics
/// engine, which reports malformed values together with the repository and field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub typename: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Type name of whatever closed the issue, only present on `ClosedEvent` entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closer_typename: Option<String>,
}

impl TimelineEvent {
    #[must_use]
    pub fn is_closed_event(&self) -> bool {
        self.typename == CLOSED_EVENT
    }

    #[must_use]
    pub fn is_closed_by_pull_request(&self) -> bool {
        self.is_closed_event() && self.closer_typename.as_deref() == Some(PULL_REQUEST_CLOSER)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIssue {
    pub created_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<String>,

    pub state: IssueState,

    /// `None` when the author's account has been deleted.
    #[serde(default)]
    pub author_login: Option<String>,

    pub author_association: AuthorAssociation,

    /// Timeline entries in chronological order.
    #[serde(default)]
    pub timeline_events: Vec<TimelineEvent>,
}

impl RawIssue {
    /// The most recent `ClosedEvent` whose closer was a pull request, if any.
    ///
    /// An issue can go through several close/reopen cycles; any of them being performed by a
    /// pull request marks the issue as closed by pull request.
    #[must_use]
    pub fn last_pull_request_close(&self) -> Option<&TimelineEvent> {
        self.timeline_events.iter().rev().find(|event| event.is_closed_by_pull_request())
    }

    /// Timestamp text of the most recent activity on this issue.
    ///
    /// This is the `createdAt` of the last timeline event that carries one, falling back to the
    /// issue's own creation time.
    #[must_use]
    pub fn last_activity(&self) -> &str {
        self.timeline_events
            .iter()
            .rev()
            .find_map(|event| event.created_at.as_deref())
            .unwrap_or(&self.created_at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPullRequest {
    pub created_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<String>,

    pub state: PullRequestState,

    #[serde(default)]
    pub author_login: Option<String>,

    pub author_association: AuthorAssociation,
}

/// Everything known about one repository for a single fetch cycle.
///
/// The scalar totals come from the hosting service and are authoritative: `issue_count`
/// and `pull_request_count` may exceed the number of records in `issues` and
/// `pull_requests` when a listing was truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRawData {
    pub name: String,

    #[serde(default)]
    pub issues: Vec<RawIssue>,

    #[serde(default)]
    pub pull_requests: Vec<RawPullRequest>,

    pub star_count: u64,
    pub watch_count: u64,
    pub fork_count: u64,
    pub issue_count: u64,
    pub pull_request_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(typename: &str, closer: Option<&str>) -> TimelineEvent {
        TimelineEvent {
            typename: typename.to_string(),
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
            closer_typename: closer.map(str::to_string),
        }
    }

    fn issue_with_events(events: Vec<TimelineEvent>) -> RawIssue {
        RawIssue {
            created_at: "2023-12-01T00:00:00Z".to_string(),
            closed_at: Some("2024-01-01T00:00:00Z".to_string()),
            state: IssueState::Closed,
            author_login: Some("alice".to_string()),
            author_association: AuthorAssociation::Member,
            timeline_events: events,
        }
    }

    #[test]
    fn test_closed_by_pull_request() {
        let issue = issue_with_events(vec![event("LabeledEvent", None), event("ClosedEvent", Some("PullRequest"))]);
        assert!(issue.last_pull_request_close().is_some());
    }

    #[test]
    fn test_closed_by_commit() {
        let issue = issue_with_events(vec![event("ClosedEvent", Some("Commit"))]);
        assert!(issue.last_pull_request_close().is_none());
    }

    #[test]
    fn test_closed_without_closer() {
        let issue = issue_with_events(vec![event("ClosedEvent", None)]);
        assert!(issue.last_pull_request_close().is_none());
    }

    #[test]
    fn test_pull_request_close_across_reopen_cycles() {
        let mut first = event("ClosedEvent", Some("PullRequest"));
        first.created_at = Some("2024-01-01T00:00:00Z".to_string());
        let mut second = event("ClosedEvent", Some("PullRequest"));
        second.created_at = Some("2024-02-01T00:00:00Z".to_string());

        let issue = issue_with_events(vec![first, event("ReopenedEvent", None), second, event("IssueComment", None)]);
        let close = issue.last_pull_request_close().unwrap();
        assert_eq!(close.created_at.as_deref(), Some("2024-02-01T00:00:00Z"));

        let issue = issue_with_events(vec![
            event("ClosedEvent", Some("PullRequest")),
            event("ReopenedEvent", None),
            event("ClosedEvent", Some("Commit")),
        ]);
        assert!(issue.last_pull_request_close().is_some());
    }

    #[test]
    fn test_no_timeline_events() {
        let issue = issue_with_events(Vec::new());
        assert!(issue.last_pull_request_close().is_none());
        assert_eq!(issue.last_activity(), "2023-12-01T00:00:00Z");
    }

    #[test]
    fn test_last_activity_skips_events_without_timestamp() {
        let mut untimed = event("SomeEvent", None);
        untimed.created_at = None;
        let mut labeled = event("LabeledEvent", None);
        labeled.created_at = Some("2024-03-01T00:00:00Z".to_string());

        let issue = issue_with_events(vec![labeled, untimed]);
        assert_eq!(issue.last_activity(), "2024-03-01T00:00:00Z");
    }

    #[test]
    fn test_repository_raw_data_deserialize() {
        let json = r#"{
            "name": "code-gov-api",
            "issues": [{
                "createdAt": "2024-01-01T00:00:00Z",
                "state": "OPEN",
                "authorLogin": null,
                "authorAssociation": "NONE"
            }],
            "pullRequests": [{
                "createdAt": "2024-01-01T00:00:00Z",
                "closedAt": "2024-01-02T00:00:00Z",
                "mergedAt": "2024-01-02T00:00:00Z",
                "state": "MERGED",
                "authorLogin": "bob",
                "authorAssociation": "CONTRIBUTOR"
            }],
            "starCount": 10,
            "watchCount": 3,
            "forkCount": 2,
            "issueCount": 1,
            "pullRequestCount": 1
        }"#;

        let data: RepositoryRawData = serde_json::from_str(json).unwrap();
        assert_eq!(data.name, "code-gov-api");
        assert_eq!(data.issues.len(), 1);
        assert!(data.issues[0].author_login.is_none());
        assert!(data.issues[0].timeline_events.is_empty());
        assert_eq!(data.pull_requests[0].state, PullRequestState::Merged);
        assert_eq!(data.star_count, 10);
    }
}
