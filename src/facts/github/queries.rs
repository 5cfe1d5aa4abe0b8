//! GraphQL documents sent to GitHub and the response shapes they produce.

use crate::facts::{AuthorAssociation, IssueState, PullRequestState, RawIssue, RawPullRequest, TimelineEvent};
use serde::Deserialize;

/// Number of nodes requested per page. 100 is the maximum GitHub allows.
pub const PAGE_SIZE: u32 = 100;

/// Repository-level totals.
pub const REPOSITORY_SUMMARY_QUERY: &str = r"
query RepositorySummary($owner: String!, $name: String!) {
    repository(owner: $owner, name: $name) {
        name
        stargazers { totalCount }
        watchers { totalCount }
        forks { totalCount }
        issues { totalCount }
        pullRequests { totalCount }
    }
}
";

macro_rules! timestamped_event {
    ($name:literal) => {
        concat!("... on ", $name, " { createdAt } ")
    };
}

/// One page of issues together with the last 100 entries of each issue's timeline.
pub const ISSUES_PAGE_QUERY: &str = concat!(
    r"
query RepositoryIssues($owner: String!, $name: String!, $first: Int!, $cursor: String) {
    repository(owner: $owner, name: $name) {
        issues(first: $first, after: $cursor) {
            pageInfo { hasNextPage endCursor }
            nodes {
                createdAt
                closedAt
                state
                author { login }
                authorAssociation
                timelineItems(last: 100) {
                    nodes {
                        __typename
                        ... on ClosedEvent { createdAt closer { __typename } }
",
    timestamped_event!("AddedToProjectEvent"),
    timestamped_event!("AssignedEvent"),
    timestamped_event!("CommentDeletedEvent"),
    timestamped_event!("ConvertedNoteToIssueEvent"),
    timestamped_event!("CrossReferencedEvent"),
    timestamped_event!("DemilestonedEvent"),
    timestamped_event!("IssueComment"),
    timestamped_event!("LabeledEvent"),
    timestamped_event!("LockedEvent"),
    timestamped_event!("MentionedEvent"),
    timestamped_event!("MilestonedEvent"),
    timestamped_event!("MovedColumnsInProjectEvent"),
    timestamped_event!("PinnedEvent"),
    timestamped_event!("ReferencedEvent"),
    timestamped_event!("RemovedFromProjectEvent"),
    timestamped_event!("RenamedTitleEvent"),
    timestamped_event!("ReopenedEvent"),
    timestamped_event!("SubscribedEvent"),
    timestamped_event!("TransferredEvent"),
    timestamped_event!("UnassignedEvent"),
    timestamped_event!("UnlabeledEvent"),
    timestamped_event!("UnlockedEvent"),
    timestamped_event!("UnpinnedEvent"),
    timestamped_event!("UnsubscribedEvent"),
    timestamped_event!("UserBlockedEvent"),
    r"
                    }
                }
            }
        }
    }
}
"
);

/// One page of pull requests.
pub const PULL_REQUESTS_PAGE_QUERY: &str = r"
query RepositoryPullRequests($owner: String!, $name: String!, $first: Int!, $cursor: String) {
    repository(owner: $owner, name: $name) {
        pullRequests(first: $first, after: $cursor) {
            pageInfo { hasNextPage endCursor }
            nodes {
                createdAt
                closedAt
                mergedAt
                state
                author { login }
                authorAssociation
            }
        }
    }
}
";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    pub total_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct SummaryData {
    pub repository: Option<SummaryRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRepository {
    pub name: String,
    pub stargazers: TotalCount,
    pub watchers: TotalCount,
    pub forks: TotalCount,
    pub issues: TotalCount,
    pub pull_requests: TotalCount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// A paginated list. GitHub may return `null` entries for nodes it cannot resolve.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub page_info: PageInfo,

    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
}

#[derive(Debug, Deserialize)]
pub struct IssuesData {
    pub repository: Option<IssuesRepository>,
}

#[derive(Debug, Deserialize)]
pub struct IssuesRepository {
    pub issues: Connection<IssueNode>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestsData {
    pub repository: Option<PullRequestsRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestsRepository {
    pub pull_requests: Connection<PullRequestNode>,
}

#[derive(Debug, Deserialize)]
pub struct Actor {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct Typename {
    #[serde(rename = "__typename")]
    pub typename: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineNode {
    #[serde(rename = "__typename")]
    pub typename: String,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub closer: Option<Typename>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimelineItems {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<TimelineNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueNode {
    pub created_at: String,
    pub closed_at: Option<String>,
    pub state: IssueState,
    pub author: Option<Actor>,
    pub author_association: AuthorAssociation,

    #[serde(default)]
    pub timeline_items: TimelineItems,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestNode {
    pub created_at: String,
    pub closed_at: Option<String>,
    pub merged_at: Option<String>,
    pub state: PullRequestState,
    pub author: Option<Actor>,
    pub author_association: AuthorAssociation,
}

impl From<TimelineNode> for TimelineEvent {
    fn from(node: TimelineNode) -> Self {
        Self {
            typename: node.typename,
            created_at: node.created_at,
            closer_typename: node.closer.map(|closer| closer.typename),
        }
    }
}

impl From<IssueNode> for RawIssue {
    fn from(node: IssueNode) -> Self {
        Self {
            created_at: node.created_at,
            closed_at: node.closed_at,
            state: node.state,
            author_login: node.author.map(|author| author.login),
            author_association: node.author_association,
            timeline_events: node.timeline_items.nodes.into_iter().flatten().map(TimelineEvent::from).collect(),
        }
    }
}

impl From<PullRequestNode> for RawPullRequest {
    fn from(node: PullRequestNode) -> Self {
        Self {
            created_at: node.created_at,
            closed_at: node.closed_at,
            merged_at: node.merged_at,
            state: node.state,
            author_login: node.author.map(|author| author.login),
            author_association: node.author_association,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issues_query_lists_event_fragments() {
        assert!(ISSUES_PAGE_QUERY.contains("... on IssueComment { createdAt }"));
        assert!(ISSUES_PAGE_QUERY.contains("... on UserBlockedEvent { createdAt }"));
        assert!(ISSUES_PAGE_QUERY.contains("closer { __typename }"));
        assert!(ISSUES_PAGE_QUERY.contains("closedAt"));
    }

    #[test]
    fn test_issue_node_conversion() {
        let json = r#"{
            "createdAt": "2019-11-01T12:00:00Z",
            "closedAt": "2019-12-03T08:00:00Z",
            "state": "CLOSED",
            "author": {"login": "alice"},
            "authorAssociation": "FIRST_TIME_CONTRIBUTOR",
            "timelineItems": {
                "nodes": [
                    {"__typename": "LabeledEvent", "createdAt": "2019-11-02T00:00:00Z"},
                    null,
                    {"__typename": "ClosedEvent", "createdAt": "2019-12-03T08:00:00Z", "closer": {"__typename": "PullRequest"}}
                ]
            }
        }"#;

        let node: IssueNode = serde_json::from_str(json).unwrap();
        let issue = RawIssue::from(node);

        assert_eq!(issue.author_login.as_deref(), Some("alice"));
        assert_eq!(issue.author_association, AuthorAssociation::FirstTimeContributor);
        assert_eq!(issue.timeline_events.len(), 2);
        assert!(issue.last_pull_request_close().is_some());
    }

    #[test]
    fn test_issue_node_deleted_author() {
        let json = r#"{
            "createdAt": "2019-11-01T12:00:00Z",
            "closedAt": null,
            "state": "OPEN",
            "author": null,
            "authorAssociation": "NONE",
            "timelineItems": {"nodes": []}
        }"#;

        let issue = RawIssue::from(serde_json::from_str::<IssueNode>(json).unwrap());
        assert!(issue.author_login.is_none());
        assert_eq!(issue.state, IssueState::Open);
    }

    #[test]
    fn test_pull_request_page_deserialize() {
        let json = r#"{
            "repository": {
                "pullRequests": {
                    "pageInfo": {"hasNextPage": true, "endCursor": "Y3Vyc29yOjEwMA=="},
                    "nodes": [{
                        "createdAt": "2019-12-01T00:00:00Z",
                        "closedAt": "2019-12-02T00:00:00Z",
                        "mergedAt": "2019-12-02T00:00:00Z",
                        "state": "MERGED",
                        "author": {"login": "bob"},
                        "authorAssociation": "MEMBER"
                    }]
                }
            }
        }"#;

        let data: PullRequestsData = serde_json::from_str(json).unwrap();
        let connection = data.repository.unwrap().pull_requests;
        assert!(connection.page_info.has_next_page);
        assert_eq!(connection.page_info.end_cursor.as_deref(), Some("Y3Vyc29yOjEwMA=="));

        let pr = RawPullRequest::from(connection.nodes.into_iter().flatten().next().unwrap());
        assert_eq!(pr.state, PullRequestState::Merged);
        assert_eq!(pr.merged_at.as_deref(), Some("2019-12-02T00:00:00Z"));
    }

    #[test]
    fn test_summary_deserialize() {
        let json = r#"{
            "repository": {
                "name": "code-gov-api",
                "stargazers": {"totalCount": 42},
                "watchers": {"totalCount": 7},
                "forks": {"totalCount": 3},
                "issues": {"totalCount": 250},
                "pullRequests": {"totalCount": 120}
            }
        }"#;

        let data: SummaryData = serde_json::from_str(json).unwrap();
        let repo = data.repository.unwrap();
        assert_eq!(repo.stargazers.total_count, 42);
        assert_eq!(repo.pull_requests.total_count, 120);
    }

    #[test]
    fn test_missing_repository() {
        let data: SummaryData = serde_json::from_str(r#"{"repository": null}"#).unwrap();
        assert!(data.repository.is_none());
    }
}
