use super::client::Client;
use super::queries::{
    Connection, ISSUES_PAGE_QUERY, IssuesData, PAGE_SIZE, PULL_REQUESTS_PAGE_QUERY, PullRequestsData, REPOSITORY_SUMMARY_QUERY,
    SummaryData,
};
use crate::Result;
use crate::facts::{RawIssue, RawPullRequest, RepoSpec, RepositoryRawData};
use ohno::{EnrichableExt, app_err};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

const LOG_TARGET: &str = "    github";

/// Public GitHub GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";

/// Default cap on the number of pages fetched per listing.
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Fetches fully paginated repository activity from GitHub.
///
/// Repositories are fetched one at a time and every listing is paged through until GitHub
/// reports no further pages or `max_pages` is reached.
#[derive(Debug, Clone)]
pub struct Provider {
    client: Client,
    max_pages: u32,
}

impl Provider {
    pub fn new(token: Option<&str>, endpoint: impl Into<String>, max_pages: u32) -> Result<Self> {
        if token.is_none() {
            log::warn!(target: LOG_TARGET, "No GitHub token provided; the GraphQL API requires authentication");
        }

        let client = Client::new(token, endpoint)?;
        log::debug!(target: LOG_TARGET, "Using GraphQL endpoint '{}'", client.endpoint());

        Ok(Self {
            client,
            max_pages: max_pages.max(1),
        })
    }

    pub async fn fetch_repository(&self, repo: &RepoSpec) -> Result<RepositoryRawData> {
        log::info!(target: LOG_TARGET, "Fetching activity for repository '{repo}'");

        let summary: SummaryData = self
            .client
            .query(REPOSITORY_SUMMARY_QUERY, base_variables(repo))
            .await
            .map_err(|e| e.enrich_with(|| format!("could not fetch summary for repository '{repo}'")))?;
        let summary = summary
            .repository
            .ok_or_else(|| app_err!("repository '{repo}' not found"))?;

        let issues: Vec<RawIssue> = self
            .fetch_all(repo, "issues", ISSUES_PAGE_QUERY, |data: IssuesData| data.repository.map(|r| r.issues))
            .await?
            .into_iter()
            .map(RawIssue::from)
            .collect();

        let pull_requests: Vec<RawPullRequest> = self
            .fetch_all(repo, "pull requests", PULL_REQUESTS_PAGE_QUERY, |data: PullRequestsData| {
                data.repository.map(|r| r.pull_requests)
            })
            .await?
            .into_iter()
            .map(RawPullRequest::from)
            .collect();

        log::info!(
            target: LOG_TARGET,
            "Fetched {} of {} issues and {} of {} pull requests for '{repo}'",
            issues.len(),
            summary.issues.total_count,
            pull_requests.len(),
            summary.pull_requests.total_count
        );

        Ok(RepositoryRawData {
            name: summary.name,
            issues,
            pull_requests,
            star_count: summary.stargazers.total_count,
            watch_count: summary.watchers.total_count,
            fork_count: summary.forks.total_count,
            issue_count: summary.issues.total_count,
            pull_request_count: summary.pull_requests.total_count,
        })
    }

    /// Walk every page of one listing, following `endCursor`.
    async fn fetch_all<D, N>(
        &self,
        repo: &RepoSpec,
        what: &str,
        query: &str,
        connection_of: impl Fn(D) -> Option<Connection<N>>,
    ) -> Result<Vec<N>>
    where
        D: DeserializeOwned,
    {
        let mut nodes = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page = 0;

        loop {
            page += 1;

            let mut variables = base_variables(repo);
            variables["first"] = json!(PAGE_SIZE);
            variables["cursor"] = json!(cursor);

            let data: D = self
                .client
                .query(query, variables)
                .await
                .map_err(|e| e.enrich_with(|| format!("could not fetch page {page} of {what} for repository '{repo}'")))?;
            let connection = connection_of(data).ok_or_else(|| app_err!("repository '{repo}' not found"))?;

            nodes.extend(connection.nodes.into_iter().flatten());
            log::debug!(target: LOG_TARGET, "Fetched page {page} of {what} for '{repo}' ({} so far)", nodes.len());

            if !connection.page_info.has_next_page {
                break;
            }

            if page >= self.max_pages {
                log::warn!(
                    target: LOG_TARGET,
                    "Stopped fetching {what} for '{repo}' after {page} pages; metrics for this repository will be based on {} records",
                    nodes.len()
                );
                break;
            }

            cursor = connection.page_info.end_cursor;
            if cursor.is_none() {
                log::warn!(target: LOG_TARGET, "GitHub reported more {what} for '{repo}' without a cursor; stopping");
                break;
            }
        }

        Ok(nodes)
    }
}

fn base_variables(repo: &RepoSpec) -> Value {
    json!({
        "owner": repo.owner(),
        "name": repo.name(),
    })
}
