//! Raw repository activity records and the collaborators that produce them
//!
//! Everything in this module deals with getting fully materialized
//! [`RepositoryRawData`] values into the process: the record types themselves,
//! repository identifiers, JSON snapshots on disk, and the GitHub GraphQL
//! fetcher. Nothing here computes metrics.

mod author_association;
pub mod github;
mod raw_data;
mod repo_spec;
pub mod snapshot;

pub use author_association::AuthorAssociation;
pub use raw_data::{IssueState, PullRequestState, RawIssue, RawPullRequest, RepositoryRawData, TimelineEvent};
pub use repo_spec::RepoSpec;
