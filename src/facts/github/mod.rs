//! Fetches repository activity from the GitHub GraphQL API.

mod client;
mod provider;
mod queries;

pub use provider::{DEFAULT_ENDPOINT, DEFAULT_MAX_PAGES, Provider};
