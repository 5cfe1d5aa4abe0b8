//! GitHub GraphQL client
//!
//! Minimal client that posts GraphQL documents and turns GraphQL-level failures into errors.

use crate::Result;
use chrono::{DateTime, Utc};
use ohno::{IntoAppError, app_err, bail};
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

const LOG_TARGET: &str = "    github";

/// Envelope of every GraphQL response.
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,

    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,

    #[serde(default)]
    path: Option<Vec<Value>>,
}

impl GraphQlError {
    fn describe(&self) -> String {
        match &self.path {
            Some(path) if !path.is_empty() => {
                let path: Vec<String> = path
                    .iter()
                    .map(|segment| match segment {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect();
                format!("{} (at {})", self.message, path.join("."))
            }
            _ => self.message.clone(),
        }
    }
}

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    endpoint: String,
}

impl Client {
    /// Create a new client for the GraphQL `endpoint`, optionally authenticating with `token`
    pub fn new(token: Option<&str>, endpoint: impl Into<String>) -> Result<Self> {
        use reqwest::header::{AUTHORIZATION, HeaderValue};

        let mut client_builder = reqwest::Client::builder().user_agent("repo-metrics");

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("Bearer {t}"))?;
            auth_val.set_sensitive(true);

            let mut headers = HeaderMap::new();
            let _ = headers.insert(AUTHORIZATION, auth_val);

            client_builder = client_builder.default_headers(headers);
        }

        Ok(Self {
            client: client_builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute a GraphQL document and deserialize its `data` member.
    pub async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let body = json!({
            "query": query,
            "variables": variables,
        });

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .into_app_err_with(|| format!("unable to reach '{}'", self.endpoint))?;

        let rate_limit = extract_rate_limit_from_headers(resp.headers());
        if let Some(rate_limit) = rate_limit {
            log::trace!(
                target: LOG_TARGET,
                "{} requests remaining until {}",
                rate_limit.remaining,
                rate_limit.reset_at
            );
        }

        let status = resp.status();
        if matches!(status.as_u16(), 403 | 429) {
            if let Some(rate_limit) = rate_limit
                && rate_limit.remaining == 0
            {
                bail!("GitHub rate limit exhausted, resets at {}", rate_limit.reset_at);
            }
            bail!("GitHub rejected the request with status {status}");
        }

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            bail!("GitHub request failed with status {status}: {}", text.trim());
        }

        let response: GraphQlResponse<T> = resp.json().await.into_app_err("unable to parse GraphQL response")?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            let messages: Vec<String> = errors.iter().map(GraphQlError::describe).collect();
            bail!("GraphQL query failed: {}", messages.join("; "));
        }

        response.data.ok_or_else(|| app_err!("GraphQL response contained no data"))
    }
}

/// Extract rate limit information from API response headers
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?.parse::<usize>().ok()?;

    let reset_timestamp = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;

    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo { remaining, reset_at })
}
