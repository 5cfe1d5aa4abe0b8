//! A tool to audit the open-source health of an organization's repositories.
//!
//! # Overview
//!
//! `repo-metrics` fetches issue, pull request, star, watch, and fork data for a configured
//! list of GitHub repositories, computes engagement metrics for each repository over all time
//! and over a reporting window, folds them into an organization-wide `TOTAL` row, and writes
//! the result as a CSV report.
//!
//! # Quick Start
//!
//! Generate a configuration file listing the repositories to audit:
//!
//! ```bash
//! repo-metrics init
//! ```
//!
//! Produce a report for December 2019:
//!
//! ```bash
//! export GITHUB_TOKEN=ghp_xxxxxxxxxxxxxxxxxxxx
//! repo-metrics report 2019-12-01 2020-01-01
//! ```
//!
//! The reporting window is half-open: activity on the start date is included and activity
//! on the end date is not.
//!
//! # Offline Runs
//!
//! Raw repository data can be saved and replayed so a report can be reproduced exactly:
//!
//! ```bash
//! repo-metrics report 2019-12-01 2020-01-01 --save-snapshots snapshots/
//! repo-metrics report 2019-12-01 2020-01-01 --input snapshots/ --now 2020-01-02T00:00:00Z
//! ```
//!
//! # Configuration
//!
//! ```toml
//! organization = "GSA"
//! repositories = ["code-gov-front-end", "code-gov-api", "18F/analytics-reporter"]
//! reports_dir = "reports"
//! stale_after_days = 14
//! old_after_days = 120
//! ```

use repo_metrics::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that writes to the real standard streams.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
