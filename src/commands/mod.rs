//! Command-line interface and orchestration for repo-metrics
//!
//! This module implements the CLI commands and wires the configuration, the fact
//! sources, the metrics engine, and the report generators together.
//!
//! # Implementation Model
//!
//! The module is organized around three commands:
//!
//! ## Commands
//!
//! - **report**: Load the configuration, obtain raw activity for every configured
//!   repository (from GitHub or from snapshots), compute the per-repository rows and
//!   the `TOTAL` row, and write the requested reports
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file for errors and warnings
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate command handler. All terminal output goes through the [`Host`] trait so
//! commands can be exercised from tests.

mod common;
mod host;
mod init;
mod report;
mod run;
mod validate;

pub use common::LogLevel;
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use report::{ReportArgs, process_report};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
