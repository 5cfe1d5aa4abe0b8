//! repo-metrics crate
//!
//! This crate is an implementation detail of the `repo-metrics` tool. This crate's API is fluid and may change without warning
//! and in a semver-incompatible way.
//!
//! # Module Organization
//!
//! - [`facts`]: Raw repository activity records and the collaborators that produce them
//! - [`metrics`]: The metrics computation engine and the cross-repository aggregator
//! - [`reports`]: Report generation in multiple formats
//! - [`config`]: Configuration file handling
//! - [`commands`]: Command-line interface and orchestration

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod config;

#[doc(hidden)]
pub mod facts;

#[doc(hidden)]
pub mod metrics;

#[doc(hidden)]
pub mod reports;

pub use crate::commands::{Host, run};
