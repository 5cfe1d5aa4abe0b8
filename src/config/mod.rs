//! Configuration file handling
//!
//! The configuration names the repositories to report on and carries the tunable
//! thresholds and limits. It can be written as TOML, YAML, or JSON; the format is
//! picked from the file extension.

#[expect(clippy::module_inception, reason = "the module holds the single Config type")]
mod config;

pub use config::{CONFIG_FILE_NAMES, Config, DEFAULT_CONFIG_TOML};
