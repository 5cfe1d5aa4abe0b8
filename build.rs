//! This build script validates the default configuration file (`default_config.toml`)

#![allow(dead_code, reason = "Some items may be unused in this build script context")]
#![allow(unused_imports, reason = "Some items may be unused in this build script context")]

type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

use camino::{Utf8Path, Utf8PathBuf};
use ohno::IntoAppError;
use std::env;
use std::process;

#[path = "src/facts/repo_spec.rs"]
mod repo_spec;

mod facts {
    pub use super::repo_spec::RepoSpec;
}

#[path = "src/config/mod.rs"]
mod config;

fn main() {
    match inner_main() {
        Ok(warnings) => {
            if !warnings.is_empty() {
                for warning in warnings {
                    eprintln!("cargo:warning=Config validation warning: {warning}");
                }

                process::exit(1);
            }

            println!("cargo:rerun-if-changed=default_config.toml");
            println!("cargo:rerun-if-changed=src/config");
            println!("cargo:rerun-if-changed=src/facts/repo_spec.rs");
        }
        Err(e) => {
            eprintln!("unable to load default_config.toml: {e:?}");
            process::exit(1);
        }
    }
}

fn inner_main() -> Result<Vec<String>> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").into_app_err("CARGO_MANIFEST_DIR should be set during build")?;
    let workspace_root = Utf8Path::new(&manifest_dir);
    let config_path: Utf8PathBuf = workspace_root.join("default_config.toml");

    let (_config, warnings) =
        config::Config::load(workspace_root, Some(&config_path)).into_app_err("unable to load default_config.toml")?;

    Ok(warnings)
}
