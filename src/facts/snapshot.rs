//! On-disk snapshots of raw repository data.
//!
//! A snapshot directory holds one JSON document per repository at `<dir>/<owner>/<name>.json`.
//! Saving snapshots during a live run and feeding the directory back in later reproduces
//! a report without touching the network.

use super::RepoSpec;
use super::RepositoryRawData;
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::IntoAppError;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};

const LOG_TARGET: &str = "  snapshot";

/// Location of the snapshot for `repo` inside `dir`.
#[must_use]
pub fn snapshot_path(dir: &Utf8Path, repo: &RepoSpec) -> Utf8PathBuf {
    dir.join(file_safe(repo.owner())).join(format!("{}.json", file_safe(repo.name())))
}

/// Owner and repository names end up as path components, so `..` and separators must not survive.
fn file_safe(component: &str) -> String {
    component
        .replace("..", "__")
        .replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_")
}

/// Load the snapshot for `repo` from `dir`.
pub fn load(dir: &Utf8Path, repo: &RepoSpec) -> Result<RepositoryRawData> {
    let path = snapshot_path(dir, repo);

    let file = File::open(&path).into_app_err_with(|| format!("unable to open snapshot '{path}' for repository '{repo}'"))?;
    let data: RepositoryRawData =
        serde_json::from_reader(BufReader::new(file)).into_app_err_with(|| format!("unable to parse snapshot '{path}'"))?;

    log::debug!(
        target: LOG_TARGET,
        "Loaded snapshot for '{repo}' with {} issues and {} pull requests",
        data.issues.len(),
        data.pull_requests.len()
    );

    Ok(data)
}

/// Save `data` as the snapshot for `repo` inside `dir`, creating directories as needed.
pub fn save(dir: &Utf8Path, repo: &RepoSpec, data: &RepositoryRawData) -> Result<Utf8PathBuf> {
    let path = snapshot_path(dir, repo);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create directory '{parent}'"))?;
    }

    let file = File::create(&path).into_app_err_with(|| format!("unable to create snapshot '{path}'"))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data).into_app_err_with(|| format!("unable to write snapshot '{path}'"))?;
    writer.flush().into_app_err_with(|| format!("unable to flush snapshot '{path}'"))?;

    log::debug!(target: LOG_TARGET, "Saved snapshot for '{repo}' to '{path}'");
    Ok(path)
}
