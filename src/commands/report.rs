use super::Host;
use super::common::{LogLevel, init_logging, parse_date, parse_timestamp};
use crate::Result;
use crate::config::Config;
use crate::facts::github::{DEFAULT_ENDPOINT, Provider};
use crate::facts::{RepoSpec, RepositoryRawData, snapshot};
use crate::metrics::{ReportWindow, RepositoryMetrics, Thresholds, compute_report};
use crate::reports::{generate_console, generate_csv, generate_json};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "    report";

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// First day of the reporting period (YYYY-MM-DD), included
    #[arg(value_name = "START", value_parser = parse_date)]
    pub start: NaiveDate,

    /// Day after the reporting period (YYYY-MM-DD), excluded
    #[arg(value_name = "END", value_parser = parse_date)]
    pub end: NaiveDate,

    /// Path to configuration file [default: one of repo-metrics.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Read raw repository data from snapshots in this directory instead of fetching it
    #[arg(long, value_name = "DIR", conflicts_with = "save_snapshots")]
    pub input: Option<Utf8PathBuf>,

    /// Save the fetched raw repository data as snapshots in this directory
    #[arg(long, value_name = "DIR")]
    pub save_snapshots: Option<Utf8PathBuf>,

    /// Reference time for staleness and age (RFC 3339) [default: the current time]
    #[arg(long, value_name = "TIMESTAMP", value_parser = parse_timestamp)]
    pub now: Option<DateTime<Utc>>,

    /// GraphQL endpoint to query
    #[arg(long, value_name = "URL", default_value = DEFAULT_ENDPOINT, hide = true)]
    pub endpoint: String,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Output the report to a CSV file [default: <reports_dir>/<today>_<START>_<END>.csv]
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Output the report to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Show the TOTAL row on the console
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,
}

pub async fn process_report<H: Host>(host: &mut H, args: &ReportArgs) -> Result<()> {
    init_logging(args.log_level);

    if args.end <= args.start {
        bail!("END ({}) must be at least one day after START ({})", args.end, args.start);
    }

    let workspace_root = Utf8PathBuf::from(".");
    let (config, warnings) = Config::load(&workspace_root, args.config.as_ref())?;
    for warning in &warnings {
        let _ = writeln!(host.error(), "warning: {warning}");
    }

    let repos = config.repo_specs()?;
    if repos.is_empty() {
        bail!("no repositories are configured");
    }

    let now = args.now.unwrap_or_else(Utc::now);
    let window = ReportWindow::from_dates(args.start, args.end, now)?.with_thresholds(Thresholds {
        stale_after_days: config.stale_after_days,
        old_after_days: config.old_after_days,
    });

    log::info!(
        target: LOG_TARGET,
        "Reporting on {} repositories for {} to {}",
        repos.len(),
        window.start(),
        window.end()
    );

    let raw = collect(&config, &repos, args).await?;
    let rows = compute_report(&raw, &window)?;

    write_reports(host, &config, args, now, window.thresholds(), &rows)
}

async fn collect(config: &Config, repos: &[RepoSpec], args: &ReportArgs) -> Result<Vec<RepositoryRawData>> {
    if let Some(dir) = &args.input {
        log::info!(target: LOG_TARGET, "Loading snapshots from '{dir}'");
        return repos.iter().map(|repo| snapshot::load(dir, repo)).collect();
    }

    let provider = Provider::new(args.github_token.as_deref(), args.endpoint.as_str(), config.max_pages)?;
    let mut raw = Vec::with_capacity(repos.len());

    for repo in repos {
        let data = provider.fetch_repository(repo).await?;

        if let Some(dir) = &args.save_snapshots {
            let path = snapshot::save(dir, repo, &data)?;
            log::info!(target: LOG_TARGET, "Saved snapshot for '{repo}' to '{path}'");
        }

        raw.push(data);
    }

    Ok(raw)
}

fn write_reports<H: Host>(
    host: &mut H,
    config: &Config,
    args: &ReportArgs,
    now: DateTime<Utc>,
    thresholds: Thresholds,
    rows: &[RepositoryMetrics],
) -> Result<()> {
    let csv_path = args.csv.clone().unwrap_or_else(|| {
        Utf8Path::new(&config.reports_dir).join(format!(
            "{}_{}_{}.csv",
            now.date_naive().format("%Y-%m-%d"),
            args.start.format("%Y-%m-%d"),
            args.end.format("%Y-%m-%d")
        ))
    });

    let mut csv_output = String::new();
    generate_csv(rows, thresholds, &mut csv_output)?;
    write_file(&csv_path, &csv_output)?;
    let _ = writeln!(host.output(), "Wrote CSV report to {csv_path}");

    if let Some(json_path) = &args.json {
        let mut json_output = String::new();
        generate_json(rows, &mut json_output)?;
        write_file(json_path, &json_output)?;
        let _ = writeln!(host.output(), "Wrote JSON report to {json_path}");
    }

    if args.console
        && let Some(total) = rows.last()
    {
        let mut console_output = String::new();
        generate_console(total, thresholds, &mut console_output)?;
        let _ = writeln!(host.output());
        let _ = write!(host.output(), "{console_output}");
    }

    Ok(())
}

fn write_file(path: &Utf8Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create directory '{parent}'"))?;
    }

    fs::write(path, contents).into_app_err_with(|| format!("unable to write report '{path}'"))
}
