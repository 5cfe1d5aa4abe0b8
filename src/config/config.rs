use crate::Result;
use crate::facts::RepoSpec;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{EnrichableExt, IntoAppError, app_err, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;

/// The default configuration, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File names probed, in order, when no configuration path is given
pub const CONFIG_FILE_NAMES: [&str; 4] = ["repo-metrics.toml", "repo-metrics.yml", "repo-metrics.yaml", "repo-metrics.json"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Owner of repositories listed by bare name
    #[serde(default = "default_organization")]
    pub organization: String,

    /// Repository names or `owner/name` pairs, in report order
    #[serde(default)]
    pub repositories: Vec<String>,

    /// Directory for reports written without an explicit path
    #[serde(default = "default_reports_dir")]
    pub reports_dir: String,

    #[serde(default = "default_stale_after_days")]
    pub stale_after_days: u32,

    #[serde(default = "default_old_after_days")]
    pub old_after_days: u32,

    /// Page cap per issue or pull request listing
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

fn default_organization() -> String {
    "GSA".to_string()
}

fn default_reports_dir() -> String {
    "reports".to_string()
}

const fn default_stale_after_days() -> u32 {
    14
}

const fn default_old_after_days() -> u32 {
    120
}

const fn default_max_pages() -> u32 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            organization: default_organization(),
            repositories: Vec::new(),
            reports_dir: default_reports_dir(),
            stale_after_days: default_stale_after_days(),
            old_after_days: default_old_after_days(),
            max_pages: default_max_pages(),
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// When `config_path` is `None`, the names in [`CONFIG_FILE_NAMES`] are probed inside
    /// `workspace_root` and the first one found is used.
    ///
    /// Returns the configuration along with any warnings found while validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it contains invalid values
    pub fn load(workspace_root: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading repo-metrics configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let mut found = None;
            for name in CONFIG_FILE_NAMES {
                let path = workspace_root.join(name);
                match fs::read_to_string(&path) {
                    Ok(text) => {
                        found = Some((path, text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading repo-metrics configuration from {path}")),
                }
            }

            let Some(result) = found else {
                return Ok((Self::default(), Vec::new()));
            };
            result
        };

        let config = Self::parse(&final_path, &text)?;
        let warnings = config
            .validate()
            .map_err(|e| e.enrich_with(|| format!("validating configuration from {final_path}")))?;
        Ok((config, warnings))
    }

    fn parse(path: &Utf8Path, text: &str) -> Result<Self> {
        let extension = path.extension().unwrap_or_default();
        let config = match extension {
            "toml" => toml::from_str(text).into_app_err_with(|| format!("parsing TOML configuration from {path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(text).into_app_err_with(|| format!("parsing YAML configuration from {path}"))?,
            "json" => serde_json::from_str(text).into_app_err_with(|| format!("parsing JSON configuration from {path}"))?,
            _ => bail!("unsupported configuration file extension: {extension}"),
        };
        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => toml::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to TOML for saving to {output_path}"))?,
            "yml" | "yaml" => serde_yaml::to_string(self)
                .into_app_err_with(|| format!("serializing configuration to YAML for saving to {output_path}"))?,
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))?;
        Ok(())
    }

    /// Save the default configuration to a file
    ///
    /// TOML output is the commented `default_config.toml` verbatim. Other formats are
    /// serialized from the parsed defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        if output_path.extension() == Some("toml") {
            fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
            return Ok(());
        }

        let config: Self = toml::from_str(DEFAULT_CONFIG_TOML).into_app_err("parsing the built-in default configuration")?;
        config.save(output_path)
    }

    /// Resolve the configured repositories, in configuration order, dropping duplicates.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry is not a valid repository name
    pub fn repo_specs(&self) -> Result<Vec<RepoSpec>> {
        let mut seen = HashSet::new();
        let mut specs = Vec::with_capacity(self.repositories.len());

        for entry in &self.repositories {
            let spec = RepoSpec::parse(entry, &self.organization)?;
            if seen.insert(spec.clone()) {
                specs.push(spec);
            }
        }

        Ok(specs)
    }

    /// Check the configuration, returning warnings for suspicious but usable values.
    fn validate(&self) -> Result<Vec<String>> {
        if self.organization.trim().is_empty() {
            bail!("organization must not be empty");
        }

        if self.stale_after_days == 0 {
            bail!("stale_after_days must be greater than 0");
        }

        if self.old_after_days == 0 {
            bail!("old_after_days must be greater than 0");
        }

        if self.max_pages == 0 {
            bail!("max_pages must be greater than 0");
        }

        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for entry in &self.repositories {
            let spec = RepoSpec::parse(entry, &self.organization)?;
            if !seen.insert(spec.clone()) {
                warnings.push(format!("repository '{spec}' is listed more than once; it is only counted once"));
            }
        }

        if self.repositories.is_empty() {
            warnings.push("no repositories are configured".to_string());
        }

        if self.old_after_days < self.stale_after_days {
            warnings.push(format!(
                "old_after_days ({}) is less than stale_after_days ({})",
                self.old_after_days, self.stale_after_days
            ));
        }

        Ok(warnings)
    }
}
