use crate::Result;
use core::fmt::{Display, Formatter};
use ohno::bail;

/// Identifies a repository on the hosting service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    owner: Box<str>,
    name: Box<str>,
}

impl RepoSpec {
    #[must_use]
    pub fn new(owner: impl AsRef<str>, name: impl AsRef<str>) -> Self {
        Self {
            owner: Box::from(owner.as_ref()),
            name: Box::from(name.as_ref()),
        }
    }

    /// Parse a configured repository entry.
    ///
    /// Entries are either a bare repository name, which belongs to `default_owner`, or an
    /// explicit `owner/name` pair.
    pub fn parse(entry: &str, default_owner: &str) -> Result<Self> {
        let entry = entry.trim();
        if entry.is_empty() {
            bail!("invalid repository entry: empty name");
        }

        let (owner, name) = match entry.split_once('/') {
            Some((owner, name)) => (owner, name.trim_end_matches(".git")),
            None => (default_owner, entry.trim_end_matches(".git")),
        };

        if owner.is_empty() || name.is_empty() {
            bail!("invalid repository entry '{entry}': empty owner or repository name");
        }

        if name.contains('/') {
            bail!("invalid repository entry '{entry}': expected 'name' or 'owner/name'");
        }

        if owner.chars().any(char::is_whitespace) || name.chars().any(char::is_whitespace) {
            bail!("invalid repository entry '{entry}': names cannot contain whitespace");
        }

        Ok(Self::new(owner, name))
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_name() {
        let spec = RepoSpec::parse("code-gov-api", "GSA").unwrap();
        assert_eq!(spec.owner(), "GSA");
        assert_eq!(spec.name(), "code-gov-api");
        assert_eq!(spec.to_string(), "GSA/code-gov-api");
    }

    #[test]
    fn test_parse_owner_and_name() {
        let spec = RepoSpec::parse("18F/analytics-reporter", "GSA").unwrap();
        assert_eq!(spec.owner(), "18F");
        assert_eq!(spec.name(), "analytics-reporter");
    }

    #[test]
    fn test_parse_trims_whitespace_and_git_suffix() {
        let spec = RepoSpec::parse("  GSA/data.gov.git ", "other").unwrap();
        assert_eq!(spec.owner(), "GSA");
        assert_eq!(spec.name(), "data.gov");
    }

    #[test]
    fn test_parse_empty() {
        let result = RepoSpec::parse("   ", "GSA");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty name"));
    }

    #[test]
    fn test_parse_empty_owner() {
        assert!(RepoSpec::parse("/repo", "GSA").is_err());
        assert!(RepoSpec::parse("GSA/", "GSA").is_err());
        assert!(RepoSpec::parse("repo", "").is_err());
    }

    #[test]
    fn test_parse_too_many_segments() {
        let result = RepoSpec::parse("GSA/repo/extra", "GSA");
        assert!(result.unwrap_err().to_string().contains("expected 'name' or 'owner/name'"));
    }

    #[test]
    fn test_parse_whitespace_inside() {
        assert!(RepoSpec::parse("GSA/my repo", "GSA").is_err());
    }
}
