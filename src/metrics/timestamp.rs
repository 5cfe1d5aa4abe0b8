use crate::Result;
use chrono::{DateTime, Utc};
use ohno::IntoAppError;

/// Identifies one input record so that malformed fields can be reported precisely.
#[derive(Debug, Clone, Copy)]
pub struct RecordScope<'a> {
    pub repo: &'a str,
    pub kind: &'static str,
    pub index: usize,
}

impl RecordScope<'_> {
    /// Parse an RFC 3339 timestamp belonging to this record.
    pub fn parse(&self, field: &str, value: &str) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .into_app_err_with(|| {
                format!(
                    "repository '{}': {} #{} has a malformed {field} timestamp '{value}'",
                    self.repo, self.kind, self.index
                )
            })
    }

    pub fn parse_optional(&self, field: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
        value.map(|v| self.parse(field, v)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SCOPE: RecordScope<'static> = RecordScope {
        repo: "code-gov-api",
        kind: "issue",
        index: 3,
    };

    #[test]
    fn test_parse_utc() {
        let ts = SCOPE.parse("createdAt", "2019-12-05T10:30:00Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2019, 12, 5, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_with_offset() {
        let ts = SCOPE.parse("createdAt", "2019-12-05T12:30:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2019, 12, 5, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_malformed_names_scope() {
        let msg = SCOPE.parse("closedAt", "yesterday").unwrap_err().to_string();
        assert!(msg.contains("code-gov-api"), "{msg}");
        assert!(msg.contains("issue #3"), "{msg}");
        assert!(msg.contains("closedAt"), "{msg}");
        assert!(msg.contains("yesterday"), "{msg}");
    }

    #[test]
    fn test_parse_optional() {
        assert!(SCOPE.parse_optional("closedAt", None).unwrap().is_none());
        assert!(SCOPE.parse_optional("closedAt", Some("2019-12-05T10:30:00Z")).unwrap().is_some());
        assert!(SCOPE.parse_optional("closedAt", Some("")).is_err());
    }
}
