use crate::Result;
use chrono::{DateTime, NaiveDate, Utc};
use ohno::bail;

/// Ages beyond which an open issue is flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// An open issue with no activity for more than this many days is stale.
    pub stale_after_days: u32,

    /// An open issue created more than this many days ago is old.
    pub old_after_days: u32,
}

impl Thresholds {
    pub const DEFAULT_STALE_AFTER_DAYS: u32 = 14;
    pub const DEFAULT_OLD_AFTER_DAYS: u32 = 120;
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            stale_after_days: Self::DEFAULT_STALE_AFTER_DAYS,
            old_after_days: Self::DEFAULT_OLD_AFTER_DAYS,
        }
    }
}

/// The reporting period and the reference time used for one report.
///
/// The period is half-open: `start` is inside it and `end` is not. Staleness and age are
/// always measured against `now`, independently of the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
    thresholds: Thresholds,
}

impl ReportWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            bail!("the reporting period must end after it starts (start {start}, end {end})");
        }

        Ok(Self {
            start,
            end,
            now,
            thresholds: Thresholds::default(),
        })
    }

    /// Build a window from calendar dates, each taken at midnight UTC.
    pub fn from_dates(start: NaiveDate, end: NaiveDate, now: DateTime<Utc>) -> Result<Self> {
        Self::new(start.and_time(chrono::NaiveTime::MIN).and_utc(), end.and_time(chrono::NaiveTime::MIN).and_utc(), now)
    }

    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    #[must_use]
    pub const fn now(&self) -> DateTime<Utc> {
        self.now
    }

    #[must_use]
    pub const fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Whether `timestamp` falls inside `[start, end)`.
    #[must_use]
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp < self.end
    }
}
