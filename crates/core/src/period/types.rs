//! Reporting period and time window types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// Exclusive end.
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a window. `end` must not precede `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Returns true if the timestamp falls within this window.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }

    /// Returns true if `[from, until)` intersects this window.
    ///
    /// An open `until` extends to the end of time.
    #[must_use]
    pub fn overlaps(&self, from: DateTime<Utc>, until: Option<DateTime<Utc>>) -> bool {
        from < self.end && until.is_none_or(|u| u > self.start)
    }
}

/// Reporting period selected on the dashboard.
///
/// Selects the aggregation window for the headline statistics and the bucket
/// granularity of the chart series.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportingPeriod {
    /// Calendar day.
    Daily,
    /// ISO week starting on Monday.
    Weekly,
    /// Calendar month.
    #[default]
    Monthly,
}

impl ReportingPeriod {
    /// All periods, shortest first.
    pub const ALL: [Self; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    /// Returns the string representation of the period.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Parses a period from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    /// Number of chart buckets shown for this period.
    #[must_use]
    pub const fn bucket_count(&self) -> usize {
        match self {
            Self::Daily => 30,
            Self::Weekly | Self::Monthly => 12,
        }
    }

    /// First day of the calendar unit containing `date`.
    #[must_use]
    pub fn unit_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => date,
            Self::Weekly => date
                .checked_sub_days(Days::new(u64::from(
                    date.weekday().num_days_from_monday(),
                )))
                .unwrap_or(date),
            Self::Monthly => date.with_day(1).unwrap_or(date),
        }
    }

    /// First day of the unit following the one starting at `unit_start`.
    #[must_use]
    pub fn next_unit(&self, unit_start: NaiveDate) -> NaiveDate {
        let next = match self {
            Self::Daily => unit_start.checked_add_days(Days::new(1)),
            Self::Weekly => unit_start.checked_add_days(Days::new(7)),
            Self::Monthly => unit_start.checked_add_months(Months::new(1)),
        };
        next.unwrap_or(NaiveDate::MAX)
    }

    /// First day of the unit `count` units before the one starting at `unit_start`.
    #[must_use]
    pub fn units_back(&self, unit_start: NaiveDate, count: u32) -> NaiveDate {
        let back = match self {
            Self::Daily => unit_start.checked_sub_days(Days::new(u64::from(count))),
            Self::Weekly => unit_start.checked_sub_days(Days::new(7 * u64::from(count))),
            Self::Monthly => unit_start.checked_sub_months(Months::new(count)),
        };
        back.unwrap_or(NaiveDate::MIN)
    }

    /// Display label of the unit starting at `unit_start`.
    #[must_use]
    pub fn label(&self, unit_start: NaiveDate) -> String {
        match self {
            Self::Daily => unit_start.format("%Y-%m-%d").to_string(),
            Self::Weekly => unit_start.format("%G-W%V").to_string(),
            Self::Monthly => unit_start.format("%b %Y").to_string(),
        }
    }

    /// Aggregation window of this period containing `reference`.
    #[must_use]
    pub fn window(&self, reference: DateTime<Utc>) -> TimeWindow {
        let start = self.unit_start(reference.date_naive());
        TimeWindow::new(start_of(start), start_of(self.next_unit(start)))
    }

    /// Chart buckets for this period ending with the unit containing `reference`.
    #[must_use]
    pub fn buckets(&self, reference: DateTime<Utc>) -> super::Buckets {
        super::Buckets::new(*self, reference)
    }

    /// Window spanning every chart bucket for `reference`.
    #[must_use]
    pub fn series_window(&self, reference: DateTime<Utc>) -> TimeWindow {
        let last = self.unit_start(reference.date_naive());
        let span = u32::try_from(self.bucket_count() - 1).unwrap_or(0);
        let first = self.units_back(last, span);
        TimeWindow::new(start_of(first), start_of(self.next_unit(last)))
    }
}

/// Midnight UTC at the start of `date`.
pub(crate) fn start_of(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportingPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown reporting period: {s}"))
    }
}
