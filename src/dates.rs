//! Meeting dates: parsing `M/D/YYYY`, display formatting and the distinct date index

use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::records::RecordSet;

/// A calendar date a meeting took place on.
///
/// Two source spellings of the same day (`09/26/2020`, `9/26/2020`) compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeetingDate(NaiveDate);

impl MeetingDate {
    /// Parse the date portion of a `Date` cell (`M/D/YYYY`).
    ///
    /// Returns a human-readable reason on failure so callers can attach file/row context.
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        let s = s.trim();
        let mut parts = s.split('/');
        let (m, d, y) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(m), Some(d), Some(y), None) => (m, d, y),
            _ => return Err(format!("date `{s}` is not in M/D/YYYY form")),
        };
        let month: u32 = m.trim().parse().map_err(|_| format!("invalid month in `{s}`"))?;
        let day: u32 = d.trim().parse().map_err(|_| format!("invalid day in `{s}`"))?;
        let year: i32 = y.trim().parse().map_err(|_| format!("invalid year in `{s}`"))?;
        NaiveDate::from_ymd_opt(year, month, day)
            .map(MeetingDate)
            .ok_or_else(|| format!("date `{s}` does not exist"))
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(MeetingDate)
    }

    /// Long form used in page headers, e.g. `December 7, 2020`
    pub fn display_long(&self) -> String {
        self.0.format("%B %-d, %Y").to_string()
    }

    /// Unpadded `M_D_YYYY` stem used for output file names
    pub fn file_stem(&self) -> String {
        format!("{}_{}_{}", self.0.month(), self.0.day(), self.0.year())
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for MeetingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.0.month(), self.0.day(), self.0.year())
    }
}

/// Every distinct meeting date across all categories, oldest first.
pub fn distinct_dates(records: &RecordSet) -> Vec<MeetingDate> {
    let mut dates: Vec<MeetingDate> = records
        .iter()
        .flat_map(|(_, rs)| rs.iter().map(|r| r.date))
        .collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}
