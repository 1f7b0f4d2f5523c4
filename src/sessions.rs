//! Entry resolution: which records belong to a date, and which session each one was

use std::fmt;

use crate::dates::MeetingDate;
use crate::records::Record;

/// Half of the day a meeting was held in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
}

/// Outcome of classifying a raw time token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeToken {
    /// No token present
    Absent,
    /// A token the parser recognizes
    Known(TimeOfDay),
    /// Unrecognized token, classified by its second character
    Guessed(TimeOfDay),
    /// Empty or single-character token
    Malformed,
}

impl TimeToken {
    pub fn classify(token: Option<&str>) -> Self {
        let Some(raw) = token else {
            return TimeToken::Absent;
        };
        if raw.chars().count() < 2 {
            return TimeToken::Malformed;
        }

        let word = raw
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .trim()
            .to_ascii_lowercase();
        match word.as_str() {
            "morning" | "am" | "a.m." => return TimeToken::Known(TimeOfDay::Morning),
            "afternoon" | "evening" | "pm" | "p.m." => {
                return TimeToken::Known(TimeOfDay::Afternoon)
            }
            _ => {}
        }

        if raw.chars().nth(1) == Some('m') {
            TimeToken::Guessed(TimeOfDay::Morning)
        } else {
            TimeToken::Guessed(TimeOfDay::Afternoon)
        }
    }

    pub fn time_of_day(self) -> TimeOfDay {
        match self {
            TimeToken::Known(t) | TimeToken::Guessed(t) => t,
            TimeToken::Absent | TimeToken::Malformed => TimeOfDay::Morning,
        }
    }
}

/// `Morning Group N` / `Afternoon Group N`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionLabel {
    pub time: TimeOfDay,
    /// 1-based, counted separately per time of day
    pub ordinal: u32,
}

impl fmt::Display for SessionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let half = match self.time {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
        };
        write!(f, "{} Group {}", half, self.ordinal)
    }
}

/// Indices of every record held on `date`, in source order.
pub fn resolve(records: &[Record], date: &MeetingDate) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.date == *date)
        .map(|(i, _)| i)
        .collect()
}

/// Label each indexed record with its session, walking `indices` in order.
///
/// Morning and afternoon counters are independent and start at 1 on every call.
pub fn label_sessions(records: &[Record], indices: &[usize]) -> Vec<SessionLabel> {
    let mut morning = 0u32;
    let mut afternoon = 0u32;
    indices
        .iter()
        .map(|&i| {
            let record = &records[i];
            let token = TimeToken::classify(record.time.as_deref());
            match token {
                TimeToken::Guessed(t) => log::warn!(
                    "unrecognized time token {:?} on {}; treating as {:?}",
                    record.time.as_deref().unwrap_or_default(),
                    record.date,
                    t
                ),
                TimeToken::Malformed => log::warn!(
                    "malformed time token {:?} on {}; defaulting to morning",
                    record.time.as_deref().unwrap_or_default(),
                    record.date
                ),
                TimeToken::Absent | TimeToken::Known(_) => {}
            }
            let time = token.time_of_day();
            let counter = match time {
                TimeOfDay::Morning => &mut morning,
                TimeOfDay::Afternoon => &mut afternoon,
            };
            *counter += 1;
            SessionLabel {
                time,
                ordinal: *counter,
            }
        })
        .collect()
}
