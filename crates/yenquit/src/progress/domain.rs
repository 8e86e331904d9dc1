use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::InvalidDateError;

/// Daily log as the backend API hands it over, with the date still a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLogRecord {
    pub log_date: String,
    pub smoked: bool,
    #[serde(default)]
    pub cigarettes: Option<u32>,
    #[serde(default)]
    pub craving_level: Option<u8>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A daily log resolved to its calendar day.
///
/// Only `log_date` and `smoked` take part in streak and calendar computations;
/// the remaining fields travel with the entry for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLogEntry {
    pub log_date: NaiveDate,
    pub smoked: bool,
    pub cigarettes: Option<u32>,
    pub craving_level: Option<u8>,
    pub mood: Option<String>,
    pub notes: Option<String>,
}

impl DailyLogEntry {
    pub fn new(log_date: NaiveDate, smoked: bool) -> Self {
        Self {
            log_date,
            smoked,
            cigarettes: None,
            craving_level: None,
            mood: None,
            notes: None,
        }
    }

    pub fn smoke_free(log_date: NaiveDate) -> Self {
        Self::new(log_date, false)
    }

    pub fn smoked(log_date: NaiveDate) -> Self {
        Self::new(log_date, true)
    }
}

impl TryFrom<DailyLogRecord> for DailyLogEntry {
    type Error = InvalidDateError;

    fn try_from(record: DailyLogRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            log_date: parse_log_date(&record.log_date)?,
            smoked: record.smoked,
            cigarettes: record.cigarettes,
            craving_level: record.craving_level,
            mood: record.mood,
            notes: record.notes,
        })
    }
}

/// Resolves every record, failing on the first date that cannot be parsed.
pub fn entries_from_records(
    records: Vec<DailyLogRecord>,
) -> Result<Vec<DailyLogEntry>, InvalidDateError> {
    records.into_iter().map(DailyLogEntry::try_from).collect()
}

/// Reduces a date or timestamp string to the calendar day it was written for.
///
/// Timestamps keep the date as written; no timezone conversion is applied, so
/// `2025-03-01T23:30:00-05:00` stays on March 1st.
pub fn parse_log_date(raw: &str) -> Result<NaiveDate, InvalidDateError> {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt.date());
        }
    }

    Err(InvalidDateError {
        value: raw.to_string(),
    })
}
