use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{DailyLogEntry, DailyLogRecord};
use crate::error::InvalidDateError;

#[derive(Debug, thiserror::Error)]
pub enum LogImportError {
    #[error("failed to read daily log export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid daily log CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {source}")]
    Date {
        row: usize,
        #[source]
        source: InvalidDateError,
    },
}

/// Loads daily logs from a CSV export with a `log_date,smoked` header.
///
/// Optional `cigarettes`, `craving_level`, `mood` and `notes` columns are carried over.
pub struct DailyLogImporter;

impl DailyLogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<DailyLogEntry>, LogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<DailyLogEntry>, LogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();

        for (index, row) in csv_reader.deserialize::<LogRow>().enumerate() {
            let row = row?;
            let record = DailyLogRecord {
                log_date: row.log_date,
                smoked: row.smoked,
                cigarettes: row.cigarettes,
                craving_level: row.craving_level,
                mood: row.mood,
                notes: row.notes,
            };
            let entry = DailyLogEntry::try_from(record).map_err(|source| LogImportError::Date {
                row: index + 1,
                source,
            })?;
            entries.push(entry);
        }

        tracing::info!(rows = entries.len(), "imported daily logs");
        Ok(entries)
    }
}

#[derive(Debug, Deserialize)]
struct LogRow {
    log_date: String,
    #[serde(deserialize_with = "flexible_bool")]
    smoked: bool,
    #[serde(default)]
    cigarettes: Option<u32>,
    #[serde(default)]
    craving_level: Option<u8>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    mood: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a yes/no value for smoked, found '{other}'"
        ))),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
