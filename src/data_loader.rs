use std::io;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// How a penalty attempt ended. The log knows exactly these three values;
/// anything else in the source data is a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Goal,
    Saved,
    Out,
}

impl Outcome {
    /// Canonical iteration order for dense grids and distribution rows.
    pub const ALL: [Outcome; 3] = [Outcome::Goal, Outcome::Saved, Outcome::Out];

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Goal => "goal",
            Outcome::Saved => "saved",
            Outcome::Out => "out",
        }
    }
}

/// One row of the event log. Loaded once per run and never mutated; all
/// attempts sharing a date form one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    #[serde(rename = "Date", with = "mdy_date")]
    pub date: NaiveDate,
    #[serde(rename = "Shooter Name")]
    pub shooter: String,
    #[serde(rename = "Keeper Name")]
    pub keeper: String,
    #[serde(rename = "Status")]
    pub outcome: Outcome,
    /// Where the shot was aimed. Carried through for the shot map, unused by
    /// the analytics.
    #[serde(rename = "Shoot Position", default)]
    pub position: Option<String>,
}

// Dates in the sheet export are US-style month/day/year.
mod mdy_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%m/%d/%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read attempt log: {0}")]
    Csv(#[from] csv::Error),
    #[error("attempt log {0} contains no rows")]
    Empty(String),
}

/// Parses attempt rows from any CSV source carrying the canonical header
/// row. No sortedness by date is assumed here or anywhere downstream.
pub fn read_attempts<R: io::Read>(reader: R) -> Result<Vec<Attempt>, csv::Error> {
    csv::Reader::from_reader(reader).deserialize().collect()
}

/// Loads one CSV file and insists it holds at least one attempt.
pub fn load_file(path: &Path) -> Result<Vec<Attempt>, LoadError> {
    let attempts: Vec<Attempt> = csv::Reader::from_path(path)?
        .deserialize()
        .collect::<Result<_, csv::Error>>()?;

    if attempts.is_empty() {
        return Err(LoadError::Empty(path.display().to_string()));
    }
    Ok(attempts)
}

/// Loads the primary source and falls back to the secondary on any failure,
/// including a primary that parses but is empty. The analytics downstream
/// never learn which source won.
pub fn load_data(primary: &Path, fallback: &Path) -> Result<Vec<Attempt>, LoadError> {
    match load_file(primary) {
        Ok(attempts) => Ok(attempts),
        Err(err) => {
            warn!(
                "primary source {} unavailable ({err}), loading {}",
                primary.display(),
                fallback.display()
            );
            load_file(fallback)
        }
    }
}
