use crate::models::{DailyRecord, Dataset};
use chrono::NaiveDate;
use serde::Deserialize;
use std::{
    env, fmt,
    path::{Path, PathBuf},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One CSV row before the date column is parsed.
#[derive(Debug, Deserialize)]
struct RawRecord {
    date: String,
    trips: u64,
    weather: String,
    weekday: String,
    casual: u64,
    registered: u64,
}

#[derive(Debug)]
pub enum DatasetError {
    Read { path: PathBuf, source: csv::Error },
    Row { path: PathBuf, line: u64, message: String },
    Empty { path: PathBuf },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Read { path, source } => {
                write!(f, "failed to read dataset {}: {source}", path.display())
            }
            DatasetError::Row {
                path,
                line,
                message,
            } => {
                write!(f, "bad dataset row at {}:{line}: {message}", path.display())
            }
            DatasetError::Empty { path } => {
                write!(f, "dataset {} contains no rows", path.display())
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub fn resolve_dataset_path() -> PathBuf {
    env::var("BIKESHARE_DATA_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/bike_sharing_daily.csv"))
}

/// Loads and validates the daily table.
///
/// The table is trusted for the whole process lifetime, so startup is the
/// only chance to notice a broken file: any malformed row, unparseable
/// date, or duplicate/out-of-order date fails the load with the offending
/// line rather than dropping data silently.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let row_error = |line: u64, message: String| DatasetError::Row {
        path: path.to_path_buf(),
        line,
        message,
    };

    let mut records: Vec<DailyRecord> = Vec::new();
    for (index, row) in reader.deserialize::<RawRecord>().enumerate() {
        // Line 1 is the header.
        let line = index as u64 + 2;
        let raw = row.map_err(|err| row_error(line, err.to_string()))?;
        let date = NaiveDate::parse_from_str(&raw.date, DATE_FORMAT)
            .map_err(|err| row_error(line, format!("unparseable date {:?}: {err}", raw.date)))?;
        if let Some(last) = records.last() {
            if date <= last.date {
                return Err(row_error(
                    line,
                    format!("date {date} does not come after {}", last.date),
                ));
            }
        }
        records.push(DailyRecord {
            date,
            trips: raw.trips,
            weather: raw.weather,
            weekday: raw.weekday,
            casual: raw.casual,
            registered: raw.registered,
        });
    }

    Dataset::new(records).ok_or_else(|| DatasetError::Empty {
        path: path.to_path_buf(),
    })
}
