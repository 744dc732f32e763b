use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the bike-share table: a single calendar date.
#[derive(Debug, Clone)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub trips: u64,
    pub weather: String,
    pub weekday: String,
    pub casual: u64,
    pub registered: u64,
}

/// The full daily table, loaded once at startup and read-only afterwards.
///
/// Invariant: at least one row, dates strictly ascending.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<DailyRecord>,
    start: NaiveDate,
    end: NaiveDate,
}

impl Dataset {
    /// Wraps rows already validated to be strictly ascending by date.
    /// Returns `None` for an empty table, which has no span.
    pub fn new(records: Vec<DailyRecord>) -> Option<Self> {
        let start = records.first()?.date;
        let end = records.last()?.date;
        Some(Self {
            records,
            start,
            end,
        })
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First date in the table.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date in the table.
    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Slider selection as sent by the page: `start`/`end` are unix seconds.
#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub start: i64,
    pub end: i64,
}

/// One labeled tick under the slider track.
#[derive(Debug, Serialize, Deserialize)]
pub struct SliderMark {
    pub ts: i64,
    pub label: String,
}

/// Slider configuration derived from the dataset span.
#[derive(Debug, Serialize)]
pub struct RangeResponse {
    pub min_ts: i64,
    pub max_ts: i64,
    pub marks: Vec<SliderMark>,
}

#[derive(Debug, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub trips: u64,
}

#[derive(Debug, Serialize)]
pub struct WeatherTotal {
    pub weather: String,
    pub trips: u64,
}

#[derive(Debug, Serialize)]
pub struct WeekdayUsage {
    pub weekday: String,
    pub casual: u64,
    pub registered: u64,
}

/// Everything one slider interaction needs: the heading label plus the
/// three chart series.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub label: String,
    pub trend: Vec<TrendPoint>,
    pub weather: Vec<WeatherTotal>,
    pub weekday: Vec<WeekdayUsage>,
}
