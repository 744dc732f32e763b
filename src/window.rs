use crate::models::{Dataset, RangeResponse, SliderMark};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use std::fmt;

/// Slider step and mark spacing both work in whole days.
pub const SECS_PER_DAY: i64 = 86_400;

/// Label every Nth date of the span on the slider track.
pub const MARK_EVERY: usize = 40;

/// The inclusive [start, end] date range currently selected by the user.
///
/// Rebuilt from the slider's timestamp pair on every request; the
/// constructor is the only place the start/end ordering is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, PartialEq, Eq)]
pub enum WindowError {
    Inverted { start: NaiveDate, end: NaiveDate },
    BadTimestamp(i64),
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::Inverted { start, end } => {
                write!(f, "window start {start} is after end {end}")
            }
            WindowError::BadTimestamp(ts) => {
                write!(f, "timestamp {ts} is outside the representable date range")
            }
        }
    }
}

impl std::error::Error for WindowError {}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds a window from the slider's unix-second pair, truncating each
    /// timestamp to its UTC calendar date.
    pub fn from_unix(start_ts: i64, end_ts: i64) -> Result<Self, WindowError> {
        Self::new(date_from_unix(start_ts)?, date_from_unix(end_ts)?)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The heading shown above the charts.
    pub fn label(&self) -> String {
        format!("Bikeshare between {} and {}", self.start, self.end)
    }
}

/// Midnight UTC of `date` as unix seconds. The canonical direction for
/// everything the page receives.
pub fn unix_from_date(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// UTC calendar date containing the unix second `ts`.
pub fn date_from_unix(ts: i64) -> Result<NaiveDate, WindowError> {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|instant| instant.date_naive())
        .ok_or(WindowError::BadTimestamp(ts))
}

/// Slider bounds and tick labels for the dataset span. Ticks fall on every
/// `MARK_EVERY`th date starting at the span's first day.
pub fn slider_config(dataset: &Dataset) -> RangeResponse {
    RangeResponse {
        min_ts: unix_from_date(dataset.start()),
        max_ts: unix_from_date(dataset.end()),
        marks: slider_marks(dataset.start(), dataset.end()),
    }
}

fn slider_marks(start: NaiveDate, end: NaiveDate) -> Vec<SliderMark> {
    let mut marks = Vec::new();
    let mut date = start;
    let mut index = 0usize;
    while date <= end {
        if index % MARK_EVERY == 0 {
            marks.push(SliderMark {
                ts: unix_from_date(date),
                label: date.to_string(),
            });
        }
        date += Duration::days(1);
        index += 1;
    }
    marks
}
