use crate::models::{
    DailyRecord, DashboardResponse, Dataset, TrendPoint, WeatherTotal, WeekdayUsage,
};
use crate::window::DateWindow;
use std::collections::BTreeMap;

/// Records whose date falls inside the inclusive window, in the table's
/// ascending order. An empty result is a valid answer, not an error.
pub fn filter_by_window<'a>(records: &'a [DailyRecord], window: DateWindow) -> Vec<&'a DailyRecord> {
    records
        .iter()
        .filter(|record| window.contains(record.date))
        .collect()
}

/// Trip totals grouped by weather label. Keys are exactly the labels
/// present in `records`, in sorted order.
pub fn weather_totals(records: &[&DailyRecord]) -> Vec<WeatherTotal> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        let total = totals.entry(record.weather.as_str()).or_default();
        *total = total.saturating_add(record.trips);
    }
    totals
        .into_iter()
        .map(|(weather, trips)| WeatherTotal {
            weather: weather.to_owned(),
            trips,
        })
        .collect()
}

/// Casual and registered totals grouped by weekday label, each series
/// summed independently, in sorted key order.
pub fn weekday_usage(records: &[&DailyRecord]) -> Vec<WeekdayUsage> {
    let mut totals: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for record in records {
        let (casual, registered) = totals.entry(record.weekday.as_str()).or_default();
        *casual = casual.saturating_add(record.casual);
        *registered = registered.saturating_add(record.registered);
    }
    totals
        .into_iter()
        .map(|(weekday, (casual, registered))| WeekdayUsage {
            weekday: weekday.to_owned(),
            casual,
            registered,
        })
        .collect()
}

/// One slider interaction: filter once, then derive the heading label and
/// the three chart series from the same filtered set.
pub fn build_dashboard(dataset: &Dataset, window: DateWindow) -> DashboardResponse {
    let filtered = filter_by_window(dataset.records(), window);
    DashboardResponse {
        label: window.label(),
        trend: filtered
            .iter()
            .map(|record| TrendPoint {
                date: record.date.to_string(),
                trips: record.trips,
            })
            .collect(),
        weather: weather_totals(&filtered),
        weekday: weekday_usage(&filtered),
    }
}
