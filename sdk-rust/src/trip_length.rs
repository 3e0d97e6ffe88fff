use chrono::{DateTime, NaiveDate, TimeZone};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Inclusive number of calendar days from `start` to `end`.
/// `2024-01-01..=2024-01-03` is 3 days.
#[must_use]
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Inclusive number of days between two instants. The difference is rounded
/// to the nearest whole day before adding one, so a span that crosses a
/// daylight saving change (23 or 25 hours per day) still counts correctly.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn inclusive_day_count_between<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> i64 {
    let millis = end.timestamp_millis() - start.timestamp_millis();
    (millis as f64 / MILLIS_PER_DAY).round() as i64 + 1
}
