//! Fractional-day clock used throughout the book.
//!
//! A [`Day`] is a fractional day offset from the fixed epoch anchor
//! 2000-01-01T00:00:00 UTC. The offset representation is what the
//! serialization boundary stores, so conversions here are millisecond-exact
//! round trips. Year fractions use a flat 365-day year.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Fractional day offset from the epoch anchor. NaN marks an unknown day.
pub type Day = f64;

/// Days per year used by every time-to-maturity conversion.
pub const DAYS_PER_YEAR: f64 = 365.0;

const MS_PER_DAY: f64 = 86_400_000.0;

fn anchor() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Converts a calendar datetime to its fractional day offset.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use ferrobook::core::time::day_from_datetime;
///
/// let noon = NaiveDate::from_ymd_opt(2000, 1, 2)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
/// assert_eq!(day_from_datetime(noon), 1.5);
/// ```
pub fn day_from_datetime(at: NaiveDateTime) -> Day {
    let ms = (at - anchor()).num_milliseconds();
    ms as f64 / MS_PER_DAY
}

/// Converts a fractional day offset back to a calendar datetime,
/// rounded to the nearest millisecond. Returns `None` for non-finite days.
pub fn day_to_datetime(day: Day) -> Option<NaiveDateTime> {
    if !day.is_finite() {
        return None;
    }
    let ms = (day * MS_PER_DAY).round() as i64;
    anchor().checked_add_signed(Duration::milliseconds(ms))
}

/// Days remaining from `day` to `mature`; NaN if either side is NaN.
pub fn days_to_maturity(day: Day, mature: Day) -> f64 {
    mature - day
}

/// Year fraction remaining from `day` to `mature` on a flat 365-day year.
pub fn years_to_maturity(day: Day, mature: Day) -> f64 {
    days_to_maturity(day, mature) / DAYS_PER_YEAR
}
