//! Calendar Helpers
//!
//! Month arithmetic and display shaping for the class calendar. Months are
//! numbered 1..=12 and weeks start on Sunday.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// How many upcoming classes the calendar lists
pub const UPCOMING_LIMIT: usize = 10;

pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Short day names, Sunday first
pub const DAY_NAMES: [&str; 7] = ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"];

/// Day number, month name and weekday name of a date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayParts {
    pub day: u32,
    pub month: &'static str,
    pub weekday: &'static str,
}

/// Number of days in `month`, `None` for a month outside 1..=12
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = shift_month(year, month, 1);
    let next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Weekday of the first day of `month`
pub fn first_weekday(year: i32, month: u32) -> Option<Weekday> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| d.weekday())
}

/// Empty cells before day 1 in a Sunday-first month grid
pub fn leading_blank_days(year: i32, month: u32) -> Option<u32> {
    first_weekday(year, month).map(|w| w.num_days_from_sunday())
}

/// Move `delta` months forward or back, wrapping across years
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// `YYYY-MM-DD`, the key calendar events are stored under
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn display_parts(date: NaiveDate) -> DisplayParts {
    DisplayParts {
        day: date.day(),
        month: MONTH_NAMES[date.month0() as usize],
        weekday: DAY_NAMES[date.weekday().num_days_from_sunday() as usize],
    }
}

/// Dates on or after `today`, earliest first, at most `limit` of them
pub fn upcoming<I>(dates: I, today: NaiveDate, limit: usize) -> Vec<NaiveDate>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut dates: Vec<NaiveDate> = dates.into_iter().filter(|d| *d >= today).collect();
    dates.sort_unstable();
    dates.truncate(limit);
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2025, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2025, 4), Some(30));
        assert_eq!(days_in_month(2025, 12), Some(31));
        assert_eq!(days_in_month(2025, 13), None);
        assert_eq!(days_in_month(2025, 0), None);
    }

    #[test]
    fn test_first_weekday() {
        assert_eq!(first_weekday(2025, 6), Some(Weekday::Sun));
        assert_eq!(leading_blank_days(2025, 6), Some(0));
        assert_eq!(first_weekday(2025, 1), Some(Weekday::Wed));
        assert_eq!(leading_blank_days(2025, 1), Some(3));
        assert_eq!(leading_blank_days(2025, 2), Some(6));
    }

    #[test]
    fn test_shift_month_wraps_years() {
        assert_eq!(shift_month(2024, 12, 1), (2025, 1));
        assert_eq!(shift_month(2025, 1, -1), (2024, 12));
        assert_eq!(shift_month(2025, 6, 1), (2025, 7));
        assert_eq!(shift_month(2025, 6, -1), (2025, 5));
        assert_eq!(shift_month(2025, 3, -15), (2023, 12));
    }

    #[test]
    fn test_iso_format() {
        assert_eq!(format_iso(date(2025, 3, 7)), "2025-03-07");
        assert_eq!(parse_iso("2025-03-07"), Some(date(2025, 3, 7)));
        assert_eq!(parse_iso("07/03/2025"), None);
    }

    #[test]
    fn test_display_parts() {
        assert_eq!(
            display_parts(date(2025, 6, 1)),
            DisplayParts {
                day: 1,
                month: "Junio",
                weekday: "Dom"
            }
        );
        assert_eq!(display_parts(date(2025, 1, 1)).weekday, "Mié");
        assert_eq!(display_parts(date(2025, 12, 27)).month, "Diciembre");
    }

    #[test]
    fn test_upcoming_filters_sorts_and_caps() {
        let today = date(2025, 6, 10);
        let dates = vec![date(2025, 6, 20), date(2025, 6, 9), date(2025, 6, 10), date(2025, 6, 12)];
        assert_eq!(
            upcoming(dates, today, UPCOMING_LIMIT),
            vec![date(2025, 6, 10), date(2025, 6, 12), date(2025, 6, 20)]
        );

        let month: Vec<NaiveDate> = (1..=30).rev().map(|d| date(2025, 6, d)).collect();
        let next = upcoming(month, today, UPCOMING_LIMIT);
        assert_eq!(next.len(), 10);
        assert_eq!(next.first(), Some(&date(2025, 6, 10)));
        assert_eq!(next.last(), Some(&date(2025, 6, 19)));
    }
}
