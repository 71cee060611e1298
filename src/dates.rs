//! Date Helpers
//!
//! Conversions between the three date shapes the server and the page use:
//! display `DD-MM-YYYY` (pantry), ISO `YYYY-MM-DD` (date inputs, `/get_week`)
//! and slot `dd.mm.yyyy` (week payload).

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

/// True when `s` is exactly `dd{sep}dd{sep}dddd` (ASCII digits).
fn has_shape(s: &str, sep: u8, widths: [usize; 3]) -> bool {
    let parts: Vec<&str> = s.split(sep as char).collect();
    parts.len() == 3
        && parts
            .iter()
            .zip(widths)
            .all(|(p, w)| p.len() == w && p.bytes().all(|b| b.is_ascii_digit()))
}

/// Parse a strict `DD-MM-YYYY` string into a calendar date.
pub fn parse_display_date(s: &str) -> Option<NaiveDate> {
    if !has_shape(s, b'-', [2, 2, 4]) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%d-%m-%Y").ok()
}

/// `DD-MM-YYYY` with a real day and month.
pub fn is_display_date(s: &str) -> bool {
    parse_display_date(s).is_some()
}

/// `DD-MM-YYYY` -> `YYYY-MM-DD` for a date input; anything else -> empty.
pub fn to_iso_date(display: &str) -> String {
    if !has_shape(display, b'-', [2, 2, 4]) {
        return String::new();
    }
    let mut parts = display.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(d), Some(m), Some(y)) => format!("{y}-{m}-{d}"),
        _ => String::new(),
    }
}

/// `YYYY-MM-DD` -> `DD-MM-YYYY`; other input is returned unchanged.
pub fn to_display_date(iso: &str) -> String {
    if !has_shape(iso, b'-', [4, 2, 2]) {
        return iso.to_string();
    }
    let mut parts = iso.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d)) => format!("{d}-{m}-{y}"),
        _ => iso.to_string(),
    }
}

/// Parse a slot date `dd.mm.yyyy` from the week payload.
pub fn parse_slot_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%d.%m.%Y").ok()
}

/// `YYYY-MM-DD`, the format `/get_week?start=` expects.
pub fn to_ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Locale-neutral label used in the week dropdown.
pub fn short_label(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Current local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Monday of the ISO week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// ISO (week, year) of `date`.
pub fn iso_week(date: NaiveDate) -> (u32, i32) {
    let w = date.iso_week();
    (w.week(), w.year())
}

/// Whole days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// One entry of the week dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekOption {
    pub monday: NaiveDate,
    pub sunday: NaiveDate,
    pub is_current: bool,
}

impl WeekOption {
    pub fn label(&self) -> String {
        let mut label = format!("{} - {}", short_label(self.monday), short_label(self.sunday));
        if self.is_current {
            label.push_str(" — this week");
        }
        label
    }
}

/// Every Monday-Sunday week starting on the first Monday >= `start` while the
/// Monday is <= `end`. The week holding `today` is flagged current.
pub fn week_options(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Vec<WeekOption> {
    let mut monday = start;
    while monday.weekday() != Weekday::Mon {
        monday += Duration::days(1);
    }
    let mut weeks = Vec::new();
    while monday <= end {
        let sunday = monday + Duration::days(6);
        weeks.push(WeekOption {
            monday,
            sunday,
            is_current: monday <= today && today <= sunday,
        });
        monday += Duration::days(7);
    }
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn display_date_requires_padded_real_date() {
        assert!(is_display_date("05-03-2025"));
        assert!(!is_display_date("01-13-2025"));
        assert!(!is_display_date("1-1-2025"));
        assert!(!is_display_date("31-02-2025"));
        assert!(!is_display_date("2025-03-05"));
        assert!(!is_display_date(""));
    }

    #[test]
    fn iso_and_display_conversions() {
        assert_eq!(to_iso_date("05-03-2025"), "2025-03-05");
        assert_eq!(to_iso_date("5-3-2025"), "");
        assert_eq!(to_display_date("2025-03-05"), "05-03-2025");
        assert_eq!(to_display_date(""), "");
        assert_eq!(to_display_date("garbage"), "garbage");
    }

    #[test]
    fn slot_dates_use_dots() {
        assert_eq!(parse_slot_date("16.10.2026"), Some(ymd(2026, 10, 16)));
        assert_eq!(parse_slot_date("16-10-2026"), None);
    }

    #[test]
    fn monday_and_iso_week() {
        // 2026-10-16 is a Friday
        assert_eq!(monday_of(ymd(2026, 10, 16)), ymd(2026, 10, 12));
        assert_eq!(monday_of(ymd(2026, 10, 12)), ymd(2026, 10, 12));
        assert_eq!(iso_week(ymd(2026, 10, 16)), (42, 2026));
        // 2027-01-01 belongs to ISO week 53 of 2026
        assert_eq!(iso_week(ymd(2027, 1, 1)), (53, 2026));
    }

    #[test]
    fn week_options_start_on_first_monday_and_flag_current() {
        let weeks = week_options(ymd(2025, 9, 1), ymd(2025, 9, 30), ymd(2025, 9, 10));
        assert_eq!(weeks.first().map(|w| w.monday), Some(ymd(2025, 9, 1)));
        assert_eq!(weeks.len(), 5);
        let current: Vec<_> = weeks.iter().filter(|w| w.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].monday, ymd(2025, 9, 8));
        assert!(current[0].label().ends_with("— this week"));
    }

    #[test]
    fn week_options_skip_to_monday() {
        // 2025-09-03 is a Wednesday
        let weeks = week_options(ymd(2025, 9, 3), ymd(2025, 9, 20), ymd(2024, 1, 1));
        assert_eq!(weeks[0].monday, ymd(2025, 9, 8));
        assert!(weeks.iter().all(|w| !w.is_current));
    }
}
