use crate::calc::compare::days_in_month;
use crate::calc::engine::DateEngine;
use chrono::{
    Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike,
};
use std::fmt::Write;

/// `DateEngine` over `chrono::NaiveDateTime`.
///
/// `fixed_now` pins the clock, which keeps "today" markers and the
/// fallback panel anchor deterministic in tests.
#[derive(Clone, Debug, Default)]
pub struct ChronoEngine {
    fixed_now: Option<NaiveDateTime>,
}

impl ChronoEngine {
    pub fn new() -> Self {
        ChronoEngine { fixed_now: None }
    }

    pub fn fixed(now: NaiveDateTime) -> Self {
        ChronoEngine {
            fixed_now: Some(now),
        }
    }
}

impl DateEngine for ChronoEngine {
    type Date = NaiveDateTime;

    fn now(&self) -> NaiveDateTime {
        self.fixed_now
            .unwrap_or_else(|| Local::now().naive_local())
    }

    fn year(&self, date: &NaiveDateTime) -> i32 {
        date.year()
    }

    fn month(&self, date: &NaiveDateTime) -> u32 {
        date.month()
    }

    fn day(&self, date: &NaiveDateTime) -> u32 {
        date.day()
    }

    fn hour(&self, date: &NaiveDateTime) -> u32 {
        date.hour()
    }

    fn minute(&self, date: &NaiveDateTime) -> u32 {
        date.minute()
    }

    fn second(&self, date: &NaiveDateTime) -> u32 {
        date.second()
    }

    fn weekday(&self, date: &NaiveDateTime) -> u32 {
        date.weekday().num_days_from_sunday()
    }

    fn iso_week(&self, date: &NaiveDateTime) -> (i32, u32) {
        let week = date.iso_week();
        (week.year(), week.week())
    }

    fn add_years(&self, date: &NaiveDateTime, years: i32) -> NaiveDateTime {
        self.add_months(date, years.saturating_mul(12))
    }

    fn add_months(&self, date: &NaiveDateTime, months: i32) -> NaiveDateTime {
        let shifted = if months >= 0 {
            date.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            date.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted.unwrap_or(*date)
    }

    fn add_days(&self, date: &NaiveDateTime, days: i64) -> NaiveDateTime {
        date.checked_add_signed(Duration::days(days))
            .unwrap_or(*date)
    }

    fn with_year(&self, date: &NaiveDateTime, year: i32) -> NaiveDateTime {
        rebuild(date, year, date.month(), date.day())
    }

    fn with_month(&self, date: &NaiveDateTime, month: u32) -> NaiveDateTime {
        rebuild(date, date.year(), month, date.day())
    }

    fn with_day(&self, date: &NaiveDateTime, day: u32) -> NaiveDateTime {
        rebuild(date, date.year(), date.month(), day)
    }

    fn with_time(&self, date: &NaiveDateTime, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveTime::from_hms_opt(hour, minute, second)
            .map(|t| date.date().and_time(t))
            .unwrap_or(*date)
    }

    fn timestamp(&self, date: &NaiveDateTime) -> i64 {
        date.and_utc().timestamp_millis()
    }

    fn format(&self, _locale: &str, date: &NaiveDateTime, pattern: &str) -> String {
        // An unknown specifier makes Display fail; render nothing instead of panicking.
        let mut out = String::new();
        match write!(out, "{}", date.format(pattern)) {
            Ok(()) => out,
            Err(_) => String::new(),
        }
    }

    fn parse(&self, _locale: &str, text: &str, patterns: &[String]) -> Option<NaiveDateTime> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let today = self.now().date();
        patterns.iter().find_map(|p| parse_with(text, p, today))
    }

    fn week_first_day(&self, locale: &str) -> u32 {
        if locale.starts_with("en_US") || locale.starts_with("en-US") {
            0
        } else {
            1
        }
    }
}

fn rebuild(date: &NaiveDateTime, year: i32, month: u32, day: u32) -> NaiveDateTime {
    let month = month.clamp(1, 12);
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|d| d.and_time(date.time()))
        .unwrap_or(*date)
}

/// Parses `text` with a strftime `pattern` that may cover only part of a
/// date. Missing fields default to the first day/month/weekday; a time-only
/// pattern lands on `today`.
fn parse_with(text: &str, pattern: &str, today: NaiveDate) -> Option<NaiveDateTime> {
    let has = |specs: &[&str]| specs.iter().any(|s| pattern.contains(s));
    let has_time = has(&["%H", "%I", "%M", "%S", "%T", "%R"]);
    let has_date = has(&["%Y", "%G", "%y", "%F", "%D"]);
    let has_day = has(&["%d", "%e", "%-d", "%F", "%D", "%j"]);
    let has_week = has(&["%V", "%W", "%U"]);
    let has_month = has(&["%m", "%-m", "%b", "%B", "%h"]);

    if has_time && !has_date {
        return NaiveTime::parse_from_str(text, pattern)
            .ok()
            .map(|t| today.and_time(t));
    }
    if has_time {
        return NaiveDateTime::parse_from_str(text, pattern).ok();
    }
    let date = if has_day {
        NaiveDate::parse_from_str(text, pattern).ok()
    } else if has_week {
        NaiveDate::parse_from_str(&format!("{text} 1"), &format!("{pattern} %u")).ok()
    } else if has_month {
        NaiveDate::parse_from_str(&format!("{text} 1"), &format!("{pattern} %d")).ok()
    } else {
        NaiveDate::parse_from_str(&format!("{text} 1 1"), &format!("{pattern} %m %d")).ok()
    };
    date.and_then(|d| d.and_hms_opt(0, 0, 0))
}
