use crate::calc::engine::DateEngine;
use crate::state::mode::PanelMode;
use chrono::NaiveDate;

/// Number of days in `month` of `year`; 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    match (
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
        NaiveDate::from_ymd_opt(year, month, 1),
    ) {
        (Some(next), Some(first)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

/// Two optional dates are the same when both are absent or both carry the
/// same timestamp.
pub fn is_same_timestamp<E: DateEngine>(
    engine: &E,
    a: Option<&E::Date>,
    b: Option<&E::Date>,
) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => engine.timestamp(a) == engine.timestamp(b),
        _ => false,
    }
}

/// Equality at the granularity of `mode`: two dates in the same month are
/// "the same" for a month panel even when their days differ.
pub fn is_same<E: DateEngine>(engine: &E, a: &E::Date, b: &E::Date, mode: PanelMode) -> bool {
    let same_year = engine.year(a) == engine.year(b);
    let same_month = same_year && engine.month(a) == engine.month(b);
    let same_day = same_month && engine.day(a) == engine.day(b);
    let same_time = engine.hour(a) == engine.hour(b)
        && engine.minute(a) == engine.minute(b)
        && engine.second(a) == engine.second(b);
    match mode {
        PanelMode::Decade => engine.year(a).div_euclid(10) == engine.year(b).div_euclid(10),
        PanelMode::Year => same_year,
        PanelMode::Month => same_month,
        PanelMode::Week => engine.iso_week(a) == engine.iso_week(b),
        PanelMode::Date => same_day,
        PanelMode::Time => same_time,
        PanelMode::DateTime => same_day && same_time,
    }
}

/// `a` is strictly before `b` once both are reduced to `mode` granularity.
pub fn is_before_at<E: DateEngine>(engine: &E, a: &E::Date, b: &E::Date, mode: PanelMode) -> bool {
    engine.is_after(b, a) && !is_same(engine, a, b, mode)
}

/// First day of the week containing `date`, honoring the locale's week start.
pub fn week_start<E: DateEngine>(engine: &E, locale: &str, date: &E::Date) -> E::Date {
    let first = engine.week_first_day(locale);
    let offset = (engine.weekday(date) + 7 - first) % 7;
    engine.add_days(date, -(offset as i64))
}

/// `date` lies strictly between `start` and `end` at `mode` granularity.
pub fn is_in_range<E: DateEngine>(
    engine: &E,
    date: &E::Date,
    start: &E::Date,
    end: &E::Date,
    mode: PanelMode,
) -> bool {
    is_before_at(engine, start, date, mode) && is_before_at(engine, date, end, mode)
}
