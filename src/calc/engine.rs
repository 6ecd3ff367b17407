use std::fmt::Debug;

/// Date arithmetic, comparison and formatting over an opaque date type.
///
/// The picker never looks inside a date; everything it needs goes through
/// this trait. Months and days are 1-based, weekdays count from Sunday = 0.
pub trait DateEngine {
    type Date: Clone + Debug;

    fn now(&self) -> Self::Date;

    fn year(&self, date: &Self::Date) -> i32;
    fn month(&self, date: &Self::Date) -> u32;
    fn day(&self, date: &Self::Date) -> u32;
    fn hour(&self, date: &Self::Date) -> u32;
    fn minute(&self, date: &Self::Date) -> u32;
    fn second(&self, date: &Self::Date) -> u32;
    fn weekday(&self, date: &Self::Date) -> u32;
    /// ISO week-numbering year and week.
    fn iso_week(&self, date: &Self::Date) -> (i32, u32);

    fn add_years(&self, date: &Self::Date, years: i32) -> Self::Date;
    fn add_months(&self, date: &Self::Date, months: i32) -> Self::Date;
    fn add_days(&self, date: &Self::Date, days: i64) -> Self::Date;

    /// Setters clamp the day of month when the target month is shorter.
    fn with_year(&self, date: &Self::Date, year: i32) -> Self::Date;
    fn with_month(&self, date: &Self::Date, month: u32) -> Self::Date;
    fn with_day(&self, date: &Self::Date, day: u32) -> Self::Date;
    fn with_time(&self, date: &Self::Date, hour: u32, minute: u32, second: u32) -> Self::Date;

    /// Milliseconds since the Unix epoch.
    fn timestamp(&self, date: &Self::Date) -> i64;

    fn is_after(&self, a: &Self::Date, b: &Self::Date) -> bool {
        self.timestamp(a) > self.timestamp(b)
    }

    fn format(&self, locale: &str, date: &Self::Date, pattern: &str) -> String;

    /// Tries each pattern in order and returns the first successful parse.
    fn parse(&self, locale: &str, text: &str, patterns: &[String]) -> Option<Self::Date>;

    /// First day of the week for `locale`, Sunday = 0.
    fn week_first_day(&self, locale: &str) -> u32;
}
