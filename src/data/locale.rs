use crate::state::mode::PanelMode;
use serde::{Deserialize, Serialize};

/// Locale table consumed by the picker: strftime patterns and the few
/// labels the panels need. Week days start on Sunday.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Locale {
    pub locale: String,

    pub field_date_format: String,
    pub field_datetime_format: String,
    pub field_time_format: String,
    pub field_week_format: String,
    pub field_month_format: String,
    pub field_year_format: String,

    /// Header of the date and week panels.
    pub month_header_format: String,
    /// Header of the month panel.
    pub year_header_format: String,
    pub day_format: String,

    pub short_week_days: Vec<String>,
    pub short_months: Vec<String>,

    pub today: String,
    pub now: String,
    pub ok: String,
    pub clear: String,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::en_us()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Locale {
    pub fn en_us() -> Self {
        Locale {
            locale: "en_US".to_string(),
            field_date_format: "%Y-%m-%d".to_string(),
            field_datetime_format: "%Y-%m-%d %H:%M:%S".to_string(),
            field_time_format: "%H:%M:%S".to_string(),
            field_week_format: "%G-W%V".to_string(),
            field_month_format: "%Y-%m".to_string(),
            field_year_format: "%Y".to_string(),
            month_header_format: "%Y-%m".to_string(),
            year_header_format: "%Y".to_string(),
            day_format: "%-d".to_string(),
            short_week_days: strings(&["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]),
            short_months: strings(&[
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            today: "Today".to_string(),
            now: "Now".to_string(),
            ok: "OK".to_string(),
            clear: "Clear".to_string(),
        }
    }

    pub fn zh_cn() -> Self {
        Locale {
            locale: "zh_CN".to_string(),
            field_week_format: "%G-%V周".to_string(),
            month_header_format: "%Y年%-m月".to_string(),
            year_header_format: "%Y年".to_string(),
            short_week_days: strings(&["日", "一", "二", "三", "四", "五", "六"]),
            short_months: strings(&[
                "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月",
                "12月",
            ]),
            today: "今天".to_string(),
            now: "此刻".to_string(),
            ok: "确定".to_string(),
            clear: "清除".to_string(),
            ..Locale::en_us()
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "en_US" | "en-US" | "en" => Some(Locale::en_us()),
            "zh_CN" | "zh-CN" | "zh" => Some(Locale::zh_cn()),
            _ => None,
        }
    }

    /// Default input pattern for an internal picker granularity.
    pub fn field_format(&self, mode: PanelMode) -> &str {
        match mode {
            PanelMode::Date => &self.field_date_format,
            PanelMode::DateTime => &self.field_datetime_format,
            PanelMode::Time => &self.field_time_format,
            PanelMode::Week => &self.field_week_format,
            PanelMode::Month => &self.field_month_format,
            PanelMode::Year | PanelMode::Decade => &self.field_year_format,
        }
    }

    /// Short week-day label, `weekday` counted from Sunday.
    pub fn week_day_label(&self, weekday: u32) -> &str {
        self.short_week_days
            .get(weekday as usize % 7)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Short month label, `month` 1-based.
    pub fn month_label(&self, month: u32) -> &str {
        month
            .checked_sub(1)
            .and_then(|i| self.short_months.get(i as usize))
            .map(String::as_str)
            .unwrap_or("")
    }
}
