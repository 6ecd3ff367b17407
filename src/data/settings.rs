use crate::data::locale::Locale;
use crate::data::persistence::Persistable;
use crate::state::mode::PanelMode;
use crate::state::picker::{PickerConfig, Preset};
use crate::state::value::{PickerValue, ValueShape};
use anyhow::{bail, Context, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SETTINGS_FILE: &str = "picker.yaml";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A preset as written in the settings file. `end` is only read for range
/// pickers; multiple pickers take both dates.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PresetEntry {
    pub label: String,
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PickerSettings {
    pub shape: ValueShape,
    pub picker: PanelMode,
    pub show_time: bool,
    /// Unset means "confirm only for date-time and time pickers".
    pub need_confirm: Option<bool>,
    pub order: bool,
    pub allow_empty: [bool; 2],
    pub disabled: [bool; 2],
    pub format: Vec<String>,
    pub locale: String,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
    pub disabled_dates: Vec<String>,
    pub disable_weekends: bool,
    pub presets: Vec<PresetEntry>,
}

impl Default for PickerSettings {
    fn default() -> Self {
        PickerSettings {
            shape: ValueShape::Single,
            picker: PanelMode::Date,
            show_time: false,
            need_confirm: None,
            order: true,
            allow_empty: [true, true],
            disabled: [false, false],
            format: Vec::new(),
            locale: "en_US".to_string(),
            min_date: None,
            max_date: None,
            disabled_dates: Vec::new(),
            disable_weekends: false,
            presets: Vec::new(),
        }
    }
}

/// Wrapper that reads the `settings` key from picker.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: PickerSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        SETTINGS_FILE
    }
}

/// Parses `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`.
pub fn parse_setting_date(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    if let Ok(date_time) = NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT) {
        return Ok(date_time);
    }
    match NaiveDate::parse_from_str(text, DATE_FORMAT) {
        Ok(date) => Ok(date.and_time(NaiveTime::MIN)),
        Err(_) => bail!(
            "invalid date '{}' (expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)",
            text
        ),
    }
}

fn parse_optional(text: &Option<String>, key: &str) -> Result<Option<NaiveDateTime>> {
    text.as_deref()
        .map(|t| parse_setting_date(t).with_context(|| format!("invalid settings.{}", key)))
        .transpose()
}

impl PickerSettings {
    pub fn load() -> Result<Self> {
        Ok(SettingsWrapper::load()?.settings)
    }

    pub fn save(&self) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        wrapper.save()
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        Ok(SettingsWrapper::load_from(dir)?.settings)
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        wrapper.save_to(dir)
    }

    /// Settings written by `init`: a date picker with a few presets around
    /// `today`.
    pub fn sample(today: NaiveDate) -> Self {
        let day = |d: NaiveDate| d.format(DATE_FORMAT).to_string();
        PickerSettings {
            presets: vec![
                PresetEntry {
                    label: "Today".to_string(),
                    start: day(today),
                    end: None,
                },
                PresetEntry {
                    label: "Tomorrow".to_string(),
                    start: day(today + Duration::days(1)),
                    end: None,
                },
                PresetEntry {
                    label: "Next 7 days".to_string(),
                    start: day(today),
                    end: Some(day(today + Duration::days(6))),
                },
            ],
            ..PickerSettings::default()
        }
    }

    pub fn locale(&self) -> Result<Locale> {
        match Locale::by_name(&self.locale) {
            Some(locale) => Ok(locale),
            None => bail!("unknown locale '{}' (expected en_US or zh_CN)", self.locale),
        }
    }

    fn presets(&self) -> Result<Vec<Preset<NaiveDateTime>>> {
        self.presets
            .iter()
            .map(|entry| {
                let start = parse_setting_date(&entry.start)
                    .with_context(|| format!("invalid start of preset '{}'", entry.label))?;
                let end = parse_optional(&entry.end, "presets.end")?;
                let value = match self.shape {
                    ValueShape::Range => PickerValue::Range([Some(start), end]),
                    ValueShape::Single => PickerValue::Single(Some(start)),
                    ValueShape::Multiple => {
                        PickerValue::Multiple(std::iter::once(start).chain(end).collect())
                    }
                };
                Ok(Preset {
                    label: entry.label.clone(),
                    value,
                })
            })
            .collect()
    }

    /// Builds the in-process picker configuration. Blocked dates and
    /// weekends only disable day cells.
    pub fn to_config(&self) -> Result<PickerConfig<NaiveDateTime>> {
        let config = match self.shape {
            ValueShape::Single => PickerConfig::single(),
            ValueShape::Range => PickerConfig::range(),
            ValueShape::Multiple => PickerConfig::multiple(),
        };
        let mut config = config
            .picker(self.picker)
            .show_time(self.show_time)
            .order(self.order)
            .allow_empty(self.allow_empty)
            .disabled(self.disabled)
            .format(self.format.clone())
            .locale(self.locale()?)
            .presets(self.presets()?);

        if let Some(need_confirm) = self.need_confirm {
            config = config.need_confirm(need_confirm);
        }
        if let Some(min) = parse_optional(&self.min_date, "min_date")? {
            config = config.min_date(min);
        }
        if let Some(max) = parse_optional(&self.max_date, "max_date")? {
            config = config.max_date(max);
        }

        let blocked = self
            .disabled_dates
            .iter()
            .map(|d| parse_setting_date(d).map(|dt| dt.date()))
            .collect::<Result<Vec<NaiveDate>>>()
            .context("invalid settings.disabled_dates")?;
        if !blocked.is_empty() || self.disable_weekends {
            let weekends = self.disable_weekends;
            config = config.disabled_date(move |date: &NaiveDateTime, info| {
                if info.mode != PanelMode::Date {
                    return false;
                }
                let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
                (weekends && weekend) || blocked.contains(&date.date())
            });
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::chrono_engine::ChronoEngine;
    use crate::state::picker::Picker;
    use tempfile::TempDir;

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_default_settings() {
        let settings = PickerSettings::default();
        assert_eq!(settings.shape, ValueShape::Single);
        assert_eq!(settings.picker, PanelMode::Date);
        assert_eq!(settings.locale, "en_US");
        assert_eq!(settings.allow_empty, [true, true]);
        assert!(settings.order);
    }

    #[test]
    fn test_missing_settings_key_uses_default() {
        let wrapper: SettingsWrapper = serde_norway::from_str("other: 1").unwrap();
        assert_eq!(wrapper.settings, PickerSettings::default());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "settings:\n  shape: range\n  picker: month\n  locale: zh_CN\n";
        let wrapper: SettingsWrapper = serde_norway::from_str(yaml).unwrap();
        assert_eq!(wrapper.settings.shape, ValueShape::Range);
        assert_eq!(wrapper.settings.picker, PanelMode::Month);
        assert_eq!(wrapper.settings.locale, "zh_CN");
        assert!(!wrapper.settings.show_time);
    }

    #[test]
    fn test_save_to_and_load_from_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let settings = PickerSettings::sample(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        settings.save_to(tmp.path()).unwrap();
        assert!(tmp.path().join(SETTINGS_FILE).exists());
        let loaded = PickerSettings::load_from(tmp.path()).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.presets[2].end.as_deref(), Some("2025-06-08"));
    }

    #[test]
    fn test_parse_setting_date_formats() {
        assert_eq!(parse_setting_date("2025-03-01").unwrap(), dt(2025, 3, 1));
        assert_eq!(
            parse_setting_date("2025-03-01 10:30:00").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap()
        );
        assert!(parse_setting_date("03/01/2025").is_err());
    }

    #[test]
    fn test_unknown_locale_is_an_error() {
        let settings = PickerSettings {
            locale: "fr_FR".to_string(),
            ..PickerSettings::default()
        };
        let err = settings.to_config().err().unwrap();
        assert!(err.to_string().contains("fr_FR"));
    }

    #[test]
    fn test_bad_min_date_names_key() {
        let settings = PickerSettings {
            min_date: Some("soon".to_string()),
            ..PickerSettings::default()
        };
        let err = settings.to_config().err().unwrap();
        assert!(format!("{:#}", err).contains("min_date"));
    }

    #[test]
    fn test_range_presets() {
        let settings = PickerSettings {
            shape: ValueShape::Range,
            ..PickerSettings::sample(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap())
        };
        let presets = settings.presets().unwrap();
        assert_eq!(presets[0].value, PickerValue::Range([Some(dt(2025, 6, 2)), None]));
        assert_eq!(
            presets[2].value,
            PickerValue::Range([Some(dt(2025, 6, 2)), Some(dt(2025, 6, 8))])
        );
    }

    #[test]
    fn test_weekends_and_blocked_dates_disable_day_cells() {
        let settings = PickerSettings {
            disable_weekends: true,
            disabled_dates: vec!["2025-06-04".to_string()],
            ..PickerSettings::default()
        };
        let engine = ChronoEngine::fixed(dt(2025, 6, 2));
        let mut picker = Picker::new(engine, settings.to_config().unwrap());
        picker.click();
        // Saturday
        picker.cell_select(dt(2025, 6, 7));
        assert!(picker.value().is_empty());
        // blocked Wednesday
        picker.cell_select(dt(2025, 6, 4));
        assert!(picker.value().is_empty());
        picker.cell_select(dt(2025, 6, 5));
        assert_eq!(picker.value(), &PickerValue::Single(Some(dt(2025, 6, 5))));
    }

    #[test]
    fn test_min_max_bound_the_picker() {
        let settings = PickerSettings {
            min_date: Some("2025-06-10".to_string()),
            max_date: Some("2025-06-20".to_string()),
            ..PickerSettings::default()
        };
        let engine = ChronoEngine::fixed(dt(2025, 6, 2));
        let mut picker = Picker::new(engine, settings.to_config().unwrap());
        picker.click();
        picker.cell_select(dt(2025, 6, 9));
        assert!(picker.value().is_empty());
        picker.cell_select(dt(2025, 6, 10));
        assert_eq!(picker.value(), &PickerValue::Single(Some(dt(2025, 6, 10))));
    }
}
