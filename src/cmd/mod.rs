pub mod check;
pub mod init;
pub mod root;

use crate::data::settings::parse_setting_date;
use crate::data::PickerSettings;
use crate::state::{PanelMode, PickerValue, ValueShape};
use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Command-line flags that override picker.yaml.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub picker: Option<PanelMode>,
    pub range: bool,
    pub multiple: bool,
    pub show_time: bool,
    pub locale: Option<String>,
}

impl Overrides {
    pub fn apply(&self, settings: &mut PickerSettings) {
        if let Some(picker) = self.picker {
            settings.picker = picker;
        }
        if self.range {
            settings.shape = ValueShape::Range;
        } else if self.multiple {
            settings.shape = ValueShape::Multiple;
        }
        if self.show_time {
            settings.show_time = true;
        }
        if let Some(locale) = &self.locale {
            settings.locale = locale.clone();
        }
    }
}

pub fn load_settings(overrides: &Overrides) -> Result<PickerSettings> {
    let mut settings = PickerSettings::load()?;
    overrides.apply(&mut settings);
    Ok(settings)
}

/// Builds a value of `shape` from ISO dates given on the command line.
pub(crate) fn seed_value(shape: ValueShape, values: &[String]) -> Result<PickerValue<NaiveDateTime>> {
    let dates = values
        .iter()
        .map(|v| parse_setting_date(v))
        .collect::<Result<Vec<_>>>()?;
    Ok(PickerValue::Multiple(dates).into_shape(shape))
}

/// JSON printed by `pick` and `check`.
#[derive(Serialize, Debug)]
pub(crate) struct ValueReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
    pub value: &'a PickerValue<NaiveDateTime>,
    pub text: Vec<String>,
}

pub(crate) fn write_report<W: std::io::Write>(report: &ValueReport<'_>, out: &mut W) -> Result<()> {
    let json = serde_json::to_string(report)?;
    writeln!(out, "{}", json)?;
    Ok(())
}
