use crate::state::merged::MergedState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Calendar granularity shown by a panel.
///
/// `DateTime` is internal only: a `Date` picker with a time sub-panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PanelMode {
    #[default]
    Date,
    Week,
    Month,
    Year,
    Decade,
    Time,
    DateTime,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown picker mode '{0}' (expected date, week, month, year, decade or time)")]
pub struct ParseModeError(pub String);

impl PanelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PanelMode::Date => "date",
            PanelMode::Week => "week",
            PanelMode::Month => "month",
            PanelMode::Year => "year",
            PanelMode::Decade => "decade",
            PanelMode::Time => "time",
            PanelMode::DateTime => "datetime",
        }
    }

    /// The internal mode: `Date` with a time sub-panel becomes `DateTime`.
    pub fn internal(self, show_time: bool) -> PanelMode {
        if self == PanelMode::Date && show_time {
            PanelMode::DateTime
        } else {
            self
        }
    }

    /// Target of the header "drill up" navigation.
    pub fn drill_up(self) -> Option<PanelMode> {
        match self {
            PanelMode::Date | PanelMode::Week | PanelMode::DateTime => Some(PanelMode::Month),
            PanelMode::Month => Some(PanelMode::Year),
            PanelMode::Year => Some(PanelMode::Decade),
            PanelMode::Decade | PanelMode::Time => None,
        }
    }

    /// Mode that follows a cell selection in `self` when the picker works at
    /// `picker` granularity. `None` means the selection is a value pick.
    pub fn drill_down(self, picker: PanelMode) -> Option<PanelMode> {
        if self == picker {
            return None;
        }
        match self {
            PanelMode::Decade => Some(PanelMode::Year),
            PanelMode::Year if picker != PanelMode::Year => Some(PanelMode::Month),
            PanelMode::Month => match picker {
                PanelMode::Date | PanelMode::Week | PanelMode::DateTime => Some(picker),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for PanelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanelMode {
    type Err = ParseModeError;

    /// Parses an externally requested picker granularity. `datetime` is not
    /// accepted: it is spelled `date` plus `show_time`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(PanelMode::Date),
            "week" => Ok(PanelMode::Week),
            "month" => Ok(PanelMode::Month),
            "year" => Ok(PanelMode::Year),
            "decade" => Ok(PanelMode::Decade),
            "time" => Ok(PanelMode::Time),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Display mode of each field's panel.
pub struct PanelModeController {
    modes: MergedState<[PanelMode; 2]>,
    picker: PanelMode,
}

impl PanelModeController {
    pub fn new(picker: PanelMode) -> Self {
        PanelModeController {
            modes: MergedState::new([picker, picker]),
            picker,
        }
    }

    pub fn picker(&self) -> PanelMode {
        self.picker
    }

    pub fn mode(&self, index: usize) -> PanelMode {
        self.modes.get().get(index).copied().unwrap_or(self.picker)
    }

    pub fn modes(&self) -> [PanelMode; 2] {
        *self.modes.get()
    }

    /// Sets the mode of one field. Returns the new pair when it changed.
    pub fn set(&mut self, index: usize, mode: PanelMode) -> Option<[PanelMode; 2]> {
        let mut next = *self.modes.get();
        let slot = next.get_mut(index)?;
        if *slot == mode {
            return None;
        }
        *slot = mode;
        self.modes.set(next);
        Some(next)
    }

    /// Back to the configured granularity, done on every open.
    pub fn reset(&mut self, index: usize) {
        self.set(index, self.picker);
    }

    pub fn control(&mut self, modes: Option<[PanelMode; 2]>) {
        self.modes.control(modes);
    }
}
