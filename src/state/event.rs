use crate::state::mode::PanelMode;
use crate::state::value::{PickerValue, RangeSlot};

/// Why the displayed panel date moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerValueSource {
    /// Popup opened, active field changed, or a typed value re-anchored it.
    Reset,
    /// Prev/next navigation or a drill-down click inside the panel.
    Panel,
}

/// Outbound notifications, queued in emission order and drained by the
/// presentation layer with `Picker::take_events`.
#[derive(Clone, Debug, PartialEq)]
pub enum PickerEvent<D> {
    /// A value was committed. Fires once per distinct committed value.
    Change {
        value: PickerValue<D>,
        text: Vec<String>,
    },
    /// The in-progress calendar value changed.
    CalendarChange {
        value: PickerValue<D>,
        text: Vec<String>,
        range: Option<RangeSlot>,
    },
    OpenChange(bool),
    PanelChange {
        value: PickerValue<D>,
        modes: [PanelMode; 2],
    },
    PickerValueChange {
        index: usize,
        date: D,
        source: PickerValueSource,
    },
    InvalidChange {
        index: usize,
        invalid: bool,
    },
    ActiveIndexChange(Option<usize>),
}

impl<D> PickerEvent<D> {
    pub fn is_change(&self) -> bool {
        matches!(self, PickerEvent::Change { .. })
    }

    pub fn is_calendar_change(&self) -> bool {
        matches!(self, PickerEvent::CalendarChange { .. })
    }
}
