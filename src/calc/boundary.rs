use crate::calc::compare::is_before_at;
use crate::calc::engine::DateEngine;
use crate::state::mode::PanelMode;

/// Context handed to a `disabledDate` predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisabledInfo {
    /// Granularity the date is being checked at.
    pub mode: PanelMode,
}

pub type DisabledDate<D> = Box<dyn Fn(&D, DisabledInfo) -> bool>;

/// Disabled-date rules: a caller predicate plus optional min/max bounds.
///
/// Bounds are compared at the requested granularity, so with
/// `min_date = 2025-03-15` the whole of March is still selectable in a
/// month panel while 2025-03-14 is disabled in a date panel.
pub struct DateRules<D> {
    disabled_date: Option<DisabledDate<D>>,
    min_date: Option<D>,
    max_date: Option<D>,
}

impl<D> Default for DateRules<D> {
    fn default() -> Self {
        DateRules {
            disabled_date: None,
            min_date: None,
            max_date: None,
        }
    }
}

impl<D: Clone> DateRules<D> {
    pub fn new(
        disabled_date: Option<DisabledDate<D>>,
        min_date: Option<D>,
        max_date: Option<D>,
    ) -> Self {
        DateRules {
            disabled_date,
            min_date,
            max_date,
        }
    }

    pub fn min_date(&self) -> Option<&D> {
        self.min_date.as_ref()
    }

    pub fn max_date(&self) -> Option<&D> {
        self.max_date.as_ref()
    }

    pub fn is_disabled<E: DateEngine<Date = D>>(&self, engine: &E, date: &D, mode: PanelMode) -> bool {
        if let Some(predicate) = &self.disabled_date {
            if predicate(date, DisabledInfo { mode }) {
                return true;
            }
        }
        if let Some(min) = &self.min_date {
            if is_before_at(engine, date, min, mode) {
                return true;
            }
        }
        if let Some(max) = &self.max_date {
            if is_before_at(engine, max, date, mode) {
                return true;
            }
        }
        false
    }

    /// Whether a committed value at `picker` granularity breaks the rules.
    /// A date+time value is checked at day granularity.
    pub fn is_invalid<E: DateEngine<Date = D>>(&self, engine: &E, date: &D, picker: PanelMode) -> bool {
        let mode = match picker {
            PanelMode::DateTime => PanelMode::Date,
            other => other,
        };
        self.is_disabled(engine, date, mode)
    }

    /// Pulls `date` inside `[min_date, max_date]`.
    pub fn clamp<E: DateEngine<Date = D>>(&self, engine: &E, date: D) -> D {
        if let Some(min) = &self.min_date {
            if engine.is_after(min, &date) {
                return min.clone();
            }
        }
        if let Some(max) = &self.max_date {
            if engine.is_after(&date, max) {
                return max.clone();
            }
        }
        date
    }
}
