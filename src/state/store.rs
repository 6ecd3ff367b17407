use crate::calc::engine::DateEngine;
use crate::state::event::PickerEvent;
use crate::state::merged::MergedState;
use crate::state::value::{changed_range, is_same_value, FieldFormat, PickerValue, ValueShape};
use log::{debug, trace};

/// Range policy applied when a value is submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitPolicy {
    /// Sort range endpoints before committing.
    pub order: bool,
    /// Per-slot permission to commit an empty endpoint.
    pub allow_empty: [bool; 2],
}

impl Default for CommitPolicy {
    fn default() -> Self {
        CommitPolicy {
            order: true,
            allow_empty: [true, true],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CommitOutcome<D> {
    /// Holds the `Change` event to emit.
    Committed(PickerEvent<D>),
    /// Passed, but equal to the committed value: no event.
    Unchanged,
    Rejected,
}

impl<D> CommitOutcome<D> {
    pub fn passed(&self) -> bool {
        !matches!(self, CommitOutcome::Rejected)
    }
}

/// Committed value plus the calendar (working) value of one picker.
///
/// Both always carry the store's shape; anything handed in is normalized.
pub struct ValueStore<D> {
    committed: MergedState<PickerValue<D>>,
    calendar: PickerValue<D>,
    shape: ValueShape,
}

impl<D: Clone> ValueStore<D> {
    pub fn new(
        shape: ValueShape,
        default_value: Option<PickerValue<D>>,
        value: Option<PickerValue<D>>,
    ) -> Self {
        let default = default_value
            .map(|v| v.into_shape(shape))
            .unwrap_or_else(|| PickerValue::empty(shape));
        let committed =
            MergedState::with_controlled(default, value.map(|v| v.into_shape(shape)));
        let calendar = committed.get().clone();
        ValueStore {
            committed,
            calendar,
            shape,
        }
    }

    pub fn shape(&self) -> ValueShape {
        self.shape
    }

    pub fn committed(&self) -> &PickerValue<D> {
        self.committed.get()
    }

    pub fn calendar(&self) -> &PickerValue<D> {
        &self.calendar
    }

    pub fn is_controlled(&self) -> bool {
        self.committed.is_controlled()
    }

    pub fn set_calendar_at(&mut self, index: usize, date: Option<D>) {
        self.calendar = self.calendar.with_slot(index, date);
    }

    /// Drops unconfirmed edits.
    pub fn reset_calendar(&mut self) {
        self.calendar = self.committed.get().clone();
    }

    /// External value update. It always wins over internal edits.
    pub fn control(&mut self, value: Option<PickerValue<D>>) {
        let shape = self.shape;
        self.committed.control(value.map(|v| v.into_shape(shape)));
        self.reset_calendar();
    }

    /// Replaces the calendar value. Returns the calendar-change event when
    /// the candidate differs from the current calendar value.
    pub fn promote<E: DateEngine<Date = D>>(
        &mut self,
        engine: &E,
        format: &FieldFormat,
        candidate: PickerValue<D>,
    ) -> Option<PickerEvent<D>> {
        let candidate = candidate.into_shape(self.shape);
        if is_same_value(engine, &self.calendar, &candidate) {
            return None;
        }
        let range = changed_range(engine, &self.calendar, &candidate);
        self.calendar = candidate.clone();
        let text = format.format_value(engine, &candidate);
        trace!("calendar value now {:?}", text);
        Some(PickerEvent::CalendarChange {
            value: candidate,
            text,
            range,
        })
    }

    /// Submit path: sorts, checks the empty-endpoint policy, then commits.
    /// A rejected candidate still becomes the calendar value so the fields
    /// keep showing it, but nothing is emitted.
    pub fn commit_if_submit<E: DateEngine<Date = D>>(
        &mut self,
        engine: &E,
        format: &FieldFormat,
        policy: CommitPolicy,
        candidate: PickerValue<D>,
    ) -> CommitOutcome<D> {
        let candidate = sort_range(engine, policy.order, candidate.into_shape(self.shape));
        if !allows_empty(policy, &candidate) {
            debug!("submit rejected: empty endpoint not allowed");
            self.calendar = candidate;
            return CommitOutcome::Rejected;
        }
        self.commit(engine, format, candidate)
    }

    /// Commits an already validated value.
    pub fn commit<E: DateEngine<Date = D>>(
        &mut self,
        engine: &E,
        format: &FieldFormat,
        value: PickerValue<D>,
    ) -> CommitOutcome<D> {
        let value = value.into_shape(self.shape);
        self.calendar = value.clone();
        if is_same_value(engine, self.committed.get(), &value) {
            return CommitOutcome::Unchanged;
        }
        self.committed.set(value.clone());
        let text = format.format_value(engine, &value);
        debug!("committed {:?}", text);
        CommitOutcome::Committed(PickerEvent::Change { value, text })
    }
}

/// Swaps range endpoints that are out of order. Partial ranges are left alone.
pub fn sort_range<E: DateEngine>(
    engine: &E,
    order: bool,
    value: PickerValue<E::Date>,
) -> PickerValue<E::Date> {
    match value {
        PickerValue::Range([Some(start), Some(end)]) if order && engine.is_after(&start, &end) => {
            PickerValue::Range([Some(end), Some(start)])
        }
        other => other,
    }
}

pub fn allows_empty<D: Clone>(policy: CommitPolicy, value: &PickerValue<D>) -> bool {
    match value {
        PickerValue::Range([start, end]) => {
            (start.is_some() || policy.allow_empty[0]) && (end.is_some() || policy.allow_empty[1])
        }
        PickerValue::Single(date) => date.is_some() || policy.allow_empty[0],
        PickerValue::Multiple(list) => !list.is_empty() || policy.allow_empty[0],
    }
}
