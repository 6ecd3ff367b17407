use crate::calc::boundary::DateRules;
use crate::calc::engine::DateEngine;
use crate::state::event::PickerEvent;
use crate::state::mode::PanelMode;
use crate::state::store::{allows_empty, sort_range, CommitOutcome, CommitPolicy, ValueStore};
use crate::state::value::{FieldFormat, PickerValue};
use log::debug;

/// Decides whether a candidate may be committed.
///
/// Slot validity is checked in a fixed order: malformed typed text first,
/// then the disabled-date rules at the picker granularity. Nothing here
/// fails loudly; a failed check is a suppressed commit plus an invalid flag.
pub struct SubmitGate<D> {
    policy: CommitPolicy,
    rules: DateRules<D>,
    picker: PanelMode,
    typing_invalid: [bool; 2],
    reported_invalid: [bool; 2],
}

impl<D: Clone> SubmitGate<D> {
    pub fn new(policy: CommitPolicy, rules: DateRules<D>, picker: PanelMode) -> Self {
        SubmitGate {
            policy,
            rules,
            picker,
            typing_invalid: [false; 2],
            reported_invalid: [false; 2],
        }
    }

    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }

    pub fn rules(&self) -> &DateRules<D> {
        &self.rules
    }

    pub fn set_typing_invalid(&mut self, index: usize, invalid: bool) {
        if let Some(slot) = self.typing_invalid.get_mut(index) {
            *slot = invalid;
        }
    }

    pub fn clear_typing(&mut self) {
        self.typing_invalid = [false; 2];
    }

    /// Last invalid state reported for a field.
    pub fn is_reported_invalid(&self, index: usize) -> bool {
        self.reported_invalid.get(index).copied().unwrap_or(false)
    }

    pub fn is_invalid_date<E: DateEngine<Date = D>>(&self, engine: &E, date: &D) -> bool {
        self.rules.is_invalid(engine, date, self.picker)
    }

    /// Whether one field blocks a commit. For a multiple value the single
    /// field is invalid when any of its dates is.
    pub fn slot_invalid<E: DateEngine<Date = D>>(
        &self,
        engine: &E,
        value: &PickerValue<D>,
        index: usize,
    ) -> bool {
        if self.typing_invalid.get(index).copied().unwrap_or(false) {
            return true;
        }
        match value {
            PickerValue::Multiple(list) => {
                index == 0 && list.iter().any(|d| self.is_invalid_date(engine, d))
            }
            _ => value
                .get(index)
                .is_some_and(|d| self.is_invalid_date(engine, d)),
        }
    }

    fn any_date_invalid<E: DateEngine<Date = D>>(&self, engine: &E, value: &PickerValue<D>) -> bool {
        value
            .slots()
            .into_iter()
            .flatten()
            .any(|d| self.is_invalid_date(engine, d))
    }

    /// Re-evaluates every field and queues an `InvalidChange` for each one
    /// whose state differs from what was last reported.
    pub fn sync_invalid<E: DateEngine<Date = D>>(
        &mut self,
        engine: &E,
        value: &PickerValue<D>,
        field_count: usize,
        events: &mut Vec<PickerEvent<D>>,
    ) {
        for index in 0..field_count.min(2) {
            let invalid = self.slot_invalid(engine, value, index);
            if self.reported_invalid[index] != invalid {
                self.reported_invalid[index] = invalid;
                events.push(PickerEvent::InvalidChange { index, invalid });
            }
        }
    }

    /// Runs after the calendar value of `index` was edited (and already
    /// promoted to the visible state). A non-final flush only reports whether
    /// the field is acceptable; a final one also tries to commit the whole
    /// calendar value. Returns `false` when the field or the commit failed.
    pub fn flush<E: DateEngine<Date = D>>(
        &self,
        store: &mut ValueStore<D>,
        engine: &E,
        format: &FieldFormat,
        index: usize,
        is_final: bool,
        events: &mut Vec<PickerEvent<D>>,
    ) -> bool {
        let calendar = store.calendar().clone();
        if self.slot_invalid(engine, &calendar, index) {
            debug!("field {} is invalid, nothing submitted", index);
            return false;
        }
        if !is_final {
            return true;
        }
        let field_count = store.shape().field_count();
        if (0..field_count).any(|i| self.slot_invalid(engine, &calendar, i)) {
            debug!("submit blocked by an invalid field");
            return false;
        }
        let calendar = sort_range(engine, self.policy.order, calendar);
        if let Some(event) = store.promote(engine, format, calendar.clone()) {
            events.push(event);
        }
        match store.commit_if_submit(engine, format, self.policy, calendar) {
            CommitOutcome::Committed(event) => {
                events.push(event);
                true
            }
            CommitOutcome::Unchanged => true,
            CommitOutcome::Rejected => false,
        }
    }

    /// One-shot submit used by presets and clear. `value` replaces the
    /// calendar value when given. The whole value is validated up front and
    /// the store is left untouched on rejection.
    pub fn trigger_submit_change<E: DateEngine<Date = D>>(
        &self,
        store: &mut ValueStore<D>,
        engine: &E,
        format: &FieldFormat,
        value: Option<PickerValue<D>>,
        events: &mut Vec<PickerEvent<D>>,
    ) -> bool {
        let typed = value.is_none();
        let candidate = value
            .unwrap_or_else(|| store.calendar().clone())
            .into_shape(store.shape());
        let candidate = sort_range(engine, self.policy.order, candidate);

        if !allows_empty(self.policy, &candidate) {
            debug!("submit rejected: empty endpoint not allowed");
            return false;
        }
        if self.any_date_invalid(engine, &candidate) {
            debug!("submit rejected: disabled date");
            return false;
        }
        if typed && self.typing_invalid.iter().any(|&t| t) {
            debug!("submit rejected: malformed input");
            return false;
        }
        if let Some(event) = store.promote(engine, format, candidate.clone()) {
            events.push(event);
        }
        if let CommitOutcome::Committed(event) = store.commit(engine, format, candidate) {
            events.push(event);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::chrono_engine::ChronoEngine;
    use crate::state::value::ValueShape;
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn fmt() -> FieldFormat {
        FieldFormat::new("en_US", vec!["%Y-%m-%d".to_string()])
    }

    fn gate_with_min(min: NaiveDateTime) -> SubmitGate<NaiveDateTime> {
        SubmitGate::new(
            CommitPolicy::default(),
            DateRules::new(None, Some(min), None),
            PanelMode::Date,
        )
    }

    fn range_store() -> ValueStore<NaiveDateTime> {
        ValueStore::new(ValueShape::Range, None, None)
    }

    #[test]
    fn test_typing_invalid_wins_over_valid_date() {
        let engine = ChronoEngine::new();
        let mut gate = gate_with_min(dt(2000, 1, 1));
        let value = PickerValue::Range([Some(dt(2025, 1, 1)), None]);
        assert!(!gate.slot_invalid(&engine, &value, 0));
        gate.set_typing_invalid(0, true);
        assert!(gate.slot_invalid(&engine, &value, 0));
        assert!(!gate.slot_invalid(&engine, &value, 1));
    }

    #[test]
    fn test_disabled_date_marks_slot() {
        let engine = ChronoEngine::new();
        let gate = gate_with_min(dt(2025, 1, 1));
        let value = PickerValue::Range([Some(dt(2024, 12, 31)), Some(dt(2025, 1, 2))]);
        assert!(gate.slot_invalid(&engine, &value, 0));
        assert!(!gate.slot_invalid(&engine, &value, 1));
    }

    #[test]
    fn test_sync_invalid_reports_changes_once() {
        let engine = ChronoEngine::new();
        let mut gate = gate_with_min(dt(2025, 1, 1));
        let mut events = Vec::new();
        let bad = PickerValue::Range([Some(dt(2024, 1, 1)), None]);
        gate.sync_invalid(&engine, &bad, 2, &mut events);
        gate.sync_invalid(&engine, &bad, 2, &mut events);
        assert_eq!(events, vec![PickerEvent::InvalidChange { index: 0, invalid: true }]);

        events.clear();
        gate.sync_invalid(&engine, &PickerValue::Range([None, None]), 2, &mut events);
        assert_eq!(events, vec![PickerEvent::InvalidChange { index: 0, invalid: false }]);
    }

    #[test]
    fn test_flush_non_final_does_not_commit() {
        let engine = ChronoEngine::new();
        let gate = gate_with_min(dt(2000, 1, 1));
        let mut store = range_store();
        store.set_calendar_at(0, Some(dt(2025, 1, 1)));
        let mut events = Vec::new();
        assert!(gate.flush(&mut store, &engine, &fmt(), 0, false, &mut events));
        assert!(events.is_empty());
        assert!(store.committed().is_empty());
    }

    #[test]
    fn test_flush_final_commits() {
        let engine = ChronoEngine::new();
        let gate = gate_with_min(dt(2000, 1, 1));
        let mut store = range_store();
        store.set_calendar_at(0, Some(dt(2025, 1, 1)));
        store.set_calendar_at(1, Some(dt(2025, 1, 5)));
        let mut events = Vec::new();
        assert!(gate.flush(&mut store, &engine, &fmt(), 1, true, &mut events));
        assert_eq!(events.len(), 1);
        assert!(events[0].is_change());
        assert_eq!(store.committed().get(1), Some(&dt(2025, 1, 5)));
    }

    #[test]
    fn test_flush_final_blocked_by_invalid_field() {
        let engine = ChronoEngine::new();
        let gate = gate_with_min(dt(2025, 1, 1));
        let mut store = range_store();
        store.set_calendar_at(0, Some(dt(2024, 1, 1)));
        store.set_calendar_at(1, Some(dt(2025, 1, 5)));
        let mut events = Vec::new();
        assert!(!gate.flush(&mut store, &engine, &fmt(), 1, true, &mut events));
        assert!(events.is_empty());
        assert!(store.committed().is_empty());
        assert_eq!(store.calendar().get(0), Some(&dt(2024, 1, 1)));
    }

    #[test]
    fn test_trigger_submit_change_rejects_without_mutation() {
        let engine = ChronoEngine::new();
        let gate = gate_with_min(dt(2025, 1, 1));
        let mut store = range_store();
        let mut events = Vec::new();
        let bad = PickerValue::Range([Some(dt(2024, 1, 1)), Some(dt(2025, 1, 5))]);
        assert!(!gate.trigger_submit_change(&mut store, &engine, &fmt(), Some(bad), &mut events));
        assert!(events.is_empty());
        assert!(store.calendar().is_empty());
    }

    #[test]
    fn test_trigger_submit_change_sorts_and_commits() {
        let engine = ChronoEngine::new();
        let gate = gate_with_min(dt(2000, 1, 1));
        let mut store = range_store();
        let mut events = Vec::new();
        let preset = PickerValue::Range([Some(dt(2025, 3, 1)), Some(dt(2025, 1, 1))]);
        assert!(gate.trigger_submit_change(&mut store, &engine, &fmt(), Some(preset), &mut events));
        assert_eq!(
            store.committed(),
            &PickerValue::Range([Some(dt(2025, 1, 1)), Some(dt(2025, 3, 1))])
        );
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            PickerEvent::CalendarChange { value, .. } if value == store.committed()
        ));
        assert!(events[1].is_change());
    }

    #[test]
    fn test_trigger_submit_change_empty_policy() {
        let engine = ChronoEngine::new();
        let policy = CommitPolicy {
            order: true,
            allow_empty: [false, false],
        };
        let gate = SubmitGate::new(policy, DateRules::default(), PanelMode::Date);
        let mut store = ValueStore::new(ValueShape::Single, Some(PickerValue::Single(Some(dt(2025, 1, 1)))), None);
        let mut events = Vec::new();
        let cleared = PickerValue::Single(None);
        assert!(!gate.trigger_submit_change(&mut store, &engine, &fmt(), Some(cleared), &mut events));
        assert_eq!(store.committed().get(0), Some(&dt(2025, 1, 1)));
    }

    #[test]
    fn test_multiple_value_checked_entry_by_entry() {
        let engine = ChronoEngine::new();
        let gate = gate_with_min(dt(2025, 1, 1));
        let value = PickerValue::Multiple(vec![dt(2025, 2, 1), dt(2024, 2, 1)]);
        assert!(gate.slot_invalid(&engine, &value, 0));
    }
}
