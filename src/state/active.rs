use crate::state::merged::MergedState;
use crate::state::value::PickerValue;
use std::collections::BTreeSet;

/// What the user last did, consulted when the popup closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LastOperation {
    /// Focused or typed into a selector field.
    Input,
    /// Picked something inside the popup panel.
    Panel,
}

/// Flags attached to an open/close request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpenConfig {
    /// Only keep an already open popup open (a sibling field took focus);
    /// never opens a closed popup.
    pub inherit: bool,
    /// Programmatic close that bypasses reconciliation.
    pub force: bool,
}

impl OpenConfig {
    pub fn inherit() -> Self {
        OpenConfig {
            inherit: true,
            force: false,
        }
    }

    pub fn force() -> Self {
        OpenConfig {
            inherit: false,
            force: true,
        }
    }
}

/// Focus, popup visibility and the fields visited since the popup opened.
pub struct ActiveController {
    active_index: usize,
    focused: bool,
    open: MergedState<bool>,
    history: Vec<usize>,
    last_operation: Option<LastOperation>,
    field_count: usize,
    disabled: [bool; 2],
    allow_empty: [bool; 2],
}

impl ActiveController {
    pub fn new(
        field_count: usize,
        disabled: [bool; 2],
        allow_empty: [bool; 2],
        default_open: bool,
        open: Option<bool>,
    ) -> Self {
        ActiveController {
            active_index: disabled.iter().position(|d| !d).unwrap_or(0).min(field_count - 1),
            focused: false,
            open: MergedState::with_controlled(default_open, open),
            history: Vec::new(),
            last_operation: None,
            field_count,
            disabled,
            allow_empty,
        }
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Active index while focused, `None` otherwise.
    pub fn focused_index(&self) -> Option<usize> {
        self.focused.then_some(self.active_index)
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_open(&self) -> bool {
        *self.open.get()
    }

    pub fn is_disabled(&self, index: usize) -> bool {
        self.disabled.get(index).copied().unwrap_or(true)
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }

    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn first_enabled(&self) -> Option<usize> {
        (0..self.field_count).find(|&i| !self.is_disabled(i))
    }

    /// Focuses a field. Returns `true` when the active index moved.
    /// Disabled or unknown fields are ignored.
    pub fn focus(&mut self, index: usize) -> bool {
        if index >= self.field_count || self.is_disabled(index) {
            return false;
        }
        let moved = self.active_index != index;
        self.active_index = index;
        self.focused = true;
        self.record_active();
        moved
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Appends the active field to the visit history while open, skipping
    /// consecutive duplicates.
    pub fn record_active(&mut self) {
        if self.is_open() && self.history.last() != Some(&self.active_index) {
            self.history.push(self.active_index);
        }
    }

    /// Open/close request. Returns the value to report through
    /// `onOpenChange` when the request differs from the current state. The
    /// caller compares `is_open()` before and after to detect a transition.
    pub fn set_open(&mut self, next: bool, config: OpenConfig) -> Option<bool> {
        if config.inherit && !self.is_open() {
            return None;
        }
        if self.is_open() == next {
            return None;
        }
        self.open.set(next);
        Some(next)
    }

    pub fn control_open(&mut self, open: Option<bool>) {
        self.open.control(open);
    }

    /// Called on every open/close transition. History restarts either way;
    /// an opening transition records the active field as the first visit.
    pub fn on_transition(&mut self) {
        self.history.clear();
        if self.is_open() {
            self.history.push(self.active_index);
        }
    }

    pub fn set_last_operation(&mut self, op: LastOperation) {
        self.last_operation = Some(op);
    }

    pub fn last_operation(&self) -> Option<LastOperation> {
        self.last_operation
    }

    pub fn take_last_operation(&mut self) -> Option<LastOperation> {
        self.last_operation.take()
    }

    /// The field that still needs input after `value`, or `None` when the
    /// picker is done and may close.
    ///
    /// Every visited field that holds a value (or may stay empty) counts as
    /// filled. Two filled fields finish a range; otherwise focus moves to
    /// the field opposite the last visited one unless it is disabled.
    pub fn next_active_index<D: Clone>(&self, value: &PickerValue<D>) -> Option<usize> {
        if self.field_count < 2 {
            return None;
        }
        let filled: BTreeSet<usize> = self
            .history
            .iter()
            .copied()
            .filter(|&i| value.get(i).is_some() || self.allow_empty.get(i).copied().unwrap_or(false))
            .collect();
        if filled.len() >= 2 {
            return None;
        }
        self.opposite_of_last()
    }

    /// Only one field visited since opening: the other one, if enabled.
    pub fn sync_active(&self) -> Option<usize> {
        let distinct: BTreeSet<usize> = self.history.iter().copied().collect();
        if distinct.len() == 1 {
            self.opposite_of_last()
        } else {
            None
        }
    }

    fn opposite_of_last(&self) -> Option<usize> {
        if self.field_count < 2 {
            return None;
        }
        let last = self.history.last().copied().unwrap_or(self.active_index);
        let next = if last == 0 { 1 } else { 0 };
        (!self.is_disabled(next)).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_controller() -> ActiveController {
        ActiveController::new(2, [false, false], [false, false], false, None)
    }

    fn open(active: &mut ActiveController) {
        active.set_open(true, OpenConfig::default());
        active.on_transition();
    }

    #[test]
    fn test_focus_disabled_field_ignored() {
        let mut active = ActiveController::new(2, [true, false], [false, false], false, None);
        assert_eq!(active.active_index(), 1);
        assert!(!active.focus(0));
        assert_eq!(active.focused_index(), None);
        active.focus(1);
        assert_eq!(active.focused_index(), Some(1));
    }

    #[test]
    fn test_blur_keeps_active_index() {
        let mut active = range_controller();
        active.focus(1);
        active.blur();
        assert_eq!(active.focused_index(), None);
        assert_eq!(active.active_index(), 1);
    }

    #[test]
    fn test_history_only_records_while_open() {
        let mut active = range_controller();
        active.focus(0);
        assert!(active.history().is_empty());
        open(&mut active);
        assert_eq!(active.history(), &[0]);
        active.focus(0);
        active.focus(1);
        active.focus(1);
        active.focus(0);
        assert_eq!(active.history(), &[0, 1, 0]);
    }

    #[test]
    fn test_history_cleared_on_close() {
        let mut active = range_controller();
        open(&mut active);
        active.focus(1);
        active.set_open(false, OpenConfig::default());
        active.on_transition();
        assert!(active.history().is_empty());
    }

    #[test]
    fn test_inherit_never_opens() {
        let mut active = range_controller();
        assert_eq!(active.set_open(true, OpenConfig::inherit()), None);
        assert!(!active.is_open());
        open(&mut active);
        assert_eq!(active.set_open(true, OpenConfig::inherit()), None);
        assert!(active.is_open());
    }

    #[test]
    fn test_controlled_open_reports_without_changing() {
        let mut active = ActiveController::new(1, [false, false], [true, true], false, Some(false));
        assert_eq!(active.set_open(true, OpenConfig::default()), Some(true));
        assert!(!active.is_open());
        active.control_open(Some(true));
        assert!(active.is_open());
    }

    #[test]
    fn test_next_active_after_first_field() {
        let mut active = range_controller();
        open(&mut active);
        let value = PickerValue::Range([Some(1), None]);
        assert_eq!(active.next_active_index(&value), Some(1));
    }

    #[test]
    fn test_next_active_done_after_both_fields() {
        let mut active = range_controller();
        open(&mut active);
        active.focus(1);
        let value = PickerValue::Range([Some(1), Some(2)]);
        assert_eq!(active.next_active_index(&value), None);
    }

    #[test]
    fn test_next_active_visited_but_empty_field() {
        let mut active = range_controller();
        open(&mut active);
        active.focus(1);
        let value = PickerValue::Range([None, Some(2)]);
        assert_eq!(active.next_active_index(&value), Some(0));
    }

    #[test]
    fn test_next_active_allow_empty_counts_as_filled() {
        let mut active = ActiveController::new(2, [false, false], [true, false], false, None);
        open(&mut active);
        active.focus(1);
        let value = PickerValue::Range([None, Some(2)]);
        assert_eq!(active.next_active_index(&value), None);
    }

    #[test]
    fn test_next_active_disabled_other_field() {
        let mut active = ActiveController::new(2, [false, true], [false, false], false, None);
        open(&mut active);
        let value = PickerValue::Range([Some(1), None]);
        assert_eq!(active.next_active_index(&value), None);
    }

    #[test]
    fn test_next_active_single_is_none() {
        let mut active = ActiveController::new(1, [false, false], [true, true], false, None);
        open(&mut active);
        assert_eq!(active.next_active_index(&PickerValue::Single(Some(1))), None);
    }

    #[test]
    fn test_sync_active_one_visited_field() {
        let mut active = range_controller();
        open(&mut active);
        assert_eq!(active.sync_active(), Some(1));
        active.focus(1);
        assert_eq!(active.sync_active(), None);
    }

    #[test]
    fn test_last_operation_log() {
        let mut active = range_controller();
        assert_eq!(active.last_operation(), None);
        active.set_last_operation(LastOperation::Panel);
        active.set_last_operation(LastOperation::Input);
        assert_eq!(active.take_last_operation(), Some(LastOperation::Input));
        assert_eq!(active.last_operation(), None);
    }
}
