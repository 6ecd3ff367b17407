use crate::calc::boundary::{DateRules, DisabledDate, DisabledInfo};
use crate::calc::engine::DateEngine;
use crate::data::locale::Locale;
use crate::panel::{PanelContext, PanelGrid, PanelRegistry};
use crate::state::active::{ActiveController, LastOperation, OpenConfig};
use crate::state::event::{PickerEvent, PickerValueSource};
use crate::state::mode::{PanelMode, PanelModeController};
use crate::state::store::{CommitPolicy, ValueStore};
use crate::state::submit::SubmitGate;
use crate::state::value::{toggle_date, FieldFormat, PickerValue, ValueShape};
use log::debug;

/// A named shortcut value offered next to the calendar.
#[derive(Clone, Debug, PartialEq)]
pub struct Preset<D> {
    pub label: String,
    pub value: PickerValue<D>,
}

/// Everything a picker is configured with at mount.
pub struct PickerConfig<D> {
    shape: ValueShape,
    picker: PanelMode,
    show_time: bool,
    need_confirm: Option<bool>,
    order: bool,
    allow_empty: [bool; 2],
    disabled: [bool; 2],
    format: Vec<String>,
    locale: Locale,
    min_date: Option<D>,
    max_date: Option<D>,
    disabled_date: Option<DisabledDate<D>>,
    default_value: Option<PickerValue<D>>,
    value: Option<PickerValue<D>>,
    default_picker_value: [Option<D>; 2],
    presets: Vec<Preset<D>>,
    default_open: bool,
    open: Option<bool>,
    mode: Option<[PanelMode; 2]>,
}

impl<D> PickerConfig<D> {
    fn with_shape(shape: ValueShape) -> Self {
        PickerConfig {
            shape,
            picker: PanelMode::Date,
            show_time: false,
            need_confirm: None,
            order: true,
            allow_empty: [true, true],
            disabled: [false, false],
            format: Vec::new(),
            locale: Locale::default(),
            min_date: None,
            max_date: None,
            disabled_date: None,
            default_value: None,
            value: None,
            default_picker_value: [None, None],
            presets: Vec::new(),
            default_open: false,
            open: None,
            mode: None,
        }
    }

    pub fn single() -> Self {
        PickerConfig::with_shape(ValueShape::Single)
    }

    pub fn range() -> Self {
        PickerConfig::with_shape(ValueShape::Range)
    }

    pub fn multiple() -> Self {
        PickerConfig::with_shape(ValueShape::Multiple)
    }

    pub fn shape(&self) -> ValueShape {
        self.shape
    }

    pub fn picker(mut self, picker: PanelMode) -> Self {
        self.picker = picker;
        self
    }

    pub fn show_time(mut self, show_time: bool) -> Self {
        self.show_time = show_time;
        self
    }

    pub fn need_confirm(mut self, need_confirm: bool) -> Self {
        self.need_confirm = Some(need_confirm);
        self
    }

    pub fn order(mut self, order: bool) -> Self {
        self.order = order;
        self
    }

    pub fn allow_empty(mut self, allow_empty: [bool; 2]) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    /// No empty value may be committed.
    pub fn required(self) -> Self {
        self.allow_empty([false, false])
    }

    pub fn disabled(mut self, disabled: [bool; 2]) -> Self {
        self.disabled = disabled;
        self
    }

    /// Format list; the first entry formats, all are tried when parsing.
    pub fn format(mut self, format: Vec<String>) -> Self {
        self.format = format;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn min_date(mut self, date: D) -> Self {
        self.min_date = Some(date);
        self
    }

    pub fn max_date(mut self, date: D) -> Self {
        self.max_date = Some(date);
        self
    }

    pub fn disabled_date<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&D, DisabledInfo) -> bool + 'static,
    {
        self.disabled_date = Some(Box::new(predicate));
        self
    }

    pub fn default_value(mut self, value: PickerValue<D>) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Controlled value.
    pub fn value(mut self, value: PickerValue<D>) -> Self {
        self.value = Some(value);
        self
    }

    pub fn default_picker_value(mut self, dates: [Option<D>; 2]) -> Self {
        self.default_picker_value = dates;
        self
    }

    pub fn presets(mut self, presets: Vec<Preset<D>>) -> Self {
        self.presets = presets;
        self
    }

    pub fn default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }

    /// Controlled popup visibility.
    pub fn open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    /// Controlled panel modes.
    pub fn mode(mut self, modes: [PanelMode; 2]) -> Self {
        self.mode = Some(modes);
        self
    }
}

/// One picker instance: the value store, the active-field controller, the
/// submit gate and the panel modes wired together.
///
/// Every inbound call runs to completion synchronously. Outbound
/// notifications are queued in emission order; drain them with
/// [`Picker::take_events`].
pub struct Picker<E: DateEngine> {
    engine: E,
    locale: Locale,
    format: FieldFormat,
    shape: ValueShape,
    picker: PanelMode,
    internal_picker: PanelMode,
    need_confirm: bool,
    store: ValueStore<E::Date>,
    active: ActiveController,
    gate: SubmitGate<E::Date>,
    modes: PanelModeController,
    default_picker_value: [Option<E::Date>; 2],
    panel_dates: [Option<E::Date>; 2],
    hover: Option<PickerValue<E::Date>>,
    presets: Vec<Preset<E::Date>>,
    events: Vec<PickerEvent<E::Date>>,
}

impl<E: DateEngine> Picker<E> {
    pub fn new(engine: E, config: PickerConfig<E::Date>) -> Self {
        let internal_picker = config.picker.internal(config.show_time);
        let complex = matches!(internal_picker, PanelMode::DateTime | PanelMode::Time);
        let format = FieldFormat::for_picker(&config.locale, internal_picker, &config.format);
        let field_count = config.shape.field_count();

        let store = ValueStore::new(config.shape, config.default_value, config.value);
        let active = ActiveController::new(
            field_count,
            config.disabled,
            config.allow_empty,
            config.default_open,
            config.open,
        );
        let policy = CommitPolicy {
            order: config.order,
            allow_empty: config.allow_empty,
        };
        let rules = DateRules::new(config.disabled_date, config.min_date, config.max_date);
        let mut modes = PanelModeController::new(internal_picker);
        modes.control(config.mode);

        let mut picker = Picker {
            engine,
            locale: config.locale,
            format,
            shape: config.shape,
            picker: config.picker,
            internal_picker,
            need_confirm: config.need_confirm.unwrap_or(complex),
            store,
            active,
            gate: SubmitGate::new(policy, rules, internal_picker),
            modes,
            default_picker_value: config.default_picker_value,
            panel_dates: [None, None],
            hover: None,
            presets: config.presets,
            events: Vec::new(),
        };
        if picker.is_open() {
            picker.on_open_transition(OpenConfig::default());
        } else {
            picker.sync_invalid();
        }
        picker
    }

    // ── Read side ────────────────────────────────────────────────────────────
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn field_format(&self) -> &FieldFormat {
        &self.format
    }

    pub fn shape(&self) -> ValueShape {
        self.shape
    }

    pub fn field_count(&self) -> usize {
        self.shape.field_count()
    }

    /// The externally requested granularity.
    pub fn picker(&self) -> PanelMode {
        self.picker
    }

    /// `DateTime` for a date picker with a time sub-panel.
    pub fn internal_picker(&self) -> PanelMode {
        self.internal_picker
    }

    pub fn needs_confirm(&self) -> bool {
        self.need_confirm
    }

    /// The committed value.
    pub fn value(&self) -> &PickerValue<E::Date> {
        self.store.committed()
    }

    pub fn calendar_value(&self) -> &PickerValue<E::Date> {
        self.store.calendar()
    }

    pub fn hover_value(&self) -> Option<&PickerValue<E::Date>> {
        self.hover.as_ref()
    }

    /// What the selector fields show: a hover preview, else the calendar value.
    pub fn display_value(&self) -> &PickerValue<E::Date> {
        self.hover.as_ref().unwrap_or_else(|| self.store.calendar())
    }

    pub fn display_text(&self) -> Vec<String> {
        self.format.format_value(&self.engine, self.display_value())
    }

    pub fn is_open(&self) -> bool {
        self.active.is_open()
    }

    pub fn active_index(&self) -> usize {
        self.active.active_index()
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.active.focused_index()
    }

    pub fn is_disabled(&self, index: usize) -> bool {
        self.active.is_disabled(index)
    }

    pub fn last_operation(&self) -> Option<LastOperation> {
        self.active.last_operation()
    }

    /// Panel mode of the active field.
    pub fn mode(&self) -> PanelMode {
        self.modes.mode(self.active.active_index())
    }

    pub fn modes(&self) -> [PanelMode; 2] {
        self.modes.modes()
    }

    pub fn invalid(&self, index: usize) -> bool {
        self.gate.is_reported_invalid(index)
    }

    pub fn presets(&self) -> &[Preset<E::Date>] {
        &self.presets
    }

    /// Month (or year, decade) shown by the active field's panel.
    pub fn panel_date(&self) -> E::Date {
        self.panel_date_at(self.active.active_index())
    }

    pub fn panel_date_at(&self, index: usize) -> E::Date {
        match self.panel_dates.get(index).cloned().flatten() {
            Some(date) => date,
            None => self.anchor(index),
        }
    }

    pub fn panel_context(&self) -> PanelContext<'_, E> {
        PanelContext {
            engine: &self.engine,
            locale: &self.locale,
            rules: self.gate.rules(),
            picker_date: self.panel_date(),
            value: self.display_value(),
            picker: self.internal_picker,
            active: self.active.active_index(),
        }
    }

    pub fn panel(&self, registry: &PanelRegistry<E>) -> PanelGrid<E::Date> {
        registry.render(self.mode(), &self.panel_context())
    }

    pub fn take_events(&mut self) -> Vec<PickerEvent<E::Date>> {
        std::mem::take(&mut self.events)
    }

    /// Imperative focus capability handed to the host.
    pub fn handle(&mut self) -> FocusHandle<'_, E> {
        FocusHandle { picker: self }
    }

    // ── Selector events ──────────────────────────────────────────────────────
    pub fn focus(&mut self, index: usize) {
        if index >= self.field_count() || self.active.is_disabled(index) {
            return;
        }
        self.active.set_last_operation(LastOperation::Input);
        self.set_open(true, OpenConfig::inherit());

        let leaving = self.active.active_index();
        if leaving != index && self.is_open() && !self.need_confirm && self.is_complex() {
            self.trigger_part_confirm(true);
        }
        self.move_focus(index);
    }

    pub fn blur(&mut self) {
        if !self.active.is_focused() {
            return;
        }
        self.active.blur();
        self.events.push(PickerEvent::ActiveIndexChange(None));
        if !self.is_open() && self.active.last_operation() == Some(LastOperation::Input) {
            self.active.take_last_operation();
            self.trigger_part_confirm(true);
        }
    }

    /// Click on the selector: focus a field if none is, then open.
    pub fn click(&mut self) {
        if self.active.focused_index().is_none() {
            let current = self.active.active_index();
            let target = if self.active.is_disabled(current) {
                self.active.first_enabled()
            } else {
                Some(current)
            };
            match target {
                Some(index) => self.focus(index),
                None => return,
            }
        }
        self.set_open(true, OpenConfig::default());
    }

    /// Typed text for one field. Empty text clears the slot; text that does
    /// not parse only marks the field invalid.
    pub fn input_text(&mut self, index: usize, text: &str) {
        if self.shape == ValueShape::Multiple
            || index >= self.field_count()
            || self.active.is_disabled(index)
        {
            return;
        }
        if self.active.focused_index() != Some(index) {
            self.focus(index);
        }
        self.active.set_last_operation(LastOperation::Input);
        self.set_open(true, OpenConfig::default());

        let text = text.trim();
        if text.is_empty() {
            self.gate.set_typing_invalid(index, false);
            let candidate = self.store.calendar().with_slot(index, None);
            self.promote(candidate);
        } else {
            match self.format.parse(&self.engine, text) {
                Some(date) => {
                    self.gate.set_typing_invalid(index, false);
                    let candidate = self.store.calendar().with_slot(index, Some(date.clone()));
                    self.promote(candidate);
                    self.set_panel_date(index, date, PickerValueSource::Reset);
                }
                None => {
                    debug!("field {}: cannot parse {:?}", index, text);
                    self.gate.set_typing_invalid(index, true);
                }
            }
        }
        self.sync_invalid();
    }

    /// Enter in a field.
    pub fn submit_key(&mut self) -> bool {
        self.trigger_part_confirm(false)
    }

    /// Tab commits the current field and leaves focus where it is; the host
    /// moves focus itself.
    pub fn tab_key(&mut self) -> bool {
        self.trigger_part_confirm(true)
    }

    // ── Popup events ─────────────────────────────────────────────────────────
    /// Open/close request from the host (click outside, Escape). A close
    /// consults the last operation: typed input is confirmed, an
    /// unconfirmed panel edit is dropped.
    pub fn request_open(&mut self, open: bool) {
        if open {
            self.set_open(true, OpenConfig::default());
            return;
        }
        if !self.is_open() {
            return;
        }
        match self.active.take_last_operation() {
            Some(LastOperation::Input) => {
                self.trigger_part_confirm(true);
            }
            Some(LastOperation::Panel) if !self.need_confirm && self.is_complex() => {
                self.trigger_part_confirm(false);
            }
            _ => {
                self.store.reset_calendar();
                self.gate.clear_typing();
                self.sync_invalid();
            }
        }
        self.set_open(false, OpenConfig::default());
    }

    /// Calendar cell click. Outside the picker granularity this drills
    /// down; at it, the date becomes the active field's calendar value.
    pub fn cell_select(&mut self, date: E::Date) {
        let index = self.active.active_index();
        let mode = self.modes.mode(index);
        if self.gate.rules().is_invalid(&self.engine, &date, mode) {
            debug!("ignoring disabled {} cell", mode);
            return;
        }
        self.active.set_last_operation(LastOperation::Panel);

        if let Some(next_mode) = mode.drill_down(self.internal_picker) {
            self.set_panel_date(index, date, PickerValueSource::Panel);
            self.set_mode(next_mode);
            return;
        }
        if mode != self.internal_picker {
            return;
        }
        let date = self.keep_time(index, date);
        self.select_value(index, date);
    }

    pub fn cell_hover(&mut self, date: Option<E::Date>) {
        let index = self.active.active_index();
        self.hover = date.map(|d| self.store.calendar().with_slot(index, Some(d)));
    }

    pub fn preset_hover(&mut self, index: Option<usize>) {
        let shape = self.shape;
        self.hover = index
            .and_then(|i| self.presets.get(i))
            .map(|p| p.value.clone().into_shape(shape));
    }

    /// OK button.
    pub fn confirm(&mut self) -> bool {
        self.active.set_last_operation(LastOperation::Panel);
        self.trigger_part_confirm(false)
    }

    /// Now/Today button: fills the active field with the current moment and
    /// confirms it.
    pub fn select_now(&mut self) -> bool {
        self.active.set_last_operation(LastOperation::Panel);
        let now = self.engine.now();
        let now = match self.internal_picker {
            PanelMode::DateTime | PanelMode::Time => now,
            _ => self.engine.with_time(&now, 0, 0, 0),
        };
        let index = self.active.active_index();
        self.set_panel_date(index, now.clone(), PickerValueSource::Reset);
        if self.shape == ValueShape::Multiple {
            self.select_value(index, now);
            return true;
        }
        let candidate = self.store.calendar().with_slot(index, Some(now));
        self.gate.set_typing_invalid(index, false);
        self.promote(candidate);
        self.sync_invalid();
        self.trigger_part_confirm(false)
    }

    /// Time sub-panel pick. Only a plain time picker without a confirm step
    /// commits right away.
    pub fn select_time(&mut self, hour: u32, minute: u32, second: u32) {
        if self.shape == ValueShape::Multiple {
            return;
        }
        self.active.set_last_operation(LastOperation::Panel);
        let index = self.active.active_index();
        let base = match self.store.calendar().get(index) {
            Some(date) => date.clone(),
            None => self.panel_date_at(index),
        };
        let date = self.engine.with_time(&base, hour, minute, second);
        let candidate = self.store.calendar().with_slot(index, Some(date));
        self.gate.set_typing_invalid(index, false);
        self.promote(candidate);
        self.sync_invalid();
        if !self.need_confirm && self.internal_picker == PanelMode::Time {
            self.trigger_part_confirm(false);
        }
    }

    /// Commits the empty value (subject to the empty policy) and always
    /// closes.
    pub fn clear(&mut self) {
        self.gate.clear_typing();
        let empty = PickerValue::empty(self.shape);
        self.gate.trigger_submit_change(
            &mut self.store,
            &self.engine,
            &self.format,
            Some(empty),
            &mut self.events,
        );
        self.hover = None;
        self.set_open(false, OpenConfig::force());
        self.sync_invalid();
    }

    /// Commits a preset value; closes only when it passed.
    pub fn preset_select(&mut self, value: PickerValue<E::Date>) -> bool {
        self.active.set_last_operation(LastOperation::Panel);
        let passed = self.gate.trigger_submit_change(
            &mut self.store,
            &self.engine,
            &self.format,
            Some(value),
            &mut self.events,
        );
        if passed {
            self.hover = None;
            self.set_open(false, OpenConfig::force());
        }
        self.sync_invalid();
        passed
    }

    // ── Panel navigation ─────────────────────────────────────────────────────
    /// Header drill (year/month buttons) or any explicit mode switch of the
    /// active field.
    pub fn set_mode(&mut self, mode: PanelMode) {
        let index = self.active.active_index();
        if let Some(modes) = self.modes.set(index, mode) {
            self.events.push(PickerEvent::PanelChange {
                value: self.store.calendar().clone(),
                modes,
            });
        }
    }

    /// Previous/next page of the active panel.
    pub fn shift_panel(&mut self, offset: i32) {
        let index = self.active.active_index();
        let date = self.panel_date_at(index);
        let next = match self.modes.mode(index) {
            PanelMode::Date | PanelMode::Week | PanelMode::DateTime => {
                self.engine.add_months(&date, offset)
            }
            PanelMode::Month => self.engine.add_years(&date, offset),
            PanelMode::Year => self.engine.add_years(&date, offset.saturating_mul(10)),
            PanelMode::Decade => self.engine.add_years(&date, offset.saturating_mul(100)),
            PanelMode::Time => return,
        };
        self.set_panel_date(index, next, PickerValueSource::Panel);
    }

    /// Super previous/next: a year at a time in day panels, otherwise the
    /// same page as `shift_panel`.
    pub fn shift_panel_years(&mut self, offset: i32) {
        let index = self.active.active_index();
        match self.modes.mode(index) {
            PanelMode::Date | PanelMode::Week | PanelMode::DateTime => {
                let date = self.panel_date_at(index);
                let next = self.engine.add_years(&date, offset);
                self.set_panel_date(index, next, PickerValueSource::Panel);
            }
            _ => self.shift_panel(offset),
        }
    }

    // ── Controlled props ─────────────────────────────────────────────────────
    /// External value update; `None` releases control.
    pub fn set_controlled_value(&mut self, value: Option<PickerValue<E::Date>>) {
        self.store.control(value);
        self.gate.clear_typing();
        self.sync_invalid();
    }

    pub fn set_controlled_open(&mut self, open: Option<bool>) {
        let was = self.is_open();
        self.active.control_open(open);
        if self.is_open() != was {
            self.on_open_transition(OpenConfig::default());
        }
    }

    pub fn set_controlled_mode(&mut self, modes: Option<[PanelMode; 2]>) {
        self.modes.control(modes);
    }

    // ── Internals ────────────────────────────────────────────────────────────
    fn is_complex(&self) -> bool {
        matches!(self.internal_picker, PanelMode::DateTime | PanelMode::Time)
    }

    fn set_open(&mut self, next: bool, config: OpenConfig) {
        let was = self.is_open();
        if let Some(requested) = self.active.set_open(next, config) {
            self.events.push(PickerEvent::OpenChange(requested));
        }
        if self.is_open() != was {
            self.on_open_transition(config);
        }
    }

    fn on_open_transition(&mut self, config: OpenConfig) {
        self.active.on_transition();
        if self.is_open() {
            debug!("popup opened on field {}", self.active.active_index());
            self.store.reset_calendar();
            self.gate.clear_typing();
            let index = self.active.active_index();
            self.modes.reset(index);
            self.panel_dates = [None, None];
            self.restore_panel_date(index);
        } else {
            debug!("popup closed");
            self.hover = None;
            if config.force {
                self.store.reset_calendar();
                self.gate.clear_typing();
            }
        }
        self.sync_invalid();
    }

    fn move_focus(&mut self, index: usize) {
        let before = self.active.focused_index();
        let moved = self.active.focus(index);
        if self.active.focused_index() != before {
            debug!("active field -> {}", index);
            self.events
                .push(PickerEvent::ActiveIndexChange(self.active.focused_index()));
        }
        if moved && self.is_open() {
            self.modes.reset(index);
            self.restore_panel_date(index);
        }
    }

    /// Confirms the active field. When another field still needs input,
    /// focus moves there unless `skip_focus`; otherwise the whole value is
    /// submitted and the popup closes if it passed.
    fn trigger_part_confirm(&mut self, skip_focus: bool) -> bool {
        if self.shape == ValueShape::Multiple {
            let passed = self.gate.trigger_submit_change(
                &mut self.store,
                &self.engine,
                &self.format,
                None,
                &mut self.events,
            );
            if passed {
                self.set_open(false, OpenConfig::force());
            }
            self.sync_invalid();
            return passed;
        }

        let index = self.active.active_index();
        let next = self.active.next_active_index(self.store.calendar());
        let passed = self.gate.flush(
            &mut self.store,
            &self.engine,
            &self.format,
            index,
            next.is_none(),
            &mut self.events,
        );
        self.sync_invalid();
        if !passed {
            return false;
        }
        match next {
            None => self.set_open(false, OpenConfig::force()),
            Some(next) => {
                if !skip_focus {
                    let target = self.active.sync_active().unwrap_or(next);
                    self.move_focus(target);
                }
            }
        }
        true
    }

    fn select_value(&mut self, index: usize, date: E::Date) {
        if let PickerValue::Multiple(list) = self.store.calendar() {
            let next = toggle_date(&self.engine, list, date, self.internal_picker);
            self.promote(PickerValue::Multiple(next));
            if !self.need_confirm {
                self.gate.trigger_submit_change(
                    &mut self.store,
                    &self.engine,
                    &self.format,
                    None,
                    &mut self.events,
                );
            }
            self.sync_invalid();
            return;
        }
        let candidate = self.store.calendar().with_slot(index, Some(date));
        self.gate.set_typing_invalid(index, false);
        self.promote(candidate);
        self.sync_invalid();
        if !self.need_confirm {
            self.trigger_part_confirm(false);
        }
    }

    /// A date+time pick keeps the time already chosen for the field.
    fn keep_time(&self, index: usize, date: E::Date) -> E::Date {
        if self.internal_picker != PanelMode::DateTime {
            return date;
        }
        match self.store.calendar().get(index) {
            Some(prev) => self.engine.with_time(
                &date,
                self.engine.hour(prev),
                self.engine.minute(prev),
                self.engine.second(prev),
            ),
            None => date,
        }
    }

    fn promote(&mut self, candidate: PickerValue<E::Date>) {
        if let Some(event) = self.store.promote(&self.engine, &self.format, candidate) {
            self.events.push(event);
        }
    }

    fn sync_invalid(&mut self) {
        let field_count = self.field_count();
        self.gate
            .sync_invalid(&self.engine, self.store.calendar(), field_count, &mut self.events);
    }

    /// Where a field's panel starts when nothing was navigated yet.
    fn anchor(&self, index: usize) -> E::Date {
        let calendar = self.store.calendar();
        let other = if index == 0 { 1 } else { 0 };
        let date = self
            .default_picker_value
            .get(index)
            .cloned()
            .flatten()
            .or_else(|| calendar.get(index).cloned())
            .or_else(|| {
                if self.field_count() > 1 {
                    calendar.get(other).cloned()
                } else {
                    None
                }
            })
            .unwrap_or_else(|| self.engine.now());
        self.gate.rules().clamp(&self.engine, date)
    }

    fn restore_panel_date(&mut self, index: usize) {
        let date = self.panel_date_at(index);
        self.set_panel_date(index, date, PickerValueSource::Reset);
    }

    fn set_panel_date(&mut self, index: usize, date: E::Date, source: PickerValueSource) {
        if let Some(slot) = self.panel_dates.get_mut(index) {
            *slot = Some(date.clone());
        }
        self.events.push(PickerEvent::PickerValueChange {
            index,
            date,
            source,
        });
    }
}

/// Focus capability returned to the host instead of a mutable ref.
pub struct FocusHandle<'a, E: DateEngine> {
    picker: &'a mut Picker<E>,
}

impl<E: DateEngine> FocusHandle<'_, E> {
    pub fn focus(&mut self, index: usize) {
        self.picker.focus(index);
    }

    pub fn blur(&mut self) {
        self.picker.blur();
    }

    pub fn native(&self) -> &Picker<E> {
        self.picker
    }
}
