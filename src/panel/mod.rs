pub mod date;
pub mod month;
pub mod time;
pub mod year;

pub use date::{DateBody, WeekBody};
pub use month::MonthBody;
pub use time::TimeBody;
pub use year::{DecadeBody, YearBody};

use crate::calc::boundary::DateRules;
use crate::calc::compare::{is_in_range, is_same};
use crate::calc::engine::DateEngine;
use crate::data::locale::Locale;
use crate::state::mode::PanelMode;
use crate::state::value::PickerValue;
use std::collections::HashMap;

/// One selectable cell of a panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelCell<D> {
    pub date: D,
    pub label: String,
    /// Inside the page being shown (not a leading/trailing filler cell).
    pub in_view: bool,
    pub today: bool,
    pub selected: bool,
    /// Strictly between the two endpoints of a range value.
    pub in_range: bool,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PanelGrid<D> {
    pub mode: PanelMode,
    pub header: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<PanelCell<D>>>,
}

impl<D> PanelGrid<D> {
    pub fn get(&self, row: usize, col: usize) -> Option<&PanelCell<D>> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Row and column of the first cell matching `pred`.
    pub fn position(&self, pred: impl Fn(&PanelCell<D>) -> bool) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.iter().position(&pred).map(|c| (r, c))
        })
    }

    pub fn cells(&self) -> impl Iterator<Item = &PanelCell<D>> {
        self.rows.iter().flatten()
    }
}

/// What a panel body needs to render: the date engine, the locale, the
/// disabled rules, the page anchor and the value to highlight.
pub struct PanelContext<'a, E: DateEngine> {
    pub engine: &'a E,
    pub locale: &'a Locale,
    pub rules: &'a DateRules<E::Date>,
    /// Any date inside the page to show.
    pub picker_date: E::Date,
    pub value: &'a PickerValue<E::Date>,
    /// Internal picker granularity.
    pub picker: PanelMode,
    pub active: usize,
}

impl<E: DateEngine> PanelContext<'_, E> {
    /// Builds a cell whose flags are all evaluated at `mode`.
    pub fn cell(&self, date: E::Date, label: String, in_view: bool, mode: PanelMode) -> PanelCell<E::Date> {
        self.cell_at(date, label, in_view, mode, mode)
    }

    /// Builds a cell checked for disabled/today at `mode` but selected and
    /// range-highlighted at `select`. A week picker shows day cells that
    /// are selected a whole week at a time.
    pub fn cell_at(
        &self,
        date: E::Date,
        label: String,
        in_view: bool,
        mode: PanelMode,
        select: PanelMode,
    ) -> PanelCell<E::Date> {
        let engine = self.engine;
        let today = is_same(engine, &date, &engine.now(), mode);
        let selected = self
            .value
            .slots()
            .into_iter()
            .flatten()
            .any(|v| is_same(engine, v, &date, select));
        let in_range = match self.value {
            PickerValue::Range([Some(start), Some(end)]) => {
                is_in_range(engine, &date, start, end, select)
            }
            _ => false,
        };
        let disabled = self.rules.is_disabled(engine, &date, mode);
        PanelCell {
            date,
            label,
            in_view,
            today,
            selected,
            in_range,
            disabled,
        }
    }

    pub fn format(&self, date: &E::Date, pattern: &str) -> String {
        self.engine.format(&self.locale.locale, date, pattern)
    }

    /// First instant of the anchor's month.
    pub fn month_start(&self) -> E::Date {
        let first = self.engine.with_day(&self.picker_date, 1);
        self.engine.with_time(&first, 0, 0, 0)
    }

    /// First instant of the anchor's year.
    pub fn year_start(&self) -> E::Date {
        self.engine.with_month(&self.month_start(), 1)
    }
}

/// Renders one kind of panel.
pub trait PanelBody<E: DateEngine> {
    fn render(&self, ctx: &PanelContext<'_, E>) -> PanelGrid<E::Date>;
}

/// Dispatches a panel mode to its body. The built-in bodies can be replaced
/// per instance.
pub struct PanelRegistry<E: DateEngine> {
    overrides: HashMap<PanelMode, Box<dyn PanelBody<E>>>,
}

impl<E: DateEngine> Default for PanelRegistry<E> {
    fn default() -> Self {
        PanelRegistry {
            overrides: HashMap::new(),
        }
    }
}

impl<E: DateEngine> PanelRegistry<E> {
    pub fn new() -> Self {
        PanelRegistry::default()
    }

    pub fn with_override(mut self, mode: PanelMode, body: impl PanelBody<E> + 'static) -> Self {
        self.overrides.insert(mode, Box::new(body));
        self
    }

    pub fn is_overridden(&self, mode: PanelMode) -> bool {
        self.overrides.contains_key(&mode)
    }

    /// `DateTime` renders the day grid; its time column is the `Time` panel.
    pub fn render(&self, mode: PanelMode, ctx: &PanelContext<'_, E>) -> PanelGrid<E::Date> {
        if let Some(body) = self.overrides.get(&mode) {
            return body.render(ctx);
        }
        match mode {
            PanelMode::Date | PanelMode::DateTime => DateBody.render(ctx),
            PanelMode::Week => WeekBody.render(ctx),
            PanelMode::Month => MonthBody.render(ctx),
            PanelMode::Year => YearBody.render(ctx),
            PanelMode::Decade => DecadeBody.render(ctx),
            PanelMode::Time => TimeBody.render(ctx),
        }
    }
}

/// Splits a flat cell list into rows of `width`.
pub(crate) fn into_rows<D>(cells: Vec<PanelCell<D>>, width: usize) -> Vec<Vec<PanelCell<D>>> {
    let mut rows = Vec::new();
    let mut cells = cells.into_iter().peekable();
    while cells.peek().is_some() {
        rows.push(cells.by_ref().take(width).collect());
    }
    rows
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::calc::chrono_engine::ChronoEngine;
    use chrono::{NaiveDate, NaiveDateTime};

    pub fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    pub fn engine() -> ChronoEngine {
        ChronoEngine::fixed(dt(1990, 9, 3))
    }

    pub fn context<'a>(
        engine: &'a ChronoEngine,
        locale: &'a Locale,
        rules: &'a DateRules<NaiveDateTime>,
        value: &'a PickerValue<NaiveDateTime>,
        picker_date: NaiveDateTime,
    ) -> PanelContext<'a, ChronoEngine> {
        PanelContext {
            engine,
            locale,
            rules,
            picker_date,
            value,
            picker: PanelMode::Date,
            active: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::calc::chrono_engine::ChronoEngine;

    struct Blank;

    impl PanelBody<ChronoEngine> for Blank {
        fn render(&self, ctx: &PanelContext<'_, ChronoEngine>) -> PanelGrid<chrono::NaiveDateTime> {
            PanelGrid {
                mode: PanelMode::Month,
                header: ctx.format(&ctx.picker_date, "custom %Y"),
                columns: Vec::new(),
                rows: Vec::new(),
            }
        }
    }

    #[test]
    fn test_default_dispatch() {
        let engine = engine();
        let locale = Locale::en_us();
        let rules = DateRules::default();
        let value = PickerValue::Single(None);
        let ctx = context(&engine, &locale, &rules, &value, dt(2025, 4, 9));
        let registry = PanelRegistry::new();
        assert_eq!(registry.render(PanelMode::Date, &ctx).mode, PanelMode::Date);
        assert_eq!(registry.render(PanelMode::DateTime, &ctx).mode, PanelMode::Date);
        assert_eq!(registry.render(PanelMode::Decade, &ctx).mode, PanelMode::Decade);
    }

    #[test]
    fn test_override_replaces_one_mode() {
        let engine = engine();
        let locale = Locale::en_us();
        let rules = DateRules::default();
        let value = PickerValue::Single(None);
        let ctx = context(&engine, &locale, &rules, &value, dt(2025, 4, 9));
        let registry = PanelRegistry::new().with_override(PanelMode::Month, Blank);
        assert!(registry.is_overridden(PanelMode::Month));
        assert_eq!(registry.render(PanelMode::Month, &ctx).header, "custom 2025");
        assert_eq!(registry.render(PanelMode::Year, &ctx).header, "2020-2029");
    }

    #[test]
    fn test_cell_flags() {
        let engine = engine();
        let locale = Locale::en_us();
        let rules = DateRules::new(None, Some(dt(2025, 1, 3)), None);
        let value = PickerValue::Range([Some(dt(2025, 1, 5)), Some(dt(2025, 1, 9))]);
        let ctx = context(&engine, &locale, &rules, &value, dt(2025, 1, 1));

        let start = ctx.cell(dt(2025, 1, 5), "5".to_string(), true, PanelMode::Date);
        assert!(start.selected);
        assert!(!start.in_range);
        let middle = ctx.cell(dt(2025, 1, 7), "7".to_string(), true, PanelMode::Date);
        assert!(middle.in_range);
        let early = ctx.cell(dt(2025, 1, 2), "2".to_string(), true, PanelMode::Date);
        assert!(early.disabled);
        let today = ctx.cell(dt(1990, 9, 3), "3".to_string(), true, PanelMode::Date);
        assert!(today.today);
    }

    #[test]
    fn test_into_rows_and_position() {
        let engine = engine();
        let locale = Locale::en_us();
        let rules = DateRules::default();
        let value = PickerValue::Single(None);
        let ctx = context(&engine, &locale, &rules, &value, dt(2025, 1, 1));
        let cells: Vec<_> = (1..=7)
            .map(|d| ctx.cell(dt(2025, 1, d), d.to_string(), true, PanelMode::Date))
            .collect();
        let grid = PanelGrid {
            mode: PanelMode::Date,
            header: String::new(),
            columns: Vec::new(),
            rows: into_rows(cells, 3),
        };
        assert_eq!(grid.rows.len(), 3);
        assert_eq!(grid.rows[2].len(), 1);
        assert_eq!(grid.position(|c| c.label == "5"), Some((1, 1)));
        assert_eq!(grid.get(2, 0).map(|c| c.label.as_str()), Some("7"));
        assert_eq!(grid.cells().count(), 7);
    }
}
