use crate::calc::engine::DateEngine;
use crate::panel::{PanelBody, PanelCell, PanelContext, PanelGrid};
use crate::state::mode::PanelMode;

/// Hour, minute and second columns for the active field, one row each.
pub struct TimeBody;

impl<E: DateEngine> PanelBody<E> for TimeBody {
    fn render(&self, ctx: &PanelContext<'_, E>) -> PanelGrid<E::Date> {
        let engine = ctx.engine;
        let current = ctx.value.get(ctx.active);
        let base = current.cloned().unwrap_or_else(|| ctx.picker_date.clone());
        let (h, m, s) = (engine.hour(&base), engine.minute(&base), engine.second(&base));

        let hours = (0..24)
            .map(|hour| time_cell(ctx, engine.with_time(&base, hour, m, s), hour, current.map(|d| engine.hour(d))))
            .collect();
        let minutes = (0..60)
            .map(|minute| time_cell(ctx, engine.with_time(&base, h, minute, s), minute, current.map(|d| engine.minute(d))))
            .collect();
        let seconds = (0..60)
            .map(|second| time_cell(ctx, engine.with_time(&base, h, m, second), second, current.map(|d| engine.second(d))))
            .collect();

        PanelGrid {
            mode: PanelMode::Time,
            header: ctx.format(&base, &ctx.locale.field_time_format),
            columns: vec!["HH".to_string(), "mm".to_string(), "ss".to_string()],
            rows: vec![hours, minutes, seconds],
        }
    }
}

fn time_cell<E: DateEngine>(
    ctx: &PanelContext<'_, E>,
    date: E::Date,
    unit: u32,
    current: Option<u32>,
) -> PanelCell<E::Date> {
    let disabled = ctx.rules.is_disabled(ctx.engine, &date, PanelMode::Time);
    PanelCell {
        date,
        label: format!("{:02}", unit),
        in_view: true,
        today: false,
        selected: current == Some(unit),
        in_range: false,
        disabled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::boundary::DateRules;
    use crate::data::locale::Locale;
    use crate::panel::test_support::{context, dt, engine};
    use crate::state::value::PickerValue;
    use chrono::NaiveDate;

    #[test]
    fn test_three_columns_with_selection() {
        let engine = engine();
        let locale = Locale::en_us();
        let rules = DateRules::default();
        let at = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(13, 5, 59)
            .unwrap();
        let value = PickerValue::Single(Some(at));
        let ctx = context(&engine, &locale, &rules, &value, dt(2025, 1, 1));
        let grid = TimeBody.render(&ctx);
        assert_eq!(grid.header, "13:05:59");
        assert_eq!(grid.rows[0].len(), 24);
        assert_eq!(grid.rows[1].len(), 60);
        assert!(grid.get(0, 13).unwrap().selected);
        assert!(grid.get(1, 5).unwrap().selected);
        assert!(grid.get(2, 59).unwrap().selected);
        assert_eq!(grid.cells().filter(|c| c.selected).count(), 3);
        let noon = grid.get(0, 12).unwrap();
        assert_eq!(noon.label, "12");
        assert_eq!(
            noon.date,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(12, 5, 59).unwrap()
        );
    }

    #[test]
    fn test_empty_value_selects_nothing() {
        let engine = engine();
        let locale = Locale::en_us();
        let rules = DateRules::default();
        let value = PickerValue::Single(None);
        let ctx = context(&engine, &locale, &rules, &value, dt(2025, 1, 1));
        let grid = TimeBody.render(&ctx);
        assert_eq!(grid.header, "00:00:00");
        assert_eq!(grid.cells().filter(|c| c.selected).count(), 0);
    }
}
