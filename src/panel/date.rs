use crate::calc::compare::week_start;
use crate::calc::engine::DateEngine;
use crate::panel::{into_rows, PanelBody, PanelContext, PanelGrid};
use crate::state::mode::PanelMode;

const WEEK_DAYS: usize = 7;
const WEEK_ROWS: usize = 6;

/// Six weeks around the anchor month, starting on the locale's first day.
pub struct DateBody;

/// The date grid with whole-week selection.
pub struct WeekBody;

impl<E: DateEngine> PanelBody<E> for DateBody {
    fn render(&self, ctx: &PanelContext<'_, E>) -> PanelGrid<E::Date> {
        day_grid(ctx, PanelMode::Date)
    }
}

impl<E: DateEngine> PanelBody<E> for WeekBody {
    fn render(&self, ctx: &PanelContext<'_, E>) -> PanelGrid<E::Date> {
        let mut grid = day_grid(ctx, PanelMode::Week);
        grid.mode = PanelMode::Week;
        grid
    }
}

fn day_grid<E: DateEngine>(ctx: &PanelContext<'_, E>, select: PanelMode) -> PanelGrid<E::Date> {
    let engine = ctx.engine;
    let locale = &ctx.locale.locale;
    let first = ctx.month_start();
    let month = engine.month(&first);
    let start = week_start(engine, locale, &first);
    let first_day = engine.week_first_day(locale);

    let columns = (0..WEEK_DAYS as u32)
        .map(|i| ctx.locale.week_day_label(first_day + i).to_string())
        .collect();

    let cells = (0..WEEK_DAYS * WEEK_ROWS)
        .map(|offset| {
            let date = engine.add_days(&start, offset as i64);
            let label = ctx.format(&date, &ctx.locale.day_format);
            let in_view = engine.month(&date) == month;
            ctx.cell_at(date, label, in_view, PanelMode::Date, select)
        })
        .collect();

    PanelGrid {
        mode: PanelMode::Date,
        header: ctx.format(&first, &ctx.locale.month_header_format),
        columns,
        rows: into_rows(cells, WEEK_DAYS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::boundary::DateRules;
    use crate::data::locale::Locale;
    use crate::panel::test_support::{context, dt, engine};
    use crate::state::value::PickerValue;

    #[test]
    fn test_header_and_columns_en_us() {
        let engine = engine();
        let locale = Locale::en_us();
        let rules = DateRules::default();
        let value = PickerValue::Single(None);
        let ctx = context(&engine, &locale, &rules, &value, dt(1998, 12, 20));
        let grid = DateBody.render(&ctx);
        assert_eq!(grid.header, "1998-12");
        assert_eq!(grid.columns[0], "Su");
        assert_eq!(grid.rows.len(), 6);
        assert!(grid.rows.iter().all(|r| r.len() == 7));
    }

    #[test]
    fn test_grid_starts_on_week_start() {
        let engine = engine();
        let locale = Locale::en_us();
        let rules = DateRules::default();
        let value = PickerValue::Single(None);
        // 2025-01-01 is a Wednesday; the Sunday before is 2024-12-29
        let ctx = context(&engine, &locale, &rules, &value, dt(2025, 1, 15));
        let grid = DateBody.render(&ctx);
        let first = grid.get(0, 0).unwrap();
        assert_eq!(first.date, dt(2024, 12, 29));
        assert!(!first.in_view);
        assert_eq!(grid.get(0, 3).unwrap().label, "1");
        assert!(grid.get(0, 3).unwrap().in_view);
    }

    #[test]
    fn test_monday_locale_week_start() {
        let engine = engine();
        let locale = Locale::zh_cn();
        let rules = DateRules::default();
        let value = PickerValue::Single(None);
        let ctx = context(&engine, &locale, &rules, &value, dt(2025, 1, 15));
        let grid = DateBody.render(&ctx);
        assert_eq!(grid.header, "2025年1月");
        assert_eq!(grid.columns[0], "一");
        assert_eq!(grid.get(0, 0).unwrap().date, dt(2024, 12, 30));
    }

    #[test]
    fn test_selected_day() {
        let engine = engine();
        let locale = Locale::en_us();
        let rules = DateRules::default();
        let value = PickerValue::Single(Some(dt(2025, 1, 15)));
        let ctx = context(&engine, &locale, &rules, &value, dt(2025, 1, 1));
        let grid = DateBody.render(&ctx);
        let selected: Vec<_> = grid.cells().filter(|c| c.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].label, "15");
    }

    #[test]
    fn test_week_body_selects_whole_week() {
        let engine = engine();
        let locale = Locale::en_us();
        let rules = DateRules::default();
        // Wednesday 2025-01-15; ISO week runs Monday 13th to Sunday 19th
        let value = PickerValue::Single(Some(dt(2025, 1, 15)));
        let ctx = context(&engine, &locale, &rules, &value, dt(2025, 1, 1));
        let grid = WeekBody.render(&ctx);
        assert_eq!(grid.mode, PanelMode::Week);
        assert_eq!(grid.cells().filter(|c| c.selected).count(), 7);
    }
}
