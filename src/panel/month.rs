use crate::calc::engine::DateEngine;
use crate::panel::{into_rows, PanelBody, PanelContext, PanelGrid};
use crate::state::mode::PanelMode;

/// The twelve months of the anchor year, three per row.
pub struct MonthBody;

impl<E: DateEngine> PanelBody<E> for MonthBody {
    fn render(&self, ctx: &PanelContext<'_, E>) -> PanelGrid<E::Date> {
        let engine = ctx.engine;
        let base = ctx.year_start();
        let cells = (1..=12)
            .map(|month| {
                let date = engine.with_month(&base, month);
                let label = ctx.locale.month_label(month).to_string();
                ctx.cell(date, label, true, PanelMode::Month)
            })
            .collect();
        PanelGrid {
            mode: PanelMode::Month,
            header: ctx.format(&base, &ctx.locale.year_header_format),
            columns: Vec::new(),
            rows: into_rows(cells, 3),
        }
    }
}
