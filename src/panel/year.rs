use crate::calc::engine::DateEngine;
use crate::panel::{into_rows, PanelBody, PanelContext, PanelGrid};
use crate::state::mode::PanelMode;

/// The anchor's decade plus one year on each side.
pub struct YearBody;

/// The anchor's century plus one decade on each side.
pub struct DecadeBody;

impl<E: DateEngine> PanelBody<E> for YearBody {
    fn render(&self, ctx: &PanelContext<'_, E>) -> PanelGrid<E::Date> {
        let engine = ctx.engine;
        let base = ctx.year_start();
        let year = engine.year(&base);
        let start = year - year.rem_euclid(10);
        let cells = (0..12)
            .map(|i| {
                let y = start - 1 + i;
                let date = engine.with_year(&base, y);
                ctx.cell(date, y.to_string(), (start..start + 10).contains(&y), PanelMode::Year)
            })
            .collect();
        PanelGrid {
            mode: PanelMode::Year,
            header: format!("{}-{}", start, start + 9),
            columns: Vec::new(),
            rows: into_rows(cells, 3),
        }
    }
}

impl<E: DateEngine> PanelBody<E> for DecadeBody {
    fn render(&self, ctx: &PanelContext<'_, E>) -> PanelGrid<E::Date> {
        let engine = ctx.engine;
        let base = ctx.year_start();
        let year = engine.year(&base);
        let start = year - year.rem_euclid(100);
        let cells = (0..12)
            .map(|i| {
                let decade = start - 10 + i * 10;
                let date = engine.with_year(&base, decade);
                let label = format!("{}-{}", decade, decade + 9);
                let in_view = (start..start + 100).contains(&decade);
                ctx.cell(date, label, in_view, PanelMode::Decade)
            })
            .collect();
        PanelGrid {
            mode: PanelMode::Decade,
            header: format!("{}-{}", start, start + 99),
            columns: Vec::new(),
            rows: into_rows(cells, 3),
        }
    }
}
