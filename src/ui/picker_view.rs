use crate::calc::chrono_engine::ChronoEngine;
use crate::panel::{PanelCell, PanelGrid, PanelRegistry};
use crate::state::{PanelMode, Picker, PickerEvent, ValueShape};
use anyhow::Result;
use chrono::{NaiveDateTime, Timelike};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io::Stdout;
use std::time::Duration as StdDuration;

const RANGE_BG: Color = Color::Rgb(40, 44, 52);
const EVENT_LOG_LEN: usize = 6;
/// Cells shown per row of the time panel.
const TIME_WINDOW: usize = 12;

type Grid = PanelGrid<NaiveDateTime>;

pub struct App {
    pub picker: Picker<ChronoEngine>,
    registry: PanelRegistry<ChronoEngine>,
    /// Row and column of the highlighted panel cell.
    cursor: (usize, usize),
    /// Text typed into the active field, applied on Enter or Tab.
    input_buffer: String,
    /// Mode and header of the page the cursor was placed on.
    page: Option<(PanelMode, String)>,
    log: Vec<String>,
}

impl App {
    pub fn new(picker: Picker<ChronoEngine>) -> Self {
        let mut app = App {
            picker,
            registry: PanelRegistry::new(),
            cursor: (0, 0),
            input_buffer: String::new(),
            page: None,
            log: Vec::new(),
        };
        app.after_key();
        app
    }

    pub fn grid(&self) -> Grid {
        self.picker.panel(&self.registry)
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        if modifiers.contains(KeyModifiers::ALT) {
            match code {
                KeyCode::Up => self.adjust_time(1, 0),
                KeyCode::Down => self.adjust_time(-1, 0),
                KeyCode::Right => self.adjust_time(0, 1),
                KeyCode::Left => self.adjust_time(0, -1),
                _ => {}
            }
            self.after_key();
            return false;
        }

        let shift = modifiers.contains(KeyModifiers::SHIFT);
        match code {
            KeyCode::Esc => {
                if !self.input_buffer.is_empty() {
                    self.input_buffer.clear();
                } else if self.picker.is_open() {
                    self.picker.request_open(false);
                } else {
                    return true;
                }
            }
            KeyCode::Char('q') if !self.picker.is_open() && self.input_buffer.is_empty() => {
                return true;
            }
            KeyCode::Enter => {
                if !self.input_buffer.is_empty() {
                    self.apply_buffer();
                    self.picker.submit_key();
                } else if self.picker.is_open() {
                    self.select_cursor();
                } else {
                    self.picker.click();
                }
            }
            KeyCode::Tab => self.tab(1),
            KeyCode::BackTab => self.tab(-1),
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::PageUp if shift => self.picker.shift_panel_years(-1),
            KeyCode::PageDown if shift => self.picker.shift_panel_years(1),
            KeyCode::PageUp => self.picker.shift_panel(-1),
            KeyCode::PageDown => self.picker.shift_panel(1),
            KeyCode::Delete => {
                self.input_buffer.clear();
                self.picker.clear();
            }
            KeyCode::Backspace => {
                if self.input_buffer.pop().is_none() {
                    let index = self.picker.active_index();
                    self.picker.input_text(index, "");
                }
            }
            KeyCode::F(n) => self.select_preset(n),
            KeyCode::Char(c) if is_input_char(c) => self.input_buffer.push(c),
            KeyCode::Char('u') => {
                if let Some(up) = self.picker.mode().drill_up() {
                    self.picker.set_mode(up);
                }
            }
            KeyCode::Char('t') => {
                self.picker.select_now();
            }
            KeyCode::Char('o') => {
                self.picker.confirm();
            }
            _ => {}
        }
        self.after_key();
        false
    }

    fn apply_buffer(&mut self) {
        let text = std::mem::take(&mut self.input_buffer);
        let index = self.picker.active_index();
        self.picker.input_text(index, &text);
    }

    /// Confirms the current field and moves to the next one of a range.
    fn tab(&mut self, step: isize) {
        if !self.input_buffer.is_empty() {
            self.apply_buffer();
        }
        self.picker.tab_key();
        let count = self.picker.field_count() as isize;
        if count > 1 {
            let next = (self.picker.active_index() as isize + step).rem_euclid(count);
            self.picker.focus(next as usize);
        }
    }

    fn select_cursor(&mut self) {
        let grid = self.grid();
        let Some(cell) = grid.get(self.cursor.0, self.cursor.1) else {
            return;
        };
        if grid.mode == PanelMode::Time {
            let date = cell.date;
            self.picker
                .select_time(date.hour(), date.minute(), date.second());
        } else {
            self.picker.cell_select(cell.date);
        }
    }

    fn select_preset(&mut self, key: u8) {
        let value = self
            .picker
            .presets()
            .get(usize::from(key.saturating_sub(1)))
            .map(|p| p.value.clone());
        if let Some(value) = value {
            self.picker.preset_select(value);
        }
    }

    fn move_cursor(&mut self, dr: isize, dc: isize) {
        let grid = self.grid();
        if grid.rows.is_empty() {
            return;
        }
        let rows = grid.rows.len() as isize;
        let row = (self.cursor.0 as isize + dr).clamp(0, rows - 1) as usize;
        let cols = grid.rows[row].len().max(1) as isize;
        let col = (self.cursor.1 as isize + dc).clamp(0, cols - 1) as usize;
        self.cursor = (row, col);
        if self.picker.is_open() && grid.mode != PanelMode::Time {
            let hovered = grid.get(row, col).map(|c| c.date);
            self.picker.cell_hover(hovered);
        }
    }

    fn adjust_time(&mut self, hours: i32, minutes: i32) {
        if !matches!(
            self.picker.internal_picker(),
            PanelMode::DateTime | PanelMode::Time
        ) {
            return;
        }
        let index = self.picker.active_index();
        let base = match self.picker.calendar_value().get(index) {
            Some(date) => *date,
            None => self.picker.panel_date(),
        };
        let hour = (base.hour() as i32 + hours).rem_euclid(24) as u32;
        let minute = (base.minute() as i32 + minutes).rem_euclid(60) as u32;
        self.picker.select_time(hour, minute, base.second());
    }

    /// Drains picker events into the log and re-places the cursor when the
    /// page changed.
    fn after_key(&mut self) {
        for event in self.picker.take_events() {
            self.log.push(describe_event(&event));
        }
        if self.log.len() > EVENT_LOG_LEN {
            let excess = self.log.len() - EVENT_LOG_LEN;
            self.log.drain(..excess);
        }

        let grid = self.grid();
        let header = if grid.mode == PanelMode::Time {
            String::new()
        } else {
            grid.header.clone()
        };
        let page = Some((grid.mode, header));
        if page != self.page {
            self.page = page;
            self.cursor = initial_cursor(&grid);
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        let size = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                        // fields
                Constraint::Min(10),                          // panel
                Constraint::Length(2),                        // presets
                Constraint::Length(EVENT_LOG_LEN as u16 + 1), // events
                Constraint::Length(5),                        // help
            ])
            .split(size);

        self.render_fields(f, chunks[0]);
        self.render_panel(f, chunks[1]);
        self.render_presets(f, chunks[2]);
        self.render_events(f, chunks[3]);
        render_help(f, chunks[4]);
    }

    fn render_fields(&self, f: &mut Frame, area: Rect) {
        let texts = self.picker.display_text();
        let mut spans = Vec::new();
        let fields: Vec<String> = match self.picker.shape() {
            ValueShape::Multiple => vec![texts.join(", ")],
            _ => texts,
        };
        for (i, text) in fields.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  →  "));
            }
            let active = i == self.picker.active_index() && self.picker.focused_index().is_some();
            let shown = if active && !self.input_buffer.is_empty() {
                format!("{}_", self.input_buffer)
            } else if text.is_empty() {
                self.picker.field_format().primary().to_string()
            } else {
                text.clone()
            };
            let mut style = if text.is_empty() && self.input_buffer.is_empty() {
                Style::default().add_modifier(Modifier::DIM)
            } else {
                Style::default()
            };
            if self.picker.invalid(i) {
                style = style.fg(Color::Red);
            }
            if active {
                style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
            }
            if self.picker.is_disabled(i) {
                style = style.fg(Color::DarkGray);
            }
            spans.push(Span::styled(shown, style));
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" datepick · {} ", self.picker.picker()));
        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_panel(&self, f: &mut Frame, area: Rect) {
        if !self.picker.is_open() {
            let p = Paragraph::new("Press Enter to open the calendar.")
                .style(Style::default().add_modifier(Modifier::DIM));
            f.render_widget(p, area);
            return;
        }
        let grid = self.grid();
        let mut lines = vec![Line::from(Span::styled(
            grid.header.clone(),
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ))];

        let width = grid
            .cells()
            .map(|c| c.label.chars().count())
            .chain(grid.columns.iter().map(|c| c.chars().count()))
            .max()
            .unwrap_or(2);

        if !grid.columns.is_empty() && grid.mode != PanelMode::Time {
            let header: Vec<Span> = grid
                .columns
                .iter()
                .map(|c| Span::raw(format!("{:>w$} ", c, w = width)))
                .collect();
            lines.push(Line::from(header));
        }

        for (r, row) in grid.rows.iter().enumerate() {
            let mut spans = Vec::new();
            let visible = if grid.mode == PanelMode::Time {
                spans.push(Span::raw(format!("{:<3}", grid.columns.get(r).map_or("", String::as_str))));
                let focus = if r == self.cursor.0 {
                    self.cursor.1
                } else {
                    row.iter().position(|c| c.selected).unwrap_or(0)
                };
                visible_range(row.len(), focus, TIME_WINDOW)
            } else {
                0..row.len()
            };
            for c in visible {
                let cell = &row[c];
                let style = cell_style(cell, (r, c) == self.cursor);
                spans.push(Span::styled(format!("{:>w$}", cell.label, w = width), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        if self.picker.internal_picker() == PanelMode::DateTime {
            let index = self.picker.active_index();
            let time = self
                .picker
                .calendar_value()
                .get(index)
                .map(|d| d.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "--:--:--".to_string());
            lines.push(Line::from(""));
            lines.push(Line::from(format!("Time  {}", time)));
        }

        let block = Block::default().borders(Borders::NONE);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_presets(&self, f: &mut Frame, area: Rect) {
        let presets = self.picker.presets();
        if presets.is_empty() {
            return;
        }
        let spans: Vec<Span> = presets
            .iter()
            .take(12)
            .enumerate()
            .map(|(i, p)| Span::raw(format!("F{} {}   ", i + 1, p.label)))
            .collect();
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_events(&self, f: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from(Span::styled(
            "Events",
            Style::default().add_modifier(Modifier::DIM),
        ))];
        for entry in &self.log {
            lines.push(Line::from(format!("  {}", entry)));
        }
        f.render_widget(Paragraph::new(lines), area);
    }
}

fn render_help(f: &mut Frame, area: Rect) {
    let key_rows: Vec<Row> = vec![
        Row::new(vec!["Enter", "Open / select", "← → ↑ ↓", "Move"]),
        Row::new(vec!["Tab", "Next field", "PgUp/PgDn", "Prev/next page (+Shift: year)"]),
        Row::new(vec!["u", "Drill up", "t / o", "Now / OK"]),
        Row::new(vec!["Del", "Clear", "Alt+arrows", "Adjust time"]),
        Row::new(vec!["Esc", "Close / quit", "F1-F12", "Presets"]),
    ];
    let help_table = Table::new(
        key_rows,
        [
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Length(30),
        ],
    )
    .block(Block::default().borders(Borders::NONE))
    .column_spacing(1);
    f.render_widget(help_table, area);
}

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}

// ── Panel helpers ─────────────────────────────────────────────────────────────

fn is_input_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '-' | ':' | '/' | ' ' | 'W')
}

/// Selected cell in view, else today, else the first cell in view.
fn initial_cursor(grid: &Grid) -> (usize, usize) {
    grid.position(|c| c.selected && c.in_view)
        .or_else(|| grid.position(|c| c.today && c.in_view))
        .or_else(|| grid.position(|c| c.in_view))
        .unwrap_or((0, 0))
}

/// A window of `width` indexes out of `len` that keeps `focus` visible.
fn visible_range(len: usize, focus: usize, width: usize) -> std::ops::Range<usize> {
    if len <= width {
        return 0..len;
    }
    let start = focus.saturating_sub(width / 2).min(len - width);
    start..start + width
}

pub(crate) fn cell_style(cell: &PanelCell<NaiveDateTime>, is_cursor: bool) -> Style {
    let mut style = if cell.disabled {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
    } else if cell.selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if cell.in_range {
        Style::default().bg(RANGE_BG)
    } else if !cell.in_view {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };
    if cell.today {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if is_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

fn describe_event(event: &PickerEvent<NaiveDateTime>) -> String {
    match event {
        PickerEvent::Change { text, .. } => format!("change {:?}", text),
        PickerEvent::CalendarChange { text, range, .. } => match range {
            Some(slot) => format!("calendar {:?} ({:?})", text, slot),
            None => format!("calendar {:?}", text),
        },
        PickerEvent::OpenChange(open) => format!("open {}", open),
        PickerEvent::PanelChange { modes, .. } => format!("panel {} / {}", modes[0], modes[1]),
        PickerEvent::PickerValueChange {
            index,
            date,
            source,
        } => format!("picker value {} -> {} ({:?})", index, date.format("%Y-%m-%d"), source),
        PickerEvent::InvalidChange { index, invalid } => format!("invalid {} = {}", index, invalid),
        PickerEvent::ActiveIndexChange(index) => match index {
            Some(i) => format!("active field {}", i),
            None => "blur".to_string(),
        },
    }
}
