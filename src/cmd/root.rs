use crate::calc::chrono_engine::ChronoEngine;
use crate::cmd::{load_settings, seed_value, write_report, Overrides, ValueReport};
use crate::state::Picker;
use crate::ui::picker_view::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::{Context, Result};

/// Interactive picker. Prints the committed value as JSON on exit.
pub fn run(overrides: &Overrides, values: &[String]) -> Result<()> {
    let settings = load_settings(overrides)?;
    let mut config = settings.to_config()?;
    if !values.is_empty() {
        let seed = seed_value(settings.shape, values).context("invalid --value")?;
        config = config.default_value(seed);
    }
    let picker = Picker::new(ChronoEngine::new(), config);

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let mut app = App::new(picker);
    let result = run_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    result?;

    let picker = &app.picker;
    let report = ValueReport {
        passed: None,
        value: picker.value(),
        text: picker.field_format().format_value(picker.engine(), picker.value()),
    };
    write_report(&report, &mut std::io::stdout())
}
