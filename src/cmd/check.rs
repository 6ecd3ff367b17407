use crate::calc::chrono_engine::ChronoEngine;
use crate::calc::engine::DateEngine;
use crate::cmd::{load_settings, write_report, Overrides, ValueReport};
use crate::state::{Picker, PickerValue, ValueShape};
use anyhow::{bail, Result};
use log::debug;

/// Types `values` into the picker's fields and submits them without a
/// terminal. Fails when the value is rejected.
pub fn run(overrides: &Overrides, values: &[String]) -> Result<()> {
    let settings = load_settings(overrides)?;
    let mut picker = Picker::new(ChronoEngine::new(), settings.to_config()?);
    let passed = check_values(&mut picker, values);
    let report = ValueReport {
        passed: Some(passed),
        value: picker.value(),
        text: committed_text(&picker),
    };
    write_report(&report, &mut std::io::stdout())?;
    if !passed {
        bail!("value rejected: {}", values.join(" "));
    }
    Ok(())
}

/// Runs `values` through typed input and the submit checks. Returns whether
/// the value was committed.
pub(crate) fn check_values<E: DateEngine>(picker: &mut Picker<E>, values: &[String]) -> bool {
    if picker.shape() == ValueShape::Multiple {
        let mut dates = Vec::new();
        for text in values {
            match picker.field_format().parse(picker.engine(), text) {
                Some(date) => dates.push(date),
                None => {
                    debug!("cannot parse {:?}", text);
                    return false;
                }
            }
        }
        return picker.preset_select(PickerValue::Multiple(dates));
    }

    for (index, text) in values.iter().enumerate().take(picker.field_count()) {
        picker.focus(index);
        picker.input_text(index, text);
        if picker.invalid(index) {
            return false;
        }
    }
    let candidate = picker.calendar_value().clone();
    picker.preset_select(candidate)
}

fn committed_text<E: DateEngine>(picker: &Picker<E>) -> Vec<String> {
    picker.field_format().format_value(picker.engine(), picker.value())
}
