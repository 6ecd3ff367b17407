use crate::data::persistence::get_data_dir;
use crate::data::settings::SETTINGS_FILE;
use crate::data::PickerSettings;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::Path;

pub fn run(force: bool) -> Result<()> {
    let dir = get_data_dir()?;
    fs::create_dir_all(&dir)?;
    if run_in_dir(&dir, force, Local::now().date_naive())? {
        println!("Wrote {}", dir.join(SETTINGS_FILE).display());
    } else {
        println!(
            "{} already exists; use --force to overwrite it.",
            dir.join(SETTINGS_FILE).display()
        );
    }
    Ok(())
}

/// Writes the sample picker.yaml into `dir`. Returns false when the file
/// exists and `force` is not set. Exposed for unit testing.
pub(crate) fn run_in_dir(dir: &Path, force: bool, today: NaiveDate) -> Result<bool> {
    if dir.join(SETTINGS_FILE).exists() && !force {
        return Ok(false);
    }
    PickerSettings::sample(today).save_to(dir)?;
    Ok(true)
}
