use clap::{Parser, Subcommand};
use datepick::cmd::{self, Overrides};
use datepick::data::persistence;
use datepick::data::settings::SETTINGS_FILE;
use datepick::state::PanelMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "datepick", about = "terminal date and range picker")]
struct Cli {
    /// Path to the data directory containing picker.yaml (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    /// Picker granularity: date, week, month, year, decade or time
    #[arg(long)]
    picker: Option<PanelMode>,

    /// Pick a start/end range
    #[arg(long, conflicts_with = "multiple")]
    range: bool,

    /// Pick any number of dates
    #[arg(long)]
    multiple: bool,

    /// Add a time column to the date picker
    #[arg(long)]
    show_time: bool,

    /// Locale name (en_US or zh_CN)
    #[arg(long)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive picker (default)
    Pick {
        /// Initial value, YYYY-MM-DD; repeat for range ends or multiple dates
        #[arg(long = "value")]
        values: Vec<String>,
    },
    /// Submit a value without a terminal and print the result as JSON
    Check {
        /// One text per field, in the picker's input format
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// Write a sample picker.yaml
    Init {
        /// Overwrite an existing picker.yaml
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            picker: self.picker,
            range: self.range,
            multiple: self.multiple,
            show_time: self.show_time,
            locale: self.locale.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    // Resolve data_dir to an absolute path so file I/O works regardless of
    // future directory changes within the process.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    persistence::set_data_dir(data_dir.clone());

    // Auto-init when picker.yaml is missing and the user did not explicitly
    // invoke the `init` subcommand.
    let is_init_command = matches!(cli.command, Some(Commands::Init { .. }));
    if !is_init_command && dir_needs_init(&data_dir) {
        eprintln!(
            "No {} in '{}', running init...",
            SETTINGS_FILE,
            data_dir.display()
        );
        cmd::init::run(false)?;
    }

    let overrides = cli.overrides();
    match cli.command {
        None => cmd::root::run(&overrides, &[]),
        Some(Commands::Pick { values }) => cmd::root::run(&overrides, &values),
        Some(Commands::Check { values }) => cmd::check::run(&overrides, &values),
        Some(Commands::Init { force }) => cmd::init::run(force),
    }
}

/// Returns true when `dir` has no settings file yet.
fn dir_needs_init(dir: &std::path::Path) -> bool {
    !dir.join(SETTINGS_FILE).exists()
}
