/// Command-line arguments.
use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "diskdetect",
    about = "List mounted volumes with their type, capacity and usage",
    version
)]
pub struct Cli {
    /// Output format (defaults to the config file's `output.format`)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Re-enumerate and re-render every SECS seconds until interrupted
    #[arg(short, long, value_name = "SECS")]
    pub watch: Option<u64>,

    /// Only list removable volumes
    #[arg(long)]
    pub removable_only: bool,

    /// Also list mounts that were skipped, with the reason
    #[arg(long)]
    pub show_skipped: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print config file path and current values, then exit
    #[arg(long)]
    pub print_config: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    /// Parse the `output.format` config value; unknown names are ignored.
    pub fn from_config(name: &str) -> Option<Self> {
        match <Self as ValueEnum>::from_str(name.trim(), true) {
            Ok(f) => Some(f),
            Err(_) => {
                tracing::warn!("Unknown output format {name:?} in config, using table");
                None
            }
        }
    }
}

impl Cli {
    /// Log level selected by the `-v` count.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}
