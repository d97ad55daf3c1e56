use crate::config::SettingsOverrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geo-country-enricher")]
#[command(about = "Add country names to CSV coordinate columns via rate-limited reverse geocoding")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a coordinate column to countries and save the result as a new CSV file
    Enrich {
        #[arg(short, long, help = "Input CSV file (prompted for when omitted)")]
        input: Option<PathBuf>,

        #[arg(short, long, help = "Column holding coordinates (prompted for when omitted)")]
        column: Option<String>,

        #[arg(short, long, help = "Output CSV file; must not exist (prompted for when omitted)")]
        output: Option<PathBuf>,

        #[arg(short = 'y', long, help = "Save without asking for confirmation")]
        yes: bool,

        #[arg(long, default_value = ",", help = "Field delimiter of input and output")]
        delimiter: char,

        #[arg(long, help = "Hide the progress bar")]
        quiet: bool,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Resolve a single coordinate string such as "(51.5074, -0.1278)"
    Lookup {
        coordinate: String,

        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    #[arg(long, help = "Settings file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Reverse geocoding endpoint [default: https://nominatim.openstreetmap.org]")]
    pub endpoint: Option<String>,

    #[arg(long, help = "User-Agent sent to the geocoding service")]
    pub user_agent: Option<String>,

    #[arg(long, help = "Minimum seconds between lookups [default: 2]")]
    pub min_delay: Option<f64>,

    #[arg(long, help = "Seconds before a lookup times out [default: 120]")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Rows per progress batch [default: 100]")]
    pub batch_size: Option<usize>,
}

impl SettingsArgs {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            endpoint: self.endpoint.clone(),
            user_agent: self.user_agent.clone(),
            min_delay_secs: self.min_delay,
            timeout_secs: self.timeout,
            batch_size: self.batch_size,
        }
    }
}
