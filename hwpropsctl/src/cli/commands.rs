//! CLI command and subcommand definitions

use clap::{Parser, Subcommand};
use hwprops_core::{TemperatureSource, TemperatureType};
use std::path::PathBuf;

/// hwprops CLI
#[derive(Parser, Debug)]
#[command(name = "hwpropsctl")]
#[command(version, about = "Hardware Properties CLI", long_about = None)]
pub struct Cli {
    /// Server URL (overrides config file)
    #[arg(short, long)]
    pub server: Option<String>,

    /// Output format (overrides config file)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable verbose logging (overrides config file)
    #[arg(short, long)]
    pub verbose: Option<bool>,

    /// Don't load config file
    #[arg(long)]
    pub no_config: bool,

    /// Config file path (default: ~/.config/hwprops/cli.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty table output
    Table,
    /// JSON output
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }
}

impl From<&OutputFormat> for crate::format::OutputFormat {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Table => crate::format::OutputFormat::Table,
            OutputFormat::Json => crate::format::OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show system information
    Info,

    /// Check server connectivity and health
    Health,

    /// Show the speed of every cooling device
    Fans,

    /// Show temperatures of one device type
    Temps {
        /// Device type: unknown, cpu, gpu, battery, skin (or -1..3)
        #[arg(short = 't', long = "type")]
        kind: TemperatureType,

        /// Value to show: current, throttling, shutdown, throttling-below-vr-min (or 0..3)
        #[arg(short = 'S', long, default_value = "current")]
        source: TemperatureSource,
    },

    /// Show usage of every CPU
    Cpu,

    /// Show or manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Set configuration value
    Set {
        /// Configuration key (server_url, output_format, verbose, timeout)
        key: String,
        /// Configuration value
        value: String,
    },

    /// Reset configuration to defaults
    Reset,
}
