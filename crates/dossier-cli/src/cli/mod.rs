use clap::{Parser, ValueEnum};
use dossier_config::DossierConfig;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `dsr` binary.
#[derive(Debug, Parser)]
#[command(name = "dsr", version, about = "Fail-closed evidence gates for person dossiers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (defaults to `general.default_format`)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve global flags, filling the format from configuration when unset.
    #[must_use]
    pub fn global_flags(&self, config: &DossierConfig) -> GlobalFlags {
        let format = self.format.unwrap_or_else(|| {
            OutputFormat::from_str(&config.general.default_format, true).unwrap_or(OutputFormat::Json)
        });
        GlobalFlags {
            format,
            quiet: self.quiet,
        }
    }
}
