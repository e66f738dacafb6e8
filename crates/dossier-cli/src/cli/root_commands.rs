use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use dossier_core::enums::DossierMode;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Assemble a session, decide the dossier mode, and run every gate.
    Run(SessionArgs),
    /// Fail-closed gate report only.
    Gates(SessionArgs),
    /// Assembled evidence graph snapshot.
    Graph(SessionArgs),
    /// Evidence coverage of dossier prose.
    Coverage(TextArgs),
    /// Filter dossier prose for an output mode.
    Filter(FilterArgs),
    /// Render the visibility query battery.
    Sweep(SweepArgs),
    /// Print a JSON Schema.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SessionArgs {
    /// Session document path, or `-` for stdin
    pub session: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct TextArgs {
    /// Prose file path, or `-` for stdin
    pub input: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct FilterArgs {
    /// Entity lock score (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub lock: u8,

    /// full, constrained, or halted (derived from --lock when omitted)
    #[arg(long)]
    pub mode: Option<DossierMode>,

    /// Prose file path, or `-` for stdin
    pub input: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct SweepArgs {
    /// Person name (defaults to `general.person_placeholder`)
    pub name: Option<String>,

    /// Company for the extra company-qualified query
    #[arg(long)]
    pub company: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaKind {
    Session,
    Snapshot,
    Report,
    Run,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum)]
    pub kind: SchemaKind,
}
