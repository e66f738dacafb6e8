use dossier_config::DossierConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, config: &DossierConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => commands::run::handle(args, config, flags),
        Commands::Gates(args) => commands::gates::handle(args, config, flags),
        Commands::Graph(args) => commands::graph::handle(args, config, flags),
        Commands::Coverage(args) => commands::coverage::handle(args, flags),
        Commands::Filter(args) => commands::filter::handle(args),
        Commands::Sweep(args) => commands::sweep::handle(args, config, flags),
        Commands::Schema(args) => commands::schema::handle(args),
    }
}
