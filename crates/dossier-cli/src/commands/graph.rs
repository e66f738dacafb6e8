use dossier_config::DossierConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SessionArgs;
use crate::commands::shared::input::load_session;
use crate::output::output;

/// Handle `dsr graph`.
pub fn handle(args: &SessionArgs, config: &DossierConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = load_session(&args.session)?;
    output(&session.assemble(&config.ingest).snapshot(), flags.format)
}
