use dossier_config::DossierConfig;
use dossier_gates::gate::run_fail_closed_gates;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SessionArgs;
use crate::commands::shared::input::load_session;
use crate::commands::shared::subject_name;
use crate::output::output;

/// Handle `dsr gates`.
pub fn handle(args: &SessionArgs, config: &DossierConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = load_session(&args.session)?;
    let graph = session.assemble(&config.ingest);
    let report = run_fail_closed_gates(
        &graph,
        session.entity_lock_score,
        session.dossier_text.as_deref(),
        subject_name(&session, config),
    );
    output(&report, flags.format)
}
