pub mod input;

use dossier_config::DossierConfig;
use dossier_ingest::SessionInput;

/// Session person name, or `general.person_placeholder` when it is blank.
pub fn subject_name<'a>(session: &'a SessionInput, config: &'a DossierConfig) -> &'a str {
    match session.person_name.trim() {
        "" => config.general.person_placeholder.as_str(),
        name => name,
    }
}
