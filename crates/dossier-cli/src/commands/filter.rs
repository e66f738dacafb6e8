use dossier_core::enums::DossierMode;
use dossier_gates::LockBand;
use dossier_gates::mode::filter_prose_by_mode;

use crate::cli::root_commands::FilterArgs;
use crate::commands::shared::input::read_text;

/// Mode implied by the lock score alone: locked prose passes, anything
/// weaker is constrained.
#[must_use]
pub const fn mode_for_lock(entity_lock_score: u8) -> DossierMode {
    if LockBand::from_score(entity_lock_score).is_locked() {
        DossierMode::Full
    } else {
        DossierMode::Constrained
    }
}

/// Handle `dsr filter`. Writes the filtered prose verbatim, whatever `--format`.
pub fn handle(args: &FilterArgs) -> anyhow::Result<()> {
    let text = read_text(&args.input)?;
    let mode = args.mode.unwrap_or_else(|| mode_for_lock(args.lock));
    print!("{}", filter_prose_by_mode(&text, mode, args.lock));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_score_picks_mode() {
        assert_eq!(mode_for_lock(70), DossierMode::Full);
        assert_eq!(mode_for_lock(69), DossierMode::Constrained);
        assert_eq!(mode_for_lock(0), DossierMode::Constrained);
    }
}
