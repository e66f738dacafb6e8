use std::io::Read;
use std::path::Path;

use anyhow::Context;
use dossier_ingest::SessionInput;
use dossier_ingest::session::STDIN_PATH;

/// Read a text file, or stdin when `path` is `-`.
pub fn read_text(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn load_session(path: &Path) -> anyhow::Result<SessionInput> {
    SessionInput::from_path(path).with_context(|| format!("failed to load session {}", path.display()))
}
