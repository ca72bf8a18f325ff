//! Entity output as a JSON array.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chem_model::Chemical;

/// Pretty-printed JSON array of entities, newline terminated.
pub fn entities_json(chemicals: &[Chemical]) -> Result<String> {
    let json = serde_json::to_string_pretty(chemicals).context("serialize entities")?;
    Ok(format!("{json}\n"))
}

/// Write entities to `path`, or to stdout when no path is given.
pub fn write_entities(chemicals: &[Chemical], path: Option<&Path>) -> Result<()> {
    let json = entities_json(chemicals)?;
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
            std::fs::write(path, json).with_context(|| format!("write {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(json.as_bytes())
                .context("write entities to stdout")?;
            stdout.flush().context("flush stdout")
        }
    }
}
