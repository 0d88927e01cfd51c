pub mod types;

use crate::error::{Result, TriageError};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".pod-triage.toml";

/// Get the global config file path (~/.pod-triage.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (./.pod-triage.toml)
pub fn local_config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Load configuration. An explicitly given file must parse; the implicit
/// local and global files fall back to defaults on any problem.
pub fn load_config(explicit: Option<&Path>) -> Result<types::Config> {
    if let Some(path) = explicit {
        let content = fs::read_to_string(path)?;
        return toml::from_str(&content)
            .map_err(|e| TriageError::Config(format!("{}: {e}", path.display())));
    }

    for candidate in [Some(local_config_path()), global_config_path()]
        .into_iter()
        .flatten()
    {
        if candidate.exists() {
            if let Ok(content) = fs::read_to_string(&candidate) {
                if let Ok(config) = toml::from_str(&content) {
                    return Ok(config);
                }
            }
        }
    }

    Ok(types::Config::default())
}
