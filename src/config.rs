// Settings for a run. Built-in defaults, optionally overridden by a JSON
// file and then by environment variables.

use crate::error::{WizardError, WizardResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Env var pointing at an alternative settings file.
pub const CONFIG_ENV: &str = "ORG_BACKUP_CONFIG";
/// Env var with an explicit path to the rclone binary.
pub const RCLONE_ENV: &str = "ORG_BACKUP_RCLONE";

const CONFIG_DIR: &str = "org-backup";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Explicit rclone binary. `None` means look it up on `PATH`.
    pub rclone: Option<PathBuf>,
    /// Remote offered as the default when it is configured.
    pub preferred_remote: String,
    /// Default destination folder on the remote.
    pub destination: String,
    /// Default base folder for dated versions.
    pub versions_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            rclone: None,
            preferred_remote: "gdrive".into(),
            destination: "Backup0RG".into(),
            versions_base: "Backup0RG_Versions".into(),
        }
    }
}

impl Settings {
    /// Load settings from `ORG_BACKUP_CONFIG` or the user config dir, then
    /// apply `ORG_BACKUP_RCLONE`. A missing file just means defaults.
    pub fn from_env() -> WizardResult<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE)));

        let mut settings = match path {
            Some(p) if p.is_file() => Settings::from_file(&p)?,
            _ => Settings::default(),
        };

        if let Some(bin) = std::env::var_os(RCLONE_ENV) {
            if !bin.is_empty() {
                settings.rclone = Some(PathBuf::from(bin));
            }
        }
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> WizardResult<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| WizardError::Settings {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Settings::from_json(&data).map_err(|e| WizardError::Settings {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }
}
