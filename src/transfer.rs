// Backup parameters and the rclone copy invocation built from them.

use chrono::NaiveDate;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// What the user chose for this run. Fixed once the command is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupParams {
    pub destination: String,
    /// Base folder for dated versions; `None` disables versioning.
    pub versions_base: Option<String>,
    pub dry_run: bool,
    pub progress: bool,
}

/// A fully built `rclone copy` command line (binary excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyCommand {
    source: PathBuf,
    destination: String,
    backup_dir: Option<String>,
    dry_run: bool,
    progress: bool,
}

impl CopyCommand {
    /// Always `copy`, never `sync`: nothing is deleted on the remote.
    pub fn build(remote: &str, source: &Path, params: &BackupParams, today: NaiveDate) -> Self {
        CopyCommand {
            source: source.to_path_buf(),
            destination: format!("{}:{}", remote, params.destination),
            backup_dir: params
                .versions_base
                .as_ref()
                .map(|base| format!("{}:{}/{}", remote, base, today.format("%Y-%m-%d"))),
            dry_run: params.dry_run,
            progress: params.progress,
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn backup_dir(&self) -> Option<&str> {
        self.backup_dir.as_deref()
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "copy".into(),
            self.source.clone().into_os_string(),
            self.destination.clone().into(),
            "--fast-list".into(),
        ];
        if let Some(dir) = &self.backup_dir {
            args.push("--backup-dir".into());
            args.push(dir.into());
        }
        if self.dry_run {
            args.push("--dry-run".into());
        }
        if self.progress {
            args.push("--progress".into());
        }
        args
    }
}

/// Strip leading and trailing `/`; fall back when nothing is left.
pub fn clean_folder(name: &str, fallback: &str) -> String {
    let cleaned = name.trim().trim_matches('/');
    if cleaned.is_empty() {
        fallback.trim_matches('/').to_string()
    } else {
        cleaned.to_string()
    }
}
