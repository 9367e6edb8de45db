// rclone client: the only place that spawns the external tool. It is
// synchronous on purpose: every call blocks until rclone exits, and the
// interactive ones inherit the terminal so rclone can talk to the user.

use crate::config::Settings;
use crate::error::{WizardError, WizardResult};
use crate::transfer::CopyCommand;
use anyhow::{Context, Result};
use log::{debug, warn};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

pub const RCLONE: &str = "rclone";

/// Outcome of the lightweight listing used as a health probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Reachable,
    /// rclone failed; carries its combined stdout and stderr.
    Failed(String),
}

/// Operations the wizard needs from the external tool. Exit codes are
/// returned as-is so the caller decides what a failure means.
pub trait Rclone {
    /// Configured remotes, without the trailing `:`. Empty when the query
    /// itself fails.
    fn list_remotes(&mut self) -> Vec<String>;

    /// `lsd <remote>:` with its output captured.
    fn probe(&mut self, remote: &str) -> Result<Probe>;

    /// `config`, interactive.
    fn setup_wizard(&mut self) -> Result<i32>;

    /// `config reconnect <remote>:`, interactive.
    fn reconnect(&mut self, remote: &str) -> Result<i32>;

    /// Run a copy, inheriting the terminal for progress output.
    fn copy(&mut self, command: &CopyCommand) -> Result<i32>;
}

/// Real rclone binary driven through `std::process`.
#[derive(Debug, Clone)]
pub struct RcloneCli {
    binary: PathBuf,
}

impl RcloneCli {
    pub fn new(binary: PathBuf) -> Self {
        RcloneCli { binary }
    }

    /// Find the binary from settings or `PATH`.
    pub fn locate(settings: &Settings) -> WizardResult<Self> {
        let wanted = settings.rclone.clone().unwrap_or_else(|| PathBuf::from(RCLONE));
        let found = if wanted.components().count() > 1 {
            Some(wanted.clone()).filter(|p| p.is_file())
        } else {
            which::which(&wanted).ok()
        };
        match found {
            Some(binary) => {
                debug!("using rclone at {}", binary.display());
                Ok(RcloneCli::new(binary))
            }
            None => Err(WizardError::DependencyMissing {
                binary: wanted.display().to_string(),
            }),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args);
        debug!("running {:?}", cmd);
        cmd
    }

    fn run_interactive<I, S>(&self, args: I) -> Result<i32>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let status = self
            .command(args)
            .status()
            .with_context(|| format!("Failed to launch {}", self.binary.display()))?;
        debug!("rclone exited with {}", status);
        Ok(exit_code(status))
    }
}

impl Rclone for RcloneCli {
    fn list_remotes(&mut self) -> Vec<String> {
        match self.command(["listremotes"]).output() {
            Ok(out) if out.status.success() => parse_remotes(&String::from_utf8_lossy(&out.stdout)),
            Ok(out) => {
                warn!("listremotes exited with {}", out.status);
                Vec::new()
            }
            Err(e) => {
                warn!("listremotes could not run: {}", e);
                Vec::new()
            }
        }
    }

    fn probe(&mut self, remote: &str) -> Result<Probe> {
        let out = self
            .command(["lsd".to_string(), remote_root(remote)])
            .output()
            .with_context(|| format!("Failed to launch {}", self.binary.display()))?;
        if out.status.success() {
            return Ok(Probe::Reachable);
        }
        let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&out.stderr));
        Ok(Probe::Failed(text))
    }

    fn setup_wizard(&mut self) -> Result<i32> {
        self.run_interactive(["config"])
    }

    fn reconnect(&mut self, remote: &str) -> Result<i32> {
        self.run_interactive(["config".to_string(), "reconnect".to_string(), remote_root(remote)])
    }

    fn copy(&mut self, command: &CopyCommand) -> Result<i32> {
        self.run_interactive(command.args())
    }
}

/// `<remote>:` as rclone spells the root of a remote.
pub fn remote_root(remote: &str) -> String {
    format!("{}:", remote)
}

/// Parse `rclone listremotes` output: one remote per line ending in `:`.
pub fn parse_remotes(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.trim_end_matches(':').to_string())
        .collect()
}

/// A process killed by a signal has no code; report it as 1.
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remotes_are_stripped_of_separator_and_blanks() {
        let out = "gdrive:\n\n  work:  \nphotos\n";
        assert_eq!(parse_remotes(out), vec!["gdrive", "work", "photos"]);
        assert!(parse_remotes("").is_empty());
    }

    #[test]
    fn missing_explicit_binary_is_a_dependency_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            rclone: Some(dir.path().join("no-such-rclone")),
            ..Settings::default()
        };
        match RcloneCli::locate(&settings) {
            Err(WizardError::DependencyMissing { binary }) => assert!(binary.ends_with("no-such-rclone")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn explicit_binary_path_is_used_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("rclone");
        std::fs::write(&bin, "").unwrap();
        let settings = Settings { rclone: Some(bin.clone()), ..Settings::default() };
        let cli = RcloneCli::locate(&settings).unwrap();
        assert_eq!(cli.binary(), bin.as_path());
    }
}
