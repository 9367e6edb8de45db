// Error taxonomy for a wizard run.
//
// Invalid user input never shows up here: every prompt reprompts locally.
// Everything else that ends a run is a `WizardError`, and `main` turns it
// into a process exit code with `exit_code()`.

use std::io;
use thiserror::Error;

/// Exit status for a missing dependency or an unrecoverable access/config
/// problem.
pub const EXIT_CONFIG: i32 = 2;

#[derive(Debug, Error)]
pub enum WizardError {
    /// The user asked to quit, or declined something that ends the run
    /// without being an error.
    #[error("cancelled by user")]
    Cancelled,

    #[error("'{binary}' not found; install it and run this program again")]
    DependencyMissing { binary: String },

    #[error("no remote is configured")]
    NoRemotesConfigured,

    /// The remote needs reauthorization and the user refused it.
    #[error("remote '{remote}' needs to be reauthorized")]
    RemoteAuthExpired { remote: String },

    #[error("cannot access remote '{remote}'")]
    RemoteAccessFatal { remote: String, detail: String },

    #[error("{step} exited with code {code}")]
    ExternalProcessFailure { step: &'static str, code: i32 },

    #[error("settings file {path}: {reason}")]
    Settings { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WizardError {
    pub fn exit_code(&self) -> i32 {
        match self {
            WizardError::Cancelled => 0,
            err if err.is_interrupt() => 0,
            WizardError::DependencyMissing { .. }
            | WizardError::NoRemotesConfigured
            | WizardError::RemoteAuthExpired { .. }
            | WizardError::RemoteAccessFatal { .. }
            | WizardError::Settings { .. } => EXIT_CONFIG,
            WizardError::ExternalProcessFailure { code, .. } => *code,
            WizardError::Io(_) | WizardError::Other(_) => 1,
        }
    }

    /// Ctrl-C while a prompt was reading input.
    pub fn is_interrupt(&self) -> bool {
        matches!(self, WizardError::Io(e) if e.kind() == io::ErrorKind::Interrupted)
    }

    /// Cancellation ends the run without any message.
    pub fn is_silent(&self) -> bool {
        matches!(self, WizardError::Cancelled)
    }
}

pub type WizardResult<T> = Result<T, WizardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_a_clean_exit() {
        let err = WizardError::Cancelled;
        assert_eq!(err.exit_code(), 0);
        assert!(err.is_silent());
    }

    #[test]
    fn external_failures_keep_their_code() {
        let err = WizardError::ExternalProcessFailure { step: "rclone copy", code: 7 };
        assert_eq!(err.exit_code(), 7);
        assert!(!err.is_silent());
    }

    #[test]
    fn interrupted_prompt_exits_cleanly() {
        let err = WizardError::from(io::Error::new(io::ErrorKind::Interrupted, "read interrupted"));
        assert!(err.is_interrupt());
        assert_eq!(err.exit_code(), 0);
        let err = WizardError::from(io::Error::new(io::ErrorKind::UnexpectedEof, "closed"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn access_problems_use_the_config_status() {
        assert_eq!(WizardError::NoRemotesConfigured.exit_code(), EXIT_CONFIG);
        let err = WizardError::RemoteAccessFatal { remote: "gdrive".into(), detail: String::new() };
        assert_eq!(err.exit_code(), EXIT_CONFIG);
        let err = WizardError::DependencyMissing { binary: "rclone".into() };
        assert_eq!(err.exit_code(), EXIT_CONFIG);
    }
}
