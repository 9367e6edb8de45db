// Remote health check and token repair.
//
// The classification is a heuristic over rclone's error text, which is not
// a stable format. Markers are matched case-insensitively in table order.

use crate::error::{WizardError, WizardResult};
use crate::rclone::{remote_root, Probe, Rclone};
use crate::ui::{self, Console};
use crossterm::style::Stylize;
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Ok,
    NeedsReauth,
    Fatal,
}

/// Substrings (lowercase) that mean the token is empty, expired or revoked.
pub const REAUTH_MARKERS: &[(&str, Health)] = &[
    ("empty token", Health::NeedsReauth),
    ("reconnect", Health::NeedsReauth),
    ("failed to create oauth client", Health::NeedsReauth),
    ("invalid_grant", Health::NeedsReauth),
];

/// Classify a failed probe from its diagnostic text.
pub fn classify(diagnostic: &str) -> Health {
    let text = diagnostic.to_lowercase();
    REAUTH_MARKERS
        .iter()
        .find(|(marker, _)| text.contains(marker))
        .map(|(_, health)| *health)
        .unwrap_or(Health::Fatal)
}

/// Health of a remote from the outcome of its probe.
pub fn assess(outcome: &Probe) -> Health {
    match outcome {
        Probe::Reachable => Health::Ok,
        Probe::Failed(text) => classify(text),
    }
}

fn probe<R: Rclone + ?Sized, C: Console + ?Sized>(
    rclone: &mut R,
    console: &mut C,
    remote: &str,
) -> WizardResult<Probe> {
    console.busy(&format!("Checking access to {}", remote_root(remote)));
    let result = rclone.probe(remote);
    console.idle();
    Ok(result?)
}

/// Make sure `remote` can be listed, offering a reconnect when the token is
/// the problem. Returns only when the remote is usable.
pub fn ensure_remote<R: Rclone + ?Sized, C: Console + ?Sized>(
    rclone: &mut R,
    console: &mut C,
    remote: &str,
) -> WizardResult<()> {
    let outcome = probe(rclone, console, remote)?;
    let health = assess(&outcome);
    let diagnostic = match outcome {
        Probe::Reachable => {
            debug!("remote {} is reachable", remote);
            return Ok(());
        }
        Probe::Failed(text) => text,
    };
    info!("remote {} probe failed, classified as {:?}", remote, health);

    ui::panel(console, "Access check");
    if health == Health::Fatal {
        return Err(access_fatal(console, remote, diagnostic)?);
    }

    ui::warn(console, "This remote needs to be reauthorized (empty or expired token).");
    console.say("Your browser will open so you can sign in and renew permissions.\n");

    let question = format!("Run now: rclone config reconnect {}?", remote_root(remote));
    if !ui::confirm(console, &question, true)? {
        return Err(WizardError::RemoteAuthExpired { remote: remote.to_string() });
    }

    let code = rclone.reconnect(remote)?;
    if code != 0 {
        ui::error(console, &format!("Reconnect failed (code {}).", code));
        return Err(WizardError::ExternalProcessFailure { step: "rclone config reconnect", code });
    }

    // One retry only; a reconnect that did not help is not going to.
    match probe(rclone, console, remote)? {
        Probe::Reachable => {
            console.say(&format!("\n{}", "Remote reauthorized successfully.".green()));
            console.pause()?;
            Ok(())
        }
        Probe::Failed(text) => Err(access_fatal(console, remote, text)?),
    }
}

fn access_fatal<C: Console + ?Sized>(
    console: &mut C,
    remote: &str,
    detail: String,
) -> WizardResult<WizardError> {
    ui::error(console, &format!("Cannot access the remote '{}'.\n", remote));
    console.say("Error details:\n");
    console.say(&detail);
    console.pause()?;
    Ok(WizardError::RemoteAccessFatal { remote: remote.to_string(), detail })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_grant_needs_reauth() {
        let text = r#"Failed to lsd: couldn't fetch token: oauth2: "invalid_grant" "Token has been expired or revoked.""#;
        assert_eq!(classify(text), Health::NeedsReauth);
    }

    #[test]
    fn markers_are_case_insensitive() {
        assert_eq!(classify("ERROR: Empty Token found"), Health::NeedsReauth);
        assert_eq!(classify("please run: rclone config RECONNECT gdrive:"), Health::NeedsReauth);
        assert_eq!(
            classify("Failed to create oauth client: error opening token"),
            Health::NeedsReauth
        );
    }

    #[test]
    fn reachable_remote_is_ok() {
        assert_eq!(assess(&Probe::Reachable), Health::Ok);
        assert_eq!(assess(&Probe::Failed("invalid_grant".into())), Health::NeedsReauth);
    }

    #[test]
    fn other_failures_are_fatal() {
        assert_eq!(classify("didn't find section in config file"), Health::Fatal);
        assert_eq!(classify(""), Health::Fatal);
    }
}
