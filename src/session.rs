// Session orchestrator: remote discovery and selection, health check,
// source selection, backup parameters, summary and execution. Every step
// can end the run early; a user quit surfaces as `WizardError::Cancelled`.

use crate::config::Settings;
use crate::error::{WizardError, WizardResult};
use crate::health;
use crate::input::Pick;
use crate::navigator;
use crate::rclone::{Rclone, RcloneCli};
use crate::transfer::{clean_folder, BackupParams, CopyCommand};
use crate::ui::{self, Console};
use chrono::NaiveDate;
use crossterm::style::Stylize;
use log::info;
use std::path::{Path, PathBuf};

/// Everything decided for one run, threaded through the last steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub remote: String,
    pub source: PathBuf,
    pub params: BackupParams,
    pub command: CopyCommand,
}

impl Session {
    pub fn new(remote: String, source: PathBuf, params: BackupParams, today: NaiveDate) -> Self {
        let command = CopyCommand::build(&remote, &source, &params, today);
        Session { remote, source, params, command }
    }
}

/// Well-known starting folders offered before manual entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shortcuts {
    pub documents: Option<PathBuf>,
    pub desktop: Option<PathBuf>,
}

impl Shortcuts {
    /// Platform folders first, then the usual English and Spanish names
    /// under the home directory. Only existing folders are kept.
    pub fn detect() -> Self {
        let home = dirs::home_dir();
        let under_home = |names: &[&str]| -> Vec<PathBuf> {
            home.iter().flat_map(|h| names.iter().map(move |n| h.join(n))).collect()
        };

        let mut documents: Vec<PathBuf> = dirs::document_dir().into_iter().collect();
        documents.extend(under_home(&["Documentos", "Documents"]));
        let mut desktop: Vec<PathBuf> = dirs::desktop_dir().into_iter().collect();
        desktop.extend(under_home(&["Escritorio", "Desktop"]));

        Shortcuts {
            documents: documents.into_iter().find(|p| p.is_dir()),
            desktop: desktop.into_iter().find(|p| p.is_dir()),
        }
    }
}

/// The preferred remote when configured, else the first one.
pub fn default_remote<'a>(remotes: &'a [String], preferred: &str) -> Option<&'a str> {
    remotes
        .iter()
        .find(|r| r.as_str() == preferred)
        .or_else(|| remotes.first())
        .map(String::as_str)
}

/// Expand `~` and environment variables in a typed path.
pub fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(raw).as_ref()),
    }
}

pub struct Wizard<'a, R: Rclone + ?Sized, C: Console + ?Sized> {
    rclone: &'a mut R,
    console: &'a mut C,
    settings: &'a Settings,
    shortcuts: Shortcuts,
    today: NaiveDate,
}

impl<'a, R: Rclone + ?Sized, C: Console + ?Sized> Wizard<'a, R, C> {
    pub fn new(rclone: &'a mut R, console: &'a mut C, settings: &'a Settings) -> Self {
        Wizard {
            rclone,
            console,
            settings,
            shortcuts: Shortcuts::detect(),
            today: chrono::Local::now().date_naive(),
        }
    }

    pub fn with_shortcuts(mut self, shortcuts: Shortcuts) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    /// Date used for the versions folder.
    pub fn with_date(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Run every step after the dependency check. Returns the executed
    /// session on success.
    pub fn run(mut self) -> WizardResult<Session> {
        let remotes = self.discover_remotes()?;
        let remote = self.select_remote(&remotes)?;
        info!("selected remote {}", remote);

        health::ensure_remote(&mut *self.rclone, &mut *self.console, &remote)?;

        let source = self.select_source()?;
        info!("selected source {}", source.display());

        let params = self.collect_params(&source)?;
        let session = Session::new(remote, source, params, self.today);

        self.confirm_summary(&session)?;
        self.execute(&session)?;
        Ok(session)
    }

    fn discover_remotes(&mut self) -> WizardResult<Vec<String>> {
        let remotes = self.rclone.list_remotes();
        if !remotes.is_empty() {
            return Ok(remotes);
        }

        ui::panel(self.console, "Initial setup");
        self.console.say("No configured remote was found.");
        self.console.say("The rclone config wizard will be opened.");
        self.console.say(
            &"Your browser may open so you can sign in and authorize access.\n"
                .dim()
                .to_string(),
        );
        if !ui::confirm(self.console, "Open rclone config now?", true)? {
            return Err(WizardError::Cancelled);
        }

        let code = self.rclone.setup_wizard()?;
        if code != 0 {
            ui::error(self.console, &format!("rclone config exited with code {}.", code));
            return Err(WizardError::ExternalProcessFailure { step: "rclone config", code });
        }

        let remotes = self.rclone.list_remotes();
        if remotes.is_empty() {
            ui::error(self.console, "No remote found after the setup.");
            return Err(WizardError::NoRemotesConfigured);
        }
        Ok(remotes)
    }

    fn select_remote(&mut self, remotes: &[String]) -> WizardResult<String> {
        let default = default_remote(remotes, &self.settings.preferred_remote)
            .ok_or(WizardError::NoRemotesConfigured)?
            .to_string();

        ui::panel(self.console, "Remote");
        self.console.say(&format!("Default remote: {}", default.as_str().green()));
        self.console.say(&"If it is not the one you want, choose another.".dim().to_string());
        self.console.say(&"H=help · Q=quit\n".dim().to_string());

        if ui::confirm(self.console, &format!("Use '{}'?", default), true)? {
            Ok(default)
        } else {
            self.pick_remote(remotes)
        }
    }

    fn pick_remote(&mut self, remotes: &[String]) -> WizardResult<String> {
        loop {
            ui::panel(self.console, "Remotes");
            for (i, remote) in remotes.iter().enumerate() {
                self.console.say(&format!("  {} {}", format!("{})", i + 1).cyan(), remote));
            }
            self.console.say(&format!("\n{}", "H=help · Q=quit".dim()));

            let raw = self.console.read_line(&"Choose a number or name".bold().to_string())?;
            match Pick::parse(&raw) {
                Pick::Index(n) if n >= 1 && n <= remotes.len() => return Ok(remotes[n - 1].clone()),
                Pick::Name(name) if remotes.contains(&name) => return Ok(name),
                Pick::Help => {
                    ui::show_help(self.console)?;
                    continue;
                }
                Pick::Quit => return Err(WizardError::Cancelled),
                _ => {}
            }
            ui::warn(self.console, "Invalid option.");
            self.console.pause()?;
        }
    }

    fn select_source(&mut self) -> WizardResult<PathBuf> {
        let documents = self.shortcuts.documents.clone();
        let desktop = self.shortcuts.desktop.clone();
        let default = if documents.is_some() { 1 } else { 3 };

        loop {
            ui::panel(self.console, "Source");
            if let Some(docs) = &documents {
                self.console.say(&format!(
                    "  {} Documents  {}",
                    "1)".cyan(),
                    docs.display().to_string().dim()
                ));
            }
            if let Some(desk) = &desktop {
                self.console.say(&format!(
                    "  {} Desktop    {}",
                    "2)".cyan(),
                    desk.display().to_string().dim()
                ));
            }
            self.console.say(&format!("  {} Manual path", "3)".cyan()));
            self.console.say(&format!("  {} HELP", "H)".magenta()));
            self.console.say(&format!("  {} Quit", "Q)".red()));

            let raw = self.console.read_line(&format!("{} [{}]", "Option".bold(), default))?;
            let choice = if raw.trim().is_empty() { Pick::Index(default) } else { Pick::parse(&raw) };

            match (&choice, &documents, &desktop) {
                (Pick::Index(1), Some(root), _) | (Pick::Index(2), _, Some(root)) => {
                    return navigator::select_folder(self.console, root);
                }
                (Pick::Index(3), _, _) => {
                    if let Some(root) = self.manual_path()? {
                        return navigator::select_folder(self.console, &root);
                    }
                }
                (Pick::Help, _, _) => ui::show_help(self.console)?,
                (Pick::Quit, _, _) => return Err(WizardError::Cancelled),
                _ => {
                    ui::warn(self.console, "Invalid option.");
                    self.console.pause()?;
                }
            }
        }
    }

    /// `None` after telling the user the path is unusable.
    fn manual_path(&mut self) -> WizardResult<Option<PathBuf>> {
        let raw = ui::ask_text(self.console, "Enter the full path", "")?;
        let path = expand_path(&raw);
        if raw.is_empty() || !path.is_dir() {
            ui::warn(self.console, "Invalid path or not a folder.");
            self.console.pause()?;
            return Ok(None);
        }
        Ok(Some(path.canonicalize().unwrap_or(path)))
    }

    fn collect_params(&mut self, source: &Path) -> WizardResult<BackupParams> {
        ui::panel(self.console, "Backup settings");
        self.console.say(&format!(
            "{}{}",
            "Source: ".bold(),
            source.display().to_string().blue()
        ));
        self.console.say(&ui::rule());

        let fallback = &self.settings.destination;
        let destination = ui::ask_text(self.console, "Destination folder on the remote", fallback)?;
        let destination = clean_folder(&destination, fallback);

        let versions_base = if ui::confirm(self.console, "Enable dated versioning?", true)? {
            let fallback = &self.settings.versions_base;
            let base = ui::ask_text(self.console, "Versions folder on the remote", fallback)?;
            Some(clean_folder(&base, fallback))
        } else {
            None
        };

        let dry_run = ui::confirm(self.console, "Do a test run first (nothing is uploaded)?", true)?;
        let progress = ui::confirm(self.console, "Show progress on screen?", true)?;

        Ok(BackupParams { destination, versions_base, dry_run, progress })
    }

    fn confirm_summary(&mut self, session: &Session) -> WizardResult<()> {
        ui::panel(self.console, "Summary");
        self.console.say(&format!("{}{}", "Remote:      ".bold(), session.remote.as_str().green()));
        self.console.say(&format!(
            "{}{}",
            "Source:      ".bold(),
            session.source.display().to_string().blue()
        ));
        self.console.say(&format!(
            "{}{}",
            "Destination: ".bold(),
            session.command.destination().green()
        ));
        if let Some(base) = &session.params.versions_base {
            self.console.say(&format!(
                "{}{}",
                "Versions:    ".bold(),
                format!("{}:{}/YYYY-MM-DD", session.remote, base).green()
            ));
        }
        let mode = if session.params.dry_run {
            "TEST (dry-run)".yellow()
        } else {
            "REAL (upload)".green()
        };
        self.console.say(&format!("{}{}", "Mode:        ".bold(), mode));
        self.console.say(&ui::rule());
        self.console.say(&"H=help · Q=cancel\n".dim().to_string());

        if ui::confirm(self.console, "Start the copy now?", true)? {
            Ok(())
        } else {
            Err(WizardError::Cancelled)
        }
    }

    fn execute(&mut self, session: &Session) -> WizardResult<()> {
        ui::panel(self.console, "Running");
        info!("starting copy to {}", session.command.destination());
        let code = self.rclone.copy(&session.command)?;
        self.console.say(&ui::rule());

        if code != 0 {
            ui::error(self.console, &format!("The copy failed (code {}).", code));
            return Err(WizardError::ExternalProcessFailure { step: "rclone copy", code });
        }

        self.console.say(&"✅ Copy finished.".green().to_string());
        if session.params.dry_run {
            self.console.say(
                &"It was a simulation. Run again and answer NO to the test question to really upload."
                    .dim()
                    .to_string(),
            );
        } else {
            self.console.say(
                &"Open the destination folder on your cloud storage to review the copy."
                    .dim()
                    .to_string(),
            );
        }
        self.console.pause()?;
        Ok(())
    }
}

/// Full interactive run: intro help, dependency check, then the wizard.
pub fn run_wizard<C: Console + ?Sized>(console: &mut C, settings: &Settings) -> WizardResult<Session> {
    console.clear();
    console.say(&ui::help_text());
    console.pause()?;

    let mut rclone = match RcloneCli::locate(settings) {
        Ok(rclone) => rclone,
        Err(err) => {
            console.clear();
            ui::error(console, "'rclone' was not found.\n");
            console.say("Install it and run this program again.");
            console.say(
                &"Typical install: sudo apt update && sudo apt install rclone\n"
                    .dim()
                    .to_string(),
            );
            return Err(err);
        }
    };

    Wizard::new(&mut rclone, console, settings).run()
}
