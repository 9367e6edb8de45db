// Folder browser. Lazily re-lists a directory each time it is entered and
// never touches the filesystem beyond reading directory entries.

use crate::error::{WizardError, WizardResult};
use crate::input::NavCommand;
use crate::ui::{self, Console};
use crossterm::style::Stylize;
use log::debug;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Visible subfolders of `path`, sorted case-insensitively. Names starting
/// with `.` are hidden. Any read error yields an empty list.
pub fn list_subfolders(path: &Path) -> Vec<OsString> {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("cannot list {}: {}", path.display(), e);
            return Vec::new();
        }
    };
    let mut names: Vec<OsString> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name())
        .collect();
    names.sort_by_cached_key(|name| name.to_string_lossy().to_lowercase());
    names
}

/// Result of feeding one command to the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Still browsing; `current()` may have changed.
    Browsing,
    Selected(PathBuf),
    Cancelled,
    ShowHelp,
    OutOfRange,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    current: PathBuf,
    entries: Vec<OsString>,
}

impl Navigator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let current = root.into();
        let entries = list_subfolders(&current);
        Navigator { current, entries }
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Subfolders as of the last listing.
    pub fn entries(&self) -> &[OsString] {
        &self.entries
    }

    /// 1-based position of `name` in the current listing.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e == name).map(|i| i + 1)
    }

    pub fn refresh(&mut self) {
        self.entries = list_subfolders(&self.current);
    }

    pub fn apply(&mut self, command: NavCommand) -> Step {
        match command {
            NavCommand::Descend(n) if n >= 1 && n <= self.entries.len() => {
                let next = self.current.join(&self.entries[n - 1]);
                self.move_to(next);
                Step::Browsing
            }
            NavCommand::Descend(_) => Step::OutOfRange,
            NavCommand::Ascend => {
                // `parent()` is None at the filesystem root.
                if let Some(parent) = self.current.parent().filter(|p| !p.as_os_str().is_empty()) {
                    let parent = parent.to_path_buf();
                    self.move_to(parent);
                }
                Step::Browsing
            }
            NavCommand::Begin => Step::Selected(self.current.clone()),
            NavCommand::Help => Step::ShowHelp,
            NavCommand::Quit => Step::Cancelled,
        }
    }

    fn move_to(&mut self, path: PathBuf) {
        debug!("browse {}", path.display());
        self.current = path;
        self.refresh();
    }

    fn render<C: Console + ?Sized>(&self, console: &mut C) {
        ui::panel(console, "Browser");
        console.say(&format!(
            "{}{}",
            "Location: ".bold(),
            self.current.display().to_string().blue()
        ));
        console.say(&ui::rule());
        if self.entries.is_empty() {
            console.say(&"  (No visible subfolders)".dim().to_string());
        }
        for (i, name) in self.entries.iter().enumerate() {
            console.say(&format!(
                "  {} {}",
                format!("{:>2})", i + 1).cyan(),
                name.to_string_lossy()
            ));
        }
        console.say(&format!("\n{}", "Options:".bold()));
        console.say(&format!(
            "  {} {}  {}",
            "B)".green(),
            "BEGIN BACKUP".bold(),
            "(use this folder as the source)".dim()
        ));
        console.say(&format!("  {} Go up one level", "U)".yellow()));
        console.say(&format!("  {} HELP", "H)".magenta()));
        console.say(&format!("  {} Cancel", "Q)".red()));
    }
}

/// Interactive loop. `Ok(None)` means the user cancelled.
pub fn browse<C: Console + ?Sized>(console: &mut C, root: &Path) -> WizardResult<Option<PathBuf>> {
    let mut nav = Navigator::new(root);
    loop {
        nav.render(console);
        let raw = console.read_line(&"Choose an option (number/B/U/H/Q)".bold().to_string())?;
        let Some(command) = NavCommand::parse(&raw) else {
            ui::warn(console, "Invalid option.");
            console.pause()?;
            continue;
        };
        match nav.apply(command) {
            Step::Browsing => {}
            Step::Selected(path) => return Ok(Some(path)),
            Step::Cancelled => return Ok(None),
            Step::ShowHelp => ui::show_help(console)?,
            Step::OutOfRange => {
                ui::warn(console, "Number out of range.");
                console.pause()?;
            }
        }
    }
}

/// Like `browse`, with cancellation turned into `WizardError::Cancelled`.
pub fn select_folder<C: Console + ?Sized>(console: &mut C, root: &Path) -> WizardResult<PathBuf> {
    browse(console, root)?.ok_or(WizardError::Cancelled)
}
