// UI layer: every prompt and every line of output goes through `Console`.
// `Terminal` is the real implementation (dialoguer for input, crossterm for
// clearing and colors, indicatif for the spinner). In plain mode it strips
// every escape sequence before printing. Tests drive the same flow with a
// scripted console.

use crate::error::{WizardError, WizardResult};
use crate::input::{Answer, Text};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::borrow::Cow;
use std::ffi::OsStr;
use std::io::{self, IsTerminal};
use std::time::Duration;

pub const APP_NAME: &str = "0RG";

/// Minimal interactive surface the wizard needs.
pub trait Console {
    /// Wipe the screen before drawing a new panel.
    fn clear(&mut self);

    fn say(&mut self, text: &str);

    /// Read one line. The prompt carries no trailing colon.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    fn pause(&mut self) -> io::Result<()> {
        self.read_line(&"Press ENTER to continue...".dim().to_string())
            .map(|_| ())
    }

    /// Show that a blocking call is running. No-op by default.
    fn busy(&mut self, _message: &str) {}

    fn idle(&mut self) {}
}

/// Output is plain when stdout is not a terminal or `NO_COLOR` is set to
/// anything non-empty.
pub fn wants_plain(interactive: bool, no_color: Option<&OsStr>) -> bool {
    !interactive || no_color.map_or(false, |v| !v.is_empty())
}

/// Interactive terminal console.
pub struct Terminal {
    interactive: bool,
    plain: bool,
    spinner: Option<ProgressBar>,
}

impl Terminal {
    pub fn new() -> Self {
        let interactive = io::stdout().is_terminal();
        let plain = wants_plain(interactive, std::env::var_os("NO_COLOR").as_deref());
        Terminal { interactive, plain, spinner: None }
    }

    pub fn is_plain(&self) -> bool {
        self.plain
    }

    /// Drop every escape sequence (colors and attributes) in plain mode.
    pub fn render<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.plain {
            console::strip_ansi_codes(text)
        } else {
            Cow::Borrowed(text)
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Terminal::new()
    }
}

impl Console for Terminal {
    fn clear(&mut self) {
        if self.interactive {
            if let Err(e) = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0)) {
                debug!("cannot clear the screen: {}", e);
            }
        }
    }

    fn say(&mut self, text: &str) {
        println!("{}", self.render(text));
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        Input::<String>::new()
            .with_prompt(self.render(prompt))
            .allow_empty(true)
            .interact_text()
    }

    fn busy(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn idle(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

/// `0RG · <section>` header line.
pub fn title(section: &str) -> String {
    format!("{}{}", APP_NAME.cyan().bold(), format!(" · {section}").dim())
}

pub fn rule() -> String {
    "─".repeat(60).dark_grey().to_string()
}

/// Clear the screen and draw a panel header.
pub fn panel<C: Console + ?Sized>(console: &mut C, section: &str) {
    console.clear();
    console.say(&title(section));
    console.say(&rule());
}

pub fn warn<C: Console + ?Sized>(console: &mut C, message: &str) {
    console.say(&message.yellow().to_string());
}

pub fn error<C: Console + ?Sized>(console: &mut C, message: &str) {
    console.say(&format!("{} {}", "[ERROR]".red(), message));
}

pub fn help_text() -> String {
    let r = rule();
    format!(
        "{name}\n{r}\n\n\
         {what}\n\
         - Manual copy to a cloud remote using {copy} (sync is never used).\n\
         - Browse your folders and choose what to copy.\n\
         - {test} mode (dry-run) that uploads nothing.\n\
         - Optional {versions} with --backup-dir.\n\n\
         {login}\n\
         - With no remote configured, {config} is launched.\n\
         - The browser opens so you can sign in and grant permissions.\n\
         - If a remote has an empty or expired token, {reconnect} is offered.\n\n\
         {controls}\n\
         - {h} = show help\n\
         - {q} = quit/cancel\n\
         - Folder browser: {b} = BEGIN BACKUP with the current folder, {u} = go up\n\
         {r}",
        name = APP_NAME.bold(),
        what = "What does it do?".cyan(),
        copy = "rclone copy".bold(),
        test = "TEST".bold(),
        versions = "dated versioning".bold(),
        login = "When do I sign in?".cyan(),
        config = "rclone config".bold(),
        reconnect = "rclone config reconnect <remote>:".bold(),
        controls = "Controls".cyan(),
        h = "H".bold(),
        q = "Q".bold(),
        b = "B".bold(),
        u = "U".bold(),
    )
}

pub fn show_help<C: Console + ?Sized>(console: &mut C) -> WizardResult<()> {
    console.clear();
    console.say(&help_text());
    console.pause()?;
    Ok(())
}

/// Yes/no question with a default. Quit tokens cancel the run.
pub fn confirm<C: Console + ?Sized>(
    console: &mut C,
    prompt: &str,
    default_yes: bool,
) -> WizardResult<bool> {
    let hint = if default_yes { "(Y/n)" } else { "(y/N)" };
    let line = format!("{} {}", prompt.bold(), hint.dim());
    loop {
        let raw = console.read_line(&line)?;
        match Answer::parse(&raw) {
            Some(Answer::Default) => return Ok(default_yes),
            Some(Answer::Yes) => return Ok(true),
            Some(Answer::No) => return Ok(false),
            Some(Answer::Quit) => return Err(WizardError::Cancelled),
            Some(Answer::Help) => show_help(console)?,
            None => warn(console, "Answer Y or N (or H for help)."),
        }
    }
}

/// Free-text prompt. An empty line takes `default`.
pub fn ask_text<C: Console + ?Sized>(
    console: &mut C,
    prompt: &str,
    default: &str,
) -> WizardResult<String> {
    let line = if default.is_empty() {
        prompt.bold().to_string()
    } else {
        format!("{} {}", prompt.bold(), format!("[{default}]").dim())
    };
    loop {
        let raw = console.read_line(&line)?;
        match Text::parse(&raw) {
            Text::Empty => return Ok(default.to_string()),
            Text::Value(value) => return Ok(value),
            Text::Quit => return Err(WizardError::Cancelled),
            Text::Help => show_help(console)?,
        }
    }
}
