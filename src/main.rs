// Entrypoint for the backup wizard.
// - Keeps `main` small: logging, Ctrl-C handling, settings, then the wizard.
// - Every outcome becomes a process exit code; cancelling is a clean 0.

use crossterm::style::Stylize;
use log::{error, warn};
use org_backup::config::Settings;
use org_backup::error::{WizardError, WizardResult};
use org_backup::session::{run_wizard, Session};
use org_backup::ui::Terminal;

fn main() {
    // Quiet by default so log lines never land in the middle of a prompt.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Ctrl-C while rclone runs: the child gets the signal too, we just leave.
    if let Err(e) = ctrlc::set_handler(|| {
        println!("\n{}\n", "Interrupted by user.".yellow());
        std::process::exit(0);
    }) {
        warn!("cannot install the Ctrl-C handler: {}", e);
    }

    let code = match run() {
        Ok(_) => 0,
        Err(err) => report(err),
    };
    std::process::exit(code);
}

fn run() -> WizardResult<Session> {
    let settings = Settings::from_env()?;
    let mut console = Terminal::new();
    run_wizard(&mut console, &settings)
}

fn report(err: WizardError) -> i32 {
    let code = err.exit_code();
    if err.is_interrupt() {
        println!("\n{}\n", "Interrupted by user.".yellow());
    } else if !err.is_silent() {
        error!("{}", err);
        if matches!(err, WizardError::Settings { .. } | WizardError::Io(_) | WizardError::Other(_)) {
            eprintln!("{} {}", "[ERROR]".red(), err);
        }
    }
    code
}
