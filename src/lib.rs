// Library root
// -----------
// The binary (`main.rs`) only sets up logging and the interrupt handler;
// the wizard itself lives here so it can be driven from tests.
//
// Module responsibilities:
// - `session`: orchestrates a run, from remote discovery to the copy.
// - `health`: probes the chosen remote and repairs expired tokens.
// - `navigator`: the interactive folder browser.
// - `rclone`: spawns the external tool behind the `Rclone` trait.
// - `transfer`: backup parameters and the `rclone copy` command line.
// - `ui`: terminal I/O behind the `Console` trait, panels and prompts.
// - `input`: typed commands parsed from raw prompt lines.
// - `config`: settings file and environment overrides.
// - `error`: the error taxonomy and exit codes.
pub mod config;
pub mod error;
pub mod health;
pub mod input;
pub mod navigator;
pub mod rclone;
pub mod session;
pub mod transfer;
pub mod ui;
