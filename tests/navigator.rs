mod common;

use common::ScriptedConsole;
use org_backup::error::WizardError;
use org_backup::navigator::{browse, select_folder};
use std::fs;

fn tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for path in ["Music", "photos/2023", "photos/2024", ".cache", "Archive"] {
        fs::create_dir_all(dir.path().join(path)).unwrap();
    }
    dir
}

#[test]
fn descend_then_begin_selects_subfolder() {
    let dir = tree();
    // Archive, Music, photos -> 3) photos -> 2) 2024
    let mut console = ScriptedConsole::new(&["3", "2", "b"]);
    let picked = browse(&mut console, dir.path()).unwrap();
    assert_eq!(picked, Some(dir.path().join("photos").join("2024")));
    assert_eq!(console.remaining(), 0);
}

#[test]
fn ascend_returns_to_parent() {
    let dir = tree();
    let mut console = ScriptedConsole::new(&["3", "u", "b"]);
    let picked = browse(&mut console, dir.path()).unwrap();
    assert_eq!(picked, Some(dir.path().to_path_buf()));
}

#[test]
fn hidden_folders_are_not_listed() {
    let dir = tree();
    let mut console = ScriptedConsole::new(&["q"]);
    browse(&mut console, dir.path()).unwrap();
    let screen = console.transcript();
    assert!(screen.contains("Archive"));
    assert!(screen.contains("Music"));
    assert!(!screen.contains(".cache"));
}

#[test]
fn bad_input_reprompts_without_moving() {
    let dir = tree();
    // Each warning waits for ENTER before the browser is redrawn.
    let mut console = ScriptedConsole::new(&["x", "", "9", "", "h", "", "b"]);
    let picked = browse(&mut console, dir.path()).unwrap();
    assert_eq!(picked, Some(dir.path().to_path_buf()));
    let screen = console.transcript();
    assert!(screen.contains("Invalid option."));
    assert!(screen.contains("Number out of range."));
}

#[test]
fn quit_cancels() {
    let dir = tree();
    let mut console = ScriptedConsole::new(&["1", "salir"]);
    assert_eq!(browse(&mut console, dir.path()).unwrap(), None);

    let mut console = ScriptedConsole::new(&["Q"]);
    let err = select_folder(&mut console, dir.path()).unwrap_err();
    assert!(matches!(err, WizardError::Cancelled));
}

#[test]
fn empty_folder_can_still_be_selected() {
    let dir = tree();
    let music = dir.path().join("Music");
    let mut console = ScriptedConsole::new(&["1", "", "b"]);
    assert_eq!(browse(&mut console, &music).unwrap(), Some(music.clone()));
    assert!(console.transcript().contains("(No visible subfolders)"));
}
