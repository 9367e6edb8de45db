#![allow(dead_code)]

use anyhow::Result;
use org_backup::rclone::{Probe, Rclone};
use org_backup::transfer::CopyCommand;
use org_backup::ui::Console;
use std::collections::VecDeque;
use std::io;

/// Console fed from a fixed list of input lines. Running out of input is
/// an `UnexpectedEof` error so a wrong script fails instead of hanging.
#[derive(Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    pub output: Vec<String>,
    pub prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(inputs: &[&str]) -> Self {
        ScriptedConsole {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }
}

impl Console for ScriptedConsole {
    fn clear(&mut self) {}

    fn say(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.inputs
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

/// In-memory stand-in for rclone that records every call.
pub struct FakeRclone {
    pub remotes: Vec<String>,
    pub remotes_after_setup: Vec<String>,
    /// Consumed in order; once empty every probe succeeds.
    pub probes: VecDeque<Probe>,
    pub setup_code: i32,
    pub reconnect_code: i32,
    pub copy_code: i32,
    pub calls: Vec<String>,
    pub copies: Vec<Vec<String>>,
    setup_ran: bool,
}

impl FakeRclone {
    pub fn with_remotes(remotes: &[&str]) -> Self {
        FakeRclone {
            remotes: remotes.iter().map(|s| s.to_string()).collect(),
            remotes_after_setup: Vec::new(),
            probes: VecDeque::new(),
            setup_code: 0,
            reconnect_code: 0,
            copy_code: 0,
            calls: Vec::new(),
            copies: Vec::new(),
            setup_ran: false,
        }
    }

    pub fn probing(mut self, probes: Vec<Probe>) -> Self {
        self.probes = probes.into();
        self
    }

    pub fn called(&self, call: &str) -> bool {
        self.calls.iter().any(|c| c == call)
    }
}

impl Rclone for FakeRclone {
    fn list_remotes(&mut self) -> Vec<String> {
        self.calls.push("listremotes".into());
        if self.setup_ran {
            self.remotes_after_setup.clone()
        } else {
            self.remotes.clone()
        }
    }

    fn probe(&mut self, remote: &str) -> Result<Probe> {
        self.calls.push(format!("lsd {}:", remote));
        Ok(self.probes.pop_front().unwrap_or(Probe::Reachable))
    }

    fn setup_wizard(&mut self) -> Result<i32> {
        self.calls.push("config".into());
        self.setup_ran = true;
        Ok(self.setup_code)
    }

    fn reconnect(&mut self, remote: &str) -> Result<i32> {
        self.calls.push(format!("config reconnect {}:", remote));
        Ok(self.reconnect_code)
    }

    fn copy(&mut self, command: &CopyCommand) -> Result<i32> {
        self.calls.push("copy".into());
        self.copies.push(
            command
                .args()
                .into_iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
        );
        Ok(self.copy_code)
    }
}
