// SPDX-License-Identifier: GPL-3.0-only

//! Process execution for the AIX LVM commands
//!
//! The reconciler only talks to the system through [`CommandRunner`], so tests
//! can replay canned `lsvg`/`lslv` output without an AIX host.

use std::path::PathBuf;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{LvolError, Result};

/// Program used to simulate mutating commands in check mode
pub const ECHO: &str = "echo";

/// A program plus its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Wrap the command in `echo` so it is printed instead of executed
    pub fn echo_wrapped(self) -> Self {
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(self.program);
        args.extend(self.args);
        Self {
            program: ECHO.to_string(),
            args,
        }
    }

    pub fn render(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Exit code and captured streams of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Resolves and runs external commands
pub trait CommandRunner {
    /// Locate a binary by name
    fn resolve(&self, name: &str) -> Result<PathBuf>;

    /// Run a command to completion; a non-zero exit is not an error here
    fn run(&self, command: &CommandLine) -> Result<CommandOutput>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        (**self).resolve(name)
    }

    fn run(&self, command: &CommandLine) -> Result<CommandOutput> {
        (**self).run(command)
    }
}

/// Runs commands on the local system, resolving binaries on `PATH`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        which::which(name).map_err(|_| LvolError::CommandNotFound(name.to_string()))
    }

    fn run(&self, command: &CommandLine) -> Result<CommandOutput> {
        debug!("Running {}", command);

        let output = Command::new(&command.program)
            .args(&command.args)
            .output()?;

        let output = CommandOutput {
            // A missing code means the process was killed by a signal.
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !output.success() {
            warn!(
                "{} exited with {}: {}",
                command.program,
                output.exit_code,
                output.stderr.trim()
            );
        }

        Ok(output)
    }
}
