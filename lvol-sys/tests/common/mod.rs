// SPDX-License-Identifier: GPL-3.0-only

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lvol_sys::{CommandLine, CommandOutput, CommandRunner, LvolError, Result};

pub const SBIN: &str = "/usr/sbin";

/// Replays canned output per program and records every command it is given
#[derive(Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, CommandOutput>,
    missing: Vec<String>,
    log: RefCell<Vec<CommandLine>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, program: &str, output: CommandOutput) -> Self {
        self.responses.insert(program.to_string(), output);
        self
    }

    pub fn lsvg(self, stdout: String) -> Self {
        self.respond("lsvg", ok(stdout))
    }

    pub fn lslv(self, stdout: String) -> Self {
        self.respond("lslv", ok(stdout))
    }

    pub fn failing(self, program: &str, exit_code: i32, stderr: &str) -> Self {
        self.respond(
            program,
            CommandOutput {
                exit_code,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        )
    }

    pub fn without_binary(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    pub fn commands(&self) -> Vec<CommandLine> {
        self.log.borrow().clone()
    }

    pub fn rendered(&self) -> Vec<String> {
        self.log.borrow().iter().map(CommandLine::render).collect()
    }

    /// Commands other than the `lsvg`/`lslv` queries
    pub fn mutating(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter(|command| !matches!(basename(&command.program), "lsvg" | "lslv"))
            .map(CommandLine::render)
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        if self.missing.iter().any(|missing| missing == name) {
            return Err(LvolError::CommandNotFound(name.to_string()));
        }
        Ok(Path::new(SBIN).join(name))
    }

    fn run(&self, command: &CommandLine) -> Result<CommandOutput> {
        self.log.borrow_mut().push(command.clone());

        let program = basename(&command.program);
        if program == "echo" {
            return Ok(ok(format!("{}\n", command.args.join(" "))));
        }

        Ok(self
            .responses
            .get(program)
            .cloned()
            .unwrap_or_else(|| ok(String::new())))
    }
}

fn basename(program: &str) -> &str {
    Path::new(program)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(program)
}

pub fn ok(stdout: String) -> CommandOutput {
    CommandOutput {
        exit_code: 0,
        stdout,
        stderr: String::new(),
    }
}

pub fn lsvg_output(name: &str, pp_size: u64, total_pps: u64, free_pps: u64) -> String {
    format!(
        "\
VOLUME GROUP:       {name}                   VG IDENTIFIER:  00c8b12a00004c000000015a2b3c4d5e
VG STATE:           active                   PP SIZE:        {pp_size} megabyte(s)
VG PERMISSION:      read/write               TOTAL PPs:      {total_pps} ({total_mb} megabytes)
MAX LVs:            256                      FREE PPs:       {free_pps} ({free_mb} megabytes)
LVs:                3                        USED PPs:       {used_pps} ({used_mb} megabytes)
TOTAL PVs:          2                        VG DESCRIPTORS: 3
",
        total_mb = total_pps * pp_size,
        free_mb = free_pps * pp_size,
        used_pps = total_pps - free_pps,
        used_mb = (total_pps - free_pps) * pp_size,
    )
}

pub fn lslv_output(name: &str, group: &str, lps: u64, pp_size: u64, policy: &str) -> String {
    format!(
        "\
LOGICAL VOLUME:     {name}                 VOLUME GROUP:   {group}
LV IDENTIFIER:      00c8b12a00004c000000015a2b3c4d5e.3 PERMISSION:     read/write
VG STATE:           active/complete        LV STATE:       closed/syncd
TYPE:               jfs2                   WRITE VERIFY:   off
MAX LPs:            512                    PP SIZE:        {pp_size} megabyte(s)
COPIES:             1                      SCHED POLICY:   parallel
LPs:                {lps}                     PPs:            {lps}
STALE PPs:          0                      BB POLICY:      relocatable
INTER-POLICY:       {policy}                RELOCATABLE:    yes
INTRA-POLICY:       middle                 UPPER BOUND:    32
MOUNT POINT:        N/A                    LABEL:          None
"
    )
}
