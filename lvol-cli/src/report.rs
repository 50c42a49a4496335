// SPDX-License-Identifier: GPL-3.0-only

use lvol_sys::LvolError;
use lvol_types::Outcome;
use serde::Serialize;

/// Document printed on stdout at the end of a run
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Success(Outcome),
    Failure(Failure),
}

#[derive(Debug, Serialize)]
pub struct Failure {
    pub failed: bool,
    pub message: String,
    pub exit_code: Option<i32>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl Report {
    pub fn failure(message: impl Into<String>) -> Self {
        Report::Failure(Failure {
            failed: true,
            message: message.into(),
            exit_code: None,
            stdout: None,
            stderr: None,
        })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Report::Failure(_))
    }
}

impl From<Outcome> for Report {
    fn from(outcome: Outcome) -> Self {
        Report::Success(outcome)
    }
}

impl From<&clap::Error> for Report {
    fn from(error: &clap::Error) -> Self {
        // clap renders a summary line followed by usage hints
        let rendered = error.to_string();
        let summary = rendered.lines().next().unwrap_or_default();
        Report::failure(summary.trim_start_matches("error: "))
    }
}

impl From<&LvolError> for Report {
    fn from(error: &LvolError) -> Self {
        let output = error.output();
        Report::Failure(Failure {
            failed: true,
            message: error.to_string(),
            exit_code: output.map(|o| o.exit_code),
            stdout: output.map(|o| o.stdout.clone()),
            stderr: output.map(|o| o.stderr.clone()),
        })
    }
}
