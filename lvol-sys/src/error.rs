// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

use crate::cmd::CommandOutput;

/// Error types for logical volume reconciliation
#[derive(Error, Debug)]
pub enum LvolError {
    #[error("No valid size unit specified: {0}")]
    InvalidUnit(String),

    #[error("Invalid size format: {0}")]
    InvalidSizeFormat(String),

    #[error("Unable to parse {command} output: missing {field}")]
    MalformedOutput {
        command: &'static str,
        field: &'static str,
        output: Option<CommandOutput>,
    },

    #[error("Volume group {group} does not exist.")]
    GroupNotFound { group: String, output: CommandOutput },

    #[error("No size given.")]
    NoSizeGiven,

    #[error("Not enough free space in volume group {group}: {free_mb} MB free.")]
    InsufficientSpace { group: String, free_mb: u64 },

    #[error("Logical volume {lv} already exists in volume group {group}.")]
    GroupMismatch { lv: String, group: String },

    #[error("No shrinking of Logical Volume {lv} permitted. Current size: {current_mb} MB")]
    ShrinkNotPermitted { lv: String, current_mb: u64 },

    #[error("{message}")]
    CommandExecutionFailed {
        message: String,
        output: CommandOutput,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LvolError {
    /// Captured output of the command behind this error, if any
    pub fn output(&self) -> Option<&CommandOutput> {
        match self {
            LvolError::GroupNotFound { output, .. }
            | LvolError::CommandExecutionFailed { output, .. } => Some(output),
            LvolError::MalformedOutput { output, .. } => output.as_ref(),
            _ => None,
        }
    }

    /// Attach the output of the command whose text failed to parse
    pub fn with_output(self, captured: &CommandOutput) -> Self {
        match self {
            LvolError::MalformedOutput {
                command,
                field,
                output: None,
            } => LvolError::MalformedOutput {
                command,
                field,
                output: Some(captured.clone()),
            },
            other => other,
        }
    }
}

/// Result type alias for logical volume operations
pub type Result<T> = std::result::Result<T, LvolError>;
