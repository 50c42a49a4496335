// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use lvol_types::{AllocationPolicy, DesiredState, VolumeState};
use serde::Deserialize;

use crate::cli::Args;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Error,
            1 => Self::Warn,
            2 => Self::Info,
            3 => Self::Debug,
            _ => Self::Trace,
        }
    }

    pub fn to_index(self) -> usize {
        match self {
            Self::Error => 0,
            Self::Warn => 1,
            Self::Info => 2,
            Self::Debug => 3,
            Self::Trace => 4,
        }
    }

    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Raise verbosity by `steps` levels, saturating at trace
    pub fn raised(self, steps: u8) -> Self {
        Self::from_index(self.to_index() + usize::from(steps))
    }
}

/// Values read from the `--config` TOML file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub group: Option<String>,
    pub lv: Option<String>,
    #[serde(rename = "type")]
    pub lv_type: Option<String>,
    pub size: Option<String>,
    pub extra_options: Option<String>,
    pub copies: Option<u8>,
    pub state: Option<VolumeState>,
    pub shrink_allowed: Option<bool>,
    pub policy: Option<AllocationPolicy>,
    pub physical_volumes: Option<Vec<String>>,
    pub check_mode: Option<bool>,
    pub log_level: Option<LoggingLevel>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parse config file {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

/// Everything one run needs, after merging flags over the config file
#[derive(Debug, Clone)]
pub struct Settings {
    pub desired: DesiredState,
    pub check_mode: bool,
    pub log_level: LoggingLevel,
}

impl Settings {
    pub fn from_args(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(args, file)
    }

    /// Flags win over file values, file values win over defaults
    pub fn merge(args: &Args, file: FileConfig) -> Result<Self> {
        let Some(group) = args.group.clone().or(file.group) else {
            bail!("missing required argument: group");
        };
        let Some(lv) = args.lv.clone().or(file.lv) else {
            bail!("missing required argument: lv");
        };

        let mut desired = DesiredState::new(group, lv);
        if let Some(lv_type) = args.lv_type.clone().or(file.lv_type) {
            desired.lv_type = lv_type;
        }
        desired.size = args.size.clone().or(file.size);
        if let Some(extra_options) = args.extra_options.clone().or(file.extra_options) {
            desired.extra_options = extra_options;
        }
        if let Some(copies) = args.copies.or(file.copies) {
            desired.copies = copies;
        }
        if let Some(state) = args.state.or(file.state) {
            desired.state = state;
        }
        if let Some(shrink_allowed) = args.shrink_allowed.or(file.shrink_allowed) {
            desired.shrink_allowed = shrink_allowed;
        }
        if let Some(policy) = args.policy.or(file.policy) {
            desired.policy = policy;
        }
        if let Some(physical_volumes) = args.physical_volumes.clone().or(file.physical_volumes) {
            desired.physical_volumes = physical_volumes
                .into_iter()
                .map(|pv| pv.trim().to_string())
                .filter(|pv| !pv.is_empty())
                .collect();
        }

        Ok(Self {
            desired,
            check_mode: args.check || file.check_mode.unwrap_or(false),
            log_level: file.log_level.unwrap_or_default().raised(args.verbose),
        })
    }
}
