// SPDX-License-Identifier: GPL-3.0-only

//! Converge a logical volume towards its desired state
//!
//! One pass queries `lsvg` and `lslv`, then runs at most one of `mklv`,
//! `rmlv`, `chlv` or `extendlv`. A policy change ends the pass, so a size
//! change requested alongside it is applied on the next run.

use std::path::Path;

use lvol_types::{
    DesiredState, LogicalVolumeInfo, MAX_COPIES, Outcome, VolumeGroupInfo, VolumeState,
};
use tracing::{debug, info};

use crate::cmd::{CommandLine, CommandOutput, CommandRunner};
use crate::logical::aix_tools::{parse_logical_volume, parse_volume_group};
use crate::units::{normalize_size, round_up_to_granularity};
use crate::{LvolError, Result};

pub const LSVG: &str = "lsvg";
pub const LSLV: &str = "lslv";
pub const MKLV: &str = "mklv";
pub const RMLV: &str = "rmlv";
pub const CHLV: &str = "chlv";
pub const EXTENDLV: &str = "extendlv";

/// Drives a single reconciliation pass through a [`CommandRunner`]
pub struct Reconciler<R> {
    runner: R,
    check_mode: bool,
}

impl<R: CommandRunner> Reconciler<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            check_mode: false,
        }
    }

    /// In check mode mutating commands are passed through `echo` instead of
    /// being executed; the outcome still reports the change.
    pub fn with_check_mode(mut self, check_mode: bool) -> Self {
        self.check_mode = check_mode;
        self
    }

    pub fn apply(&self, desired: &DesiredState) -> Result<Outcome> {
        validate(desired)?;

        let lsvg = self.program(LSVG)?;
        let lslv = self.program(LSLV)?;

        let vg_output = self.query(CommandLine::new(lsvg).arg(&desired.group))?;
        if !vg_output.success() {
            return match desired.state {
                VolumeState::Absent => Ok(Outcome::unchanged(format!(
                    "Volume group {} does not exist.",
                    desired.group
                ))),
                VolumeState::Present => Err(LvolError::GroupNotFound {
                    group: desired.group.clone(),
                    output: vg_output,
                }),
            };
        }

        let vg =
            parse_volume_group(&vg_output.stdout).map_err(|e| e.with_output(&vg_output))?;
        debug!(
            "Volume group {}: PP size {} MB, {} MB used, {} MB free",
            vg.name,
            vg.partition_size,
            vg.used_mb(),
            vg.free_mb
        );

        // Requested sizes are rounded up to whole physical partitions.
        let size = desired
            .requested_size()
            .map(|text| {
                let mb = normalize_size(text)?;
                round_up_to_granularity(mb, vg.partition_size)
                    .ok_or_else(|| LvolError::InvalidSizeFormat(text.to_string()))
            })
            .transpose()?;

        let lv_output = self.query(CommandLine::new(lslv).arg(&desired.name))?;
        let current = if lv_output.success() {
            parse_logical_volume(&lv_output.stdout)
                .map_err(|e| e.with_output(&lv_output))?
        } else if desired.state == VolumeState::Absent {
            return Ok(Outcome::unchanged(format!(
                "Logical Volume {} does not exist.",
                desired.name
            )));
        } else {
            None
        };

        if let Some(lv) = &current {
            debug!(
                "Logical volume {}: {} MB, policy {}",
                lv.display_name(),
                lv.size,
                lv.policy
            );
        }

        match (current, desired.state) {
            (None, VolumeState::Present) => {
                let Some(size) = size else {
                    return Err(LvolError::NoSizeGiven);
                };
                self.create(desired, &vg, size)
            }
            (None, VolumeState::Absent) => Ok(Outcome::unchanged(format!(
                "Logical Volume {} does not exist.",
                desired.name
            ))),
            (Some(current), VolumeState::Absent) => self.remove(desired, &current),
            (Some(current), VolumeState::Present) => self.refine(desired, &current, size),
        }
    }

    fn create(&self, desired: &DesiredState, vg: &VolumeGroupInfo, size: u64) -> Result<Outcome> {
        if !vg.can_allocate(size) {
            return Err(LvolError::InsufficientSpace {
                group: vg.name.clone(),
                free_mb: vg.free_mb,
            });
        }

        info!(
            "Creating logical volume {} ({} MB) in {}",
            desired.name, size, desired.group
        );
        let command = CommandLine::new(self.program(MKLV)?)
            .arg("-t")
            .arg(&desired.lv_type)
            .arg("-y")
            .arg(&desired.name)
            .arg("-c")
            .arg(desired.copies.to_string())
            .arg("-e")
            .arg(desired.policy.flag())
            .args(desired.extra_option_args())
            .arg(&desired.group)
            .arg(format!("{size}M"))
            .args(&desired.physical_volumes);

        self.mutate(
            command,
            format!("Logical volume {} created.", desired.name),
            format!("Creating logical volume {} failed.", desired.name),
        )
    }

    fn remove(&self, desired: &DesiredState, current: &LogicalVolumeInfo) -> Result<Outcome> {
        info!("Removing logical volume {}", current.display_name());
        let command = CommandLine::new(self.program(RMLV)?)
            .arg("-f")
            .arg(&current.name);

        self.mutate(
            command,
            format!("Logical volume {} deleted.", desired.name),
            format!("Failed to remove logical volume {}.", desired.name),
        )
    }

    fn refine(
        &self,
        desired: &DesiredState,
        current: &LogicalVolumeInfo,
        size: Option<u64>,
    ) -> Result<Outcome> {
        if current.policy != desired.policy {
            info!(
                "Changing allocation policy of {} from {} to {}",
                current.display_name(),
                current.policy,
                desired.policy
            );
            let command = CommandLine::new(self.program(CHLV)?)
                .arg("-e")
                .arg(desired.policy.flag())
                .arg(&current.name);

            return self.mutate(
                command,
                format!(
                    "Logical volume {} policy changed: {}.",
                    desired.name, desired.policy
                ),
                format!("Failed to change logical volume {} policy.", desired.name),
            );
        }

        if current.group != desired.group {
            return Err(LvolError::GroupMismatch {
                lv: desired.name.clone(),
                group: current.group.clone(),
            });
        }

        let Some(size) = size else {
            return Ok(Outcome::unchanged(format!(
                "Logical volume {} already exists.",
                desired.name
            )));
        };

        if size > current.size {
            let delta = size - current.size;
            info!(
                "Extending logical volume {} by {} MB to {} MB",
                current.display_name(),
                delta,
                size
            );
            let command = CommandLine::new(self.program(EXTENDLV)?)
                .arg(&desired.name)
                .arg(format!("{delta}M"));

            self.mutate(
                command,
                format!("Logical volume {} size extended to {}MB.", desired.name, size),
                format!("Unable to resize {} to {}MB.", desired.name, size),
            )
        } else if size < current.size && !desired.shrink_allowed {
            Err(LvolError::ShrinkNotPermitted {
                lv: desired.name.clone(),
                current_mb: current.size,
            })
        } else {
            Ok(Outcome::unchanged(format!(
                "Logical volume {} size is already {}MB or higher.",
                desired.name, size
            )))
        }
    }

    fn program(&self, name: &str) -> Result<String> {
        self.runner.resolve(name).map(|path| display(&path))
    }

    fn query(&self, command: CommandLine) -> Result<CommandOutput> {
        debug!("Querying {}", command);
        self.runner.run(&command)
    }

    fn mutate(&self, command: CommandLine, changed: String, failed: String) -> Result<Outcome> {
        let command = if self.check_mode {
            command.echo_wrapped()
        } else {
            command
        };

        info!("Running {}", command);
        let output = self.runner.run(&command)?;
        if output.success() {
            Ok(Outcome::changed(changed))
        } else {
            Err(LvolError::CommandExecutionFailed {
                message: failed,
                output,
            })
        }
    }
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn validate(desired: &DesiredState) -> Result<()> {
    if desired.group.trim().is_empty() {
        return Err(LvolError::InvalidInput("volume group name is empty".to_string()));
    }
    if desired.name.trim().is_empty() {
        return Err(LvolError::InvalidInput(
            "logical volume name is empty".to_string(),
        ));
    }
    if !(1..=MAX_COPIES).contains(&desired.copies) {
        return Err(LvolError::InvalidInput(format!(
            "copies must be between 1 and {MAX_COPIES}, got {}",
            desired.copies
        )));
    }
    Ok(())
}
