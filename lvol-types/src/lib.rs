// SPDX-License-Identifier: GPL-3.0-only

//! Domain models for AIX logical volume reconciliation
//!
//! This crate holds the types shared between the reconciler and its callers:
//!
//! - **lvol-sys**: Produces `VolumeGroupInfo` / `LogicalVolumeInfo` by parsing
//!   `lsvg` and `lslv` output, consumes `DesiredState` and returns an `Outcome`
//! - **lvol-cli**: Builds a `DesiredState` from flags and config, prints the `Outcome`
//!
//! All sizes are expressed in megabytes, the unit AIX reports and accepts.

pub mod desired;
pub mod lvm;

pub use desired::{DEFAULT_LV_TYPE, DesiredState, MAX_COPIES, Outcome, VolumeState};
pub use lvm::{AllocationPolicy, LogicalVolumeInfo, VolumeGroupInfo};
