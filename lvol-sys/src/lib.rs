// SPDX-License-Identifier: GPL-3.0-only

//! Reconciliation of AIX logical volumes
//!
//! This crate wraps the AIX LVM commands and decides which one, if any, has to
//! run to bring a logical volume to its desired state:
//! - Size conversion and partition rounding (`units`)
//! - Parsing of `lsvg` / `lslv` output (`logical`)
//! - Process execution behind a replaceable runner (`cmd`)
//! - The decision logic itself (`reconcile`)
//!
//! Mutating commands require root on the target host.

pub mod cmd;
pub mod error;
pub mod logical;
pub mod reconcile;
pub mod units;

pub use cmd::{CommandLine, CommandOutput, CommandRunner, SystemRunner};
pub use error::{LvolError, Result};
pub use logical::{parse_logical_volume, parse_volume_group};
pub use reconcile::Reconciler;
pub use units::{DEFAULT_GRANULARITY, normalize_size, round_up_to_granularity};
