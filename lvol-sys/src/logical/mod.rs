// SPDX-License-Identifier: GPL-3.0-only

pub mod aix_tools;

pub use aix_tools::{parse_logical_volume, parse_volume_group};
