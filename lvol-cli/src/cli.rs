// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use lvol_types::{AllocationPolicy, VolumeState};

/// Create, extend, re-policy or remove an AIX logical volume
///
/// Flags override values from the configuration file.
#[derive(Debug, Parser)]
#[command(name = "aix-lvol")]
#[command(about = "Converge an AIX logical volume to the requested state", long_about = None)]
#[command(version)]
pub struct Args {
    /// Volume group the logical volume belongs to
    #[arg(long, visible_alias = "vg")]
    pub group: Option<String>,

    /// Name of the logical volume
    #[arg(long)]
    pub lv: Option<String>,

    /// Logical volume type [default: jfs2]
    #[arg(long = "type", visible_alias = "lv-type")]
    pub lv_type: Option<String>,

    /// Size with an M, G or T suffix, e.g. 512M
    #[arg(long)]
    pub size: Option<String>,

    /// Free-form options passed to mklv
    #[arg(long, visible_alias = "opts", allow_hyphen_values = true)]
    pub extra_options: Option<String>,

    /// Number of copies of each logical partition (1-3) [default: 1]
    #[arg(long)]
    pub copies: Option<u8>,

    /// present or absent [default: present]
    #[arg(long)]
    pub state: Option<VolumeState>,

    /// Accept a smaller requested size without failing [default: yes]
    #[arg(long, visible_alias = "shrink", value_parser = BoolishValueParser::new())]
    pub shrink_allowed: Option<bool>,

    /// Inter-physical-volume allocation policy: maximum or minimum [default: maximum]
    #[arg(long)]
    pub policy: Option<AllocationPolicy>,

    /// Comma separated physical volumes, e.g. hdisk1,hdisk2
    #[arg(long, visible_alias = "pvs", value_delimiter = ',')]
    pub physical_volumes: Option<Vec<String>>,

    /// Print mutating commands through echo instead of running them
    #[arg(long, visible_alias = "dry-run")]
    pub check: bool,

    /// TOML file with default values for any of the flags
    #[arg(long, env = "AIX_LVOL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
