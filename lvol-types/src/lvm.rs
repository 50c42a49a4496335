// SPDX-License-Identifier: GPL-3.0-only

//! AIX LVM types
//!
//! Snapshots of a volume group and a logical volume as reported by `lsvg` and
//! `lslv`. They live for a single reconciliation pass.

use serde::{Deserialize, Serialize};

/// Volume group information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeGroupInfo {
    /// Volume group name
    pub name: String,

    /// Number of physical partitions in the group
    pub total_partitions: u64,

    /// Number of unallocated physical partitions
    pub free_partitions: u64,

    /// Physical partition size in megabytes
    pub partition_size: u64,

    /// Total capacity in megabytes
    pub total_mb: u64,

    /// Free capacity in megabytes
    pub free_mb: u64,
}

impl VolumeGroupInfo {
    /// Get used capacity in megabytes
    pub fn used_mb(&self) -> u64 {
        self.total_mb.saturating_sub(self.free_mb)
    }

    /// Check whether `size_mb` fits in the free space of the group
    pub fn can_allocate(&self, size_mb: u64) -> bool {
        size_mb <= self.free_mb
    }
}

/// Inter-physical-volume allocation policy of a logical volume
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationPolicy {
    /// Spread partitions over as many physical volumes as possible
    #[default]
    Maximum,
    /// Keep partitions on as few physical volumes as possible
    Minimum,
}

impl AllocationPolicy {
    /// Flag value understood by `mklv -e` and `chlv -e`
    pub fn flag(&self) -> &'static str {
        match self {
            AllocationPolicy::Maximum => "x",
            AllocationPolicy::Minimum => "m",
        }
    }
}

impl std::fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationPolicy::Maximum => write!(f, "maximum"),
            AllocationPolicy::Minimum => write!(f, "minimum"),
        }
    }
}

impl std::str::FromStr for AllocationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "maximum" => Ok(AllocationPolicy::Maximum),
            "minimum" => Ok(AllocationPolicy::Minimum),
            _ => Err(format!("Invalid allocation policy: {}", s)),
        }
    }
}

/// Logical volume information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalVolumeInfo {
    /// Logical volume name
    pub name: String,

    /// Volume group the logical volume belongs to
    pub group: String,

    /// Number of logical partitions
    pub partitions: u64,

    /// Physical partition size in megabytes
    pub partition_size: u64,

    /// Size in megabytes (`partitions * partition_size`)
    pub size: u64,

    /// Inter-physical-volume allocation policy
    pub policy: AllocationPolicy,
}

impl LogicalVolumeInfo {
    pub fn new(
        name: String,
        group: String,
        partitions: u64,
        partition_size: u64,
        policy: AllocationPolicy,
    ) -> Self {
        Self {
            name,
            group,
            partitions,
            partition_size,
            size: partitions.saturating_mul(partition_size),
            policy,
        }
    }

    /// Get a display name for this logical volume
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.group, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_flags_match_mklv() {
        assert_eq!(AllocationPolicy::Maximum.flag(), "x");
        assert_eq!(AllocationPolicy::Minimum.flag(), "m");
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!(
            "Minimum".parse::<AllocationPolicy>(),
            Ok(AllocationPolicy::Minimum)
        );
        assert!("spread".parse::<AllocationPolicy>().is_err());
        assert_eq!(AllocationPolicy::Maximum.to_string(), "maximum");
    }

    #[test]
    fn logical_volume_size_is_partitions_times_pp_size() {
        let lv = LogicalVolumeInfo::new(
            "datalv".to_string(),
            "datavg".to_string(),
            32,
            32,
            AllocationPolicy::Minimum,
        );
        assert_eq!(lv.size, 1024);
        assert_eq!(lv.display_name(), "datavg/datalv");
    }

    #[test]
    fn volume_group_free_space_check() {
        let vg = VolumeGroupInfo {
            name: "datavg".to_string(),
            total_partitions: 100,
            free_partitions: 40,
            partition_size: 16,
            total_mb: 1600,
            free_mb: 640,
        };
        assert_eq!(vg.used_mb(), 960);
        assert!(vg.can_allocate(640));
        assert!(!vg.can_allocate(656));
    }
}
