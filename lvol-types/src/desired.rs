// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use crate::lvm::AllocationPolicy;

/// Logical volume type used when none is requested
pub const DEFAULT_LV_TYPE: &str = "jfs2";

/// AIX keeps at most three copies of each logical partition
pub const MAX_COPIES: u8 = 3;

/// Whether the logical volume should exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeState {
    #[default]
    Present,
    Absent,
}

impl std::fmt::Display for VolumeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolumeState::Present => write!(f, "present"),
            VolumeState::Absent => write!(f, "absent"),
        }
    }
}

impl std::str::FromStr for VolumeState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "present" => Ok(VolumeState::Present),
            "absent" => Ok(VolumeState::Absent),
            _ => Err(format!("Invalid state: {}", s)),
        }
    }
}

/// Target state of a logical volume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredState {
    /// Volume group the logical volume lives in
    pub group: String,

    /// Logical volume name
    pub name: String,

    /// Logical volume type passed to `mklv -t`
    pub lv_type: String,

    /// Requested size with a unit suffix, e.g. "512M" or "2G"
    pub size: Option<String>,

    /// Number of copies of each logical partition (1-3)
    pub copies: u8,

    /// Inter-physical-volume allocation policy
    pub policy: AllocationPolicy,

    /// Free-form options appended to `mklv`
    pub extra_options: String,

    /// Accept a requested size below the current one without failing
    pub shrink_allowed: bool,

    /// Physical volumes to allocate from, e.g. ["hdisk1", "hdisk2"]
    pub physical_volumes: Vec<String>,

    /// Whether the logical volume should exist
    pub state: VolumeState,
}

impl DesiredState {
    /// Create a desired state with defaults for everything but the names
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            lv_type: DEFAULT_LV_TYPE.to_string(),
            size: None,
            copies: 1,
            policy: AllocationPolicy::default(),
            extra_options: String::new(),
            shrink_allowed: true,
            physical_volumes: Vec::new(),
            state: VolumeState::default(),
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_state(mut self, state: VolumeState) -> Self {
        self.state = state;
        self
    }

    pub fn with_policy(mut self, policy: AllocationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_shrink_allowed(mut self, shrink_allowed: bool) -> Self {
        self.shrink_allowed = shrink_allowed;
        self
    }

    pub fn is_present(&self) -> bool {
        self.state == VolumeState::Present
    }

    /// Requested size, treating an empty string as no size
    pub fn requested_size(&self) -> Option<&str> {
        self.size.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Extra `mklv` options split into separate arguments
    pub fn extra_option_args(&self) -> Vec<String> {
        self.extra_options
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

/// Result of a successful reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether a mutating command ran (or would have run in check mode)
    pub changed: bool,

    /// Human readable description of what happened
    pub message: String,
}

impl Outcome {
    pub fn changed(message: impl Into<String>) -> Self {
        Self {
            changed: true,
            message: message.into(),
        }
    }

    pub fn unchanged(message: impl Into<String>) -> Self {
        Self {
            changed: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_mklv_conventions() {
        let desired = DesiredState::new("datavg", "datalv");
        assert_eq!(desired.lv_type, "jfs2");
        assert_eq!(desired.copies, 1);
        assert_eq!(desired.policy, AllocationPolicy::Maximum);
        assert!(desired.shrink_allowed);
        assert!(desired.is_present());
        assert!(desired.requested_size().is_none());
    }

    #[test]
    fn blank_size_counts_as_missing() {
        let desired = DesiredState::new("datavg", "datalv").with_size("  ");
        assert!(desired.requested_size().is_none());
    }

    #[test]
    fn extra_options_split_on_whitespace() {
        let mut desired = DesiredState::new("datavg", "datalv");
        desired.extra_options = "-p copy1=poolA  -p copy2=poolB".to_string();
        assert_eq!(
            desired.extra_option_args(),
            vec!["-p", "copy1=poolA", "-p", "copy2=poolB"]
        );
    }

    #[test]
    fn state_uses_lowercase_names() {
        let state: VolumeState = serde_json::from_str("\"absent\"").expect("deserialize state");
        assert_eq!(state, VolumeState::Absent);
        assert_eq!("Present".parse::<VolumeState>(), Ok(VolumeState::Present));
    }

    #[test]
    fn outcome_serializes_changed_and_message() {
        let json = serde_json::to_value(Outcome::changed("Logical volume datalv created."))
            .expect("serialize outcome");
        assert_eq!(json["changed"], true);
        assert_eq!(json["message"], "Logical volume datalv created.");
    }
}
