// SPDX-License-Identifier: GPL-3.0-only

//! Parsers for `lsvg <vg>` and `lslv <lv>` output
//!
//! Both commands print two label/value columns per line. Each parser is an
//! ordered rule list: per line the first matching rule wins, and a value seen
//! on a later line replaces an earlier one.

use std::sync::LazyLock;

use lvol_types::{AllocationPolicy, LogicalVolumeInfo, VolumeGroupInfo};
use regex::{Captures, Regex};

use crate::{LvolError, Result};

struct Rule<T> {
    pattern: Regex,
    apply: fn(&mut T, &Captures<'_>),
}

fn rule<T>(pattern: &str, apply: fn(&mut T, &Captures<'_>)) -> Rule<T> {
    Rule {
        pattern: Regex::new(pattern).expect("Invalid lsvg/lslv pattern"),
        apply,
    }
}

fn extract<T: Default>(output: &str, rules: &[Rule<T>]) -> T {
    let mut fields = T::default();
    for line in output.lines() {
        if let Some((rule, captures)) = rules
            .iter()
            .find_map(|rule| rule.pattern.captures(line).map(|caps| (rule, caps)))
        {
            (rule.apply)(&mut fields, &captures);
        }
    }
    fields
}

fn number(captures: &Captures<'_>, group: usize) -> Option<u64> {
    captures.get(group)?.as_str().parse().ok()
}

fn text(captures: &Captures<'_>, group: usize) -> Option<String> {
    captures.get(group).map(|m| m.as_str().to_string())
}

#[derive(Debug, Default)]
struct VgFields {
    name: Option<String>,
    total_partitions: Option<u64>,
    total_mb: Option<u64>,
    partition_size: Option<u64>,
    free_partitions: Option<u64>,
    free_mb: Option<u64>,
}

static VG_RULES: LazyLock<Vec<Rule<VgFields>>> = LazyLock::new(|| {
    vec![
        rule(r"VOLUME GROUP:\s+(\w+)", |f: &mut VgFields, c| f.name = text(c, 1)),
        rule(r"TOTAL PPs?:\s+(\d+)\s*\((\d+)", |f: &mut VgFields, c| {
            f.total_partitions = number(c, 1);
            f.total_mb = number(c, 2);
        }),
        rule(r"PP SIZE:\s+(\d+)", |f: &mut VgFields, c| f.partition_size = number(c, 1)),
        rule(r"FREE PPs?:\s+(\d+)\s*\((\d+)", |f: &mut VgFields, c| {
            f.free_partitions = number(c, 1);
            f.free_mb = number(c, 2);
        }),
    ]
});

#[derive(Debug, Default)]
struct LvFields {
    name: Option<String>,
    group: Option<String>,
    partitions: Option<u64>,
    partition_size: Option<u64>,
    policy: Option<String>,
}

static LV_RULES: LazyLock<Vec<Rule<LvFields>>> = LazyLock::new(|| {
    vec![
        rule(
            r"LOGICAL VOLUME:\s+(\w+)\s+VOLUME GROUP:\s+(\w+)",
            |f: &mut LvFields, c| {
                f.name = text(c, 1);
                f.group = text(c, 2);
            },
        ),
        rule(r"LPs:\s+(\d+).*PPs", |f: &mut LvFields, c| f.partitions = number(c, 1)),
        rule(r"PP SIZE:\s+(\d+)", |f: &mut LvFields, c| f.partition_size = number(c, 1)),
        rule(r"INTER-POLICY:\s+(\w+)", |f: &mut LvFields, c| f.policy = text(c, 1)),
    ]
});

fn require<T>(value: Option<T>, command: &'static str, field: &'static str) -> Result<T> {
    value.ok_or(LvolError::MalformedOutput {
        command,
        field,
        output: None,
    })
}

/// Parse `lsvg <vg>` output. Every field is required.
pub fn parse_volume_group(output: &str) -> Result<VolumeGroupInfo> {
    let fields = extract(output, &VG_RULES);

    Ok(VolumeGroupInfo {
        name: require(fields.name, "lsvg", "VOLUME GROUP")?,
        total_partitions: require(fields.total_partitions, "lsvg", "TOTAL PPs")?,
        free_partitions: require(fields.free_partitions, "lsvg", "FREE PPs")?,
        partition_size: require(fields.partition_size, "lsvg", "PP SIZE")?,
        total_mb: require(fields.total_mb, "lsvg", "TOTAL PPs")?,
        free_mb: require(fields.free_mb, "lsvg", "FREE PPs")?,
    })
}

/// Parse `lslv <lv>` output.
///
/// Returns `Ok(None)` when no logical volume header is present, which is how
/// a missing volume shows up.
pub fn parse_logical_volume(output: &str) -> Result<Option<LogicalVolumeInfo>> {
    let fields = extract(output, &LV_RULES);

    let Some(name) = fields.name else {
        return Ok(None);
    };

    let policy = require(fields.policy, "lslv", "INTER-POLICY")?;
    let policy = policy
        .parse::<AllocationPolicy>()
        .map_err(|_| LvolError::MalformedOutput {
            command: "lslv",
            field: "INTER-POLICY",
            output: None,
        })?;

    Ok(Some(LogicalVolumeInfo::new(
        name,
        require(fields.group, "lslv", "VOLUME GROUP")?,
        require(fields.partitions, "lslv", "LPs")?,
        require(fields.partition_size, "lslv", "PP SIZE")?,
        policy,
    )))
}
