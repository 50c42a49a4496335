// SPDX-License-Identifier: GPL-3.0-only

//! Size conversion for `mklv`/`extendlv` arguments
//!
//! Sizes are handled in megabytes, the unit AIX reports partition sizes in.

use std::cmp::Ordering;

use crate::error::{LvolError, Result};

/// Partition granularity assumed when the volume group does not supply one
pub const DEFAULT_GRANULARITY: u64 = 16;

/// A size suffix and its multiplier to megabytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeUnit {
    pub suffix: char,
    pub multiplier: u64,
}

/// Suffixes accepted by `normalize_size`
pub const SIZE_UNITS: &[SizeUnit] = &[
    SizeUnit {
        suffix: 'M',
        multiplier: 1,
    },
    SizeUnit {
        suffix: 'G',
        multiplier: 1024,
    },
    SizeUnit {
        suffix: 'T',
        multiplier: 1024 * 1024,
    },
];

/// Convert a size such as "512M" or "2g" to megabytes.
pub fn normalize_size(text: &str) -> Result<u64> {
    normalize_size_with(text, SIZE_UNITS)
}

/// Convert a size to megabytes using the given unit table.
pub fn normalize_size_with(text: &str, units: &[SizeUnit]) -> Result<u64> {
    let text = text.trim();
    let Some(suffix) = text.chars().last() else {
        return Err(LvolError::InvalidSizeFormat(text.to_string()));
    };

    let multiplier = units
        .iter()
        .find(|unit| unit.suffix.eq_ignore_ascii_case(&suffix))
        .map(|unit| unit.multiplier)
        .ok_or_else(|| LvolError::InvalidUnit(text.to_string()))?;

    let digits = &text[..text.len() - suffix.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LvolError::InvalidSizeFormat(text.to_string()));
    }

    digits
        .parse::<u64>()
        .ok()
        .and_then(|value| value.checked_mul(multiplier))
        .ok_or_else(|| LvolError::InvalidSizeFormat(text.to_string()))
}

/// Round `value` to a multiple of `granularity`, never below `value`.
///
/// Rounds to the nearest multiple first (ties to even), then adds one more
/// `granularity` when that landed below `value`. A zero granularity falls
/// back to [`DEFAULT_GRANULARITY`]. Returns `None` when the aligned value
/// does not fit in a `u64`.
pub fn round_up_to_granularity(value: u64, granularity: u64) -> Option<u64> {
    let granularity = if granularity == 0 {
        DEFAULT_GRANULARITY
    } else {
        granularity
    };

    let quotient = value / granularity;
    let remainder = value % granularity;
    // remainder < granularity, so comparing against the distance to the next
    // multiple avoids doubling the remainder.
    let nearest = match remainder.cmp(&(granularity - remainder)) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal => quotient + quotient % 2,
    };

    let rounded = nearest.checked_mul(granularity)?;
    if rounded < value {
        rounded.checked_add(granularity)
    } else {
        Some(rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_each_unit_to_megabytes() {
        assert_eq!(normalize_size("512M").unwrap(), 512);
        assert_eq!(normalize_size("2G").unwrap(), 2048);
        assert_eq!(normalize_size("1T").unwrap(), 1024 * 1024);
        assert_eq!(normalize_size("3g").unwrap(), 3072);
    }

    #[test]
    fn rejects_unknown_unit() {
        assert!(matches!(
            normalize_size("512K"),
            Err(LvolError::InvalidUnit(_))
        ));
        assert!(matches!(normalize_size("512"), Err(LvolError::InvalidUnit(_))));
    }

    #[test]
    fn rejects_malformed_numbers() {
        for text in ["", "M", "1.5G", "-2G", "abcM", "99999999999999999999M"] {
            assert!(
                matches!(normalize_size(text), Err(LvolError::InvalidSizeFormat(_))),
                "{text:?} should be rejected"
            );
        }
        assert!(matches!(
            normalize_size("18446744073709551615T"),
            Err(LvolError::InvalidSizeFormat(_))
        ));
    }

    #[test]
    fn custom_unit_table() {
        let units = [SizeUnit {
            suffix: 'P',
            multiplier: 4,
        }];
        assert_eq!(normalize_size_with("3p", &units).unwrap(), 12);
        assert!(normalize_size_with("3M", &units).is_err());
    }

    #[test]
    fn already_aligned_sizes_are_unchanged() {
        assert_eq!(round_up_to_granularity(512, 16), Some(512));
        assert_eq!(round_up_to_granularity(0, 16), Some(0));
    }

    #[test]
    fn rounds_up_to_next_partition() {
        assert_eq!(round_up_to_granularity(1, 16), Some(16));
        assert_eq!(round_up_to_granularity(1200, 32), Some(1216));
        assert_eq!(round_up_to_granularity(1190, 64), Some(1216));
        // Ties round to even first, then get bumped up.
        assert_eq!(round_up_to_granularity(8, 16), Some(16));
        assert_eq!(round_up_to_granularity(24, 16), Some(32));
    }

    #[test]
    fn zero_granularity_uses_default() {
        assert_eq!(round_up_to_granularity(20, 0), Some(32));
    }

    #[test]
    fn rounding_is_aligned_monotonic_and_idempotent() {
        for granularity in [1, 2, 4, 7, 16, 32, 64, 128, 256, 1024] {
            for value in 0..2_000 {
                let rounded = round_up_to_granularity(value, granularity).expect("fits in u64");
                assert_eq!(rounded % granularity, 0);
                assert!(rounded >= value);
                assert!(rounded - value < granularity);
                assert_eq!(round_up_to_granularity(rounded, granularity), Some(rounded));
            }
        }
    }

    #[test]
    fn rounding_near_u64_max_stays_aligned_or_overflows() {
        let max = normalize_size("18446744073709551615M").expect("u64::MAX megabytes");
        assert_eq!(round_up_to_granularity(max, 16), None);

        let top = u64::MAX - u64::MAX % 16;
        assert_eq!(round_up_to_granularity(top, 16), Some(top));
        assert_eq!(round_up_to_granularity(top - 1, 16), Some(top));
        assert_eq!(round_up_to_granularity(top + 1, 16), None);

        for value in (u64::MAX - 64)..=u64::MAX {
            if let Some(rounded) = round_up_to_granularity(value, 16) {
                assert_eq!(rounded % 16, 0);
                assert!(rounded >= value);
            }
        }
    }
}
