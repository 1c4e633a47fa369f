//! # Secret Masking
//!
//! Formats a secret for display without exposing it: the first
//! [`MASK_PREFIX_LEN`] characters followed by [`MASK_SUFFIX`].

use crate::constants::{MASK_PREFIX_LEN, MASK_SUFFIX};

/// Mask a secret value
///
/// Length is counted in characters, not bytes, so multibyte input never splits
/// a code point. Values shorter than the prefix are masked completely.
pub fn mask_secret(value: &str) -> String {
    if value.chars().count() < MASK_PREFIX_LEN {
        return MASK_SUFFIX.to_owned();
    }

    let mut masked: String = value.chars().take(MASK_PREFIX_LEN).collect();
    masked.push_str(MASK_SUFFIX);
    masked
}
