//! Stable label hashing and the tag color palette.
//!
//! The same label always maps to the same color, in every view and across
//! runs, so a species or trait keeps its color wherever it is shown. The hash
//! is also used to order genotype traits deterministically.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rolling hash over the UTF-16 code units of `label`.
///
/// `hash = unit + (hash << 6) + (hash << 16) - hash`, starting from 0. Both
/// shifts act on the accumulator truncated to 32 bits and wrap; the sum itself
/// is carried in 64 bits.
#[must_use]
pub fn label_hash(label: &str) -> i64 {
    label.encode_utf16().fold(0_i64, |hash, unit| {
        #[allow(clippy::cast_possible_truncation)]
        let low = hash as i32;
        i64::from(unit) + i64::from(low.wrapping_shl(6)) + i64::from(low.wrapping_shl(16)) - hash
    })
}

/// Named tag colors, in palette order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LabelColor {
    Magenta,
    Red,
    Volcano,
    Orange,
    Gold,
    Lime,
    Green,
    Cyan,
    Blue,
    Geekblue,
    Purple,
}

impl LabelColor {
    pub const PALETTE: [Self; 11] = [
        Self::Magenta,
        Self::Red,
        Self::Volcano,
        Self::Orange,
        Self::Gold,
        Self::Lime,
        Self::Green,
        Self::Cyan,
        Self::Blue,
        Self::Geekblue,
        Self::Purple,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Magenta => "magenta",
            Self::Red => "red",
            Self::Volcano => "volcano",
            Self::Orange => "orange",
            Self::Gold => "gold",
            Self::Lime => "lime",
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::Blue => "blue",
            Self::Geekblue => "geekblue",
            Self::Purple => "purple",
        }
    }

    /// ANSI SGR foreground code used for terminal tables (256-color palette).
    #[must_use]
    pub const fn ansi_code(self) -> &'static str {
        match self {
            Self::Magenta => "38;5;163",
            Self::Red => "38;5;160",
            Self::Volcano => "38;5;202",
            Self::Orange => "38;5;208",
            Self::Gold => "38;5;178",
            Self::Lime => "38;5;148",
            Self::Green => "38;5;34",
            Self::Cyan => "38;5;37",
            Self::Blue => "38;5;33",
            Self::Geekblue => "38;5;62",
            Self::Purple => "38;5;91",
        }
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the palette entry for `label`: `PALETTE[|hash| mod len]`.
#[must_use]
pub fn label_color(label: &str) -> LabelColor {
    let len = LabelColor::PALETTE.len() as u64;
    #[allow(clippy::cast_possible_truncation)]
    let index = (label_hash(label).unsigned_abs() % len) as usize;
    LabelColor::PALETTE[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn empty_label_hashes_to_zero() {
        assert_eq!(label_hash(""), 0);
        assert_eq!(label_color(""), LabelColor::PALETTE[0]);
    }

    #[rstest]
    #[case("a", 97)]
    // 98 + (97 << 6) + (97 << 16) - 97
    #[case("ab", 98 + 6208 + 6_356_992 - 97)]
    fn short_labels_match_hand_computed_values(#[case] label: &str, #[case] expected: i64) {
        assert_eq!(label_hash(label), expected);
    }

    #[test]
    fn long_labels_do_not_overflow() {
        let long = "白化条纹玉米蛇".repeat(64);
        let first = label_hash(&long);
        assert_eq!(first, label_hash(&long));
    }

    #[rstest]
    #[case("玉米蛇")]
    #[case("球蟒")]
    #[case("豹纹守宫")]
    #[case("白化")]
    #[case("a much longer label with spaces")]
    fn color_is_stable(#[case] label: &str) {
        assert_eq!(label_color(label), label_color(label));
    }

    #[test]
    fn color_index_uses_absolute_hash() {
        let label = "白化、条纹";
        let expected = LabelColor::PALETTE
            [(label_hash(label).unsigned_abs() % LabelColor::PALETTE.len() as u64) as usize];
        assert_eq!(label_color(label), expected);
    }

    #[test]
    fn single_char_labels_spread_across_palette() {
        let colors: std::collections::HashSet<_> =
            ('a'..='k').map(|c| label_color(&c.to_string())).collect();
        assert_eq!(colors.len(), LabelColor::PALETTE.len());
    }
}
