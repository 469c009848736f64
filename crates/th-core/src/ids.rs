//! ID prefix constants.
//!
//! IDs are generated by the database as `<prefix>-<8 hex chars>`, e.g. `ani-3f9c01ab`.

pub const PREFIX_SPECIES: &str = "spc";
pub const PREFIX_ANIMAL: &str = "ani";
pub const PREFIX_CONTAINER: &str = "hsg";
pub const PREFIX_SLOT: &str = "slt";
pub const PREFIX_FEEDING: &str = "fed";
pub const PREFIX_WEIGHT: &str = "wgt";
pub const PREFIX_CLIMATE: &str = "clm";

/// Every prefix in use, for tests and validation.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_SPECIES,
    PREFIX_ANIMAL,
    PREFIX_CONTAINER,
    PREFIX_SLOT,
    PREFIX_FEEDING,
    PREFIX_WEIGHT,
    PREFIX_CLIMATE,
];

/// Return the prefix portion of an ID (`"ani-3f9c01ab"` -> `Some("ani")`).
#[must_use]
pub fn prefix_of(id: &str) -> Option<&str> {
    let (prefix, rest) = id.split_once('-')?;
    if rest.is_empty() {
        return None;
    }
    ALL_PREFIXES.iter().copied().find(|known| *known == prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_unique() {
        let mut sorted = ALL_PREFIXES.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), ALL_PREFIXES.len());
    }

    #[test]
    fn prefix_of_known_id() {
        assert_eq!(prefix_of("ani-3f9c01ab"), Some(PREFIX_ANIMAL));
        assert_eq!(prefix_of("clm-00000000"), Some(PREFIX_CLIMATE));
    }

    #[test]
    fn prefix_of_rejects_unknown_or_bare() {
        assert_eq!(prefix_of("xyz-12345678"), None);
        assert_eq!(prefix_of("ani-"), None);
        assert_eq!(prefix_of("ani"), None);
    }
}
