/// Names of emoji code points that older name databases lack (Unicode 14.0 and 15.0 additions).
///
/// Sorted by code point, names already lowercase.
pub const OVERRIDE_NAMES: &[(u32, &str)] = &[
    (0x1F6DD, "playground slide"),
    (0x1F6DE, "wheel"),
    (0x1F6DF, "ring buoy"),
    (0x1FA75, "light blue heart"),
    (0x1FA76, "grey heart"),
    (0x1FA77, "pink heart"),
    (0x1FA7B, "x-ray"),
    (0x1FA7C, "crutch"),
    (0x1FA87, "maracas"),
    (0x1FA88, "flute"),
    (0x1FAA9, "mirror ball"),
    (0x1FAAA, "identification card"),
    (0x1FAAB, "low battery"),
    (0x1FAAC, "hamsa"),
    (0x1FAAD, "folding hand fan"),
    (0x1FAAE, "hair pick"),
    (0x1FAAF, "khanda"),
    (0x1FAB7, "lotus"),
    (0x1FAB8, "coral"),
    (0x1FAB9, "empty nest"),
    (0x1FABA, "nest with eggs"),
    (0x1FABB, "hyacinth"),
    (0x1FABC, "jellyfish"),
    (0x1FABD, "wing"),
    (0x1FAC3, "pregnant man"),
    (0x1FAC4, "pregnant person"),
    (0x1FAC5, "person with crown"),
    (0x1FACE, "moose"),
    (0x1FACF, "donkey"),
    (0x1FAD7, "pouring liquid"),
    (0x1FAD8, "beans"),
    (0x1FAD9, "jar"),
    (0x1FADA, "ginger root"),
    (0x1FADB, "pea pod"),
    (0x1FAE0, "melting face"),
    (0x1FAE1, "saluting face"),
    (0x1FAE2, "face with open eyes and hand over mouth"),
    (0x1FAE3, "face with peeking eye"),
    (0x1FAE4, "face with diagonal mouth"),
    (0x1FAE5, "dotted line face"),
    (0x1FAE6, "biting lip"),
    (0x1FAE7, "bubbles"),
    (0x1FAF0, "hand with index finger and thumb crossed"),
    (0x1FAF1, "rightwards hand"),
    (0x1FAF2, "leftwards hand"),
    (0x1FAF3, "palm down hand"),
    (0x1FAF4, "palm up hand"),
    (0x1FAF5, "index pointing at the viewer"),
    (0x1FAF6, "heart hands"),
    (0x1FAF7, "leftwards pushing hand"),
    (0x1FAF8, "rightwards pushing hand"),
];

/// Look up a code point in [`OVERRIDE_NAMES`].
///
/// # Example
/// ```
/// use emoseq_core::overrides::override_name;
/// assert_eq!(override_name(0x1FA7B), Some("x-ray"));
/// assert_eq!(override_name(0x1F600), None);
/// ```
#[must_use]
pub fn override_name(code_point: u32) -> Option<&'static str> {
    OVERRIDE_NAMES
        .binary_search_by_key(&code_point, |&(cp, _)| cp)
        .ok()
        .map(|idx| OVERRIDE_NAMES[idx].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sorted_without_duplicates() {
        for pair in OVERRIDE_NAMES.windows(2) {
            assert!(
                pair[0].0 < pair[1].0,
                "table non triée à U+{:04X}",
                pair[1].0
            );
        }
    }

    #[test]
    fn names_are_lowercase() {
        for &(cp, name) in OVERRIDE_NAMES {
            assert_eq!(name, name.to_lowercase(), "U+{cp:04X}");
        }
    }

    #[test]
    fn lookup_first_and_last() {
        assert_eq!(override_name(0x1F6DD), Some("playground slide"));
        assert_eq!(override_name(0x1FAF8), Some("rightwards pushing hand"));
        assert_eq!(override_name(0x1FAF9), None);
    }
}
