use bevy::prelude::*;
use std::collections::HashSet;

/// Countries with at least one Michelin-starred restaurant, as curated for
/// the map. Spelled to match the bundled atlas `name` attributes exactly;
/// the membership test is case-sensitive with no normalization, so an entry
/// that drifts out of sync with the atlas silently stops highlighting.
pub const FEATURED_COUNTRIES: [&str; 36] = [
    "France",
    "Japan",
    "Italy",
    "Germany",
    "Spain",
    "United States of America",
    "United Kingdom",
    "Belgium",
    "Netherlands",
    "Luxembourg",
    "Switzerland",
    "Austria",
    "Portugal",
    "Ireland",
    "Denmark",
    "Sweden",
    "Norway",
    "Finland",
    "Iceland",
    "Greece",
    "Poland",
    "Czechia",
    "Hungary",
    "Croatia",
    "Slovenia",
    "South Korea",
    "China",
    "Taiwan",
    "Thailand",
    "Singapore",
    "Malaysia",
    "Brazil",
    "Canada",
    "Monaco",
    "Hong Kong",
    "Macau",
];

/// Membership set over [`FEATURED_COUNTRIES`]. Built once; the only
/// operation is the O(1) exact-match lookup.
#[derive(Resource)]
pub struct HighlightSet {
    names: HashSet<&'static str>,
}

impl Default for HighlightSet {
    fn default() -> Self {
        Self {
            names: FEATURED_COUNTRIES.into_iter().collect(),
        }
    }
}

impl HighlightSet {
    pub fn is_highlighted(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[cfg(test)]
    pub fn from_names(names: &[&'static str]) -> Self {
        Self {
            names: names.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_featured_country_is_highlighted() {
        let set = HighlightSet::default();
        assert!(set.is_highlighted("France"));
        assert!(set.is_highlighted("South Korea"));
    }

    #[test]
    fn test_non_featured_country_is_not_highlighted() {
        let set = HighlightSet::default();
        assert!(!set.is_highlighted("Russia"));
        assert!(!set.is_highlighted("Egypt"));
    }

    #[test]
    fn test_membership_is_case_sensitive() {
        let set = HighlightSet::default();
        assert!(set.is_highlighted("Japan"));
        assert!(!set.is_highlighted("japan"));
        assert!(!set.is_highlighted("JAPAN"));
    }

    #[test]
    fn test_membership_is_repeatable() {
        // Pure lookup: repetition and order never change the answer.
        let set = HighlightSet::default();
        for _ in 0..3 {
            assert!(set.is_highlighted("Italy"));
            assert!(!set.is_highlighted("Mars"));
        }
    }

    #[test]
    fn test_featured_table_has_no_duplicates() {
        let set = HighlightSet::default();
        assert_eq!(set.names.len(), FEATURED_COUNTRIES.len());
    }
}
