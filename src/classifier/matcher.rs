//! First-match-wins classification of text lines against ordered pattern
//! dictionaries.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a category's patterns combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Any listed pattern present in the line matches the category.
    Any,
    /// Every listed pattern must be present in the line.
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternGroup {
    pub category: String,
    pub patterns: Vec<String>,
}

/// Ordered mapping from category name to literal substring patterns.
///
/// Iteration order is insertion order; classification returns the first
/// matching category, so the order categories were loaded in is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    groups: Vec<PatternGroup>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a category, replacing its patterns if it already exists.
    pub fn insert(&mut self, category: impl Into<String>, patterns: Vec<String>) {
        let category = category.into();
        match self.groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.patterns = patterns,
            None => self.groups.push(PatternGroup { category, patterns }),
        }
    }

    pub fn groups(&self) -> &[PatternGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of patterns across all categories.
    pub fn pattern_count(&self) -> usize {
        self.groups.iter().map(|g| g.patterns.len()).sum()
    }
}

impl Serialize for PatternSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.category, &group.patterns)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PatternSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = PatternSet;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category name to a list of string patterns")
            }

            // Visits entries in document order, which is what keeps
            // first-match-wins reproducible across loads.
            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<PatternSet, A::Error> {
                let mut set = PatternSet::new();
                while let Some((category, patterns)) = access.next_entry::<String, Vec<String>>()? {
                    set.insert(category, patterns);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(SetVisitor)
    }
}

/// Classify a line against the pattern set, first matching category wins.
///
/// Matching is case-sensitive, exact substring containment. An empty pattern
/// list never matches in either mode. Pure and deterministic.
pub fn classify_line<'a>(line: &str, patterns: &'a PatternSet, mode: MatchMode) -> Option<&'a str> {
    for group in patterns.groups() {
        if group.patterns.is_empty() {
            continue;
        }
        let matched = match mode {
            MatchMode::Any => group.patterns.iter().any(|p| line.contains(p.as_str())),
            MatchMode::All => group.patterns.iter().all(|p| line.contains(p.as_str())),
        };
        if matched {
            return Some(&group.category);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crashed_set() -> PatternSet {
        let mut set = PatternSet::new();
        set.insert("Crashed", vec!["CrashLoopBackOff".to_string()]);
        set
    }

    #[test]
    fn any_mode_matches_on_a_single_pattern() {
        let set = crashed_set();
        assert_eq!(
            classify_line("pod-x 0/1 CrashLoopBackOff 3 2d", &set, MatchMode::Any),
            Some("Crashed")
        );
    }

    #[test]
    fn no_pattern_hit_returns_none_in_both_modes() {
        let set = crashed_set();
        assert_eq!(classify_line("pod-x 1/1 Running 0 2d", &set, MatchMode::Any), None);
        assert_eq!(classify_line("pod-x 1/1 Running 0 2d", &set, MatchMode::All), None);
    }

    #[test]
    fn all_mode_requires_every_pattern() {
        let mut set = PatternSet::new();
        set.insert(
            "Running No Pods",
            vec!["0/".to_string(), "Running".to_string()],
        );
        assert_eq!(
            classify_line("pod-x 0/1 Running 0 2d", &set, MatchMode::All),
            Some("Running No Pods")
        );
        assert_eq!(classify_line("pod-x 0/1 Pending 0 2d", &set, MatchMode::All), None);
    }

    #[test]
    fn first_matching_category_wins() {
        let mut set = PatternSet::new();
        set.insert("First", vec!["failed".to_string()]);
        set.insert("Second", vec!["failed".to_string()]);
        assert_eq!(
            classify_line("request failed", &set, MatchMode::Any),
            Some("First")
        );
    }

    #[test]
    fn empty_pattern_list_never_matches() {
        let mut set = PatternSet::new();
        set.insert("Empty", Vec::new());
        assert_eq!(classify_line("anything", &set, MatchMode::Any), None);
        assert_eq!(classify_line("anything", &set, MatchMode::All), None);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let set = crashed_set();
        assert_eq!(classify_line("crashloopbackoff", &set, MatchMode::Any), None);
    }

    #[test]
    fn deserialization_preserves_document_order() {
        let set: PatternSet =
            serde_json::from_str(r#"{"Zulu": ["z"], "Alpha": ["a"]}"#).unwrap();
        let categories: Vec<&str> = set.groups().iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, ["Zulu", "Alpha"]);
    }

    #[test]
    fn non_string_pattern_elements_are_rejected() {
        assert!(serde_json::from_str::<PatternSet>(r#"{"Bad": ["ok", 3]}"#).is_err());
        assert!(serde_json::from_str::<PatternSet>(r#"{"Bad": "not-a-list"}"#).is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let set: PatternSet =
            serde_json::from_str(r#"{"B": ["x", "y"], "A": ["z"]}"#).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"B":["x","y"],"A":["z"]}"#);
    }
}
