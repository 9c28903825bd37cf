//! Prerequisite Resolver — expands target skills into the full closure of
//! skills still to be learned, transitive prerequisites included.
//!
//! Truncation policy: recursion is capped at depth 10 and a skill is
//! expanded at most once per call. Cyclic or pathologically deep chains
//! degrade to a partial closure instead of failing the request.

use std::collections::HashSet;

use crate::store::SkillStore;

const MAX_DEPTH: u32 = 10;

/// Computes the duplicate-free set of skills to learn, prerequisites
/// discovered before their dependents (final ordering happens in the
/// sequencer). Skills the user already has are excluded case-insensitively
/// and their prerequisites are never expanded. Output preserves the store's
/// canonical casing.
pub fn resolve(store: &SkillStore, targets: &[String], known: &[String]) -> Vec<String> {
    let known: HashSet<String> = known.iter().map(|s| s.to_lowercase()).collect();
    let mut visited: HashSet<String> = HashSet::new();
    let mut closure: Vec<String> = Vec::new();

    for target in targets {
        expand(store, target, 0, &known, &mut visited, &mut closure);
    }

    closure
}

fn expand(
    store: &SkillStore,
    skill: &str,
    depth: u32,
    known: &HashSet<String>,
    visited: &mut HashSet<String>,
    closure: &mut Vec<String>,
) {
    if depth > MAX_DEPTH {
        return;
    }

    let lower = skill.to_lowercase();
    if known.contains(&lower) || visited.contains(&lower) {
        return;
    }
    visited.insert(lower);

    let info = store.lookup(skill);
    for prereq in &info.prerequisites {
        expand(store, prereq, depth + 1, known, visited, closure);
    }

    let canonical = store.canonical_name(skill);
    if !closure.contains(&canonical) {
        closure.push(canonical);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(graph: &str) -> SkillStore {
        SkillStore::from_json(graph, r#"{"default": {}}"#).unwrap()
    }

    fn s(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_prerequisite_discovered_before_dependent() {
        let store = store(
            r#"{
            "A": {"prerequisites": [], "difficulty": "beginner", "estimated_hours": 10, "category": "x"},
            "B": {"prerequisites": ["A"], "difficulty": "beginner", "estimated_hours": 10, "category": "x"}
        }"#,
        );
        assert_eq!(resolve(&store, &s(&["B"]), &[]), s(&["A", "B"]));
    }

    #[test]
    fn test_known_target_excluded_entirely() {
        let store = store(
            r#"{
            "A": {"prerequisites": [], "difficulty": "beginner", "estimated_hours": 10, "category": "x"},
            "B": {"prerequisites": ["A"], "difficulty": "beginner", "estimated_hours": 10, "category": "x"}
        }"#,
        );
        // Known B: neither B nor its prerequisite A appears.
        assert!(resolve(&store, &s(&["B"]), &s(&["B"])).is_empty());
    }

    #[test]
    fn test_known_check_is_case_insensitive() {
        let store = store(
            r#"{
            "Python": {"prerequisites": [], "difficulty": "beginner", "estimated_hours": 40, "category": "language"}
        }"#,
        );
        assert!(resolve(&store, &s(&["Python"]), &s(&["PYTHON"])).is_empty());
    }

    #[test]
    fn test_known_prerequisite_skipped_but_target_kept() {
        let store = store(
            r#"{
            "A": {"prerequisites": [], "difficulty": "beginner", "estimated_hours": 10, "category": "x"},
            "B": {"prerequisites": ["A"], "difficulty": "beginner", "estimated_hours": 10, "category": "x"}
        }"#,
        );
        assert_eq!(resolve(&store, &s(&["B"]), &s(&["A"])), s(&["B"]));
    }

    #[test]
    fn test_cycle_terminates_via_visited_set() {
        let store = store(
            r#"{
            "A": {"prerequisites": ["B"], "difficulty": "beginner", "estimated_hours": 10, "category": "x"},
            "B": {"prerequisites": ["A"], "difficulty": "beginner", "estimated_hours": 10, "category": "x"}
        }"#,
        );
        // A marks visited, expands B; B's prereq A is already visited, so B
        // lands first, then A.
        assert_eq!(resolve(&store, &s(&["A"]), &[]), s(&["B", "A"]));
    }

    #[test]
    fn test_depth_cap_truncates_deep_chains() {
        // S0 <- S1 <- ... <- S14: expanding S14 walks depth 0..=14 but the
        // branch is abandoned past depth 10, silently.
        let mut graph = String::from("{");
        for i in 0..15 {
            if i > 0 {
                graph.push(',');
            }
            let prereqs = if i == 0 {
                "[]".to_string()
            } else {
                format!("[\"S{}\"]", i - 1)
            };
            graph.push_str(&format!(
                "\"S{i}\": {{\"prerequisites\": {prereqs}, \"difficulty\": \"beginner\", \"estimated_hours\": 5, \"category\": \"x\"}}"
            ));
        }
        graph.push('}');
        let store = store(&graph);

        let closure = resolve(&store, &s(&["S14"]), &[]);
        // Depths 0..=10 are reachable: S14 down to S4 — 11 skills.
        assert_eq!(closure.len(), 11);
        assert_eq!(closure.first().map(String::as_str), Some("S4"));
        assert_eq!(closure.last().map(String::as_str), Some("S14"));
        assert!(!closure.contains(&"S3".to_string()));
    }

    #[test]
    fn test_unknown_target_resolves_to_itself() {
        let store = store(r#"{}"#);
        assert_eq!(
            resolve(&store, &s(&["Underwater Welding"]), &[]),
            s(&["Underwater Welding"])
        );
    }

    #[test]
    fn test_shared_prerequisite_appears_once() {
        let store = store(
            r#"{
            "A": {"prerequisites": [], "difficulty": "beginner", "estimated_hours": 10, "category": "x"},
            "B": {"prerequisites": ["A"], "difficulty": "beginner", "estimated_hours": 10, "category": "x"},
            "C": {"prerequisites": ["A"], "difficulty": "beginner", "estimated_hours": 10, "category": "x"}
        }"#,
        );
        assert_eq!(resolve(&store, &s(&["B", "C"]), &[]), s(&["A", "B", "C"]));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let store = store(
            r#"{
            "A": {"prerequisites": [], "difficulty": "beginner", "estimated_hours": 10, "category": "x"},
            "B": {"prerequisites": ["A"], "difficulty": "beginner", "estimated_hours": 10, "category": "x"},
            "C": {"prerequisites": ["B"], "difficulty": "beginner", "estimated_hours": 10, "category": "x"}
        }"#,
        );
        let first = resolve(&store, &s(&["C", "B"]), &[]);
        let second = resolve(&store, &s(&["C", "B"]), &[]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_uses_store_casing() {
        let store = store(
            r#"{
            "Python": {"prerequisites": [], "difficulty": "beginner", "estimated_hours": 40, "category": "language"}
        }"#,
        );
        assert_eq!(resolve(&store, &s(&["python"]), &[]), s(&["Python"]));
    }
}
