//! Topological Sequencer — orders a skill closure so every prerequisite
//! precedes its dependents, preferring easier skills among equally-ready
//! ones (Kahn's algorithm with difficulty-ranked batches).

use std::collections::{HashMap, VecDeque};

use crate::store::SkillStore;

/// Result of sequencing. Skills trapped in a residual cycle never reach
/// zero in-degree and cannot be ordered; they are reported in `dropped`
/// rather than silently lost.
pub struct Sequenced {
    pub ordered: Vec<String>,
    pub dropped: Vec<String>,
}

/// Orders `skills` topologically. Only prerequisite edges between two
/// skills both present in the input count; edges to outside skills are
/// ignored. The ready queue and every newly-ready batch are stably sorted
/// by difficulty rank, so ties fall back to input order.
pub fn sequence(store: &SkillStore, skills: &[String]) -> Sequenced {
    let index: HashMap<String, usize> = skills
        .iter()
        .enumerate()
        .map(|(i, s)| (s.to_lowercase(), i))
        .collect();

    let mut in_degree = vec![0usize; skills.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); skills.len()];
    let mut rank = vec![0u8; skills.len()];

    for (i, skill) in skills.iter().enumerate() {
        let info = store.lookup(skill);
        rank[i] = info.difficulty.rank();
        for prereq in &info.prerequisites {
            if let Some(&p) = index.get(&prereq.to_lowercase()) {
                if p != i {
                    dependents[p].push(i);
                    in_degree[i] += 1;
                }
            }
        }
    }

    let mut ready: Vec<usize> = (0..skills.len()).filter(|&i| in_degree[i] == 0).collect();
    ready.sort_by_key(|&i| rank[i]);
    let mut queue: VecDeque<usize> = ready.into();

    let mut ordered = Vec::with_capacity(skills.len());
    let mut placed = vec![false; skills.len()];

    while let Some(i) = queue.pop_front() {
        ordered.push(skills[i].clone());
        placed[i] = true;

        let mut batch: Vec<usize> = Vec::new();
        for &dep in &dependents[i] {
            in_degree[dep] -= 1;
            if in_degree[dep] == 0 {
                batch.push(dep);
            }
        }
        batch.sort_by_key(|&d| rank[d]);
        queue.extend(batch);
    }

    let dropped: Vec<String> = skills
        .iter()
        .enumerate()
        .filter(|(i, _)| !placed[*i])
        .map(|(_, s)| s.clone())
        .collect();

    Sequenced { ordered, dropped }
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

    fn position(ordered: &[String], name: &str) -> usize {
        ordered.iter().position(|s| s == name).unwrap()
    }

    #[test]
    fn test_prerequisites_precede_dependents() {
        let store = store(
            r#"{
            "A": {"prerequisites": [], "difficulty": "beginner", "estimated_hours": 10, "category": "x"},
            "B": {"prerequisites": ["A"], "difficulty": "beginner", "estimated_hours": 10, "category": "x"},
            "C": {"prerequisites": ["B"], "difficulty": "beginner", "estimated_hours": 10, "category": "x"}
        }"#,
        );
        let out = sequence(&store, &s(&["C", "A", "B"]));
        assert_eq!(out.ordered, s(&["A", "B", "C"]));
        assert!(out.dropped.is_empty());
    }

    #[test]
    fn test_easier_skills_first_among_ready() {
        let store = store(
            r#"{
            "Hard": {"prerequisites": [], "difficulty": "advanced", "estimated_hours": 10, "category": "x"},
            "Mid": {"prerequisites": [], "difficulty": "intermediate", "estimated_hours": 10, "category": "x"},
            "Easy": {"prerequisites": [], "difficulty": "beginner", "estimated_hours": 10, "category": "x"}
        }"#,
        );
        let out = sequence(&store, &s(&["Hard", "Mid", "Easy"]));
        assert_eq!(out.ordered, s(&["Easy", "Mid", "Hard"]));
    }

    #[test]
    fn test_equal_difficulty_ties_keep_input_order() {
        let store = store(
            r#"{
            "A": {"prerequisites": [], "difficulty": "beginner", "estimated_hours": 10, "category": "x"},
            "B": {"prerequisites": [], "difficulty": "beginner", "estimated_hours": 10, "category": "x"}
        }"#,
        );
        let out = sequence(&store, &s(&["B", "A"]));
        assert_eq!(out.ordered, s(&["B", "A"]));
    }

    #[test]
    fn test_newly_ready_batch_sorted_by_difficulty() {
        // Root unlocks two dependents; the easier one must come first even
        // though the harder one is declared first.
        let store = store(
            r#"{
            "Root": {"prerequisites": [], "difficulty": "beginner", "estimated_hours": 10, "category": "x"},
            "HardDep": {"prerequisites": ["Root"], "difficulty": "advanced", "estimated_hours": 10, "category": "x"},
            "EasyDep": {"prerequisites": ["Root"], "difficulty": "beginner", "estimated_hours": 10, "category": "x"}
        }"#,
        );
        let out = sequence(&store, &s(&["HardDep", "EasyDep", "Root"]));
        assert_eq!(out.ordered, s(&["Root", "EasyDep", "HardDep"]));
    }

    #[test]
    fn test_edges_outside_input_set_ignored() {
        let store = store(
            r#"{
            "A": {"prerequisites": [], "difficulty": "beginner", "estimated_hours": 10, "category": "x"},
            "B": {"prerequisites": ["A"], "difficulty": "beginner", "estimated_hours": 10, "category": "x"}
        }"#,
        );
        // A absent from the set: B has no internal in-edges.
        let out = sequence(&store, &s(&["B"]));
        assert_eq!(out.ordered, s(&["B"]));
    }

    #[test]
    fn test_residual_cycle_reported_as_dropped() {
        let store = store(
            r#"{
            "A": {"prerequisites": ["B"], "difficulty": "beginner", "estimated_hours": 10, "category": "x"},
            "B": {"prerequisites": ["A"], "difficulty": "beginner", "estimated_hours": 10, "category": "x"},
            "C": {"prerequisites": [], "difficulty": "beginner", "estimated_hours": 10, "category": "x"}
        }"#,
        );
        let out = sequence(&store, &s(&["A", "B", "C"]));
        assert_eq!(out.ordered, s(&["C"]));
        assert_eq!(out.dropped, s(&["A", "B"]));
    }

    #[test]
    fn test_diamond_dependency_order_is_valid() {
        let store = store(
            r#"{
            "Base": {"prerequisites": [], "difficulty": "beginner", "estimated_hours": 10, "category": "x"},
            "Left": {"prerequisites": ["Base"], "difficulty": "intermediate", "estimated_hours": 10, "category": "x"},
            "Right": {"prerequisites": ["Base"], "difficulty": "intermediate", "estimated_hours": 10, "category": "x"},
            "Top": {"prerequisites": ["Left", "Right"], "difficulty": "advanced", "estimated_hours": 10, "category": "x"}
        }"#,
        );
        let out = sequence(&store, &s(&["Top", "Left", "Right", "Base"]));
        assert_eq!(out.ordered.len(), 4);
        let base = position(&out.ordered, "Base");
        let top = position(&out.ordered, "Top");
        assert!(base < position(&out.ordered, "Left"));
        assert!(base < position(&out.ordered, "Right"));
        assert!(top > position(&out.ordered, "Left"));
        assert!(top > position(&out.ordered, "Right"));
    }

    #[test]
    fn test_empty_input() {
        let store = store(r#"{}"#);
        let out = sequence(&store, &[]);
        assert!(out.ordered.is_empty());
        assert!(out.dropped.is_empty());
    }
}
