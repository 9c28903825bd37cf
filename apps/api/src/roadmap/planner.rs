//! Weekly Plan Builder — packs an ordered skill sequence into weeks bounded
//! by an hours-per-week budget.
//!
//! Greedy single-pass bin packing. A skill is never split across weeks, so
//! one oversized skill may produce a week whose total exceeds the budget.

use serde::{Deserialize, Serialize};

use crate::store::{Difficulty, SkillStore};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One skill slotted into a week, with its study/practice split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillAssignment {
    pub name: String,
    pub estimated_hours: u32,
    pub study_hours: u32,
    pub practice_hours: u32,
    pub difficulty: Difficulty,
    pub category: String,
    pub learning_tip: String,
    pub daily_goal: String,
}

/// One week of the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Week {
    pub week: u32,
    pub skills: Vec<SkillAssignment>,
    pub total_hours: u32,
    pub focus_area: String,
    pub intensity: String,
    pub milestones: Vec<String>,
    pub projects: Vec<String>,
}

impl Week {
    fn new(number: u32) -> Self {
        Week {
            week: number,
            skills: Vec::new(),
            total_hours: 0,
            focus_area: String::new(),
            intensity: String::new(),
            milestones: Vec::new(),
            projects: Vec::new(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Packing
// ────────────────────────────────────────────────────────────────────────────

/// Builds the weekly plan. `hours_per_week` must be positive; the assembler
/// rejects zero before calling in.
pub fn build(store: &SkillStore, ordered_skills: &[String], hours_per_week: u32) -> Vec<Week> {
    let mut plan: Vec<Week> = Vec::new();
    let mut current = Week::new(1);

    for skill in ordered_skills {
        let info = store.lookup(skill);

        // Close the week only if it already holds something; a lone
        // oversized skill stays in its own over-budget week.
        if current.total_hours + info.estimated_hours > hours_per_week && !current.skills.is_empty()
        {
            finalize_week(&mut current);
            let next_number = current.week + 1;
            plan.push(std::mem::replace(&mut current, Week::new(next_number)));
        }

        let practice_hours = (info.estimated_hours as f32 * info.difficulty.practice_ratio()) as u32;
        let study_hours = info.estimated_hours - practice_hours;

        current.total_hours += info.estimated_hours;
        current.milestones.push(format!(
            "Complete {skill} fundamentals and build a mini-project"
        ));
        current.projects.push(suggest_project(skill, info.difficulty));
        current.skills.push(SkillAssignment {
            name: skill.clone(),
            estimated_hours: info.estimated_hours,
            study_hours,
            practice_hours,
            difficulty: info.difficulty,
            category: info.category,
            learning_tip: info.difficulty.learning_tip().to_string(),
            daily_goal: format!(
                "Study {}h + Practice {}h per day",
                study_hours / 5,
                practice_hours / 5
            ),
        });
    }

    if !current.skills.is_empty() {
        finalize_week(&mut current);
        plan.push(current);
    }

    plan
}

/// Derives the week's focus area (first-seen categorical mode) and its
/// intensity label.
fn finalize_week(week: &mut Week) {
    week.focus_area = dominant_category(&week.skills);

    let any_advanced = week
        .skills
        .iter()
        .any(|s| s.difficulty == Difficulty::Advanced);
    let all_beginner = week
        .skills
        .iter()
        .all(|s| s.difficulty == Difficulty::Beginner);

    week.intensity = if any_advanced {
        "High".to_string()
    } else if all_beginner {
        "Moderate".to_string()
    } else {
        "Medium".to_string()
    };
}

fn dominant_category(skills: &[SkillAssignment]) -> String {
    if skills.is_empty() {
        return "mixed".to_string();
    }
    // First-seen wins among equally frequent categories.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for skill in skills {
        match counts.iter_mut().find(|(c, _)| *c == skill.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((&skill.category, 1)),
        }
    }
    let mut best = counts[0];
    for &entry in &counts[1..] {
        if entry.1 > best.1 {
            best = entry;
        }
    }
    best.0.to_string()
}

/// Project suggestion keyed by (skill, difficulty), with a generic fallback.
fn suggest_project(skill: &str, difficulty: Difficulty) -> String {
    let suggestion = match (skill, difficulty) {
        ("Python", Difficulty::Beginner) => Some("Build a calculator or to-do list CLI app"),
        ("Python", Difficulty::Intermediate) => {
            Some("Create a web scraper or data analysis script")
        }
        ("Python", Difficulty::Advanced) => Some("Build a REST API with authentication"),
        ("React", Difficulty::Beginner) => Some("Create a personal portfolio website"),
        ("React", Difficulty::Intermediate) => Some("Build a weather app with API integration"),
        ("React", Difficulty::Advanced) => {
            Some("Develop a full-featured dashboard with state management")
        }
        ("Machine Learning", Difficulty::Beginner) => Some("Iris dataset classification"),
        ("Machine Learning", Difficulty::Intermediate) => Some("Build a house price predictor"),
        ("Machine Learning", Difficulty::Advanced) => Some("Create a recommendation system"),
        ("Node.js", Difficulty::Beginner) => Some("Simple HTTP server"),
        ("Node.js", Difficulty::Intermediate) => Some("RESTful API with database"),
        ("Node.js", Difficulty::Advanced) => Some("Real-time chat application"),
        ("Docker", Difficulty::Beginner) => Some("Containerize a simple app"),
        ("Docker", Difficulty::Intermediate) => Some("Multi-container app with Docker Compose"),
        ("Docker", Difficulty::Advanced) => Some("Deploy microservices architecture"),
        _ => None,
    };
    suggestion
        .map(str::to_string)
        .unwrap_or_else(|| format!("Build a practical project using {skill}"))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
