//! Skill extraction from resume text.
//!
//! Three passes over the cleaned text: word-boundary keyword matching
//! against the skills database, section-header context scanning, and a
//! multi-word phrase pass. Results are alias-normalized, deduplicated,
//! categorized, and given confidence scores.

use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

const SKILLS_DB_JSON: &str = include_str!("../../data/skills_database.json");

/// Resume section headers that introduce comma-separated skill lists.
const CONTEXT_PATTERNS: [&str; 7] = [
    r"(?:Skills?|Technical Skills?|Technologies?|Tools?)[:\s]+([^\n]+)",
    r"(?:Proficient|Experienced|Expert) (?:in|with)[:\s]+([^\n]+)",
    r"(?:Knowledge|Experience) (?:of|in|with)[:\s]+([^\n]+)",
    r"(?:Programming Languages?|Languages?)[:\s]+([^\n]+)",
    r"(?:Frameworks?|Libraries?)[:\s]+([^\n]+)",
    r"(?:Databases?|Data)[:\s]+([^\n]+)",
    r"(?:Cloud|DevOps|Platform)[:\s]+([^\n]+)",
];

const MULTI_WORD_SKILLS: [&str; 14] = [
    "Machine Learning",
    "Deep Learning",
    "Data Science",
    "Computer Vision",
    "Natural Language Processing",
    "REST API",
    "Web Development",
    "Mobile Development",
    "Cloud Computing",
    "Data Visualization",
    "Database Design",
    "Software Development",
    "Agile Methodology",
    "Problem Solving",
];

/// Extraction result returned to the API layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSkills {
    pub all_skills: Vec<String>,
    pub categorized: BTreeMap<String, Vec<String>>,
    pub count: usize,
    pub confidence_scores: BTreeMap<String, f64>,
}

#[derive(Deserialize)]
struct SkillsDatabase {
    #[serde(flatten)]
    categories: BTreeMap<String, serde_json::Value>,
}

pub struct SkillExtractor {
    /// category → canonical skill names
    categories: BTreeMap<String, Vec<String>>,
    /// lowercased name → canonical name, across all categories
    index: HashMap<String, String>,
    /// lowercased alias → canonical name
    aliases: HashMap<String, String>,
    /// (canonical name, precompiled word-boundary pattern)
    patterns: Vec<(String, Regex)>,
    context_patterns: Vec<Regex>,
    phrase_patterns: Vec<(String, Regex)>,
}

impl SkillExtractor {
    pub fn load() -> Result<Self> {
        Self::from_json(SKILLS_DB_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let db: SkillsDatabase =
            serde_json::from_str(json).context("failed to parse skills database")?;

        let mut categories = BTreeMap::new();
        let mut index = HashMap::new();
        let mut aliases = HashMap::new();
        let mut patterns = Vec::new();

        for (name, value) in db.categories {
            if name == "skill_aliases" {
                let map: HashMap<String, String> = serde_json::from_value(value)
                    .context("skill_aliases must map alias to canonical name")?;
                for (alias, canonical) in map {
                    aliases.insert(alias.to_lowercase(), canonical);
                }
                continue;
            }
            let skills: Vec<String> = serde_json::from_value(value)
                .with_context(|| format!("category '{name}' must be a list of skills"))?;
            for skill in &skills {
                index.insert(skill.to_lowercase(), skill.clone());
                patterns.push((skill.clone(), word_pattern(skill)?));
            }
            categories.insert(name, skills);
        }

        let context_patterns = CONTEXT_PATTERNS
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .multi_line(true)
                    .build()
                    .with_context(|| format!("invalid context pattern '{p}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        let phrase_patterns = MULTI_WORD_SKILLS
            .iter()
            .map(|phrase| word_pattern(phrase).map(|re| (phrase.to_string(), re)))
            .collect::<Result<Vec<_>>>()?;

        Ok(SkillExtractor {
            categories,
            index,
            aliases,
            patterns,
            context_patterns,
            phrase_patterns,
        })
    }

    pub fn skill_count(&self) -> usize {
        self.index.len()
    }

    /// Canonicalizes a skill name through the alias table.
    pub fn normalize_skill(&self, skill: &str) -> String {
        let trimmed = skill.trim();
        self.aliases
            .get(&trimmed.to_lowercase())
            .cloned()
            .unwrap_or_else(|| trimmed.to_string())
    }

    /// Runs all extraction passes and assembles the categorized result.
    pub fn extract(&self, text: &str) -> ExtractedSkills {
        let mut found: HashSet<String> = HashSet::new();
        found.extend(self.extract_by_keywords(text));
        found.extend(self.extract_by_context(text));
        found.extend(self.extract_by_phrases(text));

        let mut all_skills: Vec<String> = found
            .into_iter()
            .map(|s| self.normalize_skill(&s))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        all_skills.sort();

        let categorized = self.categorize(&all_skills);
        let confidence_scores = self.confidence(&all_skills, text);

        ExtractedSkills {
            count: all_skills.len(),
            all_skills,
            categorized,
            confidence_scores,
        }
    }

    fn extract_by_keywords(&self, text: &str) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|(_, pattern)| pattern.is_match(text))
            .map(|(skill, _)| skill.clone())
            .collect()
    }

    fn extract_by_context(&self, text: &str) -> Vec<String> {
        let mut found = Vec::new();
        for re in &self.context_patterns {
            for caps in re.captures_iter(text) {
                let line = &caps[1];
                for raw in line.split(|c| matches!(c, ',' | ';' | '|' | '\n')) {
                    let candidate = strip_lead_words(raw.trim());
                    if candidate.len() > 1 {
                        if let Some(canonical) = self.index.get(&candidate.to_lowercase()) {
                            found.push(canonical.clone());
                        }
                    }
                }
            }
        }
        found
    }

    fn extract_by_phrases(&self, text: &str) -> Vec<String> {
        self.phrase_patterns
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(phrase, _)| phrase.clone())
            .collect()
    }

    fn categorize(&self, skills: &[String]) -> BTreeMap<String, Vec<String>> {
        let present: HashMap<String, &String> =
            skills.iter().map(|s| (s.to_lowercase(), s)).collect();

        let mut categorized = BTreeMap::new();
        for (category, category_skills) in &self.categories {
            let mut matched: Vec<String> = category_skills
                .iter()
                .filter_map(|db_skill| present.get(&db_skill.to_lowercase()))
                .map(|s| (*s).clone())
                .collect();
            if !matched.is_empty() {
                matched.sort();
                categorized.insert(category.clone(), matched);
            }
        }
        categorized
    }

    /// Confidence per skill: 0.2 per occurrence capped at 0.7, plus 0.3 if
    /// the skill is named in a skills/technologies section.
    fn confidence(&self, skills: &[String], text: &str) -> BTreeMap<String, f64> {
        let mut scores = BTreeMap::new();
        for skill in skills {
            let count = word_pattern(skill)
                .map(|re| re.find_iter(text).count())
                .unwrap_or(0);
            let base = (count as f64 * 0.2).min(0.7);

            let section_re = RegexBuilder::new(&format!(
                r"(?:skills?|technologies?)[^\n]*{}",
                regex::escape(skill)
            ))
            .case_insensitive(true)
            .build();
            let section_bonus = match section_re {
                Ok(re) if re.is_match(text) => 0.3,
                _ => 0.0,
            };

            scores.insert(skill.clone(), (base + section_bonus).min(1.0));
        }
        scores
    }
}

/// Case-insensitive pattern matching `skill` on word boundaries. Boundaries
/// are only anchored where the skill itself starts/ends with a word
/// character, so names like "C++" and "C#" still match.
fn word_pattern(skill: &str) -> Result<Regex> {
    let escaped = regex::escape(skill);
    let start = if skill.chars().next().is_some_and(|c| c.is_alphanumeric() || c == '_') {
        r"\b"
    } else {
        ""
    };
    let end = if skill.chars().last().is_some_and(|c| c.is_alphanumeric() || c == '_') {
        r"\b"
    } else {
        ""
    };
    RegexBuilder::new(&format!("{start}{escaped}{end}"))
        .case_insensitive(true)
        .build()
        .with_context(|| format!("invalid skill pattern for '{skill}'"))
}

fn strip_lead_words(candidate: &str) -> &str {
    let lower = candidate.to_lowercase();
    for lead in ["and ", "or ", "with ", "using ", "including "] {
        if lower.starts_with(lead) {
            return candidate[lead.len()..].trim_start();
        }
    }
    candidate
}
