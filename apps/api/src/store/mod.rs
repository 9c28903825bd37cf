//! Skill Reference Store — immutable skill graph and learning-resource data.
//!
//! Loaded once at startup from embedded JSON and shared read-only via
//! `Arc<SkillStore>` in `AppState`. The store is total: any string resolves
//! to a `SkillInfo`, falling back to a default record for unknown skills.

mod cache;

use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use cache::LookupCache;

const SKILL_GRAPH_JSON: &str = include_str!("../../data/skill_graph.json");
const RESOURCES_JSON: &str = include_str!("../../data/learning_resources.json");

/// How many distinct lookup strings the memoization cache retains.
const LOOKUP_CACHE_CAPACITY: usize = 256;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Skill difficulty tier. Drives topological tie-breaking, study/practice
/// splits, and weekly intensity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Numeric rank used to prefer easier skills among equally-ready ones.
    pub fn rank(self) -> u8 {
        match self {
            Difficulty::Beginner => 1,
            Difficulty::Intermediate => 2,
            Difficulty::Advanced => 3,
        }
    }

    /// Share of a skill's hours spent on hands-on practice (rest is study).
    pub fn practice_ratio(self) -> f32 {
        match self {
            Difficulty::Beginner => 0.6,
            Difficulty::Intermediate => 0.7,
            Difficulty::Advanced => 0.8,
        }
    }

    pub fn learning_tip(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Focus on fundamentals. Take your time with basics.",
            Difficulty::Intermediate => {
                "Build projects while learning. Apply concepts immediately."
            }
            Difficulty::Advanced => "Deep dive into internals. Contribute to open source.",
        }
    }
}

/// One entry in the skill graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillInfo {
    pub prerequisites: Vec<String>,
    pub difficulty: Difficulty,
    pub estimated_hours: u32,
    pub category: String,
}

impl SkillInfo {
    /// Record returned for skills absent from the graph. The store never
    /// fails a lookup.
    pub fn default_unknown() -> Self {
        SkillInfo {
            prerequisites: vec![],
            difficulty: Difficulty::Intermediate,
            estimated_hours: 30,
            category: "general".to_string(),
        }
    }
}

/// Learning resources for one skill: provider name → URL or description.
/// `search_links` is populated only on the generated fallback entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceEntry {
    #[serde(flatten)]
    pub links: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_links: Option<BTreeMap<String, String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

pub struct SkillStore {
    graph: HashMap<String, SkillInfo>,
    /// lowercased name → canonical (store-cased) name
    graph_index: HashMap<String, String>,
    resources: HashMap<String, ResourceEntry>,
    resources_index: HashMap<String, String>,
    cache: LookupCache,
}

impl SkillStore {
    /// Loads the embedded reference data. Called once at startup.
    pub fn load() -> Result<Self> {
        Self::from_json(SKILL_GRAPH_JSON, RESOURCES_JSON)
    }

    pub fn from_json(graph_json: &str, resources_json: &str) -> Result<Self> {
        let graph: HashMap<String, SkillInfo> =
            serde_json::from_str(graph_json).context("failed to parse skill graph data")?;
        let resources: HashMap<String, ResourceEntry> =
            serde_json::from_str(resources_json).context("failed to parse resource data")?;

        let graph_index = graph
            .keys()
            .map(|k| (k.to_lowercase(), k.clone()))
            .collect();
        let resources_index = resources
            .keys()
            .map(|k| (k.to_lowercase(), k.clone()))
            .collect();

        Ok(SkillStore {
            graph,
            graph_index,
            resources,
            resources_index,
            cache: LookupCache::new(LOOKUP_CACHE_CAPACITY),
        })
    }

    pub fn skill_count(&self) -> usize {
        self.graph.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Looks up a skill by name. Exact match wins, then case-insensitive,
    /// then the default record. Memoized by the literal input string, so
    /// distinct casings of the same skill occupy separate cache slots.
    pub fn lookup(&self, name: &str) -> SkillInfo {
        if let Some(hit) = self.cache.get(name) {
            return hit;
        }

        let info = self
            .graph
            .get(name)
            .or_else(|| {
                self.graph_index
                    .get(&name.to_lowercase())
                    .and_then(|canonical| self.graph.get(canonical))
            })
            .cloned()
            .unwrap_or_else(SkillInfo::default_unknown);

        self.cache.insert(name, &info);
        info
    }

    /// Returns the store's casing for a known skill, or the input unchanged
    /// for unknown ones. Resolver output preserves store casing.
    pub fn canonical_name(&self, name: &str) -> String {
        if self.graph.contains_key(name) {
            return name.to_string();
        }
        self.graph_index
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    /// Learning resources for a skill. Falls back to the `default` entry
    /// augmented with per-provider search URLs built from the raw name.
    pub fn resources(&self, name: &str) -> ResourceEntry {
        if let Some(entry) = self.resources.get(name) {
            return entry.clone();
        }
        if let Some(canonical) = self.resources_index.get(&name.to_lowercase()) {
            if let Some(entry) = self.resources.get(canonical) {
                return entry.clone();
            }
        }

        let mut fallback = self
            .resources
            .get("default")
            .cloned()
            .unwrap_or_else(|| ResourceEntry {
                links: BTreeMap::new(),
                search_links: None,
            });
        fallback.search_links = Some(search_links(name));
        fallback
    }
}

fn search_links(skill: &str) -> BTreeMap<String, String> {
    let plus = skill.replace(' ', "+");
    let pct = skill.replace(' ', "%20");
    let mut links = BTreeMap::new();
    links.insert(
        "udemy".to_string(),
        format!("https://www.udemy.com/courses/search/?q={plus}"),
    );
    links.insert(
        "coursera".to_string(),
        format!("https://www.coursera.org/search?query={pct}"),
    );
    links.insert(
        "youtube".to_string(),
        format!("https://www.youtube.com/results?search_query={plus}+tutorial"),
    );
    links.insert(
        "freecodecamp".to_string(),
        format!("https://www.freecodecamp.org/news/search/?query={pct}"),
    );
    links
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
