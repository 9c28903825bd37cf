//! Market analyzer — priority scoring over static demand data and role-gap
//! comparison against the job-roles catalog.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const MARKET_DEMAND_JSON: &str = include_str!("../../data/market_demand.json");
const JOB_ROLES_JSON: &str = include_str!("../../data/job_roles.json");

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Market demand record for one skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDemand {
    pub demand_score: i32,
    pub growth_rate: i32,
    pub job_postings: u32,
    pub trend: String,
    pub saturation: String,
    pub avg_salary: u32,
}

impl MarketDemand {
    /// Record returned for skills the dataset does not track.
    fn default_unknown() -> Self {
        MarketDemand {
            demand_score: 50,
            growth_rate: 0,
            job_postings: 1000,
            trend: "unknown".to_string(),
            saturation: "unknown".to_string(),
            avg_salary: 75000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRole {
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub nice_to_have: Vec<String>,
    pub experience_level: String,
    pub avg_salary_usd: u32,
}

/// One skill with its market standing, ordered by priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedSkill {
    pub skill: String,
    pub priority_score: f64,
    pub demand_score: i32,
    pub growth_rate: i32,
    pub trend: String,
    pub saturation: String,
    pub job_postings: u32,
    pub avg_salary: u32,
    pub market_position: String,
    pub recommendation: String,
}

/// Result of comparing a user's skills against a role's requirements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleComparison {
    pub target_role: String,
    pub experience_level: String,
    pub avg_salary: u32,
    pub readiness_percentage: f64,
    pub overall_readiness: f64,
    pub matched_required_skills: Vec<String>,
    pub missing_required_skills: Vec<String>,
    pub prioritized_missing_skills: Vec<RankedSkill>,
    pub matched_nice_to_have: Vec<String>,
    pub missing_nice_to_have: Vec<String>,
    pub total_required: usize,
    pub total_matched: usize,
    pub career_advice: String,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketInsights {
    pub top_demand_skills: Vec<String>,
    pub fastest_growing_skills: Vec<String>,
    pub highest_salary_skills: Vec<String>,
    pub total_skills_tracked: usize,
    pub total_roles_available: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Analyzer
// ────────────────────────────────────────────────────────────────────────────

pub struct MarketAnalyzer {
    market_data: HashMap<String, MarketDemand>,
    market_index: HashMap<String, String>,
    job_roles: HashMap<String, JobRole>,
    // Precomputed at load; the data never changes afterwards.
    top_demand: Vec<String>,
    fastest_growing: Vec<String>,
    highest_salary: Vec<String>,
}

impl MarketAnalyzer {
    pub fn load() -> Result<Self> {
        Self::from_json(MARKET_DEMAND_JSON, JOB_ROLES_JSON)
    }

    pub fn from_json(market_json: &str, roles_json: &str) -> Result<Self> {
        let market_data: HashMap<String, MarketDemand> =
            serde_json::from_str(market_json).context("failed to parse market demand data")?;
        let job_roles: HashMap<String, JobRole> =
            serde_json::from_str(roles_json).context("failed to parse job roles data")?;

        let market_index = market_data
            .keys()
            .map(|k| (k.to_lowercase(), k.clone()))
            .collect();

        let top_n = |key: fn(&MarketDemand) -> i64| {
            let mut names: Vec<&String> = market_data.keys().collect();
            // Name as secondary key keeps the precomputed lists stable.
            names.sort_by_key(|n| (std::cmp::Reverse(key(&market_data[*n])), (*n).clone()));
            names.into_iter().take(10).cloned().collect::<Vec<_>>()
        };

        let top_demand = top_n(|d| d.demand_score as i64);
        let fastest_growing = top_n(|d| d.growth_rate as i64);
        let highest_salary = top_n(|d| d.avg_salary as i64);

        Ok(MarketAnalyzer {
            market_data,
            market_index,
            job_roles,
            top_demand,
            fastest_growing,
            highest_salary,
        })
    }

    pub fn tracked_skill_count(&self) -> usize {
        self.market_data.len()
    }

    pub fn role_count(&self) -> usize {
        self.job_roles.len()
    }

    pub fn all_roles(&self) -> Vec<String> {
        let mut roles: Vec<String> = self.job_roles.keys().cloned().collect();
        roles.sort();
        roles
    }

    /// Demand lookup: exact, then case-insensitive, then the default
    /// record. Total over all strings, like the skill store.
    pub fn demand(&self, skill: &str) -> MarketDemand {
        self.market_data
            .get(skill)
            .or_else(|| {
                self.market_index
                    .get(&skill.to_lowercase())
                    .and_then(|canonical| self.market_data.get(canonical))
            })
            .cloned()
            .unwrap_or_else(MarketDemand::default_unknown)
    }

    /// Priority formula: demand and growth weighted, salary normalized to a
    /// 0-10 scale, penalties for saturated markets, bonuses for rising
    /// trends, and a flat bonus when the skill is required by the target role.
    pub fn priority_score(&self, skill: &str, target_role: Option<&str>) -> f64 {
        let demand = self.demand(skill);

        let demand_component = demand.demand_score as f64 * 0.5;
        let growth_component = demand.growth_rate as f64 * 2.5;
        let salary_component = demand.avg_salary as f64 / 150_000.0 * 10.0;

        let saturation_penalty = match demand.saturation.as_str() {
            "very_high" => -20.0,
            "high" => -10.0,
            "low" => 10.0,
            _ => 0.0,
        };
        let trend_bonus = match demand.trend.as_str() {
            "rapidly_rising" => 15.0,
            "rising" => 8.0,
            "declining" => -10.0,
            _ => 0.0,
        };

        let role_bonus = target_role
            .and_then(|role| self.job_roles.get(role))
            .map(|role| {
                if role.required_skills.iter().any(|s| s == skill) {
                    15.0
                } else {
                    0.0
                }
            })
            .unwrap_or(0.0);

        let priority = demand_component
            + growth_component
            + salary_component
            + saturation_penalty
            + trend_bonus
            + role_bonus;
        (priority * 100.0).round() / 100.0
    }

    /// Ranks skills by priority score, descending.
    pub fn rank_skills(&self, skills: &[String], target_role: Option<&str>) -> Vec<RankedSkill> {
        let mut ranked: Vec<RankedSkill> = skills
            .iter()
            .map(|skill| {
                let demand = self.demand(skill);
                RankedSkill {
                    skill: skill.clone(),
                    priority_score: self.priority_score(skill, target_role),
                    demand_score: demand.demand_score,
                    growth_rate: demand.growth_rate,
                    market_position: market_position(&demand),
                    recommendation: skill_recommendation(&demand),
                    trend: demand.trend,
                    saturation: demand.saturation,
                    job_postings: demand.job_postings,
                    avg_salary: demand.avg_salary,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.priority_score
                .partial_cmp(&a.priority_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    /// Compares user skills against a role's requirements. Unknown roles
    /// are a NotFound error; the route surface lists valid roles separately.
    pub fn compare_with_role(
        &self,
        user_skills: &[String],
        target_role: &str,
    ) -> Result<RoleComparison, AppError> {
        let role = self.job_roles.get(target_role).ok_or_else(|| {
            AppError::NotFound(format!(
                "Role '{target_role}' not found. Available roles: {}",
                self.all_roles().join(", ")
            ))
        })?;

        let user_set: HashSet<String> = user_skills.iter().map(|s| s.to_lowercase()).collect();
        let has = |skill: &String| user_set.contains(&skill.to_lowercase());

        let matched_required: Vec<String> =
            role.required_skills.iter().filter(|s| has(s)).cloned().collect();
        let missing_required: Vec<String> =
            role.required_skills.iter().filter(|s| !has(s)).cloned().collect();
        let matched_nice: Vec<String> =
            role.nice_to_have.iter().filter(|s| has(s)).cloned().collect();
        let missing_nice: Vec<String> =
            role.nice_to_have.iter().filter(|s| !has(s)).cloned().collect();

        let readiness = if role.required_skills.is_empty() {
            0.0
        } else {
            matched_required.len() as f64 / role.required_skills.len() as f64 * 100.0
        };
        let total_desired = role.required_skills.len() + role.nice_to_have.len();
        let overall = if total_desired == 0 {
            0.0
        } else {
            (matched_required.len() + matched_nice.len()) as f64 / total_desired as f64 * 100.0
        };

        let mut prioritized = self.rank_skills(&missing_required, Some(target_role));
        prioritized.truncate(5);

        Ok(RoleComparison {
            target_role: target_role.to_string(),
            experience_level: role.experience_level.clone(),
            avg_salary: role.avg_salary_usd,
            readiness_percentage: round1(readiness),
            overall_readiness: round1(overall),
            career_advice: career_advice(readiness, missing_required.len(), target_role),
            next_steps: next_steps(&prioritized[..prioritized.len().min(3)]),
            matched_required_skills: matched_required.clone(),
            missing_required_skills: missing_required,
            prioritized_missing_skills: prioritized,
            matched_nice_to_have: matched_nice,
            missing_nice_to_have: missing_nice,
            total_required: role.required_skills.len(),
            total_matched: matched_required.len(),
        })
    }

    pub fn insights(&self) -> MarketInsights {
        MarketInsights {
            top_demand_skills: self.top_demand.iter().take(5).cloned().collect(),
            fastest_growing_skills: self.fastest_growing.iter().take(5).cloned().collect(),
            highest_salary_skills: self.highest_salary.iter().take(5).cloned().collect(),
            total_skills_tracked: self.market_data.len(),
            total_roles_available: self.job_roles.len(),
        }
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn market_position(demand: &MarketDemand) -> String {
    let d = demand.demand_score;
    let g = demand.growth_rate;
    if d >= 90 && g >= 20 {
        "Hot & Growing"
    } else if d >= 85 {
        "High Demand"
    } else if g >= 20 {
        "Rapidly Growing"
    } else if d >= 70 {
        "Steady Demand"
    } else if g < 0 {
        "Declining"
    } else {
        "Moderate"
    }
    .to_string()
}

fn skill_recommendation(demand: &MarketDemand) -> String {
    let d = demand.demand_score;
    let g = demand.growth_rate;
    if d >= 90 && g >= 20 && matches!(demand.saturation.as_str(), "low" | "medium") {
        "Excellent career opportunity! High demand with strong growth."
    } else if d >= 85 {
        "Strong market demand. Great skill to have."
    } else if g >= 20 {
        "Emerging skill with high growth potential."
    } else if demand.saturation == "very_high" {
        "Highly competitive. Consider specializing."
    } else if g < 0 {
        "Declining demand. Consider alternatives."
    } else {
        "Valuable skill with steady opportunities."
    }
    .to_string()
}

fn career_advice(readiness: f64, missing_count: usize, role: &str) -> String {
    if readiness >= 90.0 {
        format!("Excellent! You're well-prepared for {role} roles. Start applying!")
    } else if readiness >= 75.0 {
        format!(
            "Strong foundation! Focus on the {missing_count} remaining skills to become job-ready."
        )
    } else if readiness >= 50.0 {
        format!(
            "Good progress! Dedicate time to learn {missing_count} key skills over the next few months."
        )
    } else if readiness >= 25.0 {
        "You're on the right path. Consistent learning over 3-6 months will get you there."
            .to_string()
    } else {
        "Starting fresh? No problem! Follow the roadmap and you'll build these skills step by step."
            .to_string()
    }
}

fn next_steps(top_missing: &[RankedSkill]) -> Vec<String> {
    if top_missing.is_empty() {
        return vec![
            "You have all required skills! Consider nice-to-have skills to stand out.".to_string(),
        ];
    }

    let mut steps: Vec<String> = top_missing
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. Start learning {} - {}", i + 1, s.skill, s.recommendation))
        .collect();
    steps.push(format!(
        "{}. Build projects to demonstrate these skills",
        top_missing.len() + 1
    ));
    steps.push(format!(
        "{}. Update your resume and LinkedIn once you've learned 2-3 skills",
        top_missing.len() + 2
    ));
    steps
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
