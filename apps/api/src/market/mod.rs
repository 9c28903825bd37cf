//! Market demand analysis: skill ranking by market priority and comparison
//! of a user's skills against target job roles.

pub mod analyzer;
pub mod handlers;

pub use analyzer::{MarketAnalyzer, RankedSkill, RoleComparison};
