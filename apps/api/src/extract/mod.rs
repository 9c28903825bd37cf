//! Resume skill extraction: document text parsing plus keyword, context,
//! and phrase matching against the skills database.

pub mod extractor;
pub mod handlers;
pub mod parser;

pub use extractor::{ExtractedSkills, SkillExtractor};
