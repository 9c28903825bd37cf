//! Roadmap-generation engine: prerequisite resolution, topological
//! sequencing, weekly bin packing, and final assembly.

pub mod assembler;
pub mod handlers;
pub mod planner;
pub mod resolver;
pub mod sequencer;

pub use assembler::{generate, Roadmap};
