//! Core data types for the Fabula story engine.
//!
//! This crate provides the foundation data types used across the Fabula
//! workspace: the character record, research context types, length and
//! model selectors, and the structured generator payloads.

mod character;
mod generation;
mod length;
mod model;
mod observability;
mod research;

pub use character::{Character, INITIAL_CHARACTER_ID};
pub use generation::{CharacterSketch, StoryGenerationResult};
pub use length::StoryLength;
pub use model::StoryModel;
pub use observability::init_tracing;
pub use research::{GroundingSource, ResearchResult};
