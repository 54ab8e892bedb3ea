//! Chronicle Stats: point-allocation engine for V20 character sheets.
//!
//! Turns a narrative concept (nature, concept, attribute priorities,
//! generation) into a fully populated numeric sheet by spending the fixed
//! creation budgets with priority-weighted randomness.

pub mod core;
pub mod schema;

pub use crate::core::archetype::{ArchetypeTables, RulesError};
pub use crate::core::engine::{StatEngine, StatEngineBuilder};
pub use crate::schema::concept::ConceptDescriptor;
pub use crate::schema::sheet::CharacterSheet;

/// Generate a sheet with the built-in archetype tables and an entropy-seeded
/// random source.
pub fn generate_stats(concept: &ConceptDescriptor) -> CharacterSheet {
    StatEngine::new().generate_stats(concept)
}
