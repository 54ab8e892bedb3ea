/// The allocation engine: concept descriptor in, character sheet out.
///
/// Runs the stages in their fixed order. Later stages read values that
/// earlier ones settle (virtues before willpower, willpower before bonus).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::archetype::{ArchetypeTables, RulesError};
use crate::core::stages;
use crate::schema::concept::{AttributeProfile, ConceptDescriptor};
use crate::schema::sheet::CharacterSheet;

/// Generates character sheets. Built via `StatEngine::builder()`, or
/// `StatEngine::new()` for the built-in tables.
#[derive(Debug)]
pub struct StatEngine {
    tables: ArchetypeTables,
    seed: Option<u64>,
    generation_count: AtomicU64,
}

/// Builder for constructing a `StatEngine`.
#[derive(Debug, Default)]
pub struct StatEngineBuilder {
    tables: Option<ArchetypeTables>,
    tables_path: Option<String>,
    seed: Option<u64>,
}

impl Default for StatEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StatEngine {
    pub fn new() -> Self {
        Self {
            tables: ArchetypeTables::default(),
            seed: None,
            generation_count: AtomicU64::new(0),
        }
    }

    pub fn builder() -> StatEngineBuilder {
        StatEngineBuilder::default()
    }

    pub fn tables(&self) -> &ArchetypeTables {
        &self.tables
    }

    /// Build a sheet for `concept` drawing from `rng`.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        concept: &ConceptDescriptor,
        rng: &mut R,
    ) -> CharacterSheet {
        let profile = AttributeProfile::parse(concept.attribute_profile.as_deref());
        let ability_order = self.tables.ability_order(&concept.concept);
        let favored = self.tables.virtue_bias(&concept.nature);
        let cycle = self.tables.bonus_cycle(&concept.nature);

        tracing::debug!(
            nature = %concept.nature,
            concept = %concept.concept,
            ?ability_order,
            ?favored,
            ?cycle,
            "generating sheet"
        );

        let sheet = CharacterSheet::new();
        let sheet = stages::attribute_stage(sheet, &profile, rng);
        let sheet = stages::ability_stage(sheet, ability_order, rng);
        let sheet = stages::virtue_stage(sheet, favored, rng);
        let sheet = stages::derive_stats(sheet);
        let sheet = stages::bonus_stage(sheet, cycle, stages::BONUS_BUDGET, rng);
        stages::blood_stage(sheet, &concept.generation)
    }

    /// Build a sheet with the engine's own random source: a seeded stream
    /// when the builder was given a seed (each call advances it), entropy
    /// otherwise.
    pub fn generate_stats(&self, concept: &ConceptDescriptor) -> CharacterSheet {
        match self.seed {
            Some(seed) => {
                let count = self.generation_count.fetch_add(1, Ordering::Relaxed);
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(count));
                self.generate(concept, &mut rng)
            }
            None => self.generate(concept, &mut rand::thread_rng()),
        }
    }

    /// Generate `count` independent sheets for the same concept.
    pub fn generate_many(&self, concept: &ConceptDescriptor, count: usize) -> Vec<CharacterSheet> {
        (0..count).map(|_| self.generate_stats(concept)).collect()
    }
}

impl StatEngineBuilder {
    /// Replace the built-in tables.
    pub fn tables(mut self, tables: ArchetypeTables) -> Self {
        self.tables = Some(tables);
        self
    }

    /// A RON tables file merged over the base tables.
    pub fn tables_path(mut self, path: &str) -> Self {
        self.tables_path = Some(path.to_string());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<StatEngine, RulesError> {
        let mut tables = self.tables.unwrap_or_default();
        tables.normalize();

        if let Some(ref path) = self.tables_path {
            let overlay = ArchetypeTables::load_from_ron(Path::new(path))?;
            tables.merge(overlay);
        }

        let problems = tables.validate();
        if !problems.is_empty() {
            return Err(RulesError::Invalid(problems));
        }

        Ok(StatEngine {
            tables,
            seed: self.seed,
            generation_count: AtomicU64::new(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::traits::{Ability, Attribute, AttributeCategory, Virtue};

    fn monster() -> ConceptDescriptor {
        ConceptDescriptor::new("Monstro", "soldado brutal")
            .with_profile("Physical/Social/Mental")
            .with_generation("Geração 9")
    }

    #[test]
    fn generate_is_reproducible_with_same_rng() {
        let engine = StatEngine::new();
        let a = engine.generate(&monster(), &mut StdRng::seed_from_u64(42));
        let b = engine.generate(&monster(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_engine_advances_between_calls() {
        let engine = StatEngine::builder().seed(7).build().unwrap();
        let sheets = engine.generate_many(&monster(), 10);
        assert_eq!(sheets.len(), 10);
        assert!(sheets.iter().any(|s| s != &sheets[0]));

        let replay = StatEngine::builder().seed(7).build().unwrap();
        assert_eq!(replay.generate_stats(&monster()), sheets[0]);
    }

    #[test]
    fn monster_scenario() {
        let engine = StatEngine::new();
        for seed in 0..100 {
            let sheet = engine.generate(&monster(), &mut StdRng::seed_from_u64(seed));
            assert_eq!(sheet.bloodpool, 14);
            assert_eq!(sheet.attributes.len(), 9);
            assert_eq!(sheet.abilities.len(), 30);
            assert!(sheet.virtues.courage >= 4);
            assert!(sheet.abilities.values().all(|v| *v <= 5));
            assert!(sheet.willpower <= 10);
        }
    }

    #[test]
    fn empty_concept_is_total() {
        let engine = StatEngine::new();
        let sheet = engine.generate(&ConceptDescriptor::default(), &mut StdRng::seed_from_u64(1));
        assert!(Attribute::ALL.iter().all(|a| sheet.attributes.contains_key(a)));
        assert!(Ability::ALL.iter().all(|a| sheet.abilities.contains_key(a)));
        assert!(Virtue::ALL.iter().all(|v| sheet.virtues.get(*v) >= 1));
        assert_eq!(sheet.bloodpool, 10);
        assert!(sheet.attribute_total(AttributeCategory::Physical) >= 3);
    }

    #[test]
    fn builder_rejects_invalid_tables() {
        let mut tables = ArchetypeTables::default();
        tables.default_bonus_cycle.clear();
        let err = StatEngine::builder().tables(tables).build().unwrap_err();
        assert!(matches!(err, RulesError::Invalid(ref problems) if problems.len() == 1));
    }

    #[test]
    fn builder_reports_missing_file() {
        let err = StatEngine::builder()
            .tables_path("does/not/exist.ron")
            .build()
            .unwrap_err();
        assert!(matches!(err, RulesError::Io(_)));
    }

    #[test]
    fn builder_normalizes_supplied_tables() {
        let mut tables = ArchetypeTables::default();
        tables.virtue_biases[1].keywords.push("  HERMIT ".to_string());
        let engine = StatEngine::builder().tables(tables).build().unwrap();
        assert_eq!(engine.tables().virtue_bias("Hermit"), Some(Virtue::Conscience));
    }
}
