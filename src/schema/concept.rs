use serde::{Deserialize, Serialize};

use super::traits::AttributeCategory;

/// The narrative input to sheet generation, as supplied by the content
/// service. Every field tolerates being missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConceptDescriptor {
    /// Archetype, e.g. "Monster" or "Caregiver".
    pub nature: String,
    /// Role or profession, e.g. "brutal soldier".
    pub concept: String,
    /// Priority order of the attribute categories, e.g. "Social/Physical/Mental".
    pub attribute_profile: Option<String>,
    /// Free text containing the generation number, e.g. "Generation 9".
    pub generation: String,
    pub clan: Option<String>,
}

impl ConceptDescriptor {
    pub fn new(nature: &str, concept: &str) -> Self {
        Self {
            nature: nature.to_string(),
            concept: concept.to_string(),
            ..Self::default()
        }
    }

    pub fn with_profile(mut self, profile: &str) -> Self {
        self.attribute_profile = Some(profile.to_string());
        self
    }

    pub fn with_generation(mut self, generation: &str) -> Self {
        self.generation = generation.to_string();
        self
    }

    pub fn with_clan(mut self, clan: &str) -> Self {
        self.clan = Some(clan.to_string());
        self
    }
}

/// Attribute categories in priority order, highest budget first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeProfile(pub [AttributeCategory; 3]);

impl Default for AttributeProfile {
    fn default() -> Self {
        Self(AttributeCategory::ALL)
    }
}

impl AttributeProfile {
    /// Parse a profile string, falling back to physical/social/mental when it
    /// is absent or does not have three segments.
    pub fn parse(input: Option<&str>) -> Self {
        match input {
            Some(text) => Self::try_parse(text).unwrap_or_else(|| {
                tracing::debug!(profile = text, "malformed attribute profile, using default order");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Parse exactly three `/`-separated segments. Each segment is resolved
    /// on its own; one that names no category reads as physical. Repeated
    /// categories are kept, so that category is funded twice.
    pub fn try_parse(input: &str) -> Option<Self> {
        let parts: Vec<&str> = input.split('/').collect();
        if parts.len() != 3 {
            return None;
        }

        let mut order = AttributeCategory::ALL;
        for (slot, part) in order.iter_mut().zip(&parts) {
            *slot = AttributeCategory::parse(part).unwrap_or_else(|| {
                tracing::debug!(segment = *part, "unknown attribute category, using physical");
                AttributeCategory::Physical
            });
        }
        Some(Self(order))
    }

    pub fn order(&self) -> [AttributeCategory; 3] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AttributeCategory::*;

    #[test]
    fn parse_valid_profile() {
        let profile = AttributeProfile::parse(Some("Social/Mental/Physical"));
        assert_eq!(profile.order(), [Social, Mental, Physical]);
    }

    #[test]
    fn parse_tolerates_spacing_and_case() {
        let profile = AttributeProfile::parse(Some(" mental / PHYSICAL/social "));
        assert_eq!(profile.order(), [Mental, Physical, Social]);
    }

    #[test]
    fn wrong_segment_count_falls_back() {
        let default = [Physical, Social, Mental];
        assert_eq!(AttributeProfile::parse(None).order(), default);
        assert_eq!(AttributeProfile::parse(Some("")).order(), default);
        assert_eq!(AttributeProfile::parse(Some("Foo/Bar")).order(), default);
        assert_eq!(
            AttributeProfile::parse(Some("Mental/Social/Physical/Mental")).order(),
            default
        );
    }

    #[test]
    fn unknown_segment_reads_as_physical() {
        assert_eq!(
            AttributeProfile::parse(Some("Mental/Social/Other")).order(),
            [Mental, Social, Physical]
        );
        assert_eq!(
            AttributeProfile::parse(Some("Foo/Mental/Social")).order(),
            [Physical, Mental, Social]
        );
        assert_eq!(AttributeProfile::parse(Some("//")).order(), [Physical, Physical, Physical]);
    }

    #[test]
    fn segments_resolve_independently() {
        assert_eq!(
            AttributeProfile::parse(Some("Mental/Mental/Social")).order(),
            [Mental, Mental, Social]
        );
        assert_eq!(
            AttributeProfile::parse(Some("Social/Físico/mental")).order(),
            [Social, Physical, Mental]
        );
    }

    #[test]
    fn descriptor_from_camel_case_json() {
        let json = r#"{
            "nature": "Monstro",
            "concept": "soldado brutal",
            "attributeProfile": "Physical/Social/Mental",
            "generation": "Geração 9"
        }"#;
        let concept: ConceptDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(concept.nature, "Monstro");
        assert_eq!(concept.attribute_profile.as_deref(), Some("Physical/Social/Mental"));
        assert_eq!(concept.clan, None);
    }

    #[test]
    fn descriptor_missing_fields_default() {
        let concept: ConceptDescriptor = serde_json::from_str("{}").unwrap();
        assert_eq!(concept, ConceptDescriptor::default());
    }

    #[test]
    fn builder_methods() {
        let concept = ConceptDescriptor::new("Saint", "doctor")
            .with_profile("Mental/Social/Physical")
            .with_generation("10th")
            .with_clan("Tremere");
        assert_eq!(concept.generation, "10th");
        assert_eq!(concept.clan.as_deref(), Some("Tremere"));
    }
}
