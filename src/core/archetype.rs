/// Archetype tables: keyword clusters that steer ability priorities, virtue
/// bias and bonus-spending strategy.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::traits::{AbilityCategory, Virtue};

/// Format version of the tables file this build understands.
pub const TABLES_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid archetype tables: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Something a bonus point can be spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusTarget {
    PhysicalAttribute,
    SocialAttribute,
    MentalAttribute,
    Ability,
    Willpower,
    Background,
}

impl BonusTarget {
    /// Bonus points one dot of this target costs.
    pub fn cost(&self) -> u32 {
        match self {
            Self::PhysicalAttribute | Self::SocialAttribute | Self::MentalAttribute => 5,
            Self::Ability => 2,
            Self::Willpower | Self::Background => 1,
        }
    }
}

/// Concept keywords mapped to an ability category priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityCluster {
    pub name: String,
    pub keywords: Vec<String>,
    pub order: Vec<AbilityCategory>,
}

/// Nature keywords mapped to the virtue that gets a dedicated grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtueBias {
    pub name: String,
    pub keywords: Vec<String>,
    pub favored: Virtue,
}

/// Nature keywords mapped to a bonus-spending cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusStrategy {
    pub name: String,
    pub keywords: Vec<String>,
    pub cycle: Vec<BonusTarget>,
}

trait Keyed {
    fn name(&self) -> &str;
    fn keywords(&self) -> &[String];
    fn keywords_mut(&mut self) -> &mut Vec<String>;
}

macro_rules! impl_keyed {
    ($($ty:ty),*) => {
        $(impl Keyed for $ty {
            fn name(&self) -> &str {
                &self.name
            }
            fn keywords(&self) -> &[String] {
                &self.keywords
            }
            fn keywords_mut(&mut self) -> &mut Vec<String> {
                &mut self.keywords
            }
        })*
    };
}

impl_keyed!(AbilityCluster, VirtueBias, BonusStrategy);

/// First entry whose keywords occur in `text`, case-insensitively.
fn first_match<'a, T: Keyed>(entries: &'a [T], text: &str) -> Option<&'a T> {
    let text = text.to_lowercase();
    entries
        .iter()
        .find(|entry| entry.keywords().iter().any(|k| text.contains(k.as_str())))
}

/// Replace entries sharing a name, append the rest.
fn merge_named<T: Keyed>(base: &mut Vec<T>, other: Vec<T>) {
    for entry in other {
        match base.iter_mut().find(|b| b.name() == entry.name()) {
            Some(existing) => *existing = entry,
            None => base.push(entry),
        }
    }
}

fn check_named<T: Keyed>(section: &str, entries: &[T], problems: &mut Vec<String>) {
    let mut names = FxHashSet::default();
    for entry in entries {
        if entry.name().trim().is_empty() {
            problems.push(format!("{}: entry with empty name", section));
        } else if !names.insert(entry.name()) {
            problems.push(format!("{}: duplicate entry '{}'", section, entry.name()));
        }
        if entry.keywords().is_empty() {
            problems.push(format!("{} '{}': no keywords", section, entry.name()));
        }
        if entry.keywords().iter().any(|k| k.trim().is_empty()) {
            problems.push(format!("{} '{}': blank keyword", section, entry.name()));
        }
    }
}

fn is_permutation(order: &[AbilityCategory]) -> bool {
    order.len() == AbilityCategory::ALL.len()
        && AbilityCategory::ALL.iter().all(|c| order.contains(c))
}

fn default_version() -> u32 {
    TABLES_VERSION
}

/// The ordered keyword tables the engine consults. Entries are tested top
/// to bottom and the first hit wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeTables {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub ability_clusters: Vec<AbilityCluster>,
    #[serde(default)]
    pub default_ability_order: Vec<AbilityCategory>,
    #[serde(default)]
    pub virtue_biases: Vec<VirtueBias>,
    #[serde(default)]
    pub bonus_strategies: Vec<BonusStrategy>,
    #[serde(default)]
    pub default_bonus_cycle: Vec<BonusTarget>,
}

impl ArchetypeTables {
    /// Load tables from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<ArchetypeTables, RulesError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse tables from a RON string. Keywords are trimmed and lowercased.
    pub fn parse_ron(input: &str) -> Result<ArchetypeTables, RulesError> {
        let mut tables: ArchetypeTables = ron::from_str(input)?;
        tables.normalize();
        Ok(tables)
    }

    /// Trim and lowercase every keyword so matching can lowercase only the
    /// input text.
    pub fn normalize(&mut self) {
        fn fix<T: Keyed>(entries: &mut [T]) {
            for entry in entries {
                for keyword in entry.keywords_mut().iter_mut() {
                    *keyword = keyword.trim().to_lowercase();
                }
            }
        }
        fix(&mut self.ability_clusters);
        fix(&mut self.virtue_biases);
        fix(&mut self.bonus_strategies);
    }

    /// Merge another table set into this one. Entries from `other` replace
    /// entries of the same name; new names are appended after the existing
    /// ones. Defaults are replaced only when `other` sets them.
    pub fn merge(&mut self, other: ArchetypeTables) {
        self.version = other.version;
        merge_named(&mut self.ability_clusters, other.ability_clusters);
        merge_named(&mut self.virtue_biases, other.virtue_biases);
        merge_named(&mut self.bonus_strategies, other.bonus_strategies);
        if !other.default_ability_order.is_empty() {
            self.default_ability_order = other.default_ability_order;
        }
        if !other.default_bonus_cycle.is_empty() {
            self.default_bonus_cycle = other.default_bonus_cycle;
        }
    }

    /// Structural problems that would make generation misbehave. Empty when
    /// the tables are usable.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.version != TABLES_VERSION {
            problems.push(format!(
                "unsupported version {} (expected {})",
                self.version, TABLES_VERSION
            ));
        }

        check_named("ability cluster", &self.ability_clusters, &mut problems);
        check_named("virtue bias", &self.virtue_biases, &mut problems);
        check_named("bonus strategy", &self.bonus_strategies, &mut problems);

        for cluster in &self.ability_clusters {
            if !is_permutation(&cluster.order) {
                problems.push(format!(
                    "ability cluster '{}': order must name each category once",
                    cluster.name
                ));
            }
        }
        if !is_permutation(&self.default_ability_order) {
            problems.push("default ability order must name each category once".to_string());
        }

        for strategy in &self.bonus_strategies {
            if strategy.cycle.len() != 3 {
                problems.push(format!(
                    "bonus strategy '{}': cycle must have 3 targets, found {}",
                    strategy.name,
                    strategy.cycle.len()
                ));
            }
        }
        if self.default_bonus_cycle.len() != 3 {
            problems.push(format!(
                "default bonus cycle must have 3 targets, found {}",
                self.default_bonus_cycle.len()
            ));
        }

        problems
    }

    /// Ability categories in priority order for a concept.
    pub fn ability_order(&self, concept: &str) -> &[AbilityCategory] {
        match first_match(&self.ability_clusters, concept) {
            Some(cluster) => &cluster.order,
            None => &self.default_ability_order,
        }
    }

    /// The virtue a nature favors, if any.
    pub fn virtue_bias(&self, nature: &str) -> Option<Virtue> {
        first_match(&self.virtue_biases, nature).map(|bias| bias.favored)
    }

    /// Bonus-spending cycle for a nature.
    pub fn bonus_cycle(&self, nature: &str) -> &[BonusTarget] {
        match first_match(&self.bonus_strategies, nature) {
            Some(strategy) => &strategy.cycle,
            None => &self.default_bonus_cycle,
        }
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for ArchetypeTables {
    /// The built-in tables. `rules_data/archetypes.ron` holds the same data.
    fn default() -> Self {
        use AbilityCategory::*;
        use BonusTarget::*;

        Self {
            version: TABLES_VERSION,
            ability_clusters: vec![
                AbilityCluster {
                    name: "combat".to_string(),
                    keywords: words(&[
                        "soldado", "soldier", "guarda", "guard", "capanga", "thug", "assassino",
                        "assassin", "atleta", "athlete", "valentão", "bully",
                    ]),
                    order: vec![Skills, Talents, Knowledges],
                },
                AbilityCluster {
                    name: "intellectual".to_string(),
                    keywords: words(&[
                        "intelectual", "intellectual", "hacker", "medico", "médico", "doctor",
                        "investigador", "investigator", "professor", "filosofo", "filósofo",
                        "philosopher",
                    ]),
                    order: vec![Knowledges, Skills, Talents],
                },
                AbilityCluster {
                    name: "social".to_string(),
                    keywords: words(&[
                        "politico", "político", "politician", "socialite", "lider", "líder",
                        "leader", "artista", "artist", "galante", "charmer",
                    ]),
                    order: vec![Talents, Knowledges, Skills],
                },
            ],
            default_ability_order: vec![Talents, Skills, Knowledges],
            virtue_biases: vec![
                VirtueBias {
                    name: "predator".to_string(),
                    keywords: words(&[
                        "monstro", "monster", "valentão", "bully", "brute", "sobrevivente",
                        "survivor", "fera", "beast",
                    ]),
                    favored: Virtue::Courage,
                },
                VirtueBias {
                    name: "saint".to_string(),
                    keywords: words(&[
                        "santo", "saint", "cuidador", "caregiver", "martir", "mártir", "martyr",
                    ]),
                    favored: Virtue::Conscience,
                },
            ],
            bonus_strategies: vec![
                BonusStrategy {
                    name: "aggressive".to_string(),
                    keywords: words(&[
                        "valentão", "bully", "brute", "fera", "beast", "sobrevivente", "survivor",
                        "monstro", "monster",
                    ]),
                    cycle: vec![PhysicalAttribute, Willpower, Ability],
                },
                BonusStrategy {
                    name: "dominant".to_string(),
                    keywords: words(&[
                        "autocrata", "autocrat", "tirano", "tyrant", "galante", "gallant",
                        "lider", "líder", "leader",
                    ]),
                    cycle: vec![SocialAttribute, Background, Willpower],
                },
                BonusStrategy {
                    name: "visionary".to_string(),
                    keywords: words(&[
                        "arquiteto", "architect", "visionario", "visionário", "visionary",
                        "filosofo", "filósofo", "philosopher", "enigma",
                    ]),
                    cycle: vec![MentalAttribute, Ability, Willpower],
                },
            ],
            default_bonus_cycle: vec![Willpower, SocialAttribute, Ability],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AbilityCategory::*;

    #[test]
    fn builtin_tables_are_valid() {
        let tables = ArchetypeTables::default();
        assert!(tables.validate().is_empty(), "{:?}", tables.validate());
    }

    #[test]
    fn shipped_ron_matches_builtin() {
        let shipped = include_str!("../../rules_data/archetypes.ron");
        let tables = ArchetypeTables::parse_ron(shipped).unwrap();
        assert_eq!(tables, ArchetypeTables::default());
    }

    #[test]
    fn ability_order_by_concept() {
        let tables = ArchetypeTables::default();
        assert_eq!(tables.ability_order("Soldado brutal"), &[Skills, Talents, Knowledges]);
        assert_eq!(tables.ability_order("Anarchist HACKER"), &[Knowledges, Skills, Talents]);
        assert_eq!(tables.ability_order("decadent socialite"), &[Talents, Knowledges, Skills]);
        assert_eq!(tables.ability_order("street preacher"), &[Talents, Skills, Knowledges]);
        assert_eq!(tables.ability_order(""), &[Talents, Skills, Knowledges]);
    }

    #[test]
    fn first_matching_cluster_wins() {
        let tables = ArchetypeTables::default();
        // "guard" (combat) and "doctor" (intellectual) both match.
        assert_eq!(tables.ability_order("doctor turned guard"), &[Skills, Talents, Knowledges]);
    }

    #[test]
    fn virtue_bias_by_nature() {
        let tables = ArchetypeTables::default();
        assert_eq!(tables.virtue_bias("Monstro"), Some(Virtue::Courage));
        assert_eq!(tables.virtue_bias("VALENTÃO"), Some(Virtue::Courage));
        assert_eq!(tables.virtue_bias("Caregiver"), Some(Virtue::Conscience));
        assert_eq!(tables.virtue_bias("Mártir"), Some(Virtue::Conscience));
        assert_eq!(tables.virtue_bias("Bon Vivant"), None);
    }

    #[test]
    fn bonus_cycle_by_nature() {
        use BonusTarget::*;
        let tables = ArchetypeTables::default();
        assert_eq!(tables.bonus_cycle("Survivor"), &[PhysicalAttribute, Willpower, Ability]);
        assert_eq!(tables.bonus_cycle("Tirano"), &[SocialAttribute, Background, Willpower]);
        assert_eq!(tables.bonus_cycle("Visionary"), &[MentalAttribute, Ability, Willpower]);
        assert_eq!(tables.bonus_cycle("Conformist"), &[Willpower, SocialAttribute, Ability]);
    }

    #[test]
    fn costs() {
        assert_eq!(BonusTarget::SocialAttribute.cost(), 5);
        assert_eq!(BonusTarget::Ability.cost(), 2);
        assert_eq!(BonusTarget::Willpower.cost(), 1);
        assert_eq!(BonusTarget::Background.cost(), 1);
    }

    #[test]
    fn parse_normalizes_keywords() {
        let tables = ArchetypeTables::parse_ron(
            r#"(
                ability_clusters: [
                    (name: "criminal", keywords: ["  Thief ", "LADRÃO"], order: [skills, knowledges, talents]),
                ],
            )"#,
        )
        .unwrap();
        assert_eq!(tables.version, TABLES_VERSION);
        assert_eq!(tables.ability_clusters[0].keywords, vec!["thief", "ladrão"]);
        assert!(tables.default_ability_order.is_empty());
    }

    #[test]
    fn merge_replaces_by_name_and_appends() {
        let mut tables = ArchetypeTables::default();
        let overlay = ArchetypeTables {
            version: TABLES_VERSION,
            ability_clusters: vec![
                AbilityCluster {
                    name: "social".to_string(),
                    keywords: words(&["courtier"]),
                    order: vec![Knowledges, Talents, Skills],
                },
                AbilityCluster {
                    name: "criminal".to_string(),
                    keywords: words(&["thief"]),
                    order: vec![Skills, Knowledges, Talents],
                },
            ],
            default_ability_order: Vec::new(),
            virtue_biases: Vec::new(),
            bonus_strategies: Vec::new(),
            default_bonus_cycle: Vec::new(),
        };

        tables.merge(overlay);

        assert_eq!(tables.ability_clusters.len(), 4);
        assert_eq!(tables.ability_clusters[2].name, "social");
        assert_eq!(tables.ability_order("courtier"), &[Knowledges, Talents, Skills]);
        assert_eq!(tables.ability_order("socialite"), &[Talents, Skills, Knowledges]);
        assert_eq!(tables.ability_order("thief"), &[Skills, Knowledges, Talents]);
        assert_eq!(tables.default_bonus_cycle.len(), 3);
        assert!(tables.validate().is_empty());
    }

    #[test]
    fn validate_reports_problems() {
        let mut tables = ArchetypeTables::default();
        tables.version = 2;
        tables.ability_clusters[0].order = vec![Skills, Skills, Talents];
        tables.virtue_biases[1].keywords.push("  ".to_string());
        tables.bonus_strategies[0].cycle.pop();
        tables.bonus_strategies[2].name = "aggressive".to_string();
        tables.default_bonus_cycle.clear();

        let problems = tables.validate();
        assert_eq!(problems.len(), 6, "{:?}", problems);
        assert!(problems.iter().any(|p| p.contains("unsupported version 2")));
        assert!(problems.iter().any(|p| p.contains("duplicate entry 'aggressive'")));
    }

    #[test]
    fn invalid_error_message_lists_problems() {
        let err = RulesError::Invalid(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "invalid archetype tables: a; b");
    }
}
