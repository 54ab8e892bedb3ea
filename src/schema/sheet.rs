use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

use super::traits::{AbilityCategory, Attribute, AttributeCategory, Ability, Virtue};

pub const ATTRIBUTE_CEILING: u8 = 5;
pub const ABILITY_CEILING: u8 = 5;
/// Abilities cannot pass this during the primary distribution.
pub const PRIMARY_ABILITY_CEILING: u8 = 3;
pub const VIRTUE_CEILING: u8 = 5;
pub const WILLPOWER_CEILING: u8 = 10;
pub const BACKGROUND_CEILING: u8 = 5;

/// A pool of dot ratings that the distribution primitive can spend into.
pub trait Ratings<K> {
    /// Current rating of `key`; absent keys read as zero.
    fn rating(&self, key: K) -> u8;
    /// Add one dot to `key`. Ceilings are the caller's concern.
    fn raise(&mut self, key: K);
}

impl<K: Eq + Hash + Copy> Ratings<K> for FxHashMap<K, u8> {
    fn rating(&self, key: K) -> u8 {
        self.get(&key).copied().unwrap_or(0)
    }

    fn raise(&mut self, key: K) {
        *self.entry(key).or_insert(0) += 1;
    }
}

/// Conscience, Self-Control and Courage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Virtues {
    pub conscience: u8,
    pub selfcontrol: u8,
    pub courage: u8,
}

impl Default for Virtues {
    fn default() -> Self {
        Self {
            conscience: 1,
            selfcontrol: 1,
            courage: 1,
        }
    }
}

impl Virtues {
    pub fn get(&self, virtue: Virtue) -> u8 {
        match virtue {
            Virtue::Conscience => self.conscience,
            Virtue::SelfControl => self.selfcontrol,
            Virtue::Courage => self.courage,
        }
    }

    fn get_mut(&mut self, virtue: Virtue) -> &mut u8 {
        match virtue {
            Virtue::Conscience => &mut self.conscience,
            Virtue::SelfControl => &mut self.selfcontrol,
            Virtue::Courage => &mut self.courage,
        }
    }

    pub fn total(&self) -> u8 {
        self.conscience + self.selfcontrol + self.courage
    }
}

impl Ratings<Virtue> for Virtues {
    fn rating(&self, key: Virtue) -> u8 {
        self.get(key)
    }

    fn raise(&mut self, key: Virtue) {
        *self.get_mut(key) += 1;
    }
}

/// A complete numeric character sheet.
///
/// Every attribute and ability key is always present, so downstream
/// exporters can index without checking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub attributes: FxHashMap<Attribute, u8>,
    pub abilities: FxHashMap<Ability, u8>,
    pub virtues: Virtues,
    pub willpower: u8,
    pub humanity: u8,
    #[serde(default)]
    pub backgrounds: FxHashMap<String, u8>,
    pub bloodpool: u8,
}

impl Default for CharacterSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterSheet {
    /// A blank sheet: attributes at 1, abilities at 0, virtues at 1.
    pub fn new() -> Self {
        Self {
            attributes: Attribute::ALL.iter().map(|a| (*a, 1)).collect(),
            abilities: Ability::ALL.iter().map(|a| (*a, 0)).collect(),
            virtues: Virtues::default(),
            willpower: 1,
            humanity: 1,
            backgrounds: FxHashMap::default(),
            bloodpool: 10,
        }
    }

    pub fn attribute(&self, attribute: Attribute) -> u8 {
        self.attributes.rating(attribute)
    }

    pub fn ability(&self, ability: Ability) -> u8 {
        self.abilities.rating(ability)
    }

    pub fn background(&self, name: &str) -> u8 {
        self.backgrounds.get(name).copied().unwrap_or(0)
    }

    /// Sum of the dots in one attribute category.
    pub fn attribute_total(&self, category: AttributeCategory) -> u32 {
        category
            .attributes()
            .iter()
            .map(|a| self.attribute(*a) as u32)
            .sum()
    }

    /// Sum of the dots in one ability category.
    pub fn ability_total(&self, category: AbilityCategory) -> u32 {
        category
            .abilities()
            .iter()
            .map(|a| self.ability(*a) as u32)
            .sum()
    }

    /// Add dots to a background, creating it if needed and clamping at the
    /// background ceiling.
    pub fn add_background(&mut self, name: &str, dots: u8) {
        let entry = self.backgrounds.entry(name.to_string()).or_insert(0);
        *entry = entry.saturating_add(dots).min(BACKGROUND_CEILING);
    }
}

fn dots(rating: u8, max: u8) -> String {
    let filled = rating.min(max) as usize;
    let mut out = "●".repeat(filled);
    out.push_str(&"○".repeat(max as usize - filled));
    out
}

impl fmt::Display for CharacterSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Attributes")?;
        for category in AttributeCategory::ALL {
            writeln!(f, "  {}", category.name())?;
            for attr in category.attributes() {
                writeln!(
                    f,
                    "    {:<14}{}",
                    attr.name(),
                    dots(self.attribute(*attr), ATTRIBUTE_CEILING)
                )?;
            }
        }

        writeln!(f, "Abilities")?;
        for category in AbilityCategory::ALL {
            writeln!(f, "  {}", category.name())?;
            for ability in category.abilities() {
                let rating = self.ability(*ability);
                if rating > 0 {
                    writeln!(
                        f,
                        "    {:<14}{}",
                        ability.name(),
                        dots(rating, ABILITY_CEILING)
                    )?;
                }
            }
        }

        if !self.backgrounds.is_empty() {
            writeln!(f, "Backgrounds")?;
            let mut names: Vec<&String> = self.backgrounds.keys().collect();
            names.sort();
            for name in names {
                writeln!(
                    f,
                    "    {:<14}{}",
                    name,
                    dots(self.background(name), BACKGROUND_CEILING)
                )?;
            }
        }

        writeln!(f, "Virtues")?;
        for virtue in Virtue::ALL {
            writeln!(
                f,
                "    {:<14}{}",
                virtue.name(),
                dots(self.virtues.get(virtue), VIRTUE_CEILING)
            )?;
        }

        writeln!(f, "Humanity        {}", self.humanity)?;
        writeln!(
            f,
            "Willpower       {}",
            dots(self.willpower, WILLPOWER_CEILING)
        )?;
        write!(f, "Blood pool      {}", self.bloodpool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sheet_has_initial_values() {
        let sheet = CharacterSheet::new();
        assert_eq!(sheet.attributes.len(), 9);
        assert_eq!(sheet.abilities.len(), 30);
        assert!(sheet.attributes.values().all(|v| *v == 1));
        assert!(sheet.abilities.values().all(|v| *v == 0));
        assert_eq!(sheet.virtues, Virtues::default());
        assert_eq!(sheet.virtues.total(), 3);
        assert!(sheet.backgrounds.is_empty());
    }

    #[test]
    fn add_background_clamps_at_ceiling() {
        let mut sheet = CharacterSheet::new();
        sheet.add_background("Resources", 1);
        assert_eq!(sheet.background("Resources"), 1);
        sheet.add_background("Resources", 9);
        assert_eq!(sheet.background("Resources"), BACKGROUND_CEILING);
        assert_eq!(sheet.background("Allies"), 0);
    }

    #[test]
    fn category_totals() {
        let mut sheet = CharacterSheet::new();
        sheet.attributes.insert(Attribute::Strength, 4);
        sheet.abilities.insert(Ability::Occult, 3);
        assert_eq!(sheet.attribute_total(AttributeCategory::Physical), 6);
        assert_eq!(sheet.attribute_total(AttributeCategory::Mental), 3);
        assert_eq!(sheet.ability_total(AbilityCategory::Knowledges), 3);
        assert_eq!(sheet.ability_total(AbilityCategory::Talents), 0);
    }

    #[test]
    fn virtues_as_ratings() {
        let mut virtues = Virtues::default();
        virtues.raise(Virtue::Courage);
        virtues.raise(Virtue::Courage);
        assert_eq!(virtues.rating(Virtue::Courage), 3);
        assert_eq!(virtues.courage, 3);
        assert_eq!(virtues.total(), 5);
    }

    #[test]
    fn map_ratings_default_to_zero() {
        let mut pool: FxHashMap<Attribute, u8> = FxHashMap::default();
        assert_eq!(pool.rating(Attribute::Wits), 0);
        pool.raise(Attribute::Wits);
        assert_eq!(pool.rating(Attribute::Wits), 1);
    }

    #[test]
    fn json_uses_wire_keys() {
        let mut sheet = CharacterSheet::new();
        sheet.add_background("Resources", 2);
        let json = serde_json::to_string(&sheet).unwrap();
        assert!(json.contains("\"strength\":1"));
        assert!(json.contains("\"animalken\":0"));
        assert!(json.contains("\"selfcontrol\":1"));
        assert!(json.contains("\"Resources\":2"));
        assert!(json.contains("\"bloodpool\":10"));
    }

    #[test]
    fn display_renders_dots() {
        let mut sheet = CharacterSheet::new();
        sheet.attributes.insert(Attribute::Strength, 3);
        let text = sheet.to_string();
        assert!(text.contains("strength      ●●●○○"));
        assert!(text.contains("Blood pool      10"));
    }
}
