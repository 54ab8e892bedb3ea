use serde::{Deserialize, Serialize};
use std::fmt;

/// The three attribute groups, in the order the rules list them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeCategory {
    Physical,
    Social,
    Mental,
}

impl AttributeCategory {
    pub const ALL: [AttributeCategory; 3] = [Self::Physical, Self::Social, Self::Mental];

    /// The three attributes belonging to this category.
    pub fn attributes(&self) -> &'static [Attribute] {
        match self {
            Self::Physical => &[Attribute::Strength, Attribute::Dexterity, Attribute::Stamina],
            Self::Social => &[
                Attribute::Charisma,
                Attribute::Manipulation,
                Attribute::Appearance,
            ],
            Self::Mental => &[Attribute::Perception, Attribute::Intelligence, Attribute::Wits],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Social => "social",
            Self::Mental => "mental",
        }
    }

    /// Parse a category name as it appears in attribute-profile strings.
    ///
    /// Case-insensitive, surrounding whitespace ignored. The upstream service
    /// writes English names but older chronicles carry Portuguese ones.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "physical" | "fisico" | "físico" => Some(Self::Physical),
            "social" => Some(Self::Social),
            "mental" => Some(Self::Mental),
            _ => None,
        }
    }
}

/// One of the nine base attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Strength,
    Dexterity,
    Stamina,
    Charisma,
    Manipulation,
    Appearance,
    Perception,
    Intelligence,
    Wits,
}

impl Attribute {
    pub const ALL: [Attribute; 9] = [
        Self::Strength,
        Self::Dexterity,
        Self::Stamina,
        Self::Charisma,
        Self::Manipulation,
        Self::Appearance,
        Self::Perception,
        Self::Intelligence,
        Self::Wits,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Dexterity => "dexterity",
            Self::Stamina => "stamina",
            Self::Charisma => "charisma",
            Self::Manipulation => "manipulation",
            Self::Appearance => "appearance",
            Self::Perception => "perception",
            Self::Intelligence => "intelligence",
            Self::Wits => "wits",
        }
    }

    pub fn category(&self) -> AttributeCategory {
        match self {
            Self::Strength | Self::Dexterity | Self::Stamina => AttributeCategory::Physical,
            Self::Charisma | Self::Manipulation | Self::Appearance => AttributeCategory::Social,
            Self::Perception | Self::Intelligence | Self::Wits => AttributeCategory::Mental,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three ability groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityCategory {
    Talents,
    Skills,
    Knowledges,
}

impl AbilityCategory {
    pub const ALL: [AbilityCategory; 3] = [Self::Talents, Self::Skills, Self::Knowledges];

    /// The ten abilities belonging to this category.
    pub fn abilities(&self) -> &'static [Ability] {
        match self {
            Self::Talents => &ABILITY_TABLE[0..10],
            Self::Skills => &ABILITY_TABLE[10..20],
            Self::Knowledges => &ABILITY_TABLE[20..30],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Talents => "talents",
            Self::Skills => "skills",
            Self::Knowledges => "knowledges",
        }
    }
}

static ABILITY_TABLE: [Ability; 30] = Ability::ALL;

/// One of the thirty abilities. Declaration order groups them by category:
/// talents, then skills, then knowledges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    // Talents
    Alertness,
    Athletics,
    Brawl,
    Dodge,
    Empathy,
    Expression,
    Intimidation,
    Leadership,
    Streetwise,
    Subterfuge,
    // Skills
    AnimalKen,
    Craft,
    Drive,
    Etiquette,
    Firearms,
    Larceny,
    Melee,
    Performance,
    Stealth,
    Survival,
    // Knowledges
    Academics,
    Computer,
    Finance,
    Investigation,
    Law,
    Medicine,
    Occult,
    Politics,
    Science,
    Technology,
}

impl Ability {
    pub const ALL: [Ability; 30] = [
        Self::Alertness,
        Self::Athletics,
        Self::Brawl,
        Self::Dodge,
        Self::Empathy,
        Self::Expression,
        Self::Intimidation,
        Self::Leadership,
        Self::Streetwise,
        Self::Subterfuge,
        Self::AnimalKen,
        Self::Craft,
        Self::Drive,
        Self::Etiquette,
        Self::Firearms,
        Self::Larceny,
        Self::Melee,
        Self::Performance,
        Self::Stealth,
        Self::Survival,
        Self::Academics,
        Self::Computer,
        Self::Finance,
        Self::Investigation,
        Self::Law,
        Self::Medicine,
        Self::Occult,
        Self::Politics,
        Self::Science,
        Self::Technology,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Alertness => "alertness",
            Self::Athletics => "athletics",
            Self::Brawl => "brawl",
            Self::Dodge => "dodge",
            Self::Empathy => "empathy",
            Self::Expression => "expression",
            Self::Intimidation => "intimidation",
            Self::Leadership => "leadership",
            Self::Streetwise => "streetwise",
            Self::Subterfuge => "subterfuge",
            Self::AnimalKen => "animalken",
            Self::Craft => "craft",
            Self::Drive => "drive",
            Self::Etiquette => "etiquette",
            Self::Firearms => "firearms",
            Self::Larceny => "larceny",
            Self::Melee => "melee",
            Self::Performance => "performance",
            Self::Stealth => "stealth",
            Self::Survival => "survival",
            Self::Academics => "academics",
            Self::Computer => "computer",
            Self::Finance => "finance",
            Self::Investigation => "investigation",
            Self::Law => "law",
            Self::Medicine => "medicine",
            Self::Occult => "occult",
            Self::Politics => "politics",
            Self::Science => "science",
            Self::Technology => "technology",
        }
    }

    pub fn category(&self) -> AbilityCategory {
        use Ability::*;
        match self {
            Alertness | Athletics | Brawl | Dodge | Empathy | Expression | Intimidation
            | Leadership | Streetwise | Subterfuge => AbilityCategory::Talents,
            AnimalKen | Craft | Drive | Etiquette | Firearms | Larceny | Melee | Performance
            | Stealth | Survival => AbilityCategory::Skills,
            Academics | Computer | Finance | Investigation | Law | Medicine | Occult | Politics
            | Science | Technology => AbilityCategory::Knowledges,
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three moral-axis virtues of the Road of Humanity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Virtue {
    Conscience,
    SelfControl,
    Courage,
}

impl Virtue {
    pub const ALL: [Virtue; 3] = [Self::Conscience, Self::SelfControl, Self::Courage];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Conscience => "conscience",
            Self::SelfControl => "selfcontrol",
            Self::Courage => "courage",
        }
    }
}

impl fmt::Display for Virtue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
