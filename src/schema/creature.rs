use serde::{Deserialize, Serialize};

/// Blood a ghoul's body can hold, whatever its domitor's generation.
pub const GHOUL_BLOOD_CAPACITY: u8 = 10;

const GHOUL_MARKERS: &[&str] = &["ghoul", "carniçal", "carnical", "servo"];
const MORTAL_MARKERS: &[&str] = &[
    "mortal",
    "humano",
    "human",
    "lacaio",
    "retainer",
    "segurança",
    "seguranca",
    "policial",
    "police",
];

/// What kind of being a character is, read from its clan field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Creature {
    Vampire,
    /// A mortal sustained on vampire blood.
    Ghoul,
    Mortal,
}

impl Creature {
    /// Classify a free-text clan. Anything that does not name a ghoul or a
    /// mortal is taken to be a clan of Kindred.
    pub fn detect(clan: &str) -> Self {
        let clan = clan.trim().to_lowercase();
        if clan.is_empty() {
            return Self::Mortal;
        }
        if GHOUL_MARKERS.iter().any(|m| clan.contains(m)) {
            return Self::Ghoul;
        }
        if MORTAL_MARKERS.iter().any(|m| clan.contains(m)) {
            return Self::Mortal;
        }
        Self::Vampire
    }

    /// Blood pool maximum for this creature given the sheet's
    /// generation-derived pool. Ghouls hold a fixed amount; mortals none.
    pub fn blood_capacity(&self, bloodpool: u8) -> Option<u8> {
        match self {
            Self::Vampire => Some(bloodpool),
            Self::Ghoul => Some(GHOUL_BLOOD_CAPACITY),
            Self::Mortal => None,
        }
    }

    /// Blood in the pool at the start of play: half the capacity.
    pub fn starting_blood(&self, bloodpool: u8) -> Option<u8> {
        self.blood_capacity(bloodpool).map(|capacity| capacity / 2)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Vampire => "vampire",
            Self::Ghoul => "ghoul",
            Self::Mortal => "mortal",
        }
    }
}
