/// Sheet-building stages. Each takes the sheet by value and returns the
/// updated sheet, so stages can be exercised one at a time.

use rand::Rng;

use crate::core::archetype::BonusTarget;
use crate::core::distribute::distribute_points;
use crate::schema::concept::AttributeProfile;
use crate::schema::sheet::{
    CharacterSheet, ABILITY_CEILING, ATTRIBUTE_CEILING, BACKGROUND_CEILING,
    PRIMARY_ABILITY_CEILING, VIRTUE_CEILING, WILLPOWER_CEILING,
};
use crate::schema::traits::{Ability, AbilityCategory, AttributeCategory, Virtue};

/// Dots for the primary, secondary and tertiary attribute categories.
pub const ATTRIBUTE_BUDGETS: [u32; 3] = [7, 5, 3];
/// Dots for the primary, secondary and tertiary ability categories.
pub const ABILITY_BUDGETS: [u32; 3] = [13, 9, 5];
pub const VIRTUE_BUDGET: u32 = 7;
/// Part of the virtue budget reserved for a nature's favored virtue.
pub const FAVORED_VIRTUE_GRANT: u32 = 3;
pub const BONUS_BUDGET: u32 = 15;
pub const BONUS_MAX_ITERATIONS: u32 = 100;
/// Background that receives every bonus background dot.
pub const BONUS_BACKGROUND: &str = "Resources";
/// Assumed when the generation text carries no number.
pub const DEFAULT_GENERATION: u32 = 13;
pub const BASE_BLOOD_CAPACITY: u8 = 10;

/// Spend 7/5/3 dots over the attribute categories in profile order.
pub fn attribute_stage<R: Rng + ?Sized>(
    mut sheet: CharacterSheet,
    profile: &AttributeProfile,
    rng: &mut R,
) -> CharacterSheet {
    for (category, budget) in profile.order().iter().zip(ATTRIBUTE_BUDGETS) {
        distribute_points(
            &mut sheet.attributes,
            category.attributes(),
            budget,
            ATTRIBUTE_CEILING,
            rng,
        );
    }
    tracing::trace!(?profile, "attributes distributed");
    sheet
}

/// Spend 13/9/5 dots over the ability categories in `order`, capped at the
/// primary ceiling.
pub fn ability_stage<R: Rng + ?Sized>(
    mut sheet: CharacterSheet,
    order: &[AbilityCategory],
    rng: &mut R,
) -> CharacterSheet {
    for (category, budget) in order.iter().zip(ABILITY_BUDGETS) {
        distribute_points(
            &mut sheet.abilities,
            category.abilities(),
            budget,
            PRIMARY_ABILITY_CEILING,
            rng,
        );
    }
    tracing::trace!(?order, "abilities distributed");
    sheet
}

/// Spend the virtue budget. A favored virtue takes its grant alone and the
/// other two share the rest; without one all three share the whole budget.
pub fn virtue_stage<R: Rng + ?Sized>(
    mut sheet: CharacterSheet,
    favored: Option<Virtue>,
    rng: &mut R,
) -> CharacterSheet {
    match favored {
        Some(virtue) => {
            // Self-control leads the shared list so it gets the front-half bias.
            let rest: Vec<Virtue> = [Virtue::SelfControl, Virtue::Conscience, Virtue::Courage]
                .into_iter()
                .filter(|v| *v != virtue)
                .collect();
            distribute_points(
                &mut sheet.virtues,
                &[virtue],
                FAVORED_VIRTUE_GRANT,
                VIRTUE_CEILING,
                rng,
            );
            distribute_points(
                &mut sheet.virtues,
                &rest,
                VIRTUE_BUDGET - FAVORED_VIRTUE_GRANT,
                VIRTUE_CEILING,
                rng,
            );
        }
        None => {
            distribute_points(
                &mut sheet.virtues,
                &Virtue::ALL,
                VIRTUE_BUDGET,
                VIRTUE_CEILING,
                rng,
            );
        }
    }
    tracing::trace!(?favored, virtues = ?sheet.virtues, "virtues distributed");
    sheet
}

/// Willpower starts at Courage; Humanity is Conscience plus Self-Control.
pub fn derive_stats(mut sheet: CharacterSheet) -> CharacterSheet {
    sheet.willpower = sheet.virtues.courage;
    sheet.humanity = sheet.virtues.conscience + sheet.virtues.selfcontrol;
    sheet
}

/// Spend up to `budget` bonus points following `cycle`.
///
/// Iteration `i` (from 1) targets `cycle[i % len]`. When that target is
/// unaffordable or saturated a single willpower dot is bought instead; when
/// even that is impossible the loop ends and the remainder is forfeit.
pub fn bonus_stage<R: Rng + ?Sized>(
    mut sheet: CharacterSheet,
    cycle: &[BonusTarget],
    budget: u32,
    rng: &mut R,
) -> CharacterSheet {
    if cycle.is_empty() {
        return sheet;
    }

    let mut remaining = budget;
    let mut iteration: u32 = 0;

    while remaining > 0 && iteration < BONUS_MAX_ITERATIONS {
        iteration += 1;
        let target = cycle[iteration as usize % cycle.len()];

        if try_spend(&mut sheet, target, remaining, rng) {
            remaining -= target.cost();
            continue;
        }

        if remaining >= BonusTarget::Willpower.cost() && sheet.willpower < WILLPOWER_CEILING {
            sheet.willpower += 1;
            remaining -= BonusTarget::Willpower.cost();
        } else {
            break;
        }
    }

    if remaining > 0 {
        tracing::debug!(remaining, "bonus points left unspent");
    }
    sheet
}

/// Buy one dot of `target` if `remaining` covers it and there is headroom.
fn try_spend<R: Rng + ?Sized>(
    sheet: &mut CharacterSheet,
    target: BonusTarget,
    remaining: u32,
    rng: &mut R,
) -> bool {
    if remaining < target.cost() {
        return false;
    }

    match target {
        BonusTarget::PhysicalAttribute
        | BonusTarget::SocialAttribute
        | BonusTarget::MentalAttribute => {
            let category = match target {
                BonusTarget::PhysicalAttribute => AttributeCategory::Physical,
                BonusTarget::SocialAttribute => AttributeCategory::Social,
                _ => AttributeCategory::Mental,
            };
            let keys = category.attributes();
            let attribute = keys[rng.gen_range(0..keys.len())];
            let rating = sheet.attributes.entry(attribute).or_insert(0);
            if *rating < ATTRIBUTE_CEILING {
                *rating += 1;
                return true;
            }
            false
        }
        BonusTarget::Ability => {
            let ability = Ability::ALL[rng.gen_range(0..Ability::ALL.len())];
            let rating = sheet.abilities.entry(ability).or_insert(0);
            if *rating < ABILITY_CEILING {
                *rating += 1;
                return true;
            }
            false
        }
        BonusTarget::Willpower => {
            if sheet.willpower < WILLPOWER_CEILING {
                sheet.willpower += 1;
                return true;
            }
            false
        }
        BonusTarget::Background => {
            if sheet.background(BONUS_BACKGROUND) < BACKGROUND_CEILING {
                sheet.add_background(BONUS_BACKGROUND, 1);
                return true;
            }
            false
        }
    }
}

/// First run of ASCII digits in `text`, or [`DEFAULT_GENERATION`] when
/// there is none. Numbers too large to represent read as the default.
pub fn parse_generation(text: &str) -> u32 {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return DEFAULT_GENERATION;
    }
    digits.parse().unwrap_or(DEFAULT_GENERATION)
}

/// Blood pool capacity for a generation: 10 from the thirteenth generation
/// down, one more per step closer to Caine.
pub fn blood_capacity(generation: u32) -> u8 {
    if generation >= DEFAULT_GENERATION {
        BASE_BLOOD_CAPACITY
    } else {
        BASE_BLOOD_CAPACITY + (DEFAULT_GENERATION - generation) as u8
    }
}

/// Set the blood pool from the generation text.
pub fn blood_stage(mut sheet: CharacterSheet, generation: &str) -> CharacterSheet {
    sheet.bloodpool = blood_capacity(parse_generation(generation));
    sheet
}
