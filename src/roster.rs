//! Canonical stat blocks and gear used by the demo binary, the
//! tournament layer, and tests.

use schema::{Archetype, Element};

use crate::combatant::Combatant;
use crate::equipment::Equipment;

/// Default durability for off-the-rack gear.
const STANDARD_DURABILITY: u32 = 5;

pub fn knight(name: impl Into<String>) -> Combatant {
    Combatant::new(name, Archetype::Knight, 150, 15, 8).expect("knight stat block is valid")
}

pub fn orc(name: impl Into<String>) -> Combatant {
    Combatant::new(name, Archetype::Orc, 170, 18, 6).expect("orc stat block is valid")
}

pub fn mage(name: impl Into<String>) -> Combatant {
    Combatant::new(name, Archetype::Mage, 140, 16, 5).expect("mage stat block is valid")
}

pub fn ninja(name: impl Into<String>) -> Combatant {
    Combatant::new(name, Archetype::Ninja, 130, 17, 4).expect("ninja stat block is valid")
}

/// Build the canonical combatant for any playable archetype.
pub fn champion(archetype: Archetype, name: impl Into<String>) -> Combatant {
    match archetype {
        Archetype::Knight => knight(name),
        Archetype::Orc => orc(name),
        Archetype::Mage => mage(name),
        Archetype::Ninja => ninja(name),
        Archetype::Boss => crate::tournament::final_boss(),
    }
}

/// The starting armory a fighter picks from before a duel.
pub fn armory() -> Vec<Equipment> {
    vec![
        Equipment::new("Sword", 5, 0, STANDARD_DURABILITY).expect("valid gear"),
        Equipment::new("Armor", 0, 4, STANDARD_DURABILITY).expect("valid gear"),
        Equipment::new("Shield", 0, 2, STANDARD_DURABILITY).expect("valid gear"),
        Equipment::elemental("Flaming Sword", Element::Fire, 4, 0, STANDARD_DURABILITY)
            .expect("valid gear"),
        Equipment::elemental("Frost Armor", Element::Ice, 0, 3, STANDARD_DURABILITY)
            .expect("valid gear"),
        Equipment::elemental("Shadow Daggers", Element::Shadow, 3, 0, STANDARD_DURABILITY)
            .expect("valid gear"),
    ]
}
