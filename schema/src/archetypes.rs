use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The closed set of combatant archetypes. The battle engine dispatches on
/// this tag; there is no open-ended trait hierarchy behind it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Archetype {
    Knight,
    Orc,
    Mage,
    Ninja,
    Boss,
}

impl Archetype {
    /// Archetypes a regular (non-boss) combatant can be drawn from.
    pub const PLAYABLE: [Archetype; 4] = [
        Archetype::Knight,
        Archetype::Orc,
        Archetype::Mage,
        Archetype::Ninja,
    ];
}
