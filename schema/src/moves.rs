use serde::{Deserialize, Serialize};
use strum::Display;

use crate::archetypes::Archetype;

/// Every named move in the game, across all archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Move {
    // Knight
    #[strum(serialize = "Sword Slash")]
    SwordSlash,
    #[strum(serialize = "Shield Bash")]
    ShieldBash,
    #[strum(serialize = "Mighty Strike")]
    MightyStrike,
    #[strum(serialize = "Rapid Strikes")]
    RapidStrikes,

    // Orc
    #[strum(serialize = "Cleave")]
    Cleave,
    #[strum(serialize = "Berserk Strike")]
    BerserkStrike,
    #[strum(serialize = "Roar")]
    Roar,

    // Mage
    #[strum(serialize = "Arcane Lance")]
    ArcaneLance,
    #[strum(serialize = "Celestial Healing")]
    CelestialHealing,
    #[strum(serialize = "Meteor Fall")]
    MeteorFall,

    // Ninja
    #[strum(serialize = "Shadowstep")]
    Shadowstep,
    #[strum(serialize = "Twin Fang Slash")]
    TwinFangSlash,
    #[strum(serialize = "Shuriken Storm")]
    ShurikenStorm,
    #[strum(serialize = "Smoke Bomb Escape")]
    SmokeBombEscape,

    // Boss
    #[strum(serialize = "Claw Strike")]
    ClawStrike,
    #[strum(serialize = "Fire Breath")]
    FireBreath,
    #[strum(serialize = "Wing Slam")]
    WingSlam,
    #[strum(serialize = "Roar of Terror")]
    RoarOfTerror,
    #[strum(serialize = "Berserker Fury")]
    BerserkerFury,
}

impl Move {
    /// The archetype whose move set this move belongs to.
    pub fn archetype(&self) -> Archetype {
        match self {
            Move::SwordSlash | Move::ShieldBash | Move::MightyStrike | Move::RapidStrikes => {
                Archetype::Knight
            }
            Move::Cleave | Move::BerserkStrike | Move::Roar => Archetype::Orc,
            Move::ArcaneLance | Move::CelestialHealing | Move::MeteorFall => Archetype::Mage,
            Move::Shadowstep
            | Move::TwinFangSlash
            | Move::ShurikenStorm
            | Move::SmokeBombEscape => Archetype::Ninja,
            Move::ClawStrike
            | Move::FireBreath
            | Move::WingSlam
            | Move::RoarOfTerror
            | Move::BerserkerFury => Archetype::Boss,
        }
    }
}

impl Archetype {
    /// The fixed move catalogue for this archetype, in menu order.
    pub fn move_list(&self) -> &'static [Move] {
        match self {
            Archetype::Knight => &[
                Move::SwordSlash,
                Move::ShieldBash,
                Move::MightyStrike,
                Move::RapidStrikes,
            ],
            Archetype::Orc => &[Move::Cleave, Move::BerserkStrike, Move::Roar],
            Archetype::Mage => &[Move::ArcaneLance, Move::CelestialHealing, Move::MeteorFall],
            Archetype::Ninja => &[
                Move::Shadowstep,
                Move::TwinFangSlash,
                Move::ShurikenStorm,
                Move::SmokeBombEscape,
            ],
            Archetype::Boss => &[
                Move::ClawStrike,
                Move::FireBreath,
                Move::WingSlam,
                Move::RoarOfTerror,
                Move::BerserkerFury,
            ],
        }
    }

    /// The fallback move substituted when a selection cannot be honored.
    pub fn default_move(&self) -> Move {
        match self {
            Archetype::Knight => Move::SwordSlash,
            Archetype::Orc => Move::Cleave,
            Archetype::Mage => Move::ArcaneLance,
            Archetype::Ninja => Move::TwinFangSlash,
            Archetype::Boss => Move::ClawStrike,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_move_belongs_to_its_archetype_catalogue() {
        for archetype in [
            Archetype::Knight,
            Archetype::Orc,
            Archetype::Mage,
            Archetype::Ninja,
            Archetype::Boss,
        ] {
            for mv in archetype.move_list() {
                assert_eq!(mv.archetype(), archetype, "{mv:?} listed under {archetype:?}");
            }
            assert_eq!(archetype.default_move().archetype(), archetype);
        }
    }

    #[test]
    fn display_names_are_human_readable() {
        assert_eq!(Move::SwordSlash.to_string(), "Sword Slash");
        assert_eq!(Move::BerserkerFury.to_string(), "Berserker Fury");
    }
}
