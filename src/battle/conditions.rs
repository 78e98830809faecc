use serde::{Deserialize, Serialize};

/// Fraction of max HP burned away each upkeep while Burning.
pub const BURN_TICK_FRACTION: f64 = 0.05;
/// Fraction of max HP lost on the single Bleeding tick.
pub const BLEED_TICK_FRACTION: f64 = 0.03;

/// The closed set of status effects a combatant can carry.
///
/// Effects are set-valued: a combatant either has an effect or does not.
/// Durations are not stored here; the turn engine's upkeep pass and the
/// skip-flag consumption rules define each effect's lifetime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum StatusEffect {
    /// Skip flag: the holder loses their next turn.
    Stunned,
    /// Skip flag: the holder spends their next turn untargetable.
    Untouchable,
    /// Recurring tick: 5% max HP per upkeep, persists until cleansed.
    Burning,
    /// Single tick: 3% max HP on the next upkeep, then clears.
    Bleeding,
    /// The 20% attack reduction was applied at infliction; clears on upkeep.
    Frightened,
    /// Informational; gates Shield Bash stun scaling and Berserk recoil.
    Frozen,
    /// Informational; clears on upkeep.
    Shadowed,
    /// Persists until cleansed (boss phase transition).
    Shocked,
    /// Marker paired with the Orc's attack-buff charges.
    Buffed,
}

impl StatusEffect {
    /// Flags that consume the holder's turn when the engine observes them.
    pub fn is_skip_flag(&self) -> bool {
        matches!(self, StatusEffect::Stunned | StatusEffect::Untouchable)
    }

    /// Display tag, matching the arena announcer's shouting.
    pub fn display_name(&self) -> &'static str {
        match self {
            StatusEffect::Stunned => "STUNNED",
            StatusEffect::Untouchable => "UNTOUCHABLE",
            StatusEffect::Burning => "BURNING",
            StatusEffect::Bleeding => "BLEEDING",
            StatusEffect::Frightened => "FRIGHTENED",
            StatusEffect::Frozen => "FROZEN",
            StatusEffect::Shadowed => "SHADOWED",
            StatusEffect::Shocked => "SHOCKED",
            StatusEffect::Buffed => "BUFFED",
        }
    }
}
