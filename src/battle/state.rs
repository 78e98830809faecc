use schema::Move;
use serde::{Deserialize, Serialize};

use crate::battle::conditions::StatusEffect;
use crate::battle::dice::DiceTag;
use crate::combatant::Combatant;
use crate::equipment::Item;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Copy)]
pub enum GameState {
    WaitingForActions,
    RoundInProgress,
    ChallengerWin,
    DefenderWin,
    /// Both combatants died to the same end-of-round damage pass.
    Draw,
}

/// Why an item-use intent could not be honored.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFailure {
    EmptyInventory,
    InvalidIndex(usize),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Round management
    RoundStarted {
        round: u32,
    },
    RoundEnded,
    TurnSkipped {
        index: usize,
        effect: StatusEffect,
    },

    // Move resolution
    MoveUsed {
        index: usize,
        mv: Move,
    },
    /// A selection that could not be honored, and what ran instead.
    FallbackMove {
        index: usize,
        blocked: Move,
        substituted: Move,
    },
    ComboTriggered {
        index: usize,
        count: u32,
        multiplier: f64,
    },
    DiceRolled {
        index: usize,
        roll: u8,
        tag: DiceTag,
        multiplier: f64,
    },
    CriticalHit {
        index: usize,
        mv: Move,
    },
    MoveMissed {
        index: usize,
        mv: Move,
    },
    /// The move never connected at all (Mighty Strike's execution gamble).
    MoveWhiffed {
        index: usize,
        mv: Move,
    },
    AttackDodged {
        index: usize,
    },
    AttackBlocked {
        index: usize,
    },

    // Damage and healing
    DamageDealt {
        target: usize,
        amount: u32,
        remaining_hp: u32,
    },
    RecoilDamage {
        index: usize,
        amount: u32,
    },
    Healed {
        index: usize,
        amount: u32,
        new_hp: u32,
    },

    // Archetype resources
    StealthEntered {
        index: usize,
    },
    ShurikensThrown {
        index: usize,
        used: u32,
        remaining: u32,
    },

    // Status effects
    StatusApplied {
        target: usize,
        effect: StatusEffect,
    },
    StatusResisted {
        target: usize,
        effect: StatusEffect,
    },
    StatusDamage {
        target: usize,
        effect: StatusEffect,
        amount: u32,
        remaining_hp: u32,
    },
    StatusExpired {
        target: usize,
        effect: StatusEffect,
    },
    AttackWeakened {
        target: usize,
        old_attack: u32,
        new_attack: u32,
    },

    // Items and equipment
    ItemUsed {
        index: usize,
        item: Item,
    },
    ItemFailed {
        index: usize,
        reason: ItemFailure,
    },
    EquipmentDamaged {
        index: usize,
        durability: u32,
    },
    EquipmentBroke {
        index: usize,
        name: String,
    },

    // Boss escalation
    BossPhaseStarted {
        index: usize,
        phase: u8,
    },

    // Arena and weather hazards
    HazardDamage {
        target: usize,
        amount: u32,
        hazard: String,
    },
    HazardHealing {
        target: usize,
        amount: u32,
        hazard: String,
    },

    // Tournament economy
    GoldAwarded {
        index: usize,
        amount: u32,
    },

    // Battle end
    Defeated {
        index: usize,
    },
    BattleEnded {
        winner: Option<usize>,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, battle_state: &BattleState) -> Option<String> {
        let name = |index: &usize| battle_state.combatants[*index].name.clone();

        match self {
            // === Round Management Events ===
            BattleEvent::RoundStarted { round } => Some(format!("=== Round {} ===", round)),
            BattleEvent::RoundEnded => {
                None // Silent - the next RoundStarted makes this obvious
            }
            BattleEvent::TurnSkipped { index, effect } => match effect {
                StatusEffect::Untouchable => Some(format!(
                    "{} is untouchable this turn!",
                    name(index)
                )),
                _ => Some(format!(
                    "{} is {} and loses their turn!",
                    name(index),
                    effect.display_name()
                )),
            },

            // === Move Events ===
            BattleEvent::MoveUsed { index, mv } => {
                Some(format!("{} uses {}!", name(index), mv))
            }
            BattleEvent::FallbackMove {
                index,
                blocked,
                substituted,
            } => Some(format!(
                "{} cannot use {} right now and falls back to {}!",
                name(index),
                blocked,
                substituted
            )),
            BattleEvent::ComboTriggered {
                count, multiplier, ..
            } => Some(format!(
                "COMBO x{}! Damage multiplier: {:.1}x",
                count, multiplier
            )),
            BattleEvent::DiceRolled {
                roll,
                tag,
                multiplier,
                ..
            } => match tag {
                // Miss and crit get their own, louder events.
                DiceTag::Miss | DiceTag::Crit => None,
                DiceTag::Normal => {
                    if *multiplier < 1.0 {
                        Some(format!("Dice {}: weak hit!", roll))
                    } else if *multiplier > 1.0 {
                        Some(format!("Dice {}: strong hit!", roll))
                    } else {
                        Some(format!("Dice {}: normal hit.", roll))
                    }
                }
            },
            BattleEvent::CriticalHit { .. } => Some("A critical hit!".to_string()),
            BattleEvent::MoveMissed { index, mv } => {
                Some(format!("{}'s {} misses completely!", name(index), mv))
            }
            BattleEvent::MoveWhiffed { index, mv } => {
                Some(format!("{} whiffs the {}!", name(index), mv))
            }
            BattleEvent::AttackDodged { index } => {
                Some(format!("{} dodges the attack completely!", name(index)))
            }
            BattleEvent::AttackBlocked { index } => Some(format!(
                "{} blocks the attack and halves the damage!",
                name(index)
            )),

            // === Damage and Healing Events ===
            BattleEvent::DamageDealt { target, amount, .. } => {
                Some(format!("{} takes {} damage!", name(target), amount))
            }
            BattleEvent::RecoilDamage { index, amount } => {
                Some(format!("{} takes {} recoil damage!", name(index), amount))
            }
            BattleEvent::Healed { index, amount, .. } => {
                Some(format!("{} recovers {} HP!", name(index), amount))
            }

            // === Archetype Resource Events ===
            BattleEvent::StealthEntered { index } => {
                Some(format!("{} vanishes into the shadows!", name(index)))
            }
            BattleEvent::ShurikensThrown {
                index,
                used,
                remaining,
            } => Some(format!(
                "{} hurls {} shurikens! ({} remaining)",
                name(index),
                used,
                remaining
            )),

            // === Status Events ===
            BattleEvent::StatusApplied { target, effect } => Some(format!(
                "{} is {}!",
                name(target),
                effect.display_name()
            )),
            BattleEvent::StatusResisted { target, effect } => Some(format!(
                "{} resists {}!",
                name(target),
                effect.display_name()
            )),
            BattleEvent::StatusDamage {
                target,
                effect,
                amount,
                ..
            } => Some(format!(
                "{} takes {} {} damage!",
                name(target),
                amount,
                effect.display_name()
            )),
            BattleEvent::StatusExpired { target, effect } => Some(format!(
                "{} is no longer {}.",
                name(target),
                effect.display_name()
            )),
            BattleEvent::AttackWeakened {
                target,
                old_attack,
                new_attack,
            } => Some(format!(
                "{} is weakened! (Attack: {} -> {})",
                name(target),
                old_attack,
                new_attack
            )),

            // === Item and Equipment Events ===
            BattleEvent::ItemUsed { index, item } => {
                Some(format!("{} uses a {}!", name(index), item.name()))
            }
            BattleEvent::ItemFailed { index, reason } => match reason {
                ItemFailure::EmptyInventory => {
                    Some(format!("{} has no items left!", name(index)))
                }
                ItemFailure::InvalidIndex(_) => Some("Invalid item choice!".to_string()),
            },
            BattleEvent::EquipmentDamaged { index, durability } => {
                if *durability == 1 {
                    let gear = battle_state.combatants[*index]
                        .equipment
                        .as_ref()
                        .map(|e| e.name.clone())
                        .unwrap_or_default();
                    Some(format!("{} is about to break!", gear))
                } else {
                    None // Silent - routine wear
                }
            }
            BattleEvent::EquipmentBroke { name: gear, .. } => {
                Some(format!("{} BROKE!", gear))
            }

            // === Boss Events ===
            BattleEvent::BossPhaseStarted { index, phase } => match phase {
                2 => Some(format!(
                    "{} enters Phase 2! Its attacks sear the air!",
                    name(index)
                )),
                3 => Some(format!(
                    "{} enters Phase 3! BERSERK MODE!",
                    name(index)
                )),
                _ => Some(format!("{} enters Phase {}!", name(index), phase)),
            },

            // === Hazard Events ===
            BattleEvent::HazardDamage {
                target,
                amount,
                hazard,
            } => Some(format!(
                "{} damages {} for {}!",
                hazard,
                name(target),
                amount
            )),
            BattleEvent::HazardHealing {
                target,
                amount,
                hazard,
            } => Some(format!(
                "{} restores {} HP to {}!",
                hazard,
                amount,
                name(target)
            )),

            // === Tournament Events ===
            BattleEvent::GoldAwarded { amount, .. } => {
                Some(format!("Victory! Earned {} gold!", amount))
            }

            // === Battle End Events ===
            BattleEvent::Defeated { index } => {
                Some(format!("{} is DEFEATED!", name(index)))
            }
            BattleEvent::BattleEnded { winner } => match winner {
                Some(index) => Some(format!(
                    "{} wins the battle!",
                    battle_state.combatants[*index].name
                )),
                None => Some("Both fighters fall! The battle is a draw!".to_string()),
            },
        }
    }
}

/// Event bus for collecting and managing battle events.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }

    /// Print all events using their formatted text (when available).
    /// Silent events are skipped.
    pub fn print_formatted(&self, battle_state: &BattleState) {
        for event in &self.events {
            if let Some(formatted) = event.format(battle_state) {
                println!("  {}", formatted);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// Oracle of pre-drawn random values in 1..=100, consumed one at a time
/// with a labelled reason. Every source of variance in a round (dice,
/// procs, block/dodge checks, bot choices) draws from the same oracle, so
/// a battle is exactly reproducible from its seed or script.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<u8>,
    index: usize,
}

/// Values pre-drawn per round. A round never consumes more than a few
/// dozen, so this leaves generous headroom.
const ORACLE_LEN: usize = 200;

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self { outcomes, index: 0 }
    }

    pub fn new_random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        let outcomes: Vec<u8> = (0..ORACLE_LEN).map(|_| rng.random_range(1..=100)).collect();
        Self { outcomes, index: 0 }
    }

    /// Deterministic oracle for reproducible battles.
    pub fn seeded(seed: u64) -> Self {
        use rand::{Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let outcomes: Vec<u8> = (0..ORACLE_LEN).map(|_| rng.random_range(1..=100)).collect();
        Self { outcomes, index: 0 }
    }

    /// Draw a fresh oracle from a longer-lived master generator.
    pub fn from_rng<R: rand::Rng>(rng: &mut R) -> Self {
        let outcomes: Vec<u8> = (0..ORACLE_LEN).map(|_| rng.random_range(1..=100)).collect();
        Self { outcomes, index: 0 }
    }

    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        if self.index >= self.outcomes.len() {
            // Add the reason to the panic message for better debugging!
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        self.index += 1;
        outcome
    }

    /// One independent Bernoulli draw against a probability in [0, 1].
    pub fn chance(&mut self, probability: f64, reason: &str) -> bool {
        let outcome = self.next_outcome(reason);
        (outcome as f64) <= probability * 100.0
    }

    /// Uniform integer in lo..=hi, mapped from one oracle value.
    pub fn roll_range(&mut self, lo: u32, hi: u32, reason: &str) -> u32 {
        debug_assert!(lo <= hi);
        let span = hi - lo + 1;
        let outcome = self.next_outcome(reason) as u32;
        lo + (outcome - 1) * span / 100
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleState {
    pub battle_id: String,
    /// Index 0 is the challenger, index 1 the defender. The challenger
    /// always acts first in a round.
    pub combatants: [Combatant; 2],
    pub round: u32,
    pub game_state: GameState,
}

impl BattleState {
    pub fn new(id: String, challenger: Combatant, defender: Combatant) -> Self {
        Self {
            battle_id: id,
            combatants: [challenger, defender],
            round: 1,
            game_state: GameState::WaitingForActions,
        }
    }

    pub fn opponent_of(index: usize) -> usize {
        1 - index
    }

    /// Split-borrow the acting combatant and their opponent.
    pub fn pair_mut(&mut self, index: usize) -> (&mut Combatant, &mut Combatant) {
        let (left, right) = self.combatants.split_at_mut(1);
        if index == 0 {
            (&mut left[0], &mut right[0])
        } else {
            (&mut right[0], &mut left[0])
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.game_state,
            GameState::ChallengerWin | GameState::DefenderWin | GameState::Draw
        )
    }

    pub fn winner(&self) -> Option<usize> {
        match self.game_state {
            GameState::ChallengerWin => Some(0),
            GameState::DefenderWin => Some(1),
            _ => None,
        }
    }
}
