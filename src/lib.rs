//! Duelforge Combat Engine
//!
//! A turn-based arena combat simulator: two combatants drawn from a fixed
//! set of archetypes trade dice-driven blows, status effects, and items
//! until one falls. The engine is pure in-memory simulation; presentation
//! is an injected collaborator that supplies intents and renders the
//! event stream.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod battle;
pub mod combatant;
pub mod equipment;
pub mod errors;
pub mod roster;
pub mod tournament;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `duelforge` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export the core data definitions.
pub use schema::{Archetype, Element, Move};

// --- From this crate's modules (`src/`) ---

// Core battle engine functions and state.
pub use battle::engine::{get_valid_actions, resolve_round, ActionProvider, RoundEffect};
pub use battle::runner::{BattleInfo, BattleRunner, ExecutionResult};
pub use battle::state::{BattleEvent, BattleState, EventBus, GameState, ItemFailure, TurnRng};

// Core runtime types for a battle.
pub use battle::ai::BotPolicy;
pub use battle::conditions::StatusEffect;
pub use battle::dice::{dice_outcome, DiceOutcome, DiceTag};
pub use combatant::{Action, ArchetypeState, Combatant, CombatantSnapshot};
pub use equipment::{Equipment, Item};

// Tournament meta layer.
pub use tournament::{Shop, Tournament};

// Crate-specific error and result types.
pub use errors::{
    CombatantError, EngineError, EngineResult, EquipmentError, TournamentError,
};
