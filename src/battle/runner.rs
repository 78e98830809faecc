use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::battle::engine::{resolve_round, ActionProvider, RoundEffect};
use crate::battle::state::{BattleEvent, BattleState, GameState, TurnRng};
use crate::combatant::{Combatant, CombatantSnapshot};

/// Hard stop for runaway battles; two bots that refuse to finish a fight
/// by this point are declared a stalemate by the caller.
const DEFAULT_ROUND_LIMIT: u32 = 200;

/// High-level battle management interface that hides per-round RNG
/// plumbing. Owns the battle state, a master seeded generator from which
/// each round's oracle is drawn, and any injected round effects.
pub struct BattleRunner {
    state: BattleState,
    master_rng: StdRng,
    round_effects: Vec<Box<dyn RoundEffect>>,
    accumulated_events: Vec<BattleEvent>,
    round_limit: u32,
}

/// Result of executing one or more rounds.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub events: Vec<BattleEvent>,
    pub game_state: GameState,
    pub battle_ended: bool,
    pub winner: Option<usize>,
}

/// Information about the current battle state for display layers.
#[derive(Debug, Clone)]
pub struct BattleInfo {
    pub battle_id: String,
    pub round: u32,
    pub game_state: GameState,
    pub combatants: Vec<CombatantSnapshot>,
}

impl BattleRunner {
    /// A battle with OS-sourced randomness.
    pub fn new(battle_id: impl Into<String>, challenger: Combatant, defender: Combatant) -> Self {
        Self::from_master_rng(battle_id, challenger, defender, StdRng::from_os_rng())
    }

    /// A fully reproducible battle: same seed, same providers, same fight.
    pub fn with_seed(
        battle_id: impl Into<String>,
        challenger: Combatant,
        defender: Combatant,
        seed: u64,
    ) -> Self {
        Self::from_master_rng(battle_id, challenger, defender, StdRng::seed_from_u64(seed))
    }

    fn from_master_rng(
        battle_id: impl Into<String>,
        challenger: Combatant,
        defender: Combatant,
        master_rng: StdRng,
    ) -> Self {
        Self {
            state: BattleState::new(battle_id.into(), challenger, defender),
            master_rng,
            round_effects: Vec::new(),
            accumulated_events: Vec::new(),
            round_limit: DEFAULT_ROUND_LIMIT,
        }
    }

    /// Inject a recurring effect (arena hazard, weather) applied after
    /// both combatants act and before upkeep.
    pub fn add_round_effect(&mut self, effect: Box<dyn RoundEffect>) {
        self.round_effects.push(effect);
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn is_battle_ended(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn winner(&self) -> Option<usize> {
        self.state.winner()
    }

    /// Snapshot of the battle for API queries and display.
    pub fn battle_info(&self) -> BattleInfo {
        BattleInfo {
            battle_id: self.state.battle_id.clone(),
            round: self.state.round,
            game_state: self.state.game_state,
            combatants: self.state.combatants.iter().map(|c| c.snapshot()).collect(),
        }
    }

    /// Execute one round with a fresh oracle drawn from the master seed.
    pub fn run_round(
        &mut self,
        challenger_provider: &mut dyn ActionProvider,
        defender_provider: &mut dyn ActionProvider,
    ) -> ExecutionResult {
        let mut rng = TurnRng::from_rng(&mut self.master_rng);
        let mut providers: [&mut dyn ActionProvider; 2] =
            [challenger_provider, defender_provider];
        let bus = resolve_round(
            &mut self.state,
            &mut rng,
            &mut providers,
            &mut self.round_effects,
        );

        let events = bus.events().to_vec();
        self.accumulated_events.extend(events.iter().cloned());

        ExecutionResult {
            events,
            game_state: self.state.game_state,
            battle_ended: self.state.is_terminal(),
            winner: self.state.winner(),
        }
    }

    /// Run rounds until the battle ends (or the safety cap trips).
    pub fn run_to_completion(
        &mut self,
        challenger_provider: &mut dyn ActionProvider,
        defender_provider: &mut dyn ActionProvider,
    ) -> ExecutionResult {
        let mut result = self.run_round(challenger_provider, defender_provider);
        while !result.battle_ended && self.state.round <= self.round_limit {
            result = self.run_round(challenger_provider, defender_provider);
        }
        // Hand back the full transcript rather than just the last round.
        result.events = self.accumulated_events.clone();
        result
    }

    /// Every event that has occurred in the battle so far.
    pub fn events(&self) -> &[BattleEvent] {
        &self.accumulated_events
    }

    /// Print the accumulated transcript in human-readable form.
    pub fn print_transcript(&self) {
        for event in &self.accumulated_events {
            if let Some(line) = event.format(&self.state) {
                println!("  {}", line);
            }
        }
    }
}
