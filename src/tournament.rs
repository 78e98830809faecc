//! Tournament meta layer: scaled opponents, arena and weather modifiers,
//! the gold economy, and the final boss. Battles themselves run through
//! the ordinary [`BattleRunner`]; arenas contribute pre-battle stat
//! multipliers and recurring hazards injected via the round-effect hook.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::{Archetype, Element};

use crate::battle::ai::BotPolicy;
use crate::battle::engine::{ActionProvider, RoundEffect};
use crate::battle::runner::BattleRunner;
use crate::battle::state::{BattleEvent, BattleState, EventBus, TurnRng};
use crate::combatant::Combatant;
use crate::equipment::{Equipment, Item};
use crate::errors::TournamentError;

pub const STARTING_GOLD: u32 = 500;
pub const TOURNAMENT_ROUNDS: u32 = 4;

/// Pre-battle stat multiplier keyed on a combatant's affinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatModifier {
    FireAttack(f64),
    IceAttack(f64),
    LightningAttack(f64),
    IceDefense(f64),
}

impl StatModifier {
    pub fn apply(&self, combatant: &mut Combatant) {
        match self {
            StatModifier::FireAttack(factor) => {
                if combatant.affinity == Some(Element::Fire) {
                    combatant.attack = scale_stat(combatant.attack, *factor);
                }
            }
            StatModifier::IceAttack(factor) => {
                if combatant.affinity == Some(Element::Ice) {
                    combatant.attack = scale_stat(combatant.attack, *factor);
                }
            }
            StatModifier::LightningAttack(factor) => {
                if combatant.affinity == Some(Element::Lightning) {
                    combatant.attack = scale_stat(combatant.attack, *factor);
                }
            }
            StatModifier::IceDefense(factor) => {
                if combatant.affinity == Some(Element::Ice) {
                    combatant.defense = scale_stat(combatant.defense, *factor);
                }
            }
        }
    }
}

fn scale_stat(stat: u32, factor: f64) -> u32 {
    ((stat as f64 * factor) as u32).max(1)
}

/// A recurring environmental effect applied once per round before upkeep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hazard {
    /// Random bolts that pick one fighter per strike.
    LightningStrikes { chance: f64 },
    /// Gentle regeneration for both fighters.
    HealingAura { fraction: f64 },
    /// Creeping damage to both fighters.
    PoisonMist { fraction: f64 },
}

/// The hazard bundle a battle runs under; implements the engine's
/// round-effect hook.
pub struct HazardEffects {
    pub hazards: Vec<Hazard>,
}

impl RoundEffect for HazardEffects {
    fn on_round_end(&mut self, state: &mut BattleState, rng: &mut TurnRng, bus: &mut EventBus) {
        for hazard in &self.hazards {
            match hazard {
                Hazard::LightningStrikes { chance } => {
                    if rng.chance(*chance, "arena lightning strike") {
                        let target = usize::from(!rng.chance(0.5, "lightning target"));
                        let amount = rng.roll_range(10, 19, "lightning damage");
                        state.combatants[target].take_damage(amount);
                        bus.push(BattleEvent::HazardDamage {
                            target,
                            amount,
                            hazard: "Lightning strike".to_string(),
                        });
                    }
                }
                Hazard::HealingAura { fraction } => {
                    for target in 0..2 {
                        let combatant = &mut state.combatants[target];
                        let amount = (combatant.max_hp as f64 * fraction) as u32;
                        let restored = combatant.heal(amount);
                        if restored > 0 {
                            bus.push(BattleEvent::HazardHealing {
                                target,
                                amount: restored,
                                hazard: "Healing aura".to_string(),
                            });
                        }
                    }
                }
                Hazard::PoisonMist { fraction } => {
                    for target in 0..2 {
                        let combatant = &mut state.combatants[target];
                        let amount = (combatant.max_hp as f64 * fraction) as u32;
                        combatant.take_damage(amount);
                        bus.push(BattleEvent::HazardDamage {
                            target,
                            amount,
                            hazard: "Poison mist".to_string(),
                        });
                    }
                }
            }
        }
    }
}

/// A tournament fighting ground.
pub struct Arena {
    pub name: &'static str,
    pub description: &'static str,
    pub stat_modifiers: Vec<StatModifier>,
    pub hazards: Vec<Hazard>,
}

pub fn arenas() -> Vec<Arena> {
    vec![
        Arena {
            name: "Volcanic Crater",
            description: "Lava bubbles around the arena",
            stat_modifiers: vec![StatModifier::FireAttack(1.3)],
            hazards: vec![],
        },
        Arena {
            name: "Frozen Wasteland",
            description: "Ice and snow cover everything",
            stat_modifiers: vec![StatModifier::IceDefense(1.3)],
            hazards: vec![],
        },
        Arena {
            name: "Storm Peak",
            description: "Lightning crackles in the air",
            stat_modifiers: vec![],
            hazards: vec![Hazard::LightningStrikes { chance: 0.2 }],
        },
        Arena {
            name: "Mystic Garden",
            description: "Healing energies flow through the area",
            stat_modifiers: vec![],
            hazards: vec![Hazard::HealingAura { fraction: 0.05 }],
        },
        Arena {
            name: "Toxic Swamp",
            description: "Poisonous mist fills the air",
            stat_modifiers: vec![],
            hazards: vec![Hazard::PoisonMist { fraction: 0.03 }],
        },
        Arena {
            name: "Neutral Ground",
            description: "A balanced fighting arena",
            stat_modifiers: vec![],
            hazards: vec![],
        },
    ]
}

/// Weather over the arena; only stat multipliers, no hazards.
pub struct Weather {
    pub name: &'static str,
    pub description: &'static str,
    pub stat_modifiers: Vec<StatModifier>,
}

pub fn weather_conditions() -> Vec<Weather> {
    vec![
        Weather {
            name: "Sunny",
            description: "Clear skies",
            stat_modifiers: vec![],
        },
        Weather {
            name: "Rainy",
            description: "Rain weakens fire attacks",
            stat_modifiers: vec![StatModifier::FireAttack(0.7)],
        },
        Weather {
            name: "Thunderstorm",
            description: "Lightning empowers electric attacks",
            stat_modifiers: vec![StatModifier::LightningAttack(1.4)],
        },
        Weather {
            name: "Blizzard",
            description: "Snow strengthens ice attacks",
            stat_modifiers: vec![StatModifier::IceAttack(1.3)],
        },
    ]
}

/// What a shop entry hands over on purchase.
pub enum ShopStock {
    Consumable(Item),
    Gear {
        attack_boost: u32,
        defense_boost: u32,
        element: Option<Element>,
    },
}

pub struct ShopEntry {
    pub name: &'static str,
    pub price: u32,
    pub description: &'static str,
    pub stock: ShopStock,
}

/// The between-rounds shop. Purchases mutate the buyer directly:
/// consumables land in the inventory, gear is equipped on the spot.
pub struct Shop {
    entries: Vec<ShopEntry>,
}

impl Shop {
    pub fn new() -> Self {
        Self {
            entries: vec![
                ShopEntry {
                    name: "Health Potion",
                    price: 50,
                    description: "Restores 40 HP",
                    stock: ShopStock::Consumable(Item::Potion { heal_amount: 40 }),
                },
                ShopEntry {
                    name: "Greater Potion",
                    price: 100,
                    description: "Restores 80 HP",
                    stock: ShopStock::Consumable(Item::Potion { heal_amount: 80 }),
                },
                ShopEntry {
                    name: "Bomb",
                    price: 75,
                    description: "Deals 30 damage",
                    stock: ShopStock::Consumable(Item::Bomb { damage: 30 }),
                },
                ShopEntry {
                    name: "Mega Bomb",
                    price: 150,
                    description: "Deals 50 damage",
                    stock: ShopStock::Consumable(Item::Bomb { damage: 50 }),
                },
                ShopEntry {
                    name: "Steel Sword",
                    price: 200,
                    description: "+8 Attack",
                    stock: ShopStock::Gear {
                        attack_boost: 8,
                        defense_boost: 0,
                        element: None,
                    },
                },
                ShopEntry {
                    name: "Dragon Armor",
                    price: 250,
                    description: "+6 Defense",
                    stock: ShopStock::Gear {
                        attack_boost: 0,
                        defense_boost: 6,
                        element: None,
                    },
                },
                ShopEntry {
                    name: "Flame Blade",
                    price: 300,
                    description: "+6 Attack, Fire affinity",
                    stock: ShopStock::Gear {
                        attack_boost: 6,
                        defense_boost: 0,
                        element: Some(Element::Fire),
                    },
                },
                ShopEntry {
                    name: "Frost Shield",
                    price: 300,
                    description: "+5 Defense, Ice affinity",
                    stock: ShopStock::Gear {
                        attack_boost: 0,
                        defense_boost: 5,
                        element: Some(Element::Ice),
                    },
                },
            ],
        }
    }

    pub fn entries(&self) -> &[ShopEntry] {
        &self.entries
    }

    pub fn buy(&self, buyer: &mut Combatant, index: usize) -> Result<(), TournamentError> {
        let entry = self
            .entries
            .get(index)
            .ok_or(TournamentError::InvalidShopIndex(index))?;
        if buyer.gold < entry.price {
            return Err(TournamentError::NotEnoughGold {
                price: entry.price,
                gold: buyer.gold,
            });
        }
        buyer.gold -= entry.price;

        match &entry.stock {
            ShopStock::Consumable(item) => buyer.inventory.push(*item),
            ShopStock::Gear {
                attack_boost,
                defense_boost,
                element,
            } => {
                let gear = match element {
                    Some(element) => {
                        Equipment::elemental(entry.name, *element, *attack_boost, *defense_boost, 5)
                    }
                    None => Equipment::new(entry.name, *attack_boost, *defense_boost, 5),
                }
                .expect("shop gear has positive durability");
                buyer.equip(gear);
            }
        }
        Ok(())
    }
}

impl Default for Shop {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixed round-four opponent.
pub fn final_boss() -> Combatant {
    let mut boss = Combatant::new("Ancient Shadow Dragon", Archetype::Boss, 350, 28, 15)
        .expect("boss stat block is valid");
    boss.equip(
        Equipment::elemental("Dragon Scale Armor", Element::Fire, 0, 7, 5)
            .expect("boss gear has positive durability"),
    );
    boss
}

/// Outcome summary for one tournament round.
pub struct RoundReport {
    pub round: u32,
    pub arena_name: &'static str,
    pub weather_name: &'static str,
    pub opponent_name: String,
    pub victory: bool,
    pub gold_awarded: u32,
    pub events: Vec<BattleEvent>,
}

/// Four rounds: three scaled bots, then the final boss. Gold and HP carry
/// between rounds; equipment bought in the shop phase carries into the
/// next battle.
pub struct Tournament {
    pub player: Combatant,
    pub current_round: u32,
    pub wins: u32,
    pub shop: Shop,
    master_rng: StdRng,
}

impl Tournament {
    pub fn new(mut player: Combatant, seed: u64) -> Self {
        player.gold = STARTING_GOLD;
        Self {
            player,
            current_round: 1,
            wins: 0,
            shop: Shop::new(),
            master_rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn is_over(&self) -> bool {
        self.current_round > TOURNAMENT_ROUNDS || !self.player.is_alive()
    }

    pub fn is_champion(&self) -> bool {
        self.wins == TOURNAMENT_ROUNDS
    }

    /// Scale a bot to the player's stats: round 1 fields novices at 80%,
    /// round 2 equals, round 3 elites at 120%. Round 4 is the boss.
    fn generate_opponent(&self, round: u32, rng: &mut TurnRng) -> Combatant {
        if round == TOURNAMENT_ROUNDS {
            return final_boss();
        }

        let archetype =
            Archetype::PLAYABLE[rng.roll_range(0, 3, "opponent archetype") as usize];
        let (tier, scale) = match round {
            1 => ("Novice", 0.8),
            2 => ("Veteran", 1.0),
            _ => ("Elite", 1.2),
        };
        let name = format!("{} {} Bot", tier, archetype);

        let hp = scale_stat(self.player.max_hp, scale);
        let attack = scale_stat(self.player.attack, scale);
        let defense = (self.player.defense as f64 * scale) as u32;
        let mut opponent = Combatant::new(name, archetype, hp, attack, defense)
            .expect("scaled opponent stats stay positive");

        let gear = match rng.roll_range(0, 2, "opponent gear") {
            0 => Equipment::new(
                "Tournament Sword",
                rng.roll_range(3, 6, "sword boost"),
                0,
                5,
            ),
            1 => Equipment::new(
                "Tournament Armor",
                0,
                rng.roll_range(2, 4, "armor boost"),
                5,
            ),
            _ => {
                let element = [Element::Fire, Element::Ice, Element::Lightning]
                    [rng.roll_range(0, 2, "gear element") as usize];
                Equipment::elemental(
                    "Elemental Weapon",
                    element,
                    rng.roll_range(3, 5, "weapon boost"),
                    0,
                    5,
                )
            }
        }
        .expect("tournament gear has positive durability");
        opponent.equip(gear);
        opponent
    }

    /// Fight the current round under a random arena and weather. On
    /// victory the player banks gold, recovers 30% max HP, and advances.
    pub fn play_round(
        &mut self,
        player_provider: &mut dyn ActionProvider,
    ) -> Result<RoundReport, TournamentError> {
        if self.is_over() {
            return Err(TournamentError::TournamentOver);
        }
        let round = self.current_round;

        let mut rng = TurnRng::from_rng(&mut self.master_rng);
        let mut arenas = arenas();
        let arena = arenas.swap_remove(
            rng.roll_range(0, arenas.len() as u32 - 1, "arena choice") as usize
        );
        let mut weathers = weather_conditions();
        let weather = weathers.swap_remove(
            rng.roll_range(0, weathers.len() as u32 - 1, "weather choice") as usize,
        );

        let mut challenger = self.player.clone();
        let mut opponent = self.generate_opponent(round, &mut rng);
        let opponent_name = opponent.name.clone();

        for modifier in arena.stat_modifiers.iter().chain(&weather.stat_modifiers) {
            modifier.apply(&mut challenger);
            modifier.apply(&mut opponent);
        }

        let battle_seed: u64 = self.master_rng.random();
        let mut runner = BattleRunner::with_seed(
            format!("tournament-round-{}", round),
            challenger,
            opponent,
            battle_seed,
        );
        if !arena.hazards.is_empty() {
            runner.add_round_effect(Box::new(HazardEffects {
                hazards: arena.hazards.clone(),
            }));
        }

        let mut opponent_bot = BotPolicy::new();
        let result = runner.run_to_completion(player_provider, &mut opponent_bot);
        let victory = result.winner == Some(0);

        // Carry the battle's wear and tear (and spent items) back out.
        let gold = self.player.gold;
        self.player = runner.state().combatants[0].clone();
        self.player.gold = gold;

        let mut gold_awarded = 0;
        if victory {
            gold_awarded = if round == TOURNAMENT_ROUNDS {
                300
            } else {
                50 * round
            };
            self.player.gold += gold_awarded;
            self.wins += 1;
            let recovery = (self.player.max_hp as f64 * 0.3) as u32;
            self.player.heal(recovery);
            self.current_round += 1;
        }

        Ok(RoundReport {
            round,
            arena_name: arena.name,
            weather_name: weather.name,
            opponent_name,
            victory,
            gold_awarded,
            events: result.events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster;

    #[test]
    fn shop_purchase_deducts_gold_and_delivers_the_item() {
        let shop = Shop::new();
        let mut buyer = roster::knight("Aldric");
        buyer.gold = 120;
        let starting_items = buyer.inventory.len();

        shop.buy(&mut buyer, 0).unwrap();
        assert_eq!(buyer.gold, 70);
        assert_eq!(buyer.inventory.len(), starting_items + 1);
    }

    #[test]
    fn shop_refuses_a_purchase_the_buyer_cannot_afford() {
        let shop = Shop::new();
        let mut buyer = roster::knight("Aldric");
        buyer.gold = 10;
        assert_eq!(
            shop.buy(&mut buyer, 0),
            Err(TournamentError::NotEnoughGold { price: 50, gold: 10 })
        );
        assert_eq!(buyer.gold, 10);
    }

    #[test]
    fn shop_gear_is_equipped_immediately() {
        let shop = Shop::new();
        let mut buyer = roster::knight("Aldric");
        buyer.gold = 500;
        // Flame Blade: entry 6.
        shop.buy(&mut buyer, 6).unwrap();
        assert_eq!(buyer.affinity, Some(Element::Fire));
        assert_eq!(buyer.equipment_attack_boost(), 6);
    }

    #[test]
    fn invalid_shop_index_is_reported() {
        let shop = Shop::new();
        let mut buyer = roster::knight("Aldric");
        assert_eq!(
            shop.buy(&mut buyer, 99),
            Err(TournamentError::InvalidShopIndex(99))
        );
    }

    #[test]
    fn opponents_scale_with_the_round() {
        let tournament = Tournament::new(roster::knight("Aldric"), 7);
        let mut rng = TurnRng::seeded(3);

        let novice = tournament.generate_opponent(1, &mut rng);
        assert_eq!(novice.max_hp, 120); // 150 * 0.8
        assert!(novice.name.starts_with("Novice"));
        assert!(novice.equipment.is_some());

        let veteran = tournament.generate_opponent(2, &mut rng);
        assert_eq!(veteran.max_hp, 150);

        let elite = tournament.generate_opponent(3, &mut rng);
        assert_eq!(elite.max_hp, 180); // 150 * 1.2
        assert!(elite.name.starts_with("Elite"));
    }

    #[test]
    fn round_four_is_always_the_final_boss() {
        let tournament = Tournament::new(roster::knight("Aldric"), 7);
        let mut rng = TurnRng::seeded(3);
        let boss = tournament.generate_opponent(4, &mut rng);
        assert_eq!(boss.archetype, Archetype::Boss);
        assert_eq!(boss.name, "Ancient Shadow Dragon");
        assert_eq!(boss.affinity, Some(Element::Fire));
        assert_eq!(boss.total_defense(), 22); // 15 + 7 from the scale armor
    }

    #[test]
    fn stat_modifiers_only_touch_matching_affinities() {
        let mut orc = roster::orc("Grum"); // fire affinity
        let mut knight = roster::knight("Aldric"); // none
        let modifier = StatModifier::FireAttack(1.3);
        modifier.apply(&mut orc);
        modifier.apply(&mut knight);
        assert_eq!(orc.attack, 23); // 18 * 1.3 truncated
        assert_eq!(knight.attack, 15);
    }

    #[test]
    fn full_tournament_run_progresses_or_ends_cleanly() {
        let mut tournament = Tournament::new(roster::orc("Grum"), 42);
        let mut player_bot = BotPolicy::new();

        let mut rounds_played = 0;
        while !tournament.is_over() && rounds_played < 8 {
            let report = tournament.play_round(&mut player_bot).unwrap();
            rounds_played += 1;
            if report.victory {
                assert!(report.gold_awarded > 0);
            } else {
                break;
            }
        }
        assert!(rounds_played > 0);
    }

    #[test]
    fn a_finished_tournament_refuses_further_rounds() {
        let mut tournament = Tournament::new(roster::knight("Aldric"), 7);
        tournament.player.hp = 0;
        let mut player_bot = BotPolicy::new();
        assert!(matches!(
            tournament.play_round(&mut player_bot),
            Err(TournamentError::TournamentOver)
        ));
    }
}
