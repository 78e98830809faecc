use std::collections::HashSet;

use schema::{Archetype, Element, Move};
use serde::{Deserialize, Serialize};

use crate::battle::conditions::StatusEffect;
use crate::equipment::{Equipment, Item};
use crate::errors::CombatantError;

/// Baseline dodge chance a Ninja returns to once stealth has lapsed.
pub const NINJA_BASE_DODGE: f64 = 0.25;
/// Shurikens a Ninja carries into a battle.
pub const NINJA_SHURIKEN_COUNT: u32 = 6;
/// Number of escalation phases a boss moves through.
pub const BOSS_MAX_PHASE: u8 = 3;

/// An intent selected by a combatant's controller (human presentation or
/// bot policy) for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    UseMove(Move),
    /// Reach into the inventory; the controller is asked for the item index
    /// when the turn resolves.
    UseItem,
}

/// Per-archetype mutable resources: cooldown counters, ammunition,
/// one-shot flags, and the boss phase machine. Always present and fully
/// initialized at construction; never probed for existence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArchetypeState {
    Knight,
    Orc {
        attack_buff_turns: u8,
    },
    Mage {
        heal_cooldown: u8,
        meteor_cooldown: u8,
    },
    Ninja {
        shadowstep_cooldown: u8,
        stealth_active: bool,
        shuriken_count: u32,
        smoke_bomb_used: bool,
    },
    Boss {
        phase: u8,
        max_phase: u8,
        rage_counter: u32,
        fire_breath_cooldown: u8,
        wing_slam_cooldown: u8,
        roar_cooldown: u8,
        fury_cooldown: u8,
    },
}

impl ArchetypeState {
    pub fn for_archetype(archetype: Archetype) -> Self {
        match archetype {
            Archetype::Knight => ArchetypeState::Knight,
            Archetype::Orc => ArchetypeState::Orc {
                attack_buff_turns: 0,
            },
            Archetype::Mage => ArchetypeState::Mage {
                heal_cooldown: 0,
                meteor_cooldown: 0,
            },
            Archetype::Ninja => ArchetypeState::Ninja {
                shadowstep_cooldown: 0,
                stealth_active: false,
                shuriken_count: NINJA_SHURIKEN_COUNT,
                smoke_bomb_used: false,
            },
            Archetype::Boss => ArchetypeState::Boss {
                phase: 1,
                max_phase: BOSS_MAX_PHASE,
                rage_counter: 0,
                fire_breath_cooldown: 0,
                wing_slam_cooldown: 0,
                roar_cooldown: 0,
                fury_cooldown: 0,
            },
        }
    }
}

/// A single fighter in the arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub archetype: Archetype,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub block_chance: f64,
    pub dodge_chance: f64,
    pub affinity: Option<Element>,
    pub equipment: Option<Equipment>,
    pub inventory: Vec<Item>,
    pub statuses: HashSet<StatusEffect>,
    pub last_move: Option<Move>,
    pub combo_counter: u32,
    pub gold: u32,
    pub resources: ArchetypeState,
}

impl Combatant {
    /// Build a combatant with its archetype baselines. Fails fast on a
    /// stat block that could never fight.
    pub fn new(
        name: impl Into<String>,
        archetype: Archetype,
        hp: u32,
        attack: u32,
        defense: u32,
    ) -> Result<Self, CombatantError> {
        if hp == 0 {
            return Err(CombatantError::InvalidMaxHp(hp));
        }
        if attack == 0 {
            return Err(CombatantError::InvalidAttack(attack));
        }

        let (block_chance, dodge_chance) = match archetype {
            Archetype::Knight => (0.3, 0.0),
            Archetype::Orc => (0.1, 0.0),
            Archetype::Mage => (0.0, 0.0),
            Archetype::Ninja => (0.0, NINJA_BASE_DODGE),
            Archetype::Boss => (0.05, 0.05),
        };
        let affinity = match archetype {
            Archetype::Orc => Some(Element::Fire),
            Archetype::Mage => Some(Element::Lightning),
            Archetype::Ninja => Some(Element::Shadow),
            Archetype::Knight | Archetype::Boss => None,
        };
        // Everyone but the boss walks in with a small satchel.
        let inventory = match archetype {
            Archetype::Boss => Vec::new(),
            _ => vec![Item::Potion { heal_amount: 30 }, Item::Bomb { damage: 25 }],
        };

        Ok(Combatant {
            name: name.into(),
            archetype,
            hp,
            max_hp: hp,
            attack,
            defense,
            block_chance,
            dodge_chance,
            affinity,
            equipment: None,
            inventory,
            statuses: HashSet::new(),
            last_move: None,
            combo_counter: 0,
            gold: 0,
            resources: ArchetypeState::for_archetype(archetype),
        })
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Low enough that desperate measures (smoke bombs, emergency heals)
    /// become attractive.
    pub fn is_critical(&self) -> bool {
        self.hp <= (self.max_hp as f64 * 0.2) as u32
    }

    /// Apply damage, clamped at zero. Returns true if this killed the
    /// combatant.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        self.hp == 0
    }

    /// Restore HP up to max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    /// Equip a piece of gear, replacing whatever was carried before.
    /// Elemental gear overrides the wearer's affinity.
    pub fn equip(&mut self, equipment: Equipment) {
        if let Some(element) = equipment.element {
            self.affinity = Some(element);
        }
        self.equipment = Some(equipment);
    }

    /// Attack contribution from carried gear (zero if broken or absent).
    pub fn equipment_attack_boost(&self) -> u32 {
        self.equipment.as_ref().map_or(0, |e| e.attack_boost())
    }

    /// Defense stat plus the gear's contribution.
    pub fn total_defense(&self) -> u32 {
        self.defense + self.equipment.as_ref().map_or(0, |e| e.defense_boost())
    }

    pub fn has_status(&self, effect: StatusEffect) -> bool {
        self.statuses.contains(&effect)
    }

    /// End-of-round cooldown bookkeeping for this archetype.
    pub fn reduce_cooldowns(&mut self) {
        match &mut self.resources {
            ArchetypeState::Knight | ArchetypeState::Orc { .. } => {}
            ArchetypeState::Mage {
                heal_cooldown,
                meteor_cooldown,
            } => {
                *heal_cooldown = heal_cooldown.saturating_sub(1);
                *meteor_cooldown = meteor_cooldown.saturating_sub(1);
            }
            ArchetypeState::Ninja {
                shadowstep_cooldown,
                stealth_active,
                ..
            } => {
                *shadowstep_cooldown = shadowstep_cooldown.saturating_sub(1);
                // The shadowstep dodge bonus lapses once stealth is spent.
                if !*stealth_active && self.dodge_chance > NINJA_BASE_DODGE {
                    self.dodge_chance = NINJA_BASE_DODGE;
                }
            }
            ArchetypeState::Boss {
                fire_breath_cooldown,
                wing_slam_cooldown,
                roar_cooldown,
                fury_cooldown,
                ..
            } => {
                *fire_breath_cooldown = fire_breath_cooldown.saturating_sub(1);
                *wing_slam_cooldown = wing_slam_cooldown.saturating_sub(1);
                *roar_cooldown = roar_cooldown.saturating_sub(1);
                *fury_cooldown = fury_cooldown.saturating_sub(1);
            }
        }
    }

    /// Read-only view of the combatant for display layers.
    pub fn snapshot(&self) -> CombatantSnapshot {
        let mut statuses: Vec<StatusEffect> = self.statuses.iter().copied().collect();
        statuses.sort();
        CombatantSnapshot {
            name: self.name.clone(),
            archetype: self.archetype,
            hp: self.hp,
            max_hp: self.max_hp,
            attack: self.attack,
            defense: self.defense,
            statuses,
            equipment: self.equipment.clone(),
            inventory: self.inventory.clone(),
            gold: self.gold,
            resources: self.resources.clone(),
        }
    }
}

/// Point-in-time view of a combatant, safe to hand to presentation code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub name: String,
    pub archetype: Archetype,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub statuses: Vec<StatusEffect>,
    pub equipment: Option<Equipment>,
    pub inventory: Vec<Item>,
    pub gold: u32,
    pub resources: ArchetypeState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rejects_zero_max_hp() {
        assert_eq!(
            Combatant::new("Ghost", Archetype::Knight, 0, 10, 5),
            Err(CombatantError::InvalidMaxHp(0))
        );
    }

    #[test]
    fn construction_rejects_zero_attack() {
        assert_eq!(
            Combatant::new("Pacifist", Archetype::Orc, 100, 0, 5),
            Err(CombatantError::InvalidAttack(0))
        );
    }

    #[test]
    fn hp_is_clamped_to_zero_and_max() {
        let mut knight = Combatant::new("Aldric", Archetype::Knight, 100, 10, 5).unwrap();
        assert!(knight.take_damage(250));
        assert_eq!(knight.hp, 0);
        assert!(!knight.is_alive());

        knight.hp = 90;
        assert_eq!(knight.heal(50), 10);
        assert_eq!(knight.hp, knight.max_hp);
    }

    #[test]
    fn archetype_baselines_are_applied() {
        let ninja = Combatant::new("Kage", Archetype::Ninja, 130, 17, 4).unwrap();
        assert_eq!(ninja.dodge_chance, NINJA_BASE_DODGE);
        assert_eq!(ninja.affinity, Some(Element::Shadow));
        assert!(matches!(
            ninja.resources,
            ArchetypeState::Ninja {
                shuriken_count: NINJA_SHURIKEN_COUNT,
                smoke_bomb_used: false,
                ..
            }
        ));

        let orc = Combatant::new("Grum", Archetype::Orc, 170, 18, 6).unwrap();
        assert_eq!(orc.block_chance, 0.1);
        assert_eq!(orc.affinity, Some(Element::Fire));
    }

    #[test]
    fn elemental_gear_grants_affinity_on_equip() {
        let mut knight = Combatant::new("Aldric", Archetype::Knight, 150, 15, 8).unwrap();
        assert_eq!(knight.affinity, None);
        let blade = Equipment::elemental("Flaming Sword", Element::Fire, 4, 0, 5).unwrap();
        knight.equip(blade);
        assert_eq!(knight.affinity, Some(Element::Fire));
        assert_eq!(knight.equipment_attack_boost(), 4);
    }

    #[test]
    fn broken_gear_contributes_nothing_to_defense() {
        let mut knight = Combatant::new("Aldric", Archetype::Knight, 150, 15, 8).unwrap();
        let mut armor = Equipment::new("Armor", 0, 4, 1).unwrap();
        armor.wear_down();
        knight.equip(armor);
        assert_eq!(knight.total_defense(), 8);
    }

    #[test]
    fn ninja_dodge_bonus_lapses_after_stealth() {
        let mut ninja = Combatant::new("Kage", Archetype::Ninja, 130, 17, 4).unwrap();
        ninja.dodge_chance += 0.4;
        // Stealth still active: the bonus survives upkeep.
        if let ArchetypeState::Ninja { stealth_active, .. } = &mut ninja.resources {
            *stealth_active = true;
        }
        ninja.reduce_cooldowns();
        assert!(ninja.dodge_chance > NINJA_BASE_DODGE);
        // Stealth spent: upkeep restores the baseline.
        if let ArchetypeState::Ninja { stealth_active, .. } = &mut ninja.resources {
            *stealth_active = false;
        }
        ninja.reduce_cooldowns();
        assert_eq!(ninja.dodge_chance, NINJA_BASE_DODGE);
    }
}
