use schema::Element;
use serde::{Deserialize, Serialize};

use crate::errors::EquipmentError;

/// Fixed self-damage taken by whoever throws a bomb.
pub const BOMB_SELF_DAMAGE: u32 = 5;

/// A piece of gear a combatant can carry (at most one at a time).
///
/// Durability wears down by one point per battle round; once it reaches
/// zero the gear is broken and both boosts report as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    attack_boost: u32,
    defense_boost: u32,
    pub durability: u32,
    pub max_durability: u32,
    pub element: Option<Element>,
}

/// What a single round of wear did to the gear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WearState {
    Worn,
    NearBreaking,
    Broke,
}

impl Equipment {
    pub fn new(
        name: impl Into<String>,
        attack_boost: u32,
        defense_boost: u32,
        durability: u32,
    ) -> Result<Self, EquipmentError> {
        if durability == 0 {
            return Err(EquipmentError::ZeroDurability);
        }
        Ok(Equipment {
            name: name.into(),
            attack_boost,
            defense_boost,
            durability,
            max_durability: durability,
            element: None,
        })
    }

    /// Gear bound to an element; equipping it grants the wearer that affinity.
    pub fn elemental(
        name: impl Into<String>,
        element: Element,
        attack_boost: u32,
        defense_boost: u32,
        durability: u32,
    ) -> Result<Self, EquipmentError> {
        let mut equipment = Equipment::new(name, attack_boost, defense_boost, durability)?;
        equipment.element = Some(element);
        Ok(equipment)
    }

    pub fn is_broken(&self) -> bool {
        self.durability == 0
    }

    /// Effective attack boost: zero once the gear has broken.
    pub fn attack_boost(&self) -> u32 {
        if self.is_broken() {
            0
        } else {
            self.attack_boost
        }
    }

    /// Effective defense boost: zero once the gear has broken.
    pub fn defense_boost(&self) -> u32 {
        if self.is_broken() {
            0
        } else {
            self.defense_boost
        }
    }

    /// One round of wear. Callers should skip already-broken gear.
    pub fn wear_down(&mut self) -> WearState {
        self.durability = self.durability.saturating_sub(1);
        match self.durability {
            0 => WearState::Broke,
            1 => WearState::NearBreaking,
            _ => WearState::Worn,
        }
    }
}

/// A consumable carried in a combatant's inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    /// Restores HP up to the drinker's max.
    Potion { heal_amount: u32 },
    /// Always hits; armor protects at half effect, and the blast costs the
    /// thrower a fixed amount of HP.
    Bomb { damage: u32 },
}

impl Item {
    pub fn name(&self) -> &'static str {
        match self {
            Item::Potion { .. } => "Health Potion",
            Item::Bomb { .. } => "Explosive Bomb",
        }
    }
}
