use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Elemental affinities carried by combatants and equipment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Element {
    Fire,
    Ice,
    Lightning,
    Shadow,
}
