use std::fmt;

/// Main error type for the duelforge combat engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Error raised while constructing or mutating a combatant
    Combatant(CombatantError),
    /// Error raised while constructing equipment
    Equipment(EquipmentError),
    /// Error raised by the tournament meta layer
    Tournament(TournamentError),
}

/// Errors related to combatant construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatantError {
    /// A combatant must enter the arena with at least 1 HP
    InvalidMaxHp(u32),
    /// A combatant with no attack stat can never end a battle
    InvalidAttack(u32),
}

/// Errors related to equipment construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipmentError {
    /// Equipment must be forged with at least 1 point of durability
    ZeroDurability,
}

/// Errors raised by the tournament meta layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TournamentError {
    /// The buyer cannot afford the selected shop entry
    NotEnoughGold { price: u32, gold: u32 },
    /// The selected shop entry does not exist
    InvalidShopIndex(usize),
    /// The tournament has already concluded
    TournamentOver,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Combatant(err) => write!(f, "Combatant error: {}", err),
            EngineError::Equipment(err) => write!(f, "Equipment error: {}", err),
            EngineError::Tournament(err) => write!(f, "Tournament error: {}", err),
        }
    }
}

impl fmt::Display for CombatantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatantError::InvalidMaxHp(hp) => {
                write!(f, "Invalid max HP: {} (must be at least 1)", hp)
            }
            CombatantError::InvalidAttack(attack) => {
                write!(f, "Invalid attack stat: {} (must be at least 1)", attack)
            }
        }
    }
}

impl fmt::Display for EquipmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentError::ZeroDurability => write!(f, "Equipment durability must be positive"),
        }
    }
}

impl fmt::Display for TournamentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentError::NotEnoughGold { price, gold } => {
                write!(f, "Not enough gold: need {} but have {}", price, gold)
            }
            TournamentError::InvalidShopIndex(index) => {
                write!(f, "Invalid shop entry: {}", index)
            }
            TournamentError::TournamentOver => write!(f, "The tournament has already concluded"),
        }
    }
}

impl std::error::Error for EngineError {}
impl std::error::Error for CombatantError {}
impl std::error::Error for EquipmentError {}
impl std::error::Error for TournamentError {}

impl From<CombatantError> for EngineError {
    fn from(err: CombatantError) -> Self {
        EngineError::Combatant(err)
    }
}

impl From<EquipmentError> for EngineError {
    fn from(err: EquipmentError) -> Self {
        EngineError::Equipment(err)
    }
}

impl From<TournamentError> for EngineError {
    fn from(err: TournamentError) -> Self {
        EngineError::Tournament(err)
    }
}

/// Type alias for Results using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

/// Type alias for Results using CombatantError
pub type CombatantResult<T> = Result<T, CombatantError>;
