// Duelforge Schema - Shared type definitions
// This crate contains the core enums shared between the duelforge engine
// and any front end: combatant archetypes, elements, and move identifiers.

// Re-export the main types
pub use archetypes::*;
pub use elements::*;
pub use moves::*;

pub mod archetypes;
pub mod elements;
pub mod moves;
