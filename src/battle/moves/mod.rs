// Per-archetype move handlers. The engine dispatches on the archetype tag
// and move identifier; handlers receive explicit combatant indices and the
// shared RNG oracle, never back-references into the battle.

mod boss;
mod knight;
mod mage;
mod ninja;
mod orc;

pub(crate) use boss::phase_transition;

use schema::Move;

use crate::battle::state::{BattleEvent, BattleState, EventBus, TurnRng};
use crate::combatant::ArchetypeState;

/// Cooldown-gated, resource-gated, or foreign selections are not errors:
/// they substitute the archetype's default move after an in-band event.
fn resolve_usable(
    state: &BattleState,
    attacker_index: usize,
    mv: Move,
    bus: &mut EventBus,
) -> Move {
    let attacker = &state.combatants[attacker_index];
    let archetype = attacker.archetype;

    let usable = mv.archetype() == archetype
        && match (mv, &attacker.resources) {
            (Move::Shadowstep, ArchetypeState::Ninja { shadowstep_cooldown, .. }) => {
                *shadowstep_cooldown == 0
            }
            (Move::ShurikenStorm, ArchetypeState::Ninja { shuriken_count, .. }) => {
                *shuriken_count > 0
            }
            (Move::SmokeBombEscape, ArchetypeState::Ninja { smoke_bomb_used, .. }) => {
                !*smoke_bomb_used
            }
            (Move::CelestialHealing, ArchetypeState::Mage { heal_cooldown, .. }) => {
                *heal_cooldown == 0
            }
            (Move::MeteorFall, ArchetypeState::Mage { meteor_cooldown, .. }) => {
                *meteor_cooldown == 0
            }
            (Move::FireBreath, ArchetypeState::Boss { fire_breath_cooldown, .. }) => {
                *fire_breath_cooldown == 0
            }
            (Move::WingSlam, ArchetypeState::Boss { wing_slam_cooldown, .. }) => {
                *wing_slam_cooldown == 0
            }
            (Move::RoarOfTerror, ArchetypeState::Boss { roar_cooldown, .. }) => {
                *roar_cooldown == 0
            }
            (
                Move::BerserkerFury,
                ArchetypeState::Boss {
                    phase,
                    fury_cooldown,
                    ..
                },
            ) => *phase >= 3 && *fury_cooldown == 0,
            _ => true,
        };

    if usable {
        mv
    } else {
        let substituted = archetype.default_move();
        bus.push(BattleEvent::FallbackMove {
            index: attacker_index,
            blocked: mv,
            substituted,
        });
        substituted
    }
}

/// Resolve one selected move for the acting combatant, substituting the
/// archetype default where the selection cannot be honored.
pub fn execute_move(
    state: &mut BattleState,
    attacker_index: usize,
    requested: Move,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let mv = resolve_usable(state, attacker_index, requested, bus);
    bus.push(BattleEvent::MoveUsed {
        index: attacker_index,
        mv,
    });

    let defender_index = BattleState::opponent_of(attacker_index);
    match mv {
        // Knight
        Move::SwordSlash => knight::sword_slash(state, attacker_index, rng, bus),
        Move::ShieldBash => knight::shield_bash(state, attacker_index, rng, bus),
        Move::MightyStrike => knight::mighty_strike(state, attacker_index, rng, bus),
        Move::RapidStrikes => knight::rapid_strikes(state, attacker_index, rng, bus),

        // Orc
        Move::Cleave => orc::cleave(state, attacker_index, rng, bus),
        Move::BerserkStrike => orc::berserk_strike(state, attacker_index, rng, bus),
        Move::Roar => orc::roar(state, attacker_index, rng, bus),

        // Mage
        Move::ArcaneLance => mage::arcane_lance(state, attacker_index, rng, bus),
        Move::CelestialHealing => mage::celestial_healing(state, attacker_index, bus),
        Move::MeteorFall => {
            mage::meteor_fall(state, attacker_index, &[defender_index], rng, bus)
        }

        // Ninja
        Move::Shadowstep => ninja::shadowstep(state, attacker_index, bus),
        Move::TwinFangSlash => ninja::twin_fang_slash(state, attacker_index, rng, bus),
        Move::ShurikenStorm => ninja::shuriken_storm(state, attacker_index, rng, bus),
        Move::SmokeBombEscape => ninja::smoke_bomb_escape(state, attacker_index, bus),

        // Boss
        Move::ClawStrike => boss::claw_strike(state, attacker_index, rng, bus),
        Move::FireBreath => boss::fire_breath(state, attacker_index, rng, bus),
        Move::WingSlam => boss::wing_slam(state, attacker_index, rng, bus),
        Move::RoarOfTerror => boss::roar_of_terror(state, attacker_index, rng, bus),
        Move::BerserkerFury => boss::berserker_fury(state, attacker_index, rng, bus),
    }
}
