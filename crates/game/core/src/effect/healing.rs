//! Healing application.

use crate::config::BattleConfig;
use crate::state::{BattleEvent, CharacterId, GameState};

/// Heals `target` by `amount` and returns the resulting event.
///
/// A healing modifier cuts the amount to two thirds (floored). Health never
/// exceeds the maximum; the event reports the amount after the modifier,
/// before clamping.
pub fn heal(state: &mut GameState, target: CharacterId, amount: u32) -> Option<BattleEvent> {
    let character = state.character_mut(target)?;
    let starting_health = character.current_health;

    let mut value = amount;
    if character.effects.has_healing_modifier() {
        value = value * BattleConfig::REDUCED_HEALING_NUMERATOR
            / BattleConfig::REDUCED_HEALING_DENOMINATOR;
    }
    character.current_health = character
        .current_health
        .saturating_add(value)
        .min(character.health);

    Some(BattleEvent::Heal {
        target,
        value,
        starting_health,
        final_health: character.current_health,
    })
}
