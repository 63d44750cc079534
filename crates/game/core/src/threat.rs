//! Threat bookkeeping and the enemy's favored target.
//!
//! The favored slot is maintained incrementally on every update; the AI never
//! scans the party at decision time.

use crate::state::GameState;

/// Credits `delta` threat to the player in `acting` and decays every other
/// living player by `delta / divisor` (truncating). Threat is floored at zero.
///
/// The favored target is then recomputed starting from the current favorite's
/// threat with a `>=` comparison, so later slots win ties.
pub fn update_threat(state: &mut GameState, acting: usize, delta: i32, divisor: i32) {
    let decay = delta / divisor.max(1);

    for (slot, player) in state.players.iter_mut().enumerate() {
        if !player.is_alive() {
            continue;
        }
        let change = if slot == acting { delta } else { -decay };
        player.threat = player.threat.saturating_add(change).max(0);
    }

    let mut highest = state
        .players
        .get(state.enemy_target)
        .filter(|p| p.is_alive())
        .map_or(0, |p| p.threat);
    for slot in state.living_slots().collect::<Vec<_>>() {
        let threat = state.players[slot].threat;
        if threat >= highest {
            highest = threat;
            state.enemy_target = slot;
        }
    }

    tracing::debug!(
        acting,
        delta,
        decay,
        enemy_target = state.enemy_target,
        "threat updated"
    );
}

/// Points the enemy at the highest-threat living player.
///
/// Used when the favored player dies or leaves. Leaves the target untouched
/// when nobody is standing.
pub fn retarget(state: &mut GameState) {
    let mut best: Option<(usize, i32)> = None;
    for slot in state.living_slots() {
        let threat = state.players[slot].threat;
        if best.is_none_or(|(_, highest)| threat >= highest) {
            best = Some((slot, threat));
        }
    }
    if let Some((slot, _)) = best {
        state.enemy_target = slot;
        tracing::debug!(enemy_target = slot, "enemy retargeted");
    }
}
