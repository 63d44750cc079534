//! Scripted players for unattended battles.

use std::sync::Arc;

use raid_core::{BattleConfig, BattleOutcome, Catalog, GameState, Mechanic, PlayerId, TargetMode};
use serde::Serialize;

use crate::api::Result;
use crate::config::SimConfig;
use crate::host::BattleHost;
use crate::repository::{BattleSetup, Command, FileActionLog};
use crate::replay;

/// Healing is held back until some ally drops to this health percentage.
const HEAL_BELOW_PERCENT: u32 = 60;

/// Picks the command for whoever holds the turn.
///
/// Uses the first ready skill in slot order, skipping heals while the party
/// is healthy. Single-target heals go to the most wounded living ally.
pub fn next_command(state: &GameState, catalog: &Catalog) -> Option<Command> {
    if !state.is_active() {
        return None;
    }
    let actor = state.players.get(state.current_turn)?;
    if !actor.is_alive() {
        return None;
    }

    let wounded = most_wounded(state);
    let needs_healing = wounded.is_some_and(|(_, percent)| percent <= HEAL_BELOW_PERCENT);

    let mut fallback = None;
    for (index, instance) in actor.base.skills.iter().enumerate() {
        if !instance.is_ready() {
            continue;
        }
        let Some(definition) = catalog.skill(instance.skill.as_str()) else {
            continue;
        };
        fallback.get_or_insert(index);
        if is_heal(definition.mechanic) && !needs_healing {
            continue;
        }

        let target_index = match definition.target {
            TargetMode::Ally => wounded.map_or(state.current_turn, |(slot, _)| slot),
            _ => 0,
        };
        return Some(use_skill(actor.player_id.clone(), index, target_index));
    }

    // Everything is on cooldown or held back: spend the first ready skill, or
    // slot 0 so the engine reports the cooldown.
    Some(use_skill(
        actor.player_id.clone(),
        fallback.unwrap_or(0),
        state.current_turn,
    ))
}

fn use_skill(player: PlayerId, skill_index: usize, target_index: usize) -> Command {
    Command::UseSkill {
        player,
        skill_index,
        target_index,
    }
}

fn is_heal(mechanic: Mechanic) -> bool {
    matches!(
        mechanic,
        Mechanic::HealByFactor { .. }
            | Mechanic::HealByPercent { .. }
            | Mechanic::HealOverTime { .. }
            | Mechanic::ConsumeHealOverTime { .. }
    )
}

/// Living player with the lowest health percentage, as `(slot, percent)`.
fn most_wounded(state: &GameState) -> Option<(usize, u32)> {
    state
        .living_slots()
        .map(|slot| {
            let base = &state.players[slot].base;
            (slot, base.current_health * 100 / base.health.max(1))
        })
        .min_by_key(|&(slot, percent)| (percent, slot))
}

/// Summary of an unattended battle.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub seed: u64,
    pub boss: String,
    pub actions: u64,
    pub turns: u32,
    pub outcome: Option<BattleOutcome>,
    pub final_state: GameState,
}

/// Plays a battle with [`next_command`] until it ends or the action cap is
/// reached, then checks that the action log replays to the same state.
pub fn run_simulation(
    catalog: Arc<Catalog>,
    config: BattleConfig,
    sim: &SimConfig,
) -> Result<SimulationReport> {
    let players = (1..=sim.players)
        .map(|n| PlayerId::from(format!("player-{n}").as_str()))
        .collect();
    let mut setup = BattleSetup::new(players, sim.seed);
    setup.boss = sim.boss.clone();

    let mut builder = BattleHost::builder()
        .catalog(catalog)
        .config(config)
        .setup(setup);
    if let Some(dir) = &sim.log_dir {
        let log = FileActionLog::create(dir, format!("actions-{}.log", sim.seed))?;
        tracing::info!(path = %log.path().display(), "writing action log");
        builder = builder.action_log(log);
    }
    let mut host = builder.build()?;

    for _ in 0..sim.max_actions {
        if host.outcome().is_some() {
            break;
        }
        let Some(command) = next_command(host.state(), host.catalog()) else {
            break;
        };
        match host.execute(command) {
            Ok(_) => {}
            Err(err) if err.is_rejection() => break,
            Err(err) => return Err(err),
        }
    }

    if host.outcome().is_none() {
        tracing::warn!(actions = host.nonce(), "battle stopped without an outcome");
    }

    replay::verify(&host)?;

    Ok(SimulationReport {
        seed: sim.seed,
        boss: host.state().enemy.base.class_id.clone(),
        actions: host.nonce(),
        turns: host.state().turns,
        outcome: host.outcome().cloned(),
        final_state: host.state().clone(),
    })
}
