//! Deterministic replay of an action log.

use raid_core::{BattleConfig, BattleEnv, BattleSession, Catalog, GameState, PcgRng};

use crate::api::{Result, RuntimeError};
use crate::host::{BattleHost, apply};
use crate::repository::{ActionLogEntry, BattleSetup};

/// Rebuilds a battle from its setup and accepted commands.
///
/// Every entry must be accepted again; a refusal means the log does not belong
/// to this catalog and configuration.
pub fn replay(
    catalog: &Catalog,
    config: &BattleConfig,
    setup: &BattleSetup,
    entries: &[ActionLogEntry],
) -> Result<GameState> {
    let env = BattleEnv::new(catalog, config, &PcgRng);
    let mut state = GameState::setup(env, &setup.players, setup.seed, setup.boss.as_deref())?;

    let mut session = BattleSession::new(&mut state);
    for entry in entries {
        apply(&mut session, env, &entry.command).map_err(|source| RuntimeError::ReplayRejected {
            nonce: entry.nonce,
            source: Box::new(source),
        })?;
    }

    tracing::debug!(entries = entries.len(), "replay finished");
    Ok(state)
}

/// Replays the host's own action log and checks that it lands on the live
/// state.
pub fn verify(host: &BattleHost) -> Result<()> {
    let Some((setup, entries)) = host.action_log().read_all()? else {
        return Err(RuntimeError::ReplayDiverged);
    };
    let replayed = replay(host.catalog(), host.config(), &setup, &entries)?;

    if &replayed != host.state() {
        tracing::error!(nonce = host.nonce(), "replay diverged from the live battle");
        return Err(RuntimeError::ReplayDiverged);
    }
    Ok(())
}
