//! Enemy decision policy.
//!
//! Priority: do nothing while stunned or dead, recover when low on health and
//! the recovery is off its interval, otherwise the first ready special, and
//! finally the basic attack.

use crate::config::BattleConfig;
use crate::effect::SkillRef;
use crate::state::Enemy;

/// Skill the enemy will use this turn, aimed at `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyChoice {
    pub skill: SkillRef,
    /// Player slot the threat tracker favors.
    pub target: usize,
}

/// Picks the enemy's reaction for turn `turns` and stamps the turn on the
/// enemy when a recovery or a special is chosen.
pub fn choose_skill(
    enemy: &mut Enemy,
    turns: u32,
    target: usize,
    config: &BattleConfig,
) -> Option<EnemyChoice> {
    let base = &enemy.base;
    if base.effects.is_stunned() || !base.is_alive() {
        tracing::debug!(stunned = base.effects.is_stunned(), "enemy skips its reaction");
        return None;
    }

    let low = u64::from(base.current_health) * 100
        <= u64::from(base.health) * u64::from(config.recovery_threshold_percent);
    let rested = turns.saturating_sub(enemy.last_healed) >= config.recovery_interval;

    let skill = if low && rested {
        enemy.last_healed = turns;
        SkillRef::Recovery
    } else if let Some(index) = base.skills.iter().position(|s| s.is_ready()) {
        enemy.last_special = turns;
        SkillRef::Slot(index)
    } else {
        SkillRef::BasicAttack
    };

    tracing::debug!(?skill, target, turns, "enemy chose reaction");
    Some(EnemyChoice { skill, target })
}
