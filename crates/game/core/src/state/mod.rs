//! Battle state: combatants, turn bookkeeping and the transient event log.
//!
//! [`GameState`] is plain data. It is cloned for snapshots and serialized by
//! hosts (behind the `serde` feature); only the engine mutates it.
mod character;
mod event;
mod setup;
mod status;

pub use character::{
    Character, CharacterId, Enemy, PlayerCharacter, PlayerId, SkillInstance, SkillSlots,
};
pub use event::{BattleEvent, ModifierKind};
pub use setup::SetupError;
pub use status::StatusEffects;

use std::collections::BTreeMap;

/// Coarse lifecycle of a battle. `Setup -> Active` happens once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    #[default]
    Setup,
    Active,
}

/// Final result of a battle, shared by the whole party.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE")]
pub enum OutcomeResult {
    Won,
    Lost,
}

/// Outcome handed to the host when the battle ends, once.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleOutcome {
    pub result: OutcomeResult,
    pub players: BTreeMap<PlayerId, OutcomeResult>,
}

/// Complete state of one battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub phase: BattlePhase,
    /// Seed handed to setup; replaying setup with it reproduces the battle.
    pub seed: u64,
    pub enemy: Enemy,
    /// Turn rotation order. Dead players keep their slot until they leave.
    pub players: Vec<PlayerCharacter>,
    /// Slot of the player whose action is expected next.
    pub current_turn: usize,
    /// Slot of the player the enemy currently aims at.
    pub enemy_target: usize,
    /// Number of resolved turns.
    pub turns: u32,
    /// Events of the most recently resolved action.
    pub events: Vec<BattleEvent>,
    /// Unused playable classes, dealt from the back on join.
    pub class_pool: Vec<String>,
    /// Set once the battle has ended.
    pub outcome: Option<BattleOutcome>,
}

impl GameState {
    /// Creates a state in the setup phase with no players.
    pub fn new(enemy: Enemy) -> Self {
        Self {
            phase: BattlePhase::Setup,
            seed: 0,
            enemy,
            players: Vec::new(),
            current_turn: 0,
            enemy_target: 0,
            turns: 0,
            events: Vec::new(),
            class_pool: Vec::new(),
            outcome: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == BattlePhase::Active && self.outcome.is_none()
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        match id {
            CharacterId::Enemy => Some(&self.enemy.base),
            CharacterId::Player(slot) => self.players.get(slot).map(|p| &p.base),
        }
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        match id {
            CharacterId::Enemy => Some(&mut self.enemy.base),
            CharacterId::Player(slot) => self.players.get_mut(slot).map(|p| &mut p.base),
        }
    }

    pub fn player(&self, player_id: &PlayerId) -> Option<&PlayerCharacter> {
        self.players.iter().find(|p| &p.player_id == player_id)
    }

    pub fn player_slot(&self, player_id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.player_id == player_id)
    }

    /// Slots of living players, in rotation order.
    pub fn living_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_alive())
            .map(|(slot, _)| slot)
    }

    /// True iff the enemy is down or no player is standing.
    pub fn is_over(&self) -> bool {
        self.terminal_result().is_some()
    }

    /// Result implied by the current health values. An enemy at zero wins
    /// even if the party fell at the same instant.
    pub fn terminal_result(&self) -> Option<OutcomeResult> {
        if self.enemy.base.current_health == 0 {
            Some(OutcomeResult::Won)
        } else if self.players.iter().all(|p| p.base.current_health == 0) {
            Some(OutcomeResult::Lost)
        } else {
            None
        }
    }

    /// Outcome map assigning `result` to every player in the battle.
    pub fn outcome_for(&self, result: OutcomeResult) -> BattleOutcome {
        let players = self
            .players
            .iter()
            .map(|p| (p.player_id.clone(), result))
            .collect();
        BattleOutcome { result, players }
    }

    /// Renumbers every slot id after the player list changed shape.
    pub(crate) fn renumber_slots(&mut self) {
        for (slot, player) in self.players.iter_mut().enumerate() {
            player.base.id = CharacterId::Player(slot);
        }
    }
}
