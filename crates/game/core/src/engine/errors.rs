//! Error types surfaced by the battle session.

use crate::catalog::CatalogError;
use crate::effect::{ResolveError, TargetError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::PlayerId;

/// A player action refused during validation. Nothing was mutated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("the battle has not started")]
    BattleNotActive,

    #[error("the battle is over")]
    BattleOver,

    #[error("player '{0}' is not in this battle")]
    UnknownPlayer(PlayerId),

    #[error("it is not {player}'s turn (slot {current_turn} is up)")]
    NotPlayersTurn {
        player: PlayerId,
        current_turn: usize,
    },

    #[error("skill index {index} is out of range ({available} skills)")]
    SkillIndexOutOfRange { index: usize, available: usize },

    #[error("skill {index} is on cooldown for {wait} more turns")]
    SkillOnCooldown { index: usize, wait: u32 },

    #[error("invalid target: {0}")]
    InvalidTarget(#[from] TargetError),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BattleNotActive => "ACTION_BATTLE_NOT_ACTIVE",
            Self::BattleOver => "ACTION_BATTLE_OVER",
            Self::UnknownPlayer(_) => "ACTION_UNKNOWN_PLAYER",
            Self::NotPlayersTurn { .. } => "ACTION_NOT_PLAYERS_TURN",
            Self::SkillIndexOutOfRange { .. } => "ACTION_SKILL_INDEX_OUT_OF_RANGE",
            Self::SkillOnCooldown { .. } => "ACTION_SKILL_ON_COOLDOWN",
            Self::InvalidTarget(_) => "ACTION_INVALID_TARGET",
        }
    }
}

/// A party change refused by the session. Nothing was mutated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PartyError {
    #[error("the battle is over")]
    BattleOver,

    #[error("player '{0}' already joined")]
    AlreadyJoined(PlayerId),

    #[error("party is full ({max} players)")]
    PartyFull { max: usize },

    #[error("no class left for player '{0}'")]
    NoClassAvailable(PlayerId),

    #[error("player '{0}' is not in this battle")]
    UnknownPlayer(PlayerId),

    #[error("pooled class '{0}' is not in the catalog")]
    UnknownClass(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl GameError for PartyError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownClass(_) | Self::Catalog(_) => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BattleOver => "PARTY_BATTLE_OVER",
            Self::AlreadyJoined(_) => "PARTY_ALREADY_JOINED",
            Self::PartyFull { .. } => "PARTY_FULL",
            Self::NoClassAvailable(_) => "PARTY_NO_CLASS_AVAILABLE",
            Self::UnknownPlayer(_) => "PARTY_UNKNOWN_PLAYER",
            Self::UnknownClass(_) => "PARTY_UNKNOWN_CLASS",
            Self::Catalog(err) => err.error_code(),
        }
    }
}

/// Errors surfaced while executing a player action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("action rejected: {0}")]
    Action(#[from] ActionError),

    /// The catalog does not match the state. The action was aborted midway and
    /// the state should be discarded.
    #[error("resolution aborted: {0}")]
    Resolve(#[from] ResolveError),
}

impl ExecuteError {
    /// The validation error, if the action was simply refused.
    pub fn as_action(&self) -> Option<&ActionError> {
        match self {
            Self::Action(err) => Some(err),
            Self::Resolve(_) => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Action(err) => err.severity(),
            Self::Resolve(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Action(err) => err.error_code(),
            Self::Resolve(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SkillId;

    #[test]
    fn severity_follows_the_wrapped_error() {
        let refused = ExecuteError::from(ActionError::BattleOver);
        assert_eq!(refused.severity(), ErrorSeverity::Validation);
        assert_eq!(refused.error_code(), "ACTION_BATTLE_OVER");
        assert_eq!(refused.as_action(), Some(&ActionError::BattleOver));

        let broken = ExecuteError::from(ResolveError::UnknownSkill(SkillId::new("ghost")));
        assert!(broken.severity().is_fatal());
        assert!(broken.as_action().is_none());
    }

    #[test]
    fn messages_name_the_offender() {
        let err = ActionError::NotPlayersTurn {
            player: "bob".into(),
            current_turn: 2,
        };
        assert_eq!(err.to_string(), "it is not bob's turn (slot 2 is up)");
        assert_eq!(
            PartyError::PartyFull { max: 4 }.to_string(),
            "party is full (4 players)"
        );
    }
}
