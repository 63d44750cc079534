/// Battle balance constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Non-acting living players lose `threat / threat_decay_divisor` each time
    /// someone else acts.
    pub threat_decay_divisor: i32,

    /// Health (max and current) granted to the enemy per player beyond the first.
    pub enemy_bonus_health: u32,

    /// The enemy considers its recovery skill at or below this health percentage.
    pub recovery_threshold_percent: u32,

    /// Minimum number of turns between two uses of the enemy recovery skill.
    pub recovery_interval: u32,

    /// Largest party the session accepts, at setup or through joins.
    pub max_party_size: usize,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of skills carried by one character.
    pub const MAX_SKILLS: usize = 4;

    // ===== balance-critical constants (not tunable) =====
    /// Incoming damage while an armor modifier is active, in percent.
    pub const ARMOR_DAMAGE_PERCENT: u32 = 150;
    /// Incoming healing while a healing modifier is active: `amount * 2 / 3`.
    pub const REDUCED_HEALING_NUMERATOR: u32 = 2;
    pub const REDUCED_HEALING_DENOMINATOR: u32 = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_THREAT_DECAY_DIVISOR: i32 = 4;
    pub const DEFAULT_ENEMY_BONUS_HEALTH: u32 = 100;
    pub const DEFAULT_RECOVERY_THRESHOLD_PERCENT: u32 = 25;
    pub const DEFAULT_RECOVERY_INTERVAL: u32 = 7;
    pub const DEFAULT_MAX_PARTY_SIZE: usize = 4;

    pub fn new() -> Self {
        Self {
            threat_decay_divisor: Self::DEFAULT_THREAT_DECAY_DIVISOR,
            enemy_bonus_health: Self::DEFAULT_ENEMY_BONUS_HEALTH,
            recovery_threshold_percent: Self::DEFAULT_RECOVERY_THRESHOLD_PERCENT,
            recovery_interval: Self::DEFAULT_RECOVERY_INTERVAL,
            max_party_size: Self::DEFAULT_MAX_PARTY_SIZE,
        }
    }

    pub fn with_threat_decay_divisor(mut self, divisor: i32) -> Self {
        self.threat_decay_divisor = divisor.max(1);
        self
    }

    pub fn with_max_party_size(mut self, size: usize) -> Self {
        self.max_party_size = size;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
