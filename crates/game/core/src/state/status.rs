//! Per-character status effects.
//!
//! Pools (`shield`, `poison`, `healing`) hold amounts; the remaining fields
//! hold turns left. Zero always means inactive. Durations only move at
//! end-of-turn ticking.

/// Active status effects on a character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    /// Absorbable damage pool, consumed before health.
    pub shield: u32,
    /// Flat damage applied at each end-of-turn tick.
    pub poison: u32,
    /// Flat healing applied at each end-of-turn tick.
    pub healing: u32,
    /// Turns left during which all incoming damage is negated.
    pub invulnerable: u32,
    /// Turns left during which the character skips its action.
    pub stunned: u32,
    /// Turns left during which incoming healing is reduced.
    pub healing_modifier: u32,
    /// Turns left during which incoming damage is increased.
    pub armor_modifier: u32,
}

impl StatusEffects {
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0
    }

    pub fn is_stunned(&self) -> bool {
        self.stunned > 0
    }

    pub fn is_poisoned(&self) -> bool {
        self.poison > 0
    }

    pub fn has_armor_modifier(&self) -> bool {
        self.armor_modifier > 0
    }

    pub fn has_healing_modifier(&self) -> bool {
        self.healing_modifier > 0
    }

    /// Decrements every duration counter, floored at zero.
    pub fn tick_durations(&mut self) {
        self.invulnerable = self.invulnerable.saturating_sub(1);
        self.stunned = self.stunned.saturating_sub(1);
        self.armor_modifier = self.armor_modifier.saturating_sub(1);
        self.healing_modifier = self.healing_modifier.saturating_sub(1);
    }

    /// Drops every buff and debuff.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
