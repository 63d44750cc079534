//! RNG oracle for deterministic random number generation.
//!
//! The engine only draws randomness during setup (boss selection and the class
//! pool shuffle). Hosts replay a battle by re-running setup with the same seed,
//! so every implementation must be a pure function of its seed.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Seed purposes drawn during setup. Each gets its own stream.
pub mod context {
    pub const BOSS_SELECTION: u32 = 0;
    pub const CLASS_POOL: u32 = 1;
}

/// Compute a deterministic seed from the battle seed and a draw position.
///
/// * `battle_seed` - Seed handed to setup by the host
/// * `step` - Position of the draw inside one shuffle
/// * `context` - What the draw is for (see [`context`])
pub fn compute_seed(battle_seed: u64, step: u64, context: u32) -> u64 {
    let mut hash = battle_seed;

    hash ^= step.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Fisher-Yates shuffle driven by `rng`, reproducible from `(battle_seed, context)`.
pub fn shuffle<T, R>(items: &mut [T], rng: &R, battle_seed: u64, context: u32)
where
    R: RngOracle + ?Sized,
{
    for i in (1..items.len()).rev() {
        let seed = compute_seed(battle_seed, i as u64, context);
        let j = rng.range(seed, 0, i as u32) as usize;
        items.swap(i, j);
    }
}
