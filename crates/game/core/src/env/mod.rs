//! Read-only collaborators injected into every battle.
//!
//! [`BattleEnv`] bundles the catalog, the balance configuration and the RNG
//! oracle so the session can reach everything it needs without owning any of
//! it. All three are loaded once by the host and shared by reference.
mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed, context as seed_context, shuffle};

use crate::catalog::Catalog;
use crate::config::BattleConfig;

/// Aggregates the read-only inputs of the battle engine.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    catalog: &'a Catalog,
    config: &'a BattleConfig,
    rng: &'a dyn RngOracle,
}

impl<'a> BattleEnv<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a BattleConfig, rng: &'a dyn RngOracle) -> Self {
        Self {
            catalog,
            config,
            rng,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn config(&self) -> &'a BattleConfig {
        self.config
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
