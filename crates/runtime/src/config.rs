//! Simulation configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Settings of one `raid-sim` run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Content directory; the bundled content is used when unset.
    pub data_dir: Option<PathBuf>,
    pub seed: u64,
    pub players: usize,
    /// Fixed boss id, or `None` to draw one from the seed.
    pub boss: Option<String>,
    /// Safety stop for battles that never end.
    pub max_actions: usize,
    /// Directory that receives `actions.log`; nothing is written when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed: 0,
            players: 3,
            boss: None,
            max_actions: 500,
            log_dir: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `RAID_DATA_DIR` - Content directory (default: bundled content)
    /// - `RAID_SEED` - Battle seed (default: 0)
    /// - `RAID_PLAYERS` - Party size (default: 3)
    /// - `RAID_BOSS` - Boss id (default: drawn from the seed)
    /// - `RAID_MAX_ACTIONS` - Action cap (default: 500)
    /// - `RAID_LOG_DIR` - Where to write the action log (default: none)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("RAID_DATA_DIR").ok().map(PathBuf::from);

        if let Some(seed) = read_env::<u64>("RAID_SEED") {
            config.seed = seed;
        }
        if let Some(players) = read_env::<usize>("RAID_PLAYERS") {
            config.players = players.max(1);
        }
        config.boss = env::var("RAID_BOSS").ok().filter(|b| !b.is_empty());
        if let Some(max) = read_env::<usize>("RAID_MAX_ACTIONS") {
            config.max_actions = max.max(1);
        }
        config.log_dir = env::var("RAID_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
