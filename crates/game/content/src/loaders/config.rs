//! Battle configuration loader.

use std::path::Path;

use raid_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`BattleConfig::default`] value.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        let divisor = config.threat_decay_divisor;
        Ok(config.with_threat_decay_divisor(divisor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("max_party_size = 6\n").unwrap();
        assert_eq!(config.max_party_size, 6);
        assert_eq!(
            config.threat_decay_divisor,
            BattleConfig::DEFAULT_THREAT_DECAY_DIVISOR
        );
    }

    #[test]
    fn zero_divisor_is_clamped() {
        let config = ConfigLoader::parse("threat_decay_divisor = 0\n").unwrap();
        assert_eq!(config.threat_decay_divisor, 1);
    }
}
