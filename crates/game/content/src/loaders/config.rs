//! Engine configuration loader.

use std::path::Path;

use game_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`EngineConfig::default`].
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_steps_per_tick == 0 {
            anyhow::bail!("max_steps_per_tick must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn reads_step_guard_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_steps_per_tick = 12").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.max_steps_per_tick, 12);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = ConfigLoader::parse("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn zero_step_guard_is_rejected() {
        let error = ConfigLoader::parse("max_steps_per_tick = 0").unwrap_err();
        assert!(error.to_string().contains("at least 1"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let error = ConfigLoader::load(&path).unwrap_err();
        assert!(error.to_string().contains("absent.toml"));
    }
}
