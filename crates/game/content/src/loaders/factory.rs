//! Content factory resolving data files relative to one directory.

use std::path::{Path, PathBuf};

use game_core::EngineConfig;

use crate::loaders::{ConfigLoader, DungeonLoader, LoadResult};
use crate::world::Dungeon;

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── maps/
///     ├── cellar.ron
///     └── armory.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load a dungeon from `maps/{map_name}.ron`.
    pub fn load_dungeon(&self, map_name: &str) -> LoadResult<Dungeon> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        DungeonLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
