//! Content loaders for reading engine settings and dungeon layouts from files.
//!
//! Engine settings are TOML, dungeon layouts are RON. Both deserialize
//! straight into plain data and are converted to runtime types afterwards.

pub mod config;
pub mod dungeon;
pub mod factory;

pub use config::ConfigLoader;
pub use dungeon::{DungeonLoader, DungeonSpec, EntityKindSpec, EntitySpec, LocationSpec};
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
