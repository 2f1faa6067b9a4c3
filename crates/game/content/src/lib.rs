//! Verbs, an in-memory world and data loaders built on `game-core`.
//!
//! This crate houses everything game-specific that plugs into the engine:
//! - The verb catalog (one hook table per [`Command`]) and [`build_registry`]
//! - [`Dungeon`], a grid-and-entity-table implementation of [`game_core::World`]
//! - Loaders for engine configuration (TOML) and dungeon layouts (RON)

pub mod commands;
pub mod world;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use commands::{Command, build_registry, register_all};
pub use world::{Dungeon, DungeonEntity, EntityFlags, Location};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, DungeonLoader, DungeonSpec, EntityKindSpec, EntitySpec,
    LoadResult, LocationSpec,
};
