//! Collaborator interfaces the engine calls but does not own.
//!
//! The engine never stores entities, inventories or map tiles. Every
//! capability query and mutation a verb needs goes through [`World`], and
//! every human-readable outcome goes through [`MessageSink`]. Both are used as
//! trait objects so the registry's hook tables stay free of generics.
mod messages;
mod world;

pub use messages::{MessageLog, MessageSink};
pub use world::World;
