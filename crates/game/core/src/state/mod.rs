//! Identifiers and value types shared by every engine component.
mod common;

pub use common::{EntityId, Position, Tick};
