//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the orchestrator in [`crate::runtime`] can stay focused on driving ticks.

pub mod errors;
pub mod providers;
pub mod registry;

pub use errors::{ProviderKind, Result, RuntimeError};
pub use providers::{ActionProvider, ScriptedProvider, WaitActionProvider};
pub use registry::ProviderRegistry;
