//! Runtime orchestration for the tick-driven action engine.
//!
//! This crate wires the scheduler from `game-core`, the command catalog from
//! `game-content`, decision providers and queue persistence into a single
//! [`Runtime`] that clients drive one tick at a time.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the errors and providers downstream clients interact with
//! - [`repository`] saves and restores queued actions
pub mod api;
pub mod repository;
pub mod runtime;

pub use api::{
    ActionProvider, ProviderKind, ProviderRegistry, Result, RuntimeError, ScriptedProvider,
    WaitActionProvider,
};
pub use repository::{
    ActorQueueRecord, FileQueueRepository, InMemoryQueueRepository, QueueRepository,
    QueueSnapshot, RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
