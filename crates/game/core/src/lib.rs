//! Turn-based action lifecycle engine shared by the runtime and content crates.
//!
//! `game-core` defines the generic machinery every verb plugs into: the trait
//! vocabulary a command declares, the outcome types its hooks return, the
//! [`Action`] state machine, the string-keyed [`ActionRegistry`], per-actor
//! queues, and the tick-driven [`Scheduler`]. Concrete verbs and the world
//! data store live outside this crate and are reached only through
//! [`env::World`] and [`env::MessageSink`].
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{
    Action, ActionArgs, ActionContext, ActionError, ActionRecord, ActionRegistry, ActionSpec,
    ActionState, ActionTraits, Direction, HookKind, ReasonBool, RegistryError, StateResult,
    StepOutcome, validate,
};
pub use config::EngineConfig;
pub use engine::{
    ActionProvider, ActionQueue, ActorRoster, ActorSlot, IdleProvider, Sapience, Scheduler,
    SchedulerError, StepRecord, TickEnv, TickReport,
};
pub use env::{MessageLog, MessageSink, World};
pub use error::{ErrorSeverity, GameError};
pub use state::{EntityId, Position, Tick};

#[cfg(test)]
pub(crate) mod test_support;
