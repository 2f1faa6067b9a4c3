//! Per-actor queues and the tick-driven scheduler.
//!
//! The [`Scheduler`] is the only code that advances actions. Once per tick it
//! walks the [`ActorRoster`] in registration order, decrements busy counters,
//! asks the [`ActionProvider`] for work when an actor's queue is empty, and
//! drains same-tick steps until the actor becomes busy, its queue empties, or
//! the per-tick step guard from [`EngineConfig`](crate::EngineConfig) trips.

mod errors;
mod provider;
mod queue;
mod report;
mod roster;
mod turns;

pub use errors::SchedulerError;
pub use provider::{ActionProvider, IdleProvider};
pub use queue::{ActionQueue, Sapience};
pub use report::{StepRecord, TickReport};
pub use roster::{ActorRoster, ActorSlot};
pub use turns::{Scheduler, TickEnv};
