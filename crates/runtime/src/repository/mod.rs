//! Repository layer for queue snapshots.
//!
//! A snapshot captures everything the scheduler owns: the clock, and per actor
//! its busy counter and the persisted form of every queued action. The world
//! itself belongs to the caller and is saved separately.

mod error;
mod file;
mod memory;
mod snapshot;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileQueueRepository;
pub use memory::InMemoryQueueRepository;
pub use snapshot::{ActorQueueRecord, QueueSnapshot};
pub use traits::QueueRepository;
