use game_core::{ActionRecord, ActorRoster, EntityId, Tick};
use serde::{Deserialize, Serialize};

use super::error::{RepositoryError, Result};

/// Saved scheduler state of one actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorQueueRecord {
    pub actor: EntityId,
    pub busy: u32,
    pub total_busy: u64,
    /// Queued actions, front first.
    pub actions: Vec<ActionRecord>,
}

/// Saved scheduler state of every actor, in registration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub clock: Tick,
    pub actors: Vec<ActorQueueRecord>,
}

impl QueueSnapshot {
    pub fn capture(clock: Tick, roster: &ActorRoster) -> Self {
        let actors = roster
            .iter()
            .map(|slot| ActorQueueRecord {
                actor: slot.id,
                busy: slot.sapience.busy,
                total_busy: slot.sapience.total_busy,
                actions: slot.sapience.queue.records(),
            })
            .collect();
        Self { clock, actors }
    }

    pub fn actor(&self, actor: EntityId) -> Option<&ActorQueueRecord> {
        self.actors.iter().find(|record| record.actor == actor)
    }

    /// Checks that every queue could have been produced by the scheduler:
    /// no processed actions, and only the front action may be active.
    pub fn validate(&self) -> Result<()> {
        for record in &self.actors {
            for (index, action) in record.actions.iter().enumerate() {
                if action.state.is_terminal() {
                    return Err(RepositoryError::InvalidSnapshot(format!(
                        "actor {} has processed '{}' still queued",
                        record.actor, action.key
                    )));
                }
                if index > 0 && action.state.is_active() {
                    return Err(RepositoryError::InvalidSnapshot(format!(
                        "actor {} has '{}' active behind the front of its queue",
                        record.actor, action.key
                    )));
                }
            }
        }
        Ok(())
    }

    /// Total number of queued actions across all actors.
    pub fn pending_actions(&self) -> usize {
        self.actors.iter().map(|record| record.actions.len()).sum()
    }
}
