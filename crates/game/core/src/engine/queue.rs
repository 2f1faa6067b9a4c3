use std::collections::VecDeque;

use crate::action::{Action, ActionError, ActionRecord};

/// Strict FIFO of an actor's pending actions.
///
/// Only the front action is ever advanced. There is no reordering and no
/// removal other than popping a processed front.
#[derive(Clone, Debug, Default)]
pub struct ActionQueue {
    actions: VecDeque<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    pub fn front(&self) -> Option<&Action> {
        self.actions.front()
    }

    pub fn front_mut(&mut self) -> Option<&mut Action> {
        self.actions.front_mut()
    }

    pub fn pop_front(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// Persistable form of every queued action, front first.
    pub fn records(&self) -> Vec<ActionRecord> {
        self.actions.iter().map(Action::to_record).collect()
    }
}

impl Extend<Action> for ActionQueue {
    fn extend<I: IntoIterator<Item = Action>>(&mut self, iter: I) {
        self.actions.extend(iter);
    }
}

/// Reasoning capability of an actor: its queue plus the busy counter.
///
/// The scheduler drives both counters; snapshot restore is the only other writer.
#[derive(Clone, Debug, Default)]
pub struct Sapience {
    pub queue: ActionQueue,
    /// Remaining ticks the actor skips before its front action advances again.
    pub busy: u32,
    /// Sum of every `elapsed_time` applied to this actor.
    pub total_busy: u64,
}

impl Sapience {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy > 0
    }

    /// Number of queued actions that have left `Pending` and not yet finished.
    pub fn active_count(&self) -> usize {
        self.queue
            .iter()
            .filter(|action| action.state().is_active())
            .count()
    }

    /// Interrupts the front action; the busy counter is left as it is.
    pub fn interrupt_front(&mut self) -> Option<Result<(), ActionError>> {
        self.queue.front_mut().map(Action::interrupt)
    }

    pub(crate) fn apply_elapsed(&mut self, elapsed: u32) {
        self.busy = self.busy.saturating_add(elapsed);
        self.total_busy += u64::from(elapsed);
    }
}
