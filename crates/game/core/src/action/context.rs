use crate::action::error::RegistryError;
use crate::action::registry::ActionRegistry;
use crate::action::types::{Action, ActionArgs};
use crate::env::{MessageSink, World};
use crate::state::EntityId;

/// Collaborators a lifecycle hook may use while it runs.
///
/// Follow-up actions requested by a hook are buffered here and appended to
/// the back of the subject's queue once the hook returns, so a hook never
/// touches the queue that currently owns it.
pub struct ActionContext<'a> {
    world: &'a mut dyn World,
    messages: &'a mut dyn MessageSink,
    registry: &'a ActionRegistry,
    follow_ups: Vec<Action>,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        world: &'a mut dyn World,
        messages: &'a mut dyn MessageSink,
        registry: &'a ActionRegistry,
    ) -> Self {
        Self {
            world,
            messages,
            registry,
            follow_ups: Vec::new(),
        }
    }

    pub fn world(&self) -> &dyn World {
        &*self.world
    }

    pub fn world_mut(&mut self) -> &mut dyn World {
        &mut *self.world
    }

    pub fn registry(&self) -> &ActionRegistry {
        self.registry
    }

    /// Sends a line to the message sink.
    pub fn say(&mut self, text: impl Into<String>) {
        self.messages.add(text.into());
    }

    /// Queues an already-built action behind the current one.
    pub fn enqueue(&mut self, action: Action) {
        self.follow_ups.push(action);
    }

    /// Builds an action through the registry and queues it behind the current one.
    pub fn spawn(
        &mut self,
        key: &str,
        subject: EntityId,
        args: ActionArgs,
    ) -> Result<(), RegistryError> {
        let action = self.registry.create(key, subject, args)?;
        self.follow_ups.push(action);
        Ok(())
    }

    pub fn follow_ups(&self) -> &[Action] {
        &self.follow_ups
    }

    pub(crate) fn into_follow_ups(self) -> Vec<Action> {
        self.follow_ups
    }
}
