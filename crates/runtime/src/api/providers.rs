//! Stock implementations of the decision collaborator.
//!
//! Runtime users plug in [`ActionProvider`] implementations so the simulation
//! can run with human input, scripted fixtures, or AI policies. The scheduler
//! only asks a provider when the actor's queue is empty.
use std::collections::{HashMap, VecDeque};

use game_core::{Action, ActionArgs, ActionRegistry, EntityId, RegistryError, World};

pub use game_core::ActionProvider;

/// A provider that always answers with a `wait` command.
///
/// Useful as a fallback for creatures with nothing better to do.
#[derive(Clone, Copy, Debug, Default)]
pub struct WaitActionProvider;

impl WaitActionProvider {
    pub const KEY: &'static str = "wait";
}

impl ActionProvider for WaitActionProvider {
    fn provide_action(
        &mut self,
        actor: EntityId,
        _world: &dyn World,
        registry: &ActionRegistry,
    ) -> Result<Option<Action>, RegistryError> {
        registry
            .create(Self::KEY, actor, ActionArgs::new())
            .map(Some)
    }
}

/// Replays a fixed list of commands per actor, then goes quiet.
#[derive(Clone, Debug, Default)]
pub struct ScriptedProvider {
    scripts: HashMap<EntityId, VecDeque<(String, ActionArgs)>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command to `actor`'s script.
    pub fn push(&mut self, actor: EntityId, key: impl Into<String>, args: ActionArgs) {
        self.scripts
            .entry(actor)
            .or_default()
            .push_back((key.into(), args));
    }

    /// Builder-style variant of [`ScriptedProvider::push`].
    pub fn then(mut self, actor: EntityId, key: impl Into<String>, args: ActionArgs) -> Self {
        self.push(actor, key, args);
        self
    }

    pub fn remaining(&self, actor: EntityId) -> usize {
        self.scripts.get(&actor).map_or(0, VecDeque::len)
    }
}

impl ActionProvider for ScriptedProvider {
    fn provide_action(
        &mut self,
        actor: EntityId,
        _world: &dyn World,
        registry: &ActionRegistry,
    ) -> Result<Option<Action>, RegistryError> {
        let Some((key, args)) = self
            .scripts
            .get_mut(&actor)
            .and_then(VecDeque::pop_front)
        else {
            return Ok(None);
        };
        registry.create(&key, actor, args).map(Some)
    }
}
