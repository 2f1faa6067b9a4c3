use crate::action::{Action, ActionRegistry, RegistryError};
use crate::env::World;
use crate::state::EntityId;

/// External decision source consulted when an actor's queue is empty.
///
/// Player input and creature AI both sit behind this trait. Returning
/// `Ok(None)` leaves the actor idle for the tick.
pub trait ActionProvider {
    fn provide_action(
        &mut self,
        actor: EntityId,
        world: &dyn World,
        registry: &ActionRegistry,
    ) -> Result<Option<Action>, RegistryError>;
}

/// Provider that never supplies an action.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdleProvider;

impl ActionProvider for IdleProvider {
    fn provide_action(
        &mut self,
        _actor: EntityId,
        _world: &dyn World,
        _registry: &ActionRegistry,
    ) -> Result<Option<Action>, RegistryError> {
        Ok(None)
    }
}
