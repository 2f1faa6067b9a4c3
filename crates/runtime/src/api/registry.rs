//! Provider registry for managing action providers.
//!
//! The [`ProviderRegistry`] routes each actor to the provider bound to its
//! [`ProviderKind`], falling back to a default kind for unbound actors.
//!
//! # Design
//!
//! - **Provider instances**: Stored by `ProviderKind`, shared across actors
//! - **Actor mappings**: Each actor can be bound to a specific `ProviderKind`
//! - **Fallback chain**: Actor mapping → Default kind → idle

use std::collections::HashMap;

use game_core::{Action, ActionRegistry, EntityId, RegistryError, World};
use tracing::trace;

use super::{ActionProvider, ProviderKind};

pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Box<dyn ActionProvider>>,

    /// Sparse: only actors that differ from the default.
    actor_mappings: HashMap<EntityId, ProviderKind>,

    default_kind: ProviderKind,
}

impl ProviderRegistry {
    /// Create an empty registry whose unbound actors resolve to `Npc`.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            actor_mappings: HashMap::new(),
            default_kind: ProviderKind::Npc,
        }
    }

    /// Register a provider for a specific kind, replacing any previous one.
    pub fn register(&mut self, kind: ProviderKind, provider: impl ActionProvider + 'static) {
        self.providers.insert(kind, Box::new(provider));
    }

    pub fn register_boxed(&mut self, kind: ProviderKind, provider: Box<dyn ActionProvider>) {
        self.providers.insert(kind, provider);
    }

    pub fn bind_actor(&mut self, actor: EntityId, kind: ProviderKind) {
        self.actor_mappings.insert(actor, kind);
    }

    /// Unbind an actor, reverting it to the default kind.
    pub fn unbind_actor(&mut self, actor: EntityId) -> Option<ProviderKind> {
        self.actor_mappings.remove(&actor)
    }

    pub fn set_default(&mut self, kind: ProviderKind) {
        self.default_kind = kind;
    }

    pub fn default_kind(&self) -> ProviderKind {
        self.default_kind
    }

    /// The explicitly bound kind, or the default if not bound.
    pub fn kind_of(&self, actor: EntityId) -> ProviderKind {
        self.actor_mappings
            .get(&actor)
            .copied()
            .unwrap_or(self.default_kind)
    }

    pub fn has(&self, kind: ProviderKind) -> bool {
        self.providers.contains_key(&kind)
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionProvider for ProviderRegistry {
    /// Actors whose kind has no registered provider stay idle.
    fn provide_action(
        &mut self,
        actor: EntityId,
        world: &dyn World,
        registry: &ActionRegistry,
    ) -> Result<Option<Action>, RegistryError> {
        let kind = self.kind_of(actor);
        match self.providers.get_mut(&kind) {
            Some(provider) => provider.provide_action(actor, world, registry),
            None => {
                trace!(target: "runtime", %actor, %kind, "no provider registered");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use game_content::{Dungeon, DungeonEntity};
    use game_core::{ActionArgs, Position};

    use super::*;
    use crate::api::{ScriptedProvider, WaitActionProvider};

    #[test]
    fn routes_by_binding_then_default() {
        let registry = game_content::build_registry().unwrap();
        let mut dungeon = Dungeon::new(5, 5);
        let hero = dungeon.spawn(DungeonEntity::actor("hero", Position::new(1, 1), 10));
        let rat = dungeon.spawn(DungeonEntity::actor("rat", Position::new(3, 3), 2));

        let mut providers = ProviderRegistry::new();
        providers.register(ProviderKind::Npc, WaitActionProvider);
        providers.register(
            ProviderKind::Player,
            ScriptedProvider::new().then(hero, "get", ActionArgs::new()),
        );
        providers.bind_actor(hero, ProviderKind::Player);

        let hero_action = providers
            .provide_action(hero, &dungeon, &registry)
            .unwrap()
            .unwrap();
        let rat_action = providers
            .provide_action(rat, &dungeon, &registry)
            .unwrap()
            .unwrap();

        assert_eq!(hero_action.key(), "get");
        assert_eq!(rat_action.key(), "wait");
        assert!(providers.provide_action(hero, &dungeon, &registry).unwrap().is_none());
    }

    #[test]
    fn unregistered_kind_leaves_actor_idle() {
        let registry = game_content::build_registry().unwrap();
        let dungeon = Dungeon::new(3, 3);
        let mut providers = ProviderRegistry::new();

        assert_eq!(providers.kind_of(EntityId(7)), ProviderKind::Npc);
        assert!(providers
            .provide_action(EntityId(7), &dungeon, &registry)
            .unwrap()
            .is_none());
    }

    #[test]
    fn scripted_unknown_key_is_a_registry_error() {
        let registry = game_content::build_registry().unwrap();
        let dungeon = Dungeon::new(3, 3);
        let mut script = ScriptedProvider::new().then(EntityId(1), "dance", ActionArgs::new());

        assert!(matches!(
            script.provide_action(EntityId(1), &dungeon, &registry),
            Err(RegistryError::UnknownAction(key)) if key == "dance"
        ));
        assert_eq!(script.remaining(EntityId(1)), 0);
    }
}
