use crate::state::{EntityId, Position};

/// Entity query and mutation surface supplied by the game's data stores.
///
/// The validation pipeline only calls the query half. Lifecycle hooks call
/// both halves through [`ActionContext`](crate::ActionContext). Mutations
/// report whether they took effect so a hook can turn a refused mutation into
/// a failed [`StateResult`](crate::StateResult).
pub trait World {
    // ===== queries =====

    /// Returns true if the entity is known to the world.
    fn exists(&self, entity: EntityId) -> bool;

    /// Display name used when composing messages.
    fn name_of(&self, entity: EntityId) -> String;

    /// Returns true if the entity has the reasoning capability (owns a queue).
    fn is_sapient(&self, entity: EntityId) -> bool;

    /// Tile the entity occupies, following holders for carried items.
    ///
    /// `None` means the entity is in limbo (not placed anywhere).
    fn position_of(&self, entity: EntityId) -> Option<Position>;

    /// Entity directly holding `entity` in its inventory, if any.
    fn holder_of(&self, entity: EntityId) -> Option<EntityId>;

    fn is_wielded(&self, item: EntityId, by: EntityId) -> bool;

    fn is_worn(&self, item: EntityId, by: EntityId) -> bool;

    /// Item currently wielded by `actor`, if any.
    fn wielded_by(&self, actor: EntityId) -> Option<EntityId>;

    fn is_liquid_carrier(&self, entity: EntityId) -> bool;

    /// Returns true if the container holds nothing (liquid or items).
    fn is_empty(&self, entity: EntityId) -> bool;

    fn can_move(&self, entity: EntityId) -> bool;

    fn is_passable(&self, position: Position) -> bool;

    /// Sapient entity standing on `position`, if any.
    fn occupant_at(&self, position: Position) -> Option<EntityId>;

    fn is_hostile(&self, entity: EntityId, towards: EntityId) -> bool;

    /// Number of units in the entity's stack (1 for non-stackable entities).
    fn stack_size(&self, entity: EntityId) -> u32;

    fn is_in_inventory(&self, item: EntityId, holder: EntityId) -> bool {
        self.holder_of(item) == Some(holder)
    }

    fn is_in_limbo(&self, entity: EntityId) -> bool {
        self.position_of(entity).is_none()
    }

    /// Returns true if `actor` can touch `entity` without moving.
    ///
    /// Carried items are always in reach; otherwise the entity must share or
    /// neighbour the actor's tile.
    fn is_within_reach(&self, entity: EntityId, actor: EntityId) -> bool {
        if self.is_in_inventory(entity, actor) {
            return true;
        }
        match (self.position_of(entity), self.position_of(actor)) {
            (Some(at), Some(from)) => at.distance(from) <= 1,
            _ => false,
        }
    }

    // ===== mutations =====

    /// Moves `entity` into `container`'s inventory.
    fn move_into(&mut self, entity: EntityId, container: EntityId) -> bool;

    /// Places `entity` on a tile, removing it from any holder.
    fn place_at(&mut self, entity: EntityId, position: Position) -> bool;

    /// Removes the entity from the world entirely.
    fn destroy(&mut self, entity: EntityId) -> bool;

    /// Sets or clears the wielder of `item`.
    fn set_wielded(&mut self, item: EntityId, by: Option<EntityId>) -> bool;

    /// Sets or clears the wearer of `item`.
    fn set_worn(&mut self, item: EntityId, by: Option<EntityId>) -> bool;

    /// Splits `amount` units off a stack, returning the new entity.
    fn split_stack(&mut self, entity: EntityId, amount: u32) -> Option<EntityId>;

    /// Fills (`true`) or empties (`false`) a liquid carrier.
    fn set_filled(&mut self, container: EntityId, filled: bool) -> bool;

    /// Applies damage and returns the entity's remaining hit points.
    fn damage(&mut self, entity: EntityId, amount: u32) -> u32;
}
