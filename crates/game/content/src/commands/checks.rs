//! Capability checks shared by several verbs.

use game_core::{Action, EntityId, ReasonBool, World};

/// Subject must be a creature.
pub fn creature_subject(action: &Action, world: &dyn World) -> ReasonBool {
    if world.is_sapient(action.subject()) {
        ReasonBool::yes()
    } else {
        ReasonBool::no(format!(
            "The {} can't do anything.",
            world.name_of(action.subject())
        ))
    }
}

/// Objects must be items, never creatures.
pub fn item_object(_action: &Action, object: EntityId, world: &dyn World) -> ReasonBool {
    if world.is_sapient(object) {
        ReasonBool::no(format!("The {} won't let you.", world.name_of(object)))
    } else {
        ReasonBool::yes()
    }
}

/// Verbs that take no direct object still declare an object check so that
/// the table is complete; this one accepts nothing.
pub fn no_object(action: &Action, object: EntityId, world: &dyn World) -> ReasonBool {
    ReasonBool::no(format!(
        "You can't {} the {}.",
        action.key(),
        world.name_of(object)
    ))
}

/// Requested quantity must not exceed any object's stack.
pub fn quantity_fits(action: &Action, object: EntityId, world: &dyn World) -> ReasonBool {
    let available = world.stack_size(object);
    if action.quantity() > available {
        ReasonBool::no(format!(
            "You only have {} of the {}.",
            available,
            world.name_of(object)
        ))
    } else {
        ReasonBool::yes()
    }
}

/// Tile the subject faces in its target direction.
pub fn facing_tile(action: &Action, world: &dyn World) -> Option<game_core::Position> {
    let origin = world.position_of(action.subject())?;
    let direction = action.target_direction()?;
    Some(direction.step_from(origin))
}
