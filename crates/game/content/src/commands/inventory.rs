//! Moving items between the floor, inventories and containers.

use game_core::{
    Action, ActionContext, ActionSpec, ActionTraits, EntityId, ReasonBool, StateResult, World,
};

use super::checks::{creature_subject, facing_tile, item_object, quantity_fits};

pub const GET_REACTION: u32 = 1;
pub const GET_TIME: u32 = 1;
pub const DROP_REACTION: u32 = 1;
pub const DROP_TIME: u32 = 1;
pub const PUT_REACTION: u32 = 1;
pub const PUT_TIME: u32 = 1;
pub const THROW_REACTION: u32 = 1;
pub const THROW_TIME: u32 = 1;
pub const THROW_RECOVERY: u32 = 1;

/// Tiles a thrown item travels before it drops.
pub const THROW_RANGE: u32 = 5;
pub const THROW_DAMAGE: u32 = 1;

/// Entity the hook should operate on: the whole stack, or `quantity` units
/// split off it.
fn portion(action: &Action, object: EntityId, ctx: &mut ActionContext<'_>) -> EntityId {
    let quantity = action.quantity();
    if quantity == 0 || quantity >= ctx.world().stack_size(object) {
        return object;
    }
    ctx.world_mut()
        .split_stack(object, quantity)
        .unwrap_or(object)
}

// ===== get =====

pub fn get() -> ActionSpec {
    ActionSpec::new(ActionTraits::SUBJECT_OBJECTS | ActionTraits::CAN_TAKE_A_QUANTITY)
        .subject_check(creature_subject)
        .object_check(gettable)
        .on_pre_begin(get_pre_begin)
        .on_begin(get_begin)
}

fn gettable(action: &Action, object: EntityId, world: &dyn World) -> ReasonBool {
    item_object(action, object, world)
        .and_then(|| quantity_fits(action, object, world))
        .and_then(|| {
            if world.is_in_inventory(object, action.subject()) {
                ReasonBool::no(format!("You already have the {}.", world.name_of(object)))
            } else {
                ReasonBool::yes()
            }
        })
        .and_then(|| match carried_by_other(action.subject(), object, world) {
            Some(owner) => ReasonBool::no(format!(
                "The {} belongs to the {}.",
                world.name_of(object),
                world.name_of(owner)
            )),
            None => ReasonBool::yes(),
        })
}

/// First creature up the holder chain of `object`, unless that creature is
/// `subject` itself.
fn carried_by_other(subject: EntityId, object: EntityId, world: &dyn World) -> Option<EntityId> {
    let mut current = object;
    while let Some(holder) = world.holder_of(current) {
        if holder == subject {
            return None;
        }
        if world.is_sapient(holder) {
            return Some(holder);
        }
        current = holder;
    }
    None
}

fn get_pre_begin(_action: &mut Action, _ctx: &mut ActionContext<'_>) -> StateResult {
    StateResult::ok(GET_REACTION)
}

fn get_begin(action: &mut Action, ctx: &mut ActionContext<'_>) -> StateResult {
    let subject = action.subject();
    let mut moved_any = false;
    for &object in action.objects() {
        let taken = portion(action, object, ctx);
        if ctx.world_mut().move_into(taken, subject) {
            let name = ctx.world().name_of(taken);
            ctx.say(format!("You pick up the {name}."));
            moved_any = true;
        }
    }
    StateResult::new(moved_any, GET_TIME)
}

// ===== drop =====

pub fn drop() -> ActionSpec {
    ActionSpec::new(
        ActionTraits::SUBJECT_OBJECTS
            | ActionTraits::CAN_TAKE_A_QUANTITY
            | ActionTraits::OBJECT_MUST_BE_IN_INVENTORY,
    )
    .subject_check(creature_subject)
    .object_check(droppable)
    .on_pre_begin(drop_pre_begin)
    .on_begin(drop_begin)
}

fn droppable(action: &Action, object: EntityId, world: &dyn World) -> ReasonBool {
    item_object(action, object, world).and_then(|| quantity_fits(action, object, world))
}

/// Refuses to let go of anything still in hand or on the body.
fn drop_pre_begin(action: &mut Action, ctx: &mut ActionContext<'_>) -> StateResult {
    let subject = action.subject();
    for &object in action.objects() {
        if ctx.world().is_wielded(object, subject) {
            ctx.say("You cannot drop a wielded item.");
            return StateResult::fail(0);
        }
        if ctx.world().is_worn(object, subject) {
            ctx.say("You cannot drop something you are wearing.");
            return StateResult::fail(0);
        }
    }
    StateResult::ok(DROP_REACTION)
}

fn drop_begin(action: &mut Action, ctx: &mut ActionContext<'_>) -> StateResult {
    let Some(here) = ctx.world().position_of(action.subject()) else {
        return StateResult::fail(DROP_TIME);
    };
    let mut dropped_any = false;
    for &object in action.objects() {
        let dropped = portion(action, object, ctx);
        if ctx.world_mut().place_at(dropped, here) {
            let name = ctx.world().name_of(dropped);
            ctx.say(format!("You drop the {name}."));
            dropped_any = true;
        }
    }
    StateResult::new(dropped_any, DROP_TIME)
}

// ===== put =====

pub fn put() -> ActionSpec {
    ActionSpec::new(
        ActionTraits::SUBJECT_OBJECT_PREPOSITION_TARGET
            | ActionTraits::OBJECT_MUST_BE_IN_INVENTORY
            | ActionTraits::OBJECT_MUST_NOT_BE_WIELDED
            | ActionTraits::OBJECT_MUST_NOT_BE_WORN,
    )
    .subject_check(creature_subject)
    .subject_check_now(container_in_reach)
    .object_check(fits_into_target)
    .on_pre_begin(put_pre_begin)
    .on_begin(put_begin)
}

fn container_in_reach(action: &Action, world: &dyn World) -> ReasonBool {
    let Some(container) = action.target_entity() else {
        return ReasonBool::no("You need to choose a target.");
    };
    let name = world.name_of(container);
    if world.is_sapient(container) {
        return ReasonBool::no(format!("The {name} is not a container."));
    }
    if world.is_liquid_carrier(container) {
        return ReasonBool::no(format!("The {name} only holds liquid."));
    }
    if !world.is_within_reach(container, action.subject()) {
        return ReasonBool::no(format!("The {name} is out of reach."));
    }
    ReasonBool::yes()
}

fn fits_into_target(action: &Action, object: EntityId, world: &dyn World) -> ReasonBool {
    item_object(action, object, world).and_then(|| {
        if action.target_entity() == Some(object) {
            ReasonBool::no(format!(
                "You can't put the {} into itself.",
                world.name_of(object)
            ))
        } else {
            ReasonBool::yes()
        }
    })
}

fn put_pre_begin(_action: &mut Action, _ctx: &mut ActionContext<'_>) -> StateResult {
    StateResult::ok(PUT_REACTION)
}

fn put_begin(action: &mut Action, ctx: &mut ActionContext<'_>) -> StateResult {
    let (Some(object), Some(container)) = (action.object(), action.target_entity()) else {
        return StateResult::fail(PUT_TIME);
    };
    if !ctx.world_mut().move_into(object, container) {
        return StateResult::fail(PUT_TIME);
    }
    let item = ctx.world().name_of(object);
    let into = ctx.world().name_of(container);
    ctx.say(format!("You put the {item} into the {into}."));
    StateResult::ok(PUT_TIME)
}

// ===== throw =====

pub fn throw() -> ActionSpec {
    ActionSpec::new(
        ActionTraits::SUBJECT_OBJECT_PREPOSITION_DIRECTION
            | ActionTraits::CAN_TAKE_A_QUANTITY
            | ActionTraits::OBJECT_MUST_BE_IN_INVENTORY
            | ActionTraits::OBJECT_MUST_NOT_BE_WORN,
    )
    .subject_check(creature_subject)
    .subject_check_now(room_to_throw)
    .object_check(droppable)
    .on_pre_begin(throw_pre_begin)
    .on_begin(throw_begin)
    .on_finish(throw_finish)
}

fn room_to_throw(action: &Action, world: &dyn World) -> ReasonBool {
    match facing_tile(action, world) {
        Some(tile) if world.is_passable(tile) => ReasonBool::yes(),
        _ => ReasonBool::no("There is no room to throw that way."),
    }
}

fn throw_pre_begin(_action: &mut Action, _ctx: &mut ActionContext<'_>) -> StateResult {
    StateResult::ok(THROW_REACTION)
}

/// Flies until it hits a creature, a wall, or runs out of range.
fn throw_begin(action: &mut Action, ctx: &mut ActionContext<'_>) -> StateResult {
    let subject = action.subject();
    let (Some(object), Some(direction), Some(origin)) = (
        action.object(),
        action.target_direction(),
        ctx.world().position_of(subject),
    ) else {
        return StateResult::fail(THROW_TIME);
    };

    let mut landing = origin;
    let mut struck = None;
    for _ in 0..THROW_RANGE {
        let next = direction.step_from(landing);
        if !ctx.world().is_passable(next) {
            break;
        }
        landing = next;
        if let Some(occupant) = ctx.world().occupant_at(next) {
            struck = Some(occupant);
            break;
        }
    }

    let missile = portion(action, object, ctx);
    let name = ctx.world().name_of(missile);
    if !ctx.world_mut().place_at(missile, landing) {
        return StateResult::fail(THROW_TIME);
    }

    match struck {
        Some(victim) => {
            let victim_name = ctx.world().name_of(victim);
            let remaining = ctx.world_mut().damage(victim, THROW_DAMAGE);
            ctx.say(format!("The {name} hits the {victim_name}."));
            if remaining == 0 {
                ctx.world_mut().destroy(victim);
                ctx.say(format!("The {victim_name} dies."));
            }
        }
        None => ctx.say(format!("The {name} lands on the floor.")),
    }
    StateResult::ok(THROW_TIME)
}

fn throw_finish(_action: &mut Action, _ctx: &mut ActionContext<'_>) -> StateResult {
    StateResult::ok(THROW_RECOVERY)
}
