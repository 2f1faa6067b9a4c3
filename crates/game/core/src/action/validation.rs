//! Validation pipeline run at the start of every PreBegin step.
//!
//! ## Order
//!
//! 1. Shape: the slots the trait set names (direction, target, objects) are filled
//! 2. Subject state: limbo, mobility
//! 3. Self-reference: objects/target equal to the subject
//! 4. Subject capability, general then right now
//! 5. Per object: trait gates (inventory, wielded, worn, reach, contents)
//!    then object allowed, general then right now
//!
//! The first failing step decides the reason; later steps do not run.

use crate::action::outcome::ReasonBool;
use crate::action::traits::ActionTraits;
use crate::action::types::Action;
use crate::env::World;
use crate::state::EntityId;

/// Runs the pipeline for `action` against the current world.
pub fn validate(action: &Action, world: &dyn World) -> ReasonBool {
    check_shape(action)
        .and_then(|| check_subject_state(action, world))
        .and_then(|| check_self_reference(action))
        .and_then(|| action.spec().subject_can(action, world))
        .and_then(|| action.spec().subject_can_now(action, world))
        .and_then(|| check_objects(action, world))
}

fn check_shape(action: &Action) -> ReasonBool {
    let traits = action.traits();

    if traits.takes_direction() && action.target_direction().is_none() {
        return ReasonBool::no("You need to choose a direction.");
    }
    if traits.takes_target() && action.target_entity().is_none() {
        return ReasonBool::no("You need to choose a target.");
    }
    if traits.takes_object() {
        if action.objects().is_empty() {
            return ReasonBool::no("You need to choose something to do that with.");
        }
        if action.objects().len() > 1 && !traits.takes_many_objects() {
            return ReasonBool::no("You can only do that to one thing at a time.");
        }
    }
    if action.quantity() > 0 && !traits.contains(ActionTraits::CAN_TAKE_A_QUANTITY) {
        return ReasonBool::no("You can't choose an amount for that.");
    }

    ReasonBool::yes()
}

fn check_subject_state(action: &Action, world: &dyn World) -> ReasonBool {
    let traits = action.traits();
    let subject = action.subject();

    if !world.exists(subject) {
        return ReasonBool::no("There is nobody to do that.");
    }
    if !traits.contains(ActionTraits::SUBJECT_CAN_BE_IN_LIMBO) && world.is_in_limbo(subject) {
        return ReasonBool::no("You are nowhere at all.");
    }
    if traits.contains(ActionTraits::SUBJECT_MUST_BE_ABLE_TO_MOVE) && !world.can_move(subject) {
        return ReasonBool::no("You can't move.");
    }

    ReasonBool::yes()
}

fn check_self_reference(action: &Action) -> ReasonBool {
    if action.traits().contains(ActionTraits::OBJECT_CAN_BE_SELF) {
        return ReasonBool::yes();
    }

    let subject = action.subject();
    let names_self = action.objects().contains(&subject) || action.target_entity() == Some(subject);
    if names_self {
        ReasonBool::no("You can't do that to yourself.")
    } else {
        ReasonBool::yes()
    }
}

fn check_objects(action: &Action, world: &dyn World) -> ReasonBool {
    if !action.traits().takes_object() {
        return ReasonBool::yes();
    }

    for &object in action.objects() {
        let verdict = check_object_gates(action, object, world)
            .and_then(|| action.spec().object_allowed(action, object, world))
            .and_then(|| action.spec().object_allowed_now(action, object, world));
        if !verdict.value {
            return verdict;
        }
    }

    ReasonBool::yes()
}

fn check_object_gates(action: &Action, object: EntityId, world: &dyn World) -> ReasonBool {
    let traits = action.traits();
    let subject = action.subject();

    if !world.exists(object) {
        return ReasonBool::no("That isn't here any more.");
    }

    let name = || world.name_of(object);

    if traits.contains(ActionTraits::OBJECT_MUST_BE_IN_INVENTORY)
        && !world.is_in_inventory(object, subject)
    {
        return ReasonBool::no(format!("You aren't carrying the {}.", name()));
    }
    if traits.contains(ActionTraits::OBJECT_MUST_BE_WIELDED) && !world.is_wielded(object, subject)
    {
        return ReasonBool::no(format!("You aren't wielding the {}.", name()));
    }
    if traits.contains(ActionTraits::OBJECT_MUST_NOT_BE_WIELDED)
        && world.is_wielded(object, subject)
    {
        return ReasonBool::no(format!("You are wielding the {}.", name()));
    }
    if traits.contains(ActionTraits::OBJECT_MUST_BE_WORN) && !world.is_worn(object, subject) {
        return ReasonBool::no(format!("You aren't wearing the {}.", name()));
    }
    if traits.contains(ActionTraits::OBJECT_MUST_NOT_BE_WORN) && world.is_worn(object, subject) {
        return ReasonBool::no(format!("You are wearing the {}.", name()));
    }
    if !traits.contains(ActionTraits::OBJECT_CAN_BE_OUT_OF_REACH)
        && !world.is_within_reach(object, subject)
    {
        return ReasonBool::no(format!("The {} is out of reach.", name()));
    }
    if traits.contains(ActionTraits::OBJECT_MUST_BE_LIQUID_CARRIER)
        && !world.is_liquid_carrier(object)
    {
        return ReasonBool::no(format!("The {} can't hold liquid.", name()));
    }
    if traits.contains(ActionTraits::OBJECT_MUST_BE_EMPTY) && !world.is_empty(object) {
        return ReasonBool::no(format!("The {} isn't empty.", name()));
    }
    if traits.contains(ActionTraits::OBJECT_MUST_NOT_BE_EMPTY) && world.is_empty(object) {
        return ReasonBool::no(format!("The {} is empty.", name()));
    }

    ReasonBool::yes()
}
