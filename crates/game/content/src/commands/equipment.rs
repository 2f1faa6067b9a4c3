//! Wielding and wearing.

use game_core::{
    Action, ActionContext, ActionSpec, ActionTraits, ReasonBool, StateResult, World,
};

use super::checks::{creature_subject, item_object, no_object};

pub const WIELD_REACTION: u32 = 1;
pub const WIELD_TIME: u32 = 2;
pub const UNWIELD_TIME: u32 = 1;
pub const WEAR_REACTION: u32 = 1;
pub const WEAR_TIME: u32 = 3;
pub const TAKE_OFF_TIME: u32 = 3;

// ===== wield =====

pub fn wield() -> ActionSpec {
    ActionSpec::new(
        ActionTraits::SUBJECT_OBJECT
            | ActionTraits::OBJECT_MUST_BE_IN_INVENTORY
            | ActionTraits::OBJECT_MUST_NOT_BE_WIELDED
            | ActionTraits::OBJECT_MUST_NOT_BE_WORN,
    )
    .subject_check(creature_subject)
    .object_check(item_object)
    .on_pre_begin(wield_pre_begin)
    .on_begin(wield_begin)
}

fn wield_pre_begin(_action: &mut Action, _ctx: &mut ActionContext<'_>) -> StateResult {
    StateResult::ok(WIELD_REACTION)
}

/// Swaps out whatever was in hand before.
fn wield_begin(action: &mut Action, ctx: &mut ActionContext<'_>) -> StateResult {
    let subject = action.subject();
    let Some(item) = action.object() else {
        return StateResult::fail(WIELD_TIME);
    };

    if let Some(previous) = ctx.world().wielded_by(subject) {
        ctx.world_mut().set_wielded(previous, None);
        let name = ctx.world().name_of(previous);
        ctx.say(format!("You put away the {name}."));
    }
    if !ctx.world_mut().set_wielded(item, Some(subject)) {
        return StateResult::fail(WIELD_TIME);
    }
    let name = ctx.world().name_of(item);
    ctx.say(format!("You wield the {name}."));
    StateResult::ok(WIELD_TIME)
}

// ===== unwield =====

/// Empties the hand; the item is resolved at PreBegin time, not by the caller.
pub fn unwield() -> ActionSpec {
    ActionSpec::new(ActionTraits::SUBJECT_ONLY)
        .subject_check(creature_subject)
        .subject_check_now(holding_something)
        .object_check(no_object)
        .on_pre_begin(resolve_wielded)
        .on_begin(unwield_begin)
}

fn holding_something(action: &Action, world: &dyn World) -> ReasonBool {
    if world.wielded_by(action.subject()).is_some() {
        ReasonBool::yes()
    } else {
        ReasonBool::no("You are empty handed.")
    }
}

fn resolve_wielded(action: &mut Action, ctx: &mut ActionContext<'_>) -> StateResult {
    if action.object().is_some() {
        return StateResult::instant();
    }
    match ctx.world().wielded_by(action.subject()) {
        Some(item) if action.add_object(item).is_ok() => StateResult::instant(),
        _ => StateResult::fail(0),
    }
}

fn unwield_begin(action: &mut Action, ctx: &mut ActionContext<'_>) -> StateResult {
    let Some(item) = action.object() else {
        return StateResult::fail(UNWIELD_TIME);
    };
    if !ctx.world_mut().set_wielded(item, None) {
        return StateResult::fail(UNWIELD_TIME);
    }
    let name = ctx.world().name_of(item);
    ctx.say(format!("You put away the {name}."));
    StateResult::ok(UNWIELD_TIME)
}

// ===== wear =====

pub fn wear() -> ActionSpec {
    ActionSpec::new(
        ActionTraits::SUBJECT_OBJECT
            | ActionTraits::OBJECT_MUST_BE_IN_INVENTORY
            | ActionTraits::OBJECT_MUST_NOT_BE_WORN
            | ActionTraits::OBJECT_MUST_NOT_BE_WIELDED,
    )
    .subject_check(creature_subject)
    .object_check(item_object)
    .on_pre_begin(wear_pre_begin)
    .on_begin(wear_begin)
}

fn wear_pre_begin(_action: &mut Action, _ctx: &mut ActionContext<'_>) -> StateResult {
    StateResult::ok(WEAR_REACTION)
}

fn wear_begin(action: &mut Action, ctx: &mut ActionContext<'_>) -> StateResult {
    let Some(item) = action.object() else {
        return StateResult::fail(WEAR_TIME);
    };
    if !ctx.world_mut().set_worn(item, Some(action.subject())) {
        return StateResult::fail(WEAR_TIME);
    }
    let name = ctx.world().name_of(item);
    ctx.say(format!("You put on the {name}."));
    StateResult::ok(WEAR_TIME)
}

// ===== take_off =====

pub fn take_off() -> ActionSpec {
    ActionSpec::new(
        ActionTraits::SUBJECT_OBJECT
            | ActionTraits::OBJECT_MUST_BE_IN_INVENTORY
            | ActionTraits::OBJECT_MUST_BE_WORN,
    )
    .subject_check(creature_subject)
    .object_check(item_object)
    .on_begin(take_off_begin)
}

fn take_off_begin(action: &mut Action, ctx: &mut ActionContext<'_>) -> StateResult {
    let Some(item) = action.object() else {
        return StateResult::fail(TAKE_OFF_TIME);
    };
    if !ctx.world_mut().set_worn(item, None) {
        return StateResult::fail(TAKE_OFF_TIME);
    }
    let name = ctx.world().name_of(item);
    ctx.say(format!("You take off the {name}."));
    StateResult::ok(TAKE_OFF_TIME)
}
