//! Drinking from and filling liquid carriers.

use game_core::{Action, ActionContext, ActionSpec, ActionTraits, StateResult};

use super::checks::{creature_subject, item_object};

pub const QUAFF_REACTION: u32 = 1;
pub const QUAFF_TIME: u32 = 1;
pub const QUAFF_RECOVERY: u32 = 1;
pub const FILL_REACTION: u32 = 1;
pub const FILL_TIME: u32 = 2;

// ===== quaff =====

pub fn quaff() -> ActionSpec {
    ActionSpec::new(
        ActionTraits::SUBJECT_OBJECT
            | ActionTraits::OBJECT_MUST_BE_IN_INVENTORY
            | ActionTraits::OBJECT_MUST_BE_LIQUID_CARRIER
            | ActionTraits::OBJECT_MUST_NOT_BE_EMPTY,
    )
    .subject_check(creature_subject)
    .object_check(item_object)
    .on_pre_begin(quaff_pre_begin)
    .on_begin(quaff_begin)
    .on_finish(quaff_finish)
}

fn quaff_pre_begin(_action: &mut Action, _ctx: &mut ActionContext<'_>) -> StateResult {
    StateResult::ok(QUAFF_REACTION)
}

fn quaff_begin(action: &mut Action, ctx: &mut ActionContext<'_>) -> StateResult {
    let Some(vessel) = action.object() else {
        return StateResult::fail(QUAFF_TIME);
    };
    if !ctx.world_mut().set_filled(vessel, false) {
        return StateResult::fail(QUAFF_TIME);
    }
    let name = ctx.world().name_of(vessel);
    ctx.say(format!("You drink from the {name}."));
    StateResult::ok(QUAFF_TIME)
}

fn quaff_finish(_action: &mut Action, _ctx: &mut ActionContext<'_>) -> StateResult {
    StateResult::ok(QUAFF_RECOVERY)
}

// ===== fill =====

pub fn fill() -> ActionSpec {
    ActionSpec::new(
        ActionTraits::SUBJECT_OBJECT
            | ActionTraits::OBJECT_MUST_BE_IN_INVENTORY
            | ActionTraits::OBJECT_MUST_BE_LIQUID_CARRIER
            | ActionTraits::OBJECT_MUST_BE_EMPTY,
    )
    .subject_check(creature_subject)
    .object_check(item_object)
    .on_pre_begin(fill_pre_begin)
    .on_begin(fill_begin)
}

fn fill_pre_begin(_action: &mut Action, _ctx: &mut ActionContext<'_>) -> StateResult {
    StateResult::ok(FILL_REACTION)
}

fn fill_begin(action: &mut Action, ctx: &mut ActionContext<'_>) -> StateResult {
    let Some(vessel) = action.object() else {
        return StateResult::fail(FILL_TIME);
    };
    if !ctx.world_mut().set_filled(vessel, true) {
        return StateResult::fail(FILL_TIME);
    }
    let name = ctx.world().name_of(vessel);
    ctx.say(format!("You fill the {name}."));
    StateResult::ok(FILL_TIME)
}
