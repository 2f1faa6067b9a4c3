//! Waiting, walking and melee.

use game_core::{
    Action, ActionArgs, ActionContext, ActionSpec, ActionTraits, Direction, ReasonBool,
    StateResult, World,
};
use tracing::debug;

use super::checks::{creature_subject, facing_tile, no_object};

pub const WAIT_TIME: u32 = 1;
pub const MOVE_TIME: u32 = 1;
pub const ATTACK_REACTION: u32 = 1;
pub const ATTACK_TIME: u32 = 2;
pub const ATTACK_RECOVERY: u32 = 1;

/// Damage dealt with and without a wielded weapon.
pub const ARMED_DAMAGE: u32 = 4;
pub const UNARMED_DAMAGE: u32 = 1;

// ===== wait =====

pub fn wait() -> ActionSpec {
    ActionSpec::new(ActionTraits::SUBJECT_ONLY | ActionTraits::SUBJECT_CAN_BE_IN_LIMBO)
        .subject_check(creature_subject)
        .object_check(no_object)
        .on_begin(wait_begin)
}

fn wait_begin(_action: &mut Action, _ctx: &mut ActionContext<'_>) -> StateResult {
    StateResult::ok(WAIT_TIME)
}

// ===== move =====

pub fn walk() -> ActionSpec {
    ActionSpec::new(ActionTraits::SUBJECT_DIRECTION | ActionTraits::SUBJECT_MUST_BE_ABLE_TO_MOVE)
        .subject_check(creature_subject)
        .subject_check_now(destination_open)
        .object_check(no_object)
        .on_begin(move_begin)
}

fn destination_open(action: &Action, world: &dyn World) -> ReasonBool {
    if !action.target_direction().is_some_and(Direction::is_planar) {
        return ReasonBool::no("You stay where you are.");
    }
    match facing_tile(action, world) {
        Some(tile) if world.is_passable(tile) => ReasonBool::yes(),
        _ => ReasonBool::no("You can't go that way."),
    }
}

/// Walks one tile, or turns into an attack when a hostile blocks the way.
fn move_begin(action: &mut Action, ctx: &mut ActionContext<'_>) -> StateResult {
    let subject = action.subject();
    let Some(tile) = facing_tile(action, ctx.world()) else {
        return StateResult::fail(0);
    };

    match ctx.world().occupant_at(tile) {
        Some(occupant) if ctx.world().is_hostile(occupant, subject) => {
            let mut args = ActionArgs::new().target(occupant);
            if let Some(direction) = action.target_direction() {
                args = args.direction(direction);
            }
            if ctx.spawn("attack", subject, args).is_err() {
                return StateResult::fail(0);
            }
            debug!(
                target: "game_content::commands",
                %subject,
                %occupant,
                "move redirected into attack"
            );
            StateResult::instant()
        }
        Some(occupant) => {
            let name = ctx.world().name_of(occupant);
            ctx.say(format!("The {name} is in the way."));
            StateResult::fail(0)
        }
        None => {
            if ctx.world_mut().place_at(subject, tile) {
                StateResult::ok(MOVE_TIME)
            } else {
                StateResult::fail(0)
            }
        }
    }
}

// ===== attack =====

pub fn attack() -> ActionSpec {
    ActionSpec::new(ActionTraits::SUBJECT_DIRECTION)
        .subject_check(creature_subject)
        .subject_check_now(someone_to_hit)
        .object_check(no_object)
        .on_pre_begin(attack_pre_begin)
        .on_begin(attack_begin)
        .on_finish(attack_finish)
        .on_abort(attack_abort)
}

fn someone_to_hit(action: &Action, world: &dyn World) -> ReasonBool {
    let occupant = facing_tile(action, world).and_then(|tile| world.occupant_at(tile));
    match occupant {
        Some(victim) if victim != action.subject() => ReasonBool::yes(),
        _ => ReasonBool::no("You swing at empty air."),
    }
}

/// Locks the attack onto whoever stands in the target direction.
fn attack_pre_begin(action: &mut Action, ctx: &mut ActionContext<'_>) -> StateResult {
    let occupant = facing_tile(action, ctx.world()).and_then(|tile| ctx.world().occupant_at(tile));
    let Some(victim) = occupant else {
        return StateResult::fail(0);
    };
    if action.target_entity() != Some(victim) && action.set_target_entity(Some(victim)).is_err() {
        return StateResult::fail(0);
    }
    StateResult::ok(ATTACK_REACTION)
}

fn attack_begin(action: &mut Action, ctx: &mut ActionContext<'_>) -> StateResult {
    let subject = action.subject();
    let Some(victim) = action.target_entity() else {
        return StateResult::fail(ATTACK_TIME);
    };
    // The victim may have stepped away during the reaction time.
    let still_there = facing_tile(action, ctx.world())
        .and_then(|tile| ctx.world().occupant_at(tile))
        == Some(victim);
    if !still_there {
        ctx.say("You swing at empty air.");
        return StateResult::fail(ATTACK_TIME);
    }

    let damage = if ctx.world().wielded_by(subject).is_some() {
        ARMED_DAMAGE
    } else {
        UNARMED_DAMAGE
    };
    let attacker = ctx.world().name_of(subject);
    let name = ctx.world().name_of(victim);
    let remaining = ctx.world_mut().damage(victim, damage);

    ctx.say(format!("The {attacker} hits the {name}."));
    if remaining == 0 {
        ctx.world_mut().destroy(victim);
        ctx.say(format!("The {name} dies."));
    }
    StateResult::ok(ATTACK_TIME)
}

fn attack_finish(_action: &mut Action, _ctx: &mut ActionContext<'_>) -> StateResult {
    StateResult::ok(ATTACK_RECOVERY)
}

fn attack_abort(action: &mut Action, ctx: &mut ActionContext<'_>) -> StateResult {
    let name = ctx.world().name_of(action.subject());
    ctx.say(format!("The {name} lowers its guard."));
    StateResult::ok(ATTACK_RECOVERY)
}
