//! Per-type hook table.
//!
//! Every command type is one [`ActionSpec`]: its trait set plus function
//! pointers for the four precondition checks and the four lifecycle hooks.
//! Specs are `Copy`, so each [`Action`] carries its own table and dispatch
//! needs no registry lookup after construction.

use crate::action::context::ActionContext;
use crate::action::outcome::{ReasonBool, StateResult};
use crate::action::traits::ActionTraits;
use crate::action::types::Action;
use crate::env::World;
use crate::state::EntityId;

/// Lifecycle hook: PreBegin, Begin, Finish or Abort.
pub type LifecycleHook = fn(&mut Action, &mut ActionContext<'_>) -> StateResult;

/// Subject capability check.
pub type SubjectCheck = fn(&Action, &dyn World) -> ReasonBool;

/// Object allowed check, called once per direct object.
pub type ObjectCheck = fn(&Action, EntityId, &dyn World) -> ReasonBool;

/// Hook table and trait set for one command type.
///
/// Capability checks fail closed: a spec that never calls
/// [`subject_check`](Self::subject_check) or [`object_check`](Self::object_check)
/// rejects every action at validation. The "right now" checks default to the
/// general ones. Lifecycle hooks default to an instant success.
#[derive(Clone, Copy, Debug)]
pub struct ActionSpec {
    traits: ActionTraits,
    subject_can: SubjectCheck,
    subject_can_now: Option<SubjectCheck>,
    object_allowed: ObjectCheck,
    object_allowed_now: Option<ObjectCheck>,
    pre_begin: LifecycleHook,
    begin: LifecycleHook,
    finish: LifecycleHook,
    abort: LifecycleHook,
}

impl ActionSpec {
    pub fn new(traits: ActionTraits) -> Self {
        Self {
            traits,
            subject_can: missing_subject_check,
            subject_can_now: None,
            object_allowed: missing_object_check,
            object_allowed_now: None,
            pre_begin: instant_hook,
            begin: instant_hook,
            finish: instant_hook,
            abort: instant_hook,
        }
    }

    pub fn traits(&self) -> ActionTraits {
        self.traits
    }

    // ===== builder =====

    /// "Can this kind of actor ever do this at all."
    pub fn subject_check(mut self, check: SubjectCheck) -> Self {
        self.subject_can = check;
        self
    }

    /// Narrower check layered on top of the general subject check.
    pub fn subject_check_now(mut self, check: SubjectCheck) -> Self {
        self.subject_can_now = Some(check);
        self
    }

    pub fn object_check(mut self, check: ObjectCheck) -> Self {
        self.object_allowed = check;
        self
    }

    pub fn object_check_now(mut self, check: ObjectCheck) -> Self {
        self.object_allowed_now = Some(check);
        self
    }

    pub fn on_pre_begin(mut self, hook: LifecycleHook) -> Self {
        self.pre_begin = hook;
        self
    }

    pub fn on_begin(mut self, hook: LifecycleHook) -> Self {
        self.begin = hook;
        self
    }

    pub fn on_finish(mut self, hook: LifecycleHook) -> Self {
        self.finish = hook;
        self
    }

    pub fn on_abort(mut self, hook: LifecycleHook) -> Self {
        self.abort = hook;
        self
    }

    // ===== dispatch =====

    pub(crate) fn subject_can(&self, action: &Action, world: &dyn World) -> ReasonBool {
        (self.subject_can)(action, world)
    }

    pub(crate) fn subject_can_now(&self, action: &Action, world: &dyn World) -> ReasonBool {
        match self.subject_can_now {
            Some(check) => check(action, world),
            None => self.subject_can(action, world),
        }
    }

    pub(crate) fn object_allowed(
        &self,
        action: &Action,
        object: EntityId,
        world: &dyn World,
    ) -> ReasonBool {
        (self.object_allowed)(action, object, world)
    }

    pub(crate) fn object_allowed_now(
        &self,
        action: &Action,
        object: EntityId,
        world: &dyn World,
    ) -> ReasonBool {
        match self.object_allowed_now {
            Some(check) => check(action, object, world),
            None => self.object_allowed(action, object, world),
        }
    }

    pub(crate) fn pre_begin_hook(&self) -> LifecycleHook {
        self.pre_begin
    }

    pub(crate) fn begin_hook(&self) -> LifecycleHook {
        self.begin
    }

    pub(crate) fn finish_hook(&self) -> LifecycleHook {
        self.finish
    }

    pub(crate) fn abort_hook(&self) -> LifecycleHook {
        self.abort
    }
}

fn missing_subject_check(action: &Action, _world: &dyn World) -> ReasonBool {
    tracing::error!(
        target: "game_core::action",
        key = action.key(),
        "action type declares no subject capability check"
    );
    ReasonBool::no(format!(
        "'{}' does not declare who may perform it",
        action.key()
    ))
}

fn missing_object_check(action: &Action, object: EntityId, _world: &dyn World) -> ReasonBool {
    tracing::error!(
        target: "game_core::action",
        key = action.key(),
        %object,
        "action type declares no object allowed check"
    );
    ReasonBool::no(format!(
        "'{}' does not declare what it may be applied to",
        action.key()
    ))
}

fn instant_hook(_action: &mut Action, _ctx: &mut ActionContext<'_>) -> StateResult {
    StateResult::instant()
}
