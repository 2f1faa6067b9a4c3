//! Non-overridable per-tick dispatch.
//!
//! [`Action::advance`] is the fixed outer method the scheduler calls once per
//! step. It picks the hook for the current state, applies the fixed pre/post
//! processing around it, and reports what happened as a [`StepOutcome`]. The
//! hooks themselves never change `state`.

use tracing::debug;

use crate::action::context::ActionContext;
use crate::action::error::ActionError;
use crate::action::outcome::StateResult;
use crate::action::types::{Action, ActionState};
use crate::action::validation::validate;

/// Which part of the lifecycle produced a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HookKind {
    /// The validation pipeline rejected the action; no hook ran.
    Validation,
    PreBegin,
    Begin,
    Finish,
    Abort,
}

/// Record of one lifecycle step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepOutcome {
    pub from: ActionState,
    pub to: ActionState,
    pub hook: HookKind,
    /// Raw `success` the hook returned. Finish and Abort results are ignored
    /// for routing but still reported.
    pub success: bool,
    /// Ticks the subject is busy for after this step.
    pub elapsed_time: u32,
    /// Validation reason when the pipeline rejected the action.
    pub reason: Option<String>,
}

impl Action {
    /// Advances this action exactly one lifecycle step.
    ///
    /// | state | runs | success → | failure → |
    /// |---|---|---|---|
    /// | Pending / PreBegin | validation, then PreBegin hook | InProgress | Processed |
    /// | InProgress | Begin hook | PostFinish | Processed |
    /// | Interrupted | Abort hook | Processed | Processed |
    /// | PostFinish | Finish hook | Processed | Processed |
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::AlreadyProcessed`] if the action is terminal.
    pub fn advance(&mut self, ctx: &mut ActionContext<'_>) -> Result<StepOutcome, ActionError> {
        let from = self.state;

        let (hook, result) = match self.state {
            ActionState::Pending | ActionState::PreBegin => {
                self.state = ActionState::PreBegin;

                let verdict = validate(self, ctx.world());
                if !verdict.value {
                    debug!(
                        target: "game_core::action",
                        key = self.key(),
                        subject = %self.subject(),
                        reason = %verdict.reason,
                        "validation rejected action"
                    );
                    ctx.say(verdict.reason.clone());
                    self.state = ActionState::Processed;
                    return Ok(StepOutcome {
                        from,
                        to: self.state,
                        hook: HookKind::Validation,
                        success: false,
                        elapsed_time: 0,
                        reason: Some(verdict.reason),
                    });
                }

                let hook = self.spec().pre_begin_hook();
                let result = hook(self, ctx);
                self.state = if result.success {
                    ActionState::InProgress
                } else {
                    ActionState::Processed
                };
                (HookKind::PreBegin, result)
            }
            ActionState::InProgress => {
                let hook = self.spec().begin_hook();
                let result = hook(self, ctx);
                self.state = if result.success {
                    ActionState::PostFinish
                } else {
                    ActionState::Processed
                };
                (HookKind::Begin, result)
            }
            ActionState::Interrupted => {
                let hook = self.spec().abort_hook();
                let result = hook(self, ctx);
                self.state = ActionState::Processed;
                (HookKind::Abort, result)
            }
            ActionState::PostFinish => {
                let hook = self.spec().finish_hook();
                let result = hook(self, ctx);
                self.state = ActionState::Processed;
                (HookKind::Finish, result)
            }
            ActionState::Processed => {
                return Err(ActionError::AlreadyProcessed {
                    key: self.key().to_string(),
                });
            }
        };

        Ok(self.outcome(from, hook, result))
    }

    /// Forces the `Interrupted` escape hatch on an in-progress action.
    ///
    /// The abort hook runs on the action's next step, before it reaches
    /// `Processed`.
    pub fn interrupt(&mut self) -> Result<(), ActionError> {
        match self.state {
            ActionState::InProgress => {
                debug!(
                    target: "game_core::action",
                    key = self.key(),
                    subject = %self.subject(),
                    "action interrupted"
                );
                self.state = ActionState::Interrupted;
                Ok(())
            }
            state => Err(ActionError::NotInterruptible {
                key: self.key().to_string(),
                state,
            }),
        }
    }

    fn outcome(&self, from: ActionState, hook: HookKind, result: StateResult) -> StepOutcome {
        debug!(
            target: "game_core::action",
            key = self.key(),
            subject = %self.subject(),
            %from,
            to = %self.state,
            %hook,
            success = result.success,
            elapsed = result.elapsed_time,
            "action step"
        );
        StepOutcome {
            from,
            to: self.state,
            hook,
            success: result.success,
            elapsed_time: result.elapsed_time,
            reason: None,
        }
    }
}
