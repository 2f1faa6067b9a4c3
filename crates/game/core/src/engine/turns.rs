//! Tick driver.
//!
//! Busy semantics: after a step that reports `elapsed_time = n`, the actor
//! skips the next `n` ticks entirely and its front action advances again on
//! the tick after that. Zero-time steps let an actor keep draining its queue
//! within the same tick, bounded by `EngineConfig::max_steps_per_tick`.
//! Actors whose entity no longer exists in the world are passed over.

use tracing::{debug, trace, warn};

use crate::action::{ActionContext, ActionRegistry};
use crate::config::EngineConfig;
use crate::engine::errors::SchedulerError;
use crate::engine::provider::ActionProvider;
use crate::engine::queue::Sapience;
use crate::engine::report::{StepRecord, TickReport};
use crate::engine::roster::ActorRoster;
use crate::env::{MessageSink, World};
use crate::state::{EntityId, Tick};

/// Collaborators borrowed for the duration of one tick.
pub struct TickEnv<'a> {
    pub world: &'a mut dyn World,
    pub messages: &'a mut dyn MessageSink,
    pub registry: &'a ActionRegistry,
}

impl<'a> TickEnv<'a> {
    pub fn new(
        world: &'a mut dyn World,
        messages: &'a mut dyn MessageSink,
        registry: &'a ActionRegistry,
    ) -> Self {
        Self {
            world,
            messages,
            registry,
        }
    }
}

/// Cooperative single-threaded scheduler.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    config: EngineConfig,
    clock: Tick,
}

impl Scheduler {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            clock: Tick::ZERO,
        }
    }

    /// Resumes the timeline at `clock`, e.g. after loading a snapshot.
    pub fn with_clock(mut self, clock: Tick) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The tick the next call to [`Scheduler::tick`] will run.
    pub fn clock(&self) -> Tick {
        self.clock
    }

    /// Runs one tick over every actor in registration order.
    ///
    /// A provider failure only costs that actor its turn; it is logged and
    /// listed in [`TickReport::skipped`].
    ///
    /// # Errors
    ///
    /// Engine misuse reported by an action aborts the tick. Steps already
    /// taken by earlier actors stand, later actors are not visited and the
    /// clock does not move.
    pub fn tick(
        &mut self,
        roster: &mut ActorRoster,
        env: &mut TickEnv<'_>,
        provider: &mut dyn ActionProvider,
    ) -> Result<TickReport, SchedulerError> {
        let mut report = TickReport::new(self.clock);

        for slot in roster.iter_mut() {
            self.drive_actor(slot.id, &mut slot.sapience, env, provider, &mut report)?;
        }

        debug!(
            target: "game_core::scheduler",
            tick = %self.clock,
            steps = report.steps.len(),
            guarded = report.guarded.len(),
            skipped = report.skipped.len(),
            "tick complete"
        );
        self.clock += 1;
        Ok(report)
    }

    /// Requests the Interrupted escape hatch on `actor`'s front action.
    pub fn interrupt(roster: &mut ActorRoster, actor: EntityId) -> Result<(), SchedulerError> {
        let sapience = roster
            .get_mut(actor)
            .ok_or(SchedulerError::UnknownActor(actor))?;
        match sapience.interrupt_front() {
            Some(result) => result.map_err(|source| SchedulerError::action(actor, source)),
            None => Err(SchedulerError::NothingToInterrupt { actor }),
        }
    }

    fn drive_actor(
        &self,
        actor: EntityId,
        sapience: &mut Sapience,
        env: &mut TickEnv<'_>,
        provider: &mut dyn ActionProvider,
        report: &mut TickReport,
    ) -> Result<(), SchedulerError> {
        if !env.world.exists(actor) {
            trace!(target: "game_core::scheduler", %actor, "actor left the world");
            return Ok(());
        }

        if sapience.busy > 0 {
            sapience.busy -= 1;
            trace!(
                target: "game_core::scheduler",
                %actor,
                remaining = sapience.busy,
                "actor busy"
            );
            return Ok(());
        }

        if sapience.queue.is_empty() {
            match provider.provide_action(actor, &*env.world, env.registry) {
                Ok(Some(action)) => sapience.queue.push_back(action),
                Ok(None) => {}
                Err(source) => {
                    let error = SchedulerError::provider(actor, source);
                    warn!(
                        target: "game_core::scheduler",
                        %actor,
                        %error,
                        "provider failed; actor skips this tick"
                    );
                    report.skipped.push(actor);
                    return Ok(());
                }
            }
        }

        let max_steps = self.config.max_steps_per_tick;
        let mut steps = 0;

        while sapience.busy == 0 {
            let Some(action) = sapience.queue.front_mut() else {
                break;
            };
            if steps >= max_steps {
                warn!(
                    target: "game_core::scheduler",
                    %actor,
                    key = action.key(),
                    max_steps,
                    "step guard reached; actor resumes next tick"
                );
                report.guarded.push(actor);
                break;
            }

            let key = action.key();
            let mut ctx = ActionContext::new(&mut *env.world, &mut *env.messages, env.registry);
            let outcome = action
                .advance(&mut ctx)
                .map_err(|source| SchedulerError::action(actor, source))?;
            let follow_ups = ctx.into_follow_ups();
            let processed = action.state().is_terminal();

            sapience.apply_elapsed(outcome.elapsed_time);
            if processed {
                sapience.queue.pop_front();
            }
            sapience.queue.extend(follow_ups);

            report.steps.push(StepRecord {
                actor,
                key: key.to_string(),
                outcome,
            });
            steps += 1;
        }

        Ok(())
    }
}
