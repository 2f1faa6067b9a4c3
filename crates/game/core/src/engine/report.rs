use crate::action::StepOutcome;
use crate::state::{EntityId, Tick};

/// One advanced action within a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepRecord {
    pub actor: EntityId,
    pub key: String,
    pub outcome: StepOutcome,
}

/// Everything the scheduler did during one tick, in execution order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub tick: Tick,
    pub steps: Vec<StepRecord>,
    /// Actors whose same-tick draining was cut off by the step guard.
    pub guarded: Vec<EntityId>,
    /// Actors that sat the tick out because their provider failed.
    pub skipped: Vec<EntityId>,
}

impl TickReport {
    pub fn new(tick: Tick) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }

    pub fn steps_for(&self, actor: EntityId) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(move |step| step.actor == actor)
    }

    /// Order in which actors first advanced an action this tick.
    pub fn actor_order(&self) -> Vec<EntityId> {
        let mut order = Vec::new();
        for step in &self.steps {
            if !order.contains(&step.actor) {
                order.push(step.actor);
            }
        }
        order
    }

    pub fn is_idle(&self) -> bool {
        self.steps.is_empty()
    }
}
