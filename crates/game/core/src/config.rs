/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Upper bound on lifecycle steps a single actor may take within one tick.
    ///
    /// Zero-time hooks let an actor drain several transitions in the same tick;
    /// once this many steps ran the actor resumes on the next tick instead.
    pub max_steps_per_tick: u32,
}

impl EngineConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_STEPS_PER_TICK: u32 = 64;

    pub fn new() -> Self {
        Self {
            max_steps_per_tick: Self::DEFAULT_MAX_STEPS_PER_TICK,
        }
    }

    pub fn with_max_steps_per_tick(max_steps_per_tick: u32) -> Self {
        Self {
            max_steps_per_tick: max_steps_per_tick.max(1),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
