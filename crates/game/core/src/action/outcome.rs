/// Result of a lifecycle hook: whether to continue and how long the subject
/// stays busy.
///
/// `elapsed_time` always means "ticks the subject becomes busy for". Whether
/// that is reaction time, action duration or recovery depends on the state the
/// hook ran in, never on the value itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateResult {
    pub success: bool,
    pub elapsed_time: u32,
}

impl StateResult {
    pub const fn new(success: bool, elapsed_time: u32) -> Self {
        Self {
            success,
            elapsed_time,
        }
    }

    /// Successful step costing `elapsed_time` ticks.
    pub const fn ok(elapsed_time: u32) -> Self {
        Self::new(true, elapsed_time)
    }

    /// Failed step; `elapsed_time` is still applied as busy time.
    pub const fn fail(elapsed_time: u32) -> Self {
        Self::new(false, elapsed_time)
    }

    /// Successful zero-time step.
    pub const fn instant() -> Self {
        Self::ok(0)
    }
}

/// Boolean paired with a user-facing justification.
///
/// The reason is only meaningful when `value` is false.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReasonBool {
    pub value: bool,
    pub reason: String,
}

impl ReasonBool {
    pub fn yes() -> Self {
        Self {
            value: true,
            reason: String::new(),
        }
    }

    pub fn no(reason: impl Into<String>) -> Self {
        Self {
            value: false,
            reason: reason.into(),
        }
    }

    pub fn is_yes(&self) -> bool {
        self.value
    }

    /// Keeps `self` if it failed, otherwise evaluates `next`.
    pub fn and_then(self, next: impl FnOnce() -> ReasonBool) -> ReasonBool {
        if self.value { next() } else { self }
    }
}

impl From<ReasonBool> for bool {
    fn from(value: ReasonBool) -> Self {
        value.value
    }
}
