//! Action domain - the lifecycle every command advances through.
//!
//! # Module Structure
//!
//! - `traits`: [`ActionTraits`], the capability/shape vocabulary a command type declares
//! - `outcome`: [`StateResult`] and [`ReasonBool`], the values every hook returns
//! - `types`: [`Action`] identity, [`ActionState`], [`Direction`], [`ActionRecord`]
//! - `spec`: [`ActionSpec`], the per-type hook table with fail-closed defaults
//! - `context`: [`ActionContext`], the collaborator bundle hooks receive
//! - `validation`: the pipeline run before a command's own PreBegin hook
//! - `lifecycle`: [`Action::advance`], the non-overridable per-tick dispatch
//! - `registry`: [`ActionRegistry`], string key → spec table
//! - `error`: [`ActionError`] and [`RegistryError`]

mod context;
mod error;
mod lifecycle;
mod outcome;
mod registry;
mod spec;
mod traits;
mod types;
mod validation;

pub use context::ActionContext;
pub use error::{ActionError, RegistryError};
pub use lifecycle::{HookKind, StepOutcome};
pub use outcome::{ReasonBool, StateResult};
pub use registry::ActionRegistry;
pub use spec::{ActionSpec, LifecycleHook, ObjectCheck, SubjectCheck};
pub use traits::ActionTraits;
pub use types::{Action, ActionArgs, ActionRecord, ActionState, Direction};
pub use validation::validate;
