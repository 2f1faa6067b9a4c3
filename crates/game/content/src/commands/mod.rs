//! Verb catalog.
//!
//! Every verb is one [`Command`] variant and one [`ActionSpec`]. The mapping is
//! an exhaustive `match`, so adding a variant without a hook table does not
//! compile. Keys are the snake_case variant names.

mod checks;
mod equipment;
mod inventory;
mod liquids;
mod movement;

use game_core::{ActionRegistry, ActionSpec, ActionTraits, RegistryError};
use strum::IntoEnumIterator;
use tracing::info;

pub use checks::{creature_subject, item_object, no_object, quantity_fits};
pub use equipment::{
    TAKE_OFF_TIME, UNWIELD_TIME, WEAR_REACTION, WEAR_TIME, WIELD_REACTION, WIELD_TIME,
};
pub use inventory::{
    DROP_REACTION, DROP_TIME, GET_REACTION, GET_TIME, PUT_REACTION, PUT_TIME, THROW_DAMAGE,
    THROW_RANGE, THROW_REACTION, THROW_RECOVERY, THROW_TIME,
};
pub use liquids::{FILL_REACTION, FILL_TIME, QUAFF_REACTION, QUAFF_RECOVERY, QUAFF_TIME};
pub use movement::{
    ARMED_DAMAGE, ATTACK_REACTION, ATTACK_RECOVERY, ATTACK_TIME, MOVE_TIME, UNARMED_DAMAGE,
    WAIT_TIME,
};

/// Closed set of verbs this content ships.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    Wait,
    Move,
    Attack,
    Get,
    Drop,
    Wield,
    Unwield,
    Wear,
    TakeOff,
    Quaff,
    Fill,
    Put,
    Throw,
}

impl Command {
    /// Registry key of this verb.
    pub fn key(self) -> &'static str {
        self.into()
    }

    pub fn spec(self) -> ActionSpec {
        match self {
            Command::Wait => movement::wait(),
            Command::Move => movement::walk(),
            Command::Attack => movement::attack(),
            Command::Get => inventory::get(),
            Command::Drop => inventory::drop(),
            Command::Wield => equipment::wield(),
            Command::Unwield => equipment::unwield(),
            Command::Wear => equipment::wear(),
            Command::TakeOff => equipment::take_off(),
            Command::Quaff => liquids::quaff(),
            Command::Fill => liquids::fill(),
            Command::Put => inventory::put(),
            Command::Throw => inventory::throw(),
        }
    }

    pub fn traits(self) -> ActionTraits {
        self.spec().traits()
    }
}

/// Registers every [`Command`] in declaration order.
///
/// Call once at start-up, before any action is built.
pub fn build_registry() -> Result<ActionRegistry, RegistryError> {
    let mut registry = ActionRegistry::new();
    register_all(&mut registry)?;
    info!(
        target: "game_content::commands",
        verbs = registry.len(),
        "action registry built"
    );
    Ok(registry)
}

/// Adds every [`Command`] to an existing registry.
pub fn register_all(registry: &mut ActionRegistry) -> Result<(), RegistryError> {
    for command in Command::iter() {
        registry.register(command.key(), command.spec())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
