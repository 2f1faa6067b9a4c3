//! String-keyed factory table for actions.
//!
//! The registry is the boundary scripting and parsing code talk to: they name
//! a command by key and never depend on the concrete command types. It is
//! built by one explicit call at start-up and is read-only afterwards; there
//! is no removal.

use std::collections::BTreeMap;

use tracing::debug;

use crate::action::error::RegistryError;
use crate::action::spec::ActionSpec;
use crate::action::traits::ActionTraits;
use crate::action::types::{Action, ActionArgs, ActionRecord};
use crate::state::EntityId;

/// Registry mapping action keys to their hook tables.
#[derive(Clone, Debug, Default)]
pub struct ActionRegistry {
    table: BTreeMap<&'static str, ActionSpec>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command type under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateKey`] if the key is already taken.
    pub fn register(&mut self, key: &'static str, spec: ActionSpec) -> Result<(), RegistryError> {
        if self.table.contains_key(key) {
            return Err(RegistryError::DuplicateKey(key.to_string()));
        }
        debug!(target: "game_core::registry", key, traits = ?spec.traits(), "registered action");
        self.table.insert(key, spec);
        Ok(())
    }

    pub fn exists(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    /// Builds a `Pending` action of type `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownAction`] for unregistered keys; no action
    /// is produced in that case.
    pub fn create(
        &self,
        key: &str,
        subject: EntityId,
        args: ActionArgs,
    ) -> Result<Action, RegistryError> {
        let (&key, &spec) = self
            .table
            .get_key_value(key)
            .ok_or_else(|| RegistryError::UnknownAction(key.to_string()))?;
        Ok(Action::new(key, spec, subject, args))
    }

    /// Rebuilds an action from its persisted record, including its state.
    pub fn restore(&self, record: &ActionRecord) -> Result<Action, RegistryError> {
        let args = ActionArgs {
            objects: record.objects.clone(),
            target_entity: record.target_entity,
            target_direction: record.target_direction,
            quantity: record.quantity,
        };
        let mut action = self.create(&record.key, record.subject, args)?;
        action.state = record.state;
        Ok(action)
    }

    /// Trait set declared for `key`, if registered.
    pub fn traits_of(&self, key: &str) -> Option<ActionTraits> {
        self.table.get(key).map(ActionSpec::traits)
    }

    /// Read-only view of the key → spec table.
    pub fn all(&self) -> &BTreeMap<&'static str, ActionSpec> {
        &self.table
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionState, Direction};
    use crate::test_support::{HERO, allow_any_object, allow_any_subject};

    fn registry() -> ActionRegistry {
        let mut registry = ActionRegistry::new();
        registry
            .register(
                "throw",
                ActionSpec::new(ActionTraits::SUBJECT_OBJECT_PREPOSITION_DIRECTION)
                    .subject_check(allow_any_subject)
                    .object_check(allow_any_object),
            )
            .unwrap();
        registry
    }

    #[test]
    fn unknown_key_is_a_lookup_error() {
        let registry = registry();
        let error = registry
            .create("juggle", HERO, ActionArgs::new())
            .unwrap_err();
        assert_eq!(error, RegistryError::UnknownAction("juggle".into()));
        assert!(!registry.exists("juggle"));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = registry();
        let error = registry
            .register("throw", ActionSpec::new(ActionTraits::SUBJECT_ONLY))
            .unwrap_err();
        assert_eq!(error, RegistryError::DuplicateKey("throw".into()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn create_fills_identity_and_starts_pending() {
        let registry = registry();
        let action = registry
            .create(
                "throw",
                HERO,
                ActionArgs::new()
                    .object(EntityId(4))
                    .direction(Direction::East),
            )
            .unwrap();

        assert_eq!(action.key(), "throw");
        assert_eq!(action.subject(), HERO);
        assert_eq!(action.objects(), &[EntityId(4)]);
        assert_eq!(action.target_direction(), Some(Direction::East));
        assert_eq!(action.quantity(), 0);
        assert_eq!(action.state(), ActionState::Pending);
        assert_eq!(
            registry.traits_of("throw"),
            Some(ActionTraits::SUBJECT_OBJECT_PREPOSITION_DIRECTION)
        );
    }

    #[test]
    fn restore_reproduces_every_getter() {
        let registry = registry();
        let record = ActionRecord {
            key: "throw".into(),
            subject: HERO,
            objects: vec![EntityId(4), EntityId(5)],
            target_entity: Some(EntityId(9)),
            target_direction: Some(Direction::NorthWest),
            quantity: 2,
            state: ActionState::PostFinish,
        };

        let action = registry.restore(&record).unwrap();

        assert_eq!(action.to_record(), record);
        assert_eq!(action.state(), ActionState::PostFinish);
        assert_eq!(action.traits(), registry.traits_of("throw").unwrap());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn record_distinguishes_absent_target_from_missing_field() {
        let registry = registry();
        let action = registry
            .create("throw", HERO, ActionArgs::new().object(EntityId(4)))
            .unwrap();

        let json = serde_json::to_value(action.to_record()).unwrap();
        assert!(json["target_entity"].is_null());
        assert!(json.as_object().unwrap().contains_key("target_entity"));

        let mut truncated = json.clone();
        truncated.as_object_mut().unwrap().remove("target_direction");
        assert!(serde_json::from_value::<ActionRecord>(truncated).is_err());

        let back: ActionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, action.to_record());
    }
}
