//! In-memory QueueRepository for tests and throwaway sessions.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::error::{RepositoryError, Result};
use super::snapshot::QueueSnapshot;
use super::traits::{QueueRepository, validate_slot};

#[derive(Debug, Default)]
pub struct InMemoryQueueRepository {
    slots: RwLock<BTreeMap<String, QueueSnapshot>>,
}

impl InMemoryQueueRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueueRepository for InMemoryQueueRepository {
    fn save(&self, slot: &str, snapshot: &QueueSnapshot) -> Result<()> {
        validate_slot(slot)?;
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.insert(slot.to_string(), snapshot.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<QueueSnapshot>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.slots
            .read()
            .is_ok_and(|slots| slots.contains_key(slot))
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.keys().cloned().collect())
    }
}
