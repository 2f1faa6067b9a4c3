//! Repository contract for saving and loading queue snapshots.

use super::error::Result;
use super::snapshot::QueueSnapshot;

/// Repository for queue snapshot persistence, indexed by slot name.
pub trait QueueRepository {
    /// Save a snapshot under `slot`, replacing any previous one.
    fn save(&self, slot: &str, snapshot: &QueueSnapshot) -> Result<()>;

    /// Load the snapshot stored under `slot`.
    fn load(&self, slot: &str) -> Result<Option<QueueSnapshot>>;

    fn exists(&self, slot: &str) -> bool;

    fn delete(&self, slot: &str) -> Result<()>;

    /// List all stored slot names in ascending order.
    fn list_slots(&self) -> Result<Vec<String>>;
}

/// Slot names become file names, so they are kept to a safe alphabet.
pub(crate) fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(super::RepositoryError::InvalidSlot(slot.to_string()))
    }
}
