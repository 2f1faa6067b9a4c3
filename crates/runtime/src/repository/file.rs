//! File-based QueueRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{RepositoryError, Result};
use super::snapshot::QueueSnapshot;
use super::traits::{QueueRepository, validate_slot};

/// File-based implementation of [`QueueRepository`].
///
/// # File Format
///
/// Snapshots are stored as `queues_{slot}.json`, pretty-printed JSON. Writes
/// go to a temporary file first and are renamed into place.
pub struct FileQueueRepository {
    base_dir: PathBuf,
}

impl FileQueueRepository {
    /// Create a new file-based repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn snapshot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("queues_{}.json", slot))
    }
}

impl QueueRepository for FileQueueRepository {
    fn save(&self, slot: &str, snapshot: &QueueSnapshot) -> Result<()> {
        validate_slot(slot)?;
        let path = self.snapshot_path(slot);
        let temp_path = path.with_extension("json.tmp");

        let json = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(
            target: "runtime::repository",
            slot,
            actors = snapshot.actors.len(),
            path = %path.display(),
            "saved queue snapshot"
        );
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<QueueSnapshot>> {
        validate_slot(slot)?;
        let path = self.snapshot_path(slot);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let snapshot: QueueSnapshot =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))?;

        tracing::debug!(
            target: "runtime::repository",
            slot,
            path = %path.display(),
            "loaded queue snapshot"
        );
        Ok(Some(snapshot))
    }

    fn exists(&self, slot: &str) -> bool {
        validate_slot(slot).is_ok() && self.snapshot_path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let path = self.snapshot_path(slot);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot) = filename
                    .strip_prefix("queues_")
                    .and_then(|s| s.strip_suffix(".json"))
            {
                slots.push(slot.to_string());
            }
        }
        slots.sort_unstable();
        Ok(slots)
    }
}
