//! File-based SnapshotRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use room_core::{PlayerId, RoomId, RoomSnapshot, slot_key};

use super::error::{RepositoryError, Result};
use super::traits::SnapshotRepository;

/// File-based implementation of [`SnapshotRepository`].
///
/// Stores each slot as an individual JSON file named after the slot key,
/// `room-state-{room}-{player}.json`. JSON keeps the slot inspectable and
/// matches the shape the hosted backend stores for the same session.
pub struct FileSnapshotRepository {
    base_dir: PathBuf,
}

impl FileSnapshotRepository {
    /// Create a new file-based snapshot repository rooted at `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    /// Create a repository under the platform data directory.
    pub fn in_default_dir() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "escape-room")
            .ok_or(RepositoryError::NoBaseDir)?;
        Self::new(dirs.data_dir().join("snapshots"))
    }

    fn slot_path(&self, room_id: &RoomId, player_id: &PlayerId) -> PathBuf {
        self.base_dir
            .join(format!("{}.json", slot_key(room_id, player_id)))
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, snapshot: &RoomSnapshot) -> Result<()> {
        let path = self.slot_path(&snapshot.room_id, &snapshot.player_id);
        let temp_path = path.with_extension("json.tmp");

        let bytes =
            serde_json::to_vec(snapshot).map_err(|e| RepositoryError::Json(e.to_string()))?;

        // Write to temp file, then atomic rename
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!(
            "Saved snapshot for {} to {}",
            snapshot.room_id,
            path.display()
        );

        Ok(())
    }

    fn load(&self, room_id: &RoomId, player_id: &PlayerId) -> Result<Option<RoomSnapshot>> {
        let path = self.slot_path(room_id, player_id);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let snapshot: RoomSnapshot =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))?;

        tracing::debug!("Loaded snapshot for {} from {}", room_id, path.display());

        Ok(Some(snapshot))
    }

    fn exists(&self, room_id: &RoomId, player_id: &PlayerId) -> bool {
        self.slot_path(room_id, player_id).exists()
    }

    fn delete(&self, room_id: &RoomId, player_id: &PlayerId) -> Result<()> {
        let path = self.slot_path(room_id, player_id);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted snapshot for {}", room_id);
        }

        Ok(())
    }
}
