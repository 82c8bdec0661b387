//! File-based ProfileRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::profile::PlayerProfile;
use crate::repository::{ProfileRepository, RepositoryError, Result};

/// Stores the profile as pretty JSON at `{base_dir}/{slot}.json`.
///
/// Writes go to a temporary file first and are renamed into place, so a crash
/// mid-save leaves the previous save intact.
pub struct FileProfileRepository {
    base_dir: PathBuf,
    slot: String,
}

impl FileProfileRepository {
    pub const DEFAULT_SLOT: &'static str = "profile";

    /// Create a repository for the default slot, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        Self::with_slot(base_dir, Self::DEFAULT_SLOT)
    }

    pub fn with_slot(base_dir: impl AsRef<Path>, slot: impl Into<String>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self {
            base_dir,
            slot: slot.into(),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.base_dir.join(format!("{}.json", self.slot))
    }
}

impl ProfileRepository for FileProfileRepository {
    fn save(&self, profile: &PlayerProfile) -> Result<()> {
        let path = self.path();
        let temp_path = path.with_extension("json.tmp");

        let json = serde_json::to_vec_pretty(profile)?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved profile to {}", path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<PlayerProfile>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let profile = serde_json::from_slice(&bytes)?;

        tracing::debug!("Loaded profile from {}", path.display());
        Ok(Some(profile))
    }

    fn exists(&self) -> bool {
        self.path().exists()
    }

    fn delete(&self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted profile {}", path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let repo = FileProfileRepository::new(dir.path()).unwrap();
        assert!(repo.load().unwrap().is_none());

        let mut profile = PlayerProfile::new();
        profile.deposit_reward(12);
        profile.settings.set_language("ko");
        repo.save(&profile).unwrap();

        assert!(repo.exists());
        assert_eq!(repo.load().unwrap(), Some(profile));
    }

    #[test]
    fn slots_are_independent() {
        let dir = TempDir::new().unwrap();
        let a = FileProfileRepository::with_slot(dir.path(), "a").unwrap();
        let b = FileProfileRepository::with_slot(dir.path(), "b").unwrap();

        a.save(&PlayerProfile::new()).unwrap();

        assert!(a.exists());
        assert!(!b.exists());
    }

    #[test]
    fn corrupted_save_is_an_error() {
        let dir = TempDir::new().unwrap();
        let repo = FileProfileRepository::new(dir.path()).unwrap();
        fs::write(repo.path(), b"{not json").unwrap();

        assert!(matches!(repo.load(), Err(RepositoryError::Json(_))));
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let repo = FileProfileRepository::new(dir.path()).unwrap();
        repo.save(&PlayerProfile::new()).unwrap();

        repo.delete().unwrap();
        repo.delete().unwrap();
        assert!(!repo.exists());
    }
}
