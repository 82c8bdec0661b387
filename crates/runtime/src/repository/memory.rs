//! In-memory ProfileRepository for tests and throwaway runs.

use std::sync::Mutex;

use crate::profile::PlayerProfile;
use crate::repository::{ProfileRepository, RepositoryError, Result};

#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profile: Mutex<Option<PlayerProfile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: PlayerProfile) -> Self {
        Self {
            profile: Mutex::new(Some(profile)),
        }
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn save(&self, profile: &PlayerProfile) -> Result<()> {
        let mut slot = self
            .profile
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(profile.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<PlayerProfile>> {
        let slot = self
            .profile
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slot.clone())
    }

    fn exists(&self) -> bool {
        self.profile
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    fn delete(&self) -> Result<()> {
        let mut slot = self
            .profile
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_or_default_starts_fresh() {
        let repo = InMemoryProfileRepository::new();
        assert_eq!(repo.load_or_default().unwrap(), PlayerProfile::default());

        let mut profile = PlayerProfile::new();
        profile.record_new_game();
        repo.save(&profile).unwrap();
        assert_eq!(repo.load_or_default().unwrap().new_game_count, 1);

        repo.delete().unwrap();
        assert!(!repo.exists());
    }
}
