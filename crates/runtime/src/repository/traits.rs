//! Repository contract for saving and loading the player profile.

use crate::profile::PlayerProfile;
use crate::repository::Result;

/// Storage for one save slot.
pub trait ProfileRepository: Send + Sync {
    /// Save the profile, replacing any previous save.
    fn save(&self, profile: &PlayerProfile) -> Result<()>;

    /// Load the saved profile, `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<PlayerProfile>>;

    fn exists(&self) -> bool;

    fn delete(&self) -> Result<()>;

    /// Load the saved profile or start a fresh one.
    fn load_or_default(&self) -> Result<PlayerProfile> {
        Ok(self.load()?.unwrap_or_default())
    }
}
