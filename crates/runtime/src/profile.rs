//! Persistent player save data.

use game_core::{ErrorSeverity, GameError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: u64, requested: u64 },
}

impl GameError for ProfileError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientFunds { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientFunds { .. } => "PROFILE_INSUFFICIENT_FUNDS",
        }
    }
}

/// Player-facing options stored with the profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    bgm_volume: f32,
    se_volume: f32,
    language: String,
    mouse_sensitivity: f32,
}

impl Settings {
    pub const DEFAULT_VOLUME: f32 = 1.0;
    pub const DEFAULT_SENSITIVITY: f32 = 1.0;
    pub const MIN_SENSITIVITY: f32 = 0.01;
    pub const DEFAULT_LANGUAGE: &'static str = "en";

    pub fn bgm_volume(&self) -> f32 {
        self.bgm_volume
    }

    pub fn se_volume(&self) -> f32 {
        self.se_volume
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }

    pub fn set_bgm_volume(&mut self, volume: f32) {
        self.bgm_volume = clamp_volume(volume);
    }

    pub fn set_se_volume(&mut self, volume: f32) {
        self.se_volume = clamp_volume(volume);
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn set_mouse_sensitivity(&mut self, sensitivity: f32) {
        if sensitivity.is_finite() {
            self.mouse_sensitivity = sensitivity.max(Self::MIN_SENSITIVITY);
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bgm_volume: Self::DEFAULT_VOLUME,
            se_volume: Self::DEFAULT_VOLUME,
            language: Self::DEFAULT_LANGUAGE.to_string(),
            mouse_sensitivity: Self::DEFAULT_SENSITIVITY,
        }
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) }
}

/// Save data that outlives a single run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProfile {
    pub money: u64,
    pub new_game_count: u32,
    pub best_stage_level: u32,
    pub total_kills: u64,
    pub money_spent: u64,
    pub settings: Settings,
}

impl PlayerProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the reward a finished run returned.
    pub fn deposit_reward(&mut self, amount: u64) {
        self.money = self.money.saturating_add(amount);
    }

    pub fn record_new_game(&mut self) {
        self.new_game_count = self.new_game_count.saturating_add(1);
    }

    /// Keeps the highest stage level ever reached.
    pub fn record_stage_level(&mut self, level: u32) {
        self.best_stage_level = self.best_stage_level.max(level);
    }

    pub fn record_kills(&mut self, kills: u32) {
        self.total_kills = self.total_kills.saturating_add(u64::from(kills));
    }

    /// Spends money in the shop.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::InsufficientFunds` and leaves the balance
    /// untouched when `amount` exceeds it.
    pub fn spend(&mut self, amount: u64) -> Result<u64, ProfileError> {
        if amount > self.money {
            return Err(ProfileError::InsufficientFunds {
                balance: self.money,
                requested: amount,
            });
        }
        self.money -= amount;
        self.money_spent = self.money_spent.saturating_add(amount);
        Ok(self.money)
    }
}
