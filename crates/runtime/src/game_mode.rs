//! Game-mode collaborator for a headless session.
//!
//! Every report from the stage is kept as a [`GameModeEvent`]. The recorder
//! also maintains the HUD values a player would see and forwards the
//! persistent totals (money, kills, best level) to the [`PlayerProfile`].

use game_core::GameMode;
use serde::{Deserialize, Serialize};

use crate::profile::PlayerProfile;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameModeEvent {
    StageAdvanced { level: u32 },
    StageCleared { level: u32 },
    EnemyCountChanged { killed: u32, target: u32 },
    ObjectiveVisibilityChanged { visible: bool },
    RewardReturned { amount: u64 },
    NewGameCounted,
    StageLevelUploaded { level: u32 },
    EnemyKilled { count: u32 },
    SplendorAchievementsCleared { level: u32 },
}

/// What the in-game HUD shows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudView {
    pub stage_level: u32,
    pub cleared_level: u32,
    pub killed: u32,
    pub target: u32,
    pub objective_visible: bool,
}

#[derive(Clone, Debug, Default)]
pub struct SessionGameMode {
    events: Vec<GameModeEvent>,
    hud: HudView,
    profile: PlayerProfile,
    splendor_level: u32,
}

impl SessionGameMode {
    pub fn new(profile: PlayerProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    pub fn events(&self) -> &[GameModeEvent] {
        &self.events
    }

    pub fn hud(&self) -> &HudView {
        &self.hud
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut PlayerProfile {
        &mut self.profile
    }

    pub fn into_profile(self) -> PlayerProfile {
        self.profile
    }

    /// Highest level whose splendor achievements were cleared.
    pub fn splendor_level(&self) -> u32 {
        self.splendor_level
    }

    fn record(&mut self, event: GameModeEvent) {
        tracing::debug!(?event, "game mode report");
        self.events.push(event);
    }
}

impl GameMode for SessionGameMode {
    fn on_stage_advance(&mut self, level: u32) {
        self.hud.stage_level = level;
        self.record(GameModeEvent::StageAdvanced { level });
    }

    fn on_stage_clear(&mut self, level: u32) {
        self.hud.cleared_level = level;
        self.record(GameModeEvent::StageCleared { level });
    }

    fn on_enemy_count_changed(&mut self, killed: u32, target: u32) {
        self.hud.killed = killed;
        self.hud.target = target;
        self.record(GameModeEvent::EnemyCountChanged { killed, target });
    }

    fn on_objective_visibility_changed(&mut self, visible: bool) {
        self.hud.objective_visible = visible;
        self.record(GameModeEvent::ObjectiveVisibilityChanged { visible });
    }

    fn on_reward_returned(&mut self, amount: u64) {
        self.profile.deposit_reward(amount);
        self.record(GameModeEvent::RewardReturned { amount });
    }

    fn on_new_game_count(&mut self) {
        self.profile.record_new_game();
        self.record(GameModeEvent::NewGameCounted);
    }

    fn on_stage_level_uploaded(&mut self) {
        let level = self.hud.stage_level;
        self.profile.record_stage_level(level);
        self.record(GameModeEvent::StageLevelUploaded { level });
    }

    fn on_enemy_killed(&mut self, count: u32) {
        self.profile.record_kills(count);
        self.record(GameModeEvent::EnemyKilled { count });
    }

    fn on_splendor_achievements_cleared(&mut self, level: u32) {
        self.splendor_level = self.splendor_level.max(level);
        self.record(GameModeEvent::SplendorAchievementsCleared { level });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_update_hud() {
        let mut mode = SessionGameMode::default();
        mode.on_stage_advance(3);
        mode.on_stage_clear(2);
        mode.on_enemy_count_changed(1, 4);
        mode.on_objective_visibility_changed(true);

        assert_eq!(
            *mode.hud(),
            HudView {
                stage_level: 3,
                cleared_level: 2,
                killed: 1,
                target: 4,
                objective_visible: true,
            }
        );
        assert_eq!(mode.events().len(), 4);
    }

    #[test]
    fn end_of_run_reports_reach_profile() {
        let mut mode = SessionGameMode::new(PlayerProfile::new());
        mode.on_stage_advance(6);
        mode.on_enemy_killed(4);
        mode.on_reward_returned(42);
        mode.on_new_game_count();
        mode.on_stage_level_uploaded();

        let profile = mode.into_profile();
        assert_eq!(profile.money, 42);
        assert_eq!(profile.total_kills, 4);
        assert_eq!(profile.new_game_count, 1);
        assert_eq!(profile.best_stage_level, 6);
    }

    #[test]
    fn events_serialize_with_tag() {
        let json = serde_json::to_string(&GameModeEvent::EnemyKilled { count: 2 }).unwrap();
        assert_eq!(json, r#"{"event":"enemy_killed","count":2}"#);
    }
}
