use crate::config::{RewardPoints, StageConfig};
use crate::env::ActorHandle;
use crate::stage::StageState;

/// Mutable bookkeeping of one stage.
///
/// Counters obey `destroyed ≤ current ≤ target` while in BATTLE; both
/// `current` and `destroyed` return to zero when the wave is cleared.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageSession {
    pub current_state: StageState,
    pub preparation_seconds: f32,
    pub spawn_interval_seconds: f32,
    pub target_enemy_count: u32,
    pub current_enemy_count: u32,
    pub destroyed_enemy_count: u32,
    pub current_stage_level: u32,
    /// Never decreases within a session.
    pub accumulated_reward_amount: u64,
    pub reward_spawn_points: RewardPoints,
    /// Pickups spawned for the current REWARD phase.
    pub active_rewards: Vec<ActorHandle>,
    pub level_up_probability_percent: u32,
    /// Set once game over has been signalled.
    pub game_over: bool,
}

impl StageSession {
    pub fn from_config(config: &StageConfig) -> Self {
        Self {
            current_state: StageState::Ready,
            preparation_seconds: config.preparation_seconds,
            spawn_interval_seconds: config.spawn_interval_seconds,
            target_enemy_count: config.initial_target_enemy_count,
            current_enemy_count: 0,
            destroyed_enemy_count: 0,
            current_stage_level: config.initial_stage_level,
            accumulated_reward_amount: 0,
            reward_spawn_points: config.reward_spawn_points.clone(),
            active_rewards: Vec::new(),
            level_up_probability_percent: config.level_up_probability_percent,
            game_over: false,
        }
    }

    /// Stage level as shown to the player: every extra enemy in the wave counts
    /// as one more level.
    pub fn true_stage_level(&self) -> u32 {
        self.current_stage_level
            .saturating_add(self.target_enemy_count)
            .saturating_sub(1)
    }

    /// Checks the wave counter ordering.
    pub fn counters_consistent(&self) -> bool {
        self.destroyed_enemy_count <= self.current_enemy_count
            && self.current_enemy_count <= self.target_enemy_count
    }
}
