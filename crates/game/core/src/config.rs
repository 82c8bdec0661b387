use arrayvec::ArrayVec;

use crate::geometry::Position;

/// Game configuration constants and tunable parameters shared by every stage.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Upper bound on simultaneously live actors (enemies + pickups).
    /// Spawns beyond this limit fail and are skipped by the stage.
    pub max_actors: usize,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of reward spawn points a stage can carry.
    pub const MAX_REWARD_POINTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_ACTORS: usize = 256;

    pub fn new() -> Self {
        Self {
            max_actors: Self::DEFAULT_MAX_ACTORS,
        }
    }

    pub fn with_max_actors(max_actors: usize) -> Self {
        Self { max_actors }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Reward spawn points, relative to the stage origin.
pub type RewardPoints = ArrayVec<Position, { GameConfig::MAX_REWARD_POINTS }>;

/// Per-stage tuning: timings, wave size, spawn geometry and reward odds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StageConfig {
    /// World position of the stage; spawn offsets are relative to it.
    pub origin: Position,
    /// Delay between entering READY and starting the battle.
    pub preparation_seconds: f32,
    /// Cadence of enemy spawns while in BATTLE.
    pub spawn_interval_seconds: f32,
    /// Wave size of the first battle.
    pub initial_target_enemy_count: u32,
    /// Enemy level of the first battle.
    pub initial_stage_level: u32,
    /// Chance (0..=100) that a picked reward raises the stage level
    /// instead of the wave size.
    pub level_up_probability_percent: u32,
    /// Enemies spawn uniformly inside `[-extent, extent]` on both ground axes.
    pub spawn_half_extent: f32,
    /// Height offset applied to every enemy spawn.
    pub spawn_height: f32,
    /// Pickup locations; the first one always holds the empty decoy.
    pub reward_spawn_points: RewardPoints,
    /// Ambient music fade-out duration on game over.
    pub game_over_fade_seconds: f32,
    /// Delay between game over and the final report / game-over cue.
    pub game_over_delay_seconds: f32,
}

impl StageConfig {
    pub const DEFAULT_PREPARATION_SECONDS: f32 = 2.0;
    pub const DEFAULT_SPAWN_INTERVAL_SECONDS: f32 = 0.2;
    pub const DEFAULT_LEVEL_UP_PROBABILITY: u32 = 40;
    pub const DEFAULT_SPAWN_HALF_EXTENT: f32 = 800.0;
    pub const DEFAULT_SPAWN_HEIGHT: f32 = 255.0;
    pub const DEFAULT_GAME_OVER_SECONDS: f32 = 2.0;

    /// Shortest timer period accepted for repeating spawns.
    pub const MIN_SPAWN_INTERVAL_SECONDS: f32 = 0.01;

    pub fn new() -> Self {
        let mut reward_spawn_points = RewardPoints::new();
        reward_spawn_points.push(Position::new(700.0, 600.0, 170.0));
        reward_spawn_points.push(Position::new(700.0, 200.0, 170.0));
        reward_spawn_points.push(Position::new(700.0, -200.0, 170.0));
        reward_spawn_points.push(Position::new(700.0, -600.0, 170.0));

        Self {
            origin: Position::ORIGIN,
            preparation_seconds: Self::DEFAULT_PREPARATION_SECONDS,
            spawn_interval_seconds: Self::DEFAULT_SPAWN_INTERVAL_SECONDS,
            initial_target_enemy_count: 1,
            initial_stage_level: 1,
            level_up_probability_percent: Self::DEFAULT_LEVEL_UP_PROBABILITY,
            spawn_half_extent: Self::DEFAULT_SPAWN_HALF_EXTENT,
            spawn_height: Self::DEFAULT_SPAWN_HEIGHT,
            reward_spawn_points,
            game_over_fade_seconds: Self::DEFAULT_GAME_OVER_SECONDS,
            game_over_delay_seconds: Self::DEFAULT_GAME_OVER_SECONDS,
        }
    }

    /// Clamps every field into its valid range.
    ///
    /// Probability is capped at 100, counts and levels are at least 1, and
    /// durations are non-negative (the spawn interval has a small floor so a
    /// repeating timer always advances the clock).
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.preparation_seconds = self.preparation_seconds.max(0.0);
        self.spawn_interval_seconds = self
            .spawn_interval_seconds
            .max(Self::MIN_SPAWN_INTERVAL_SECONDS);
        self.initial_target_enemy_count = self.initial_target_enemy_count.max(1);
        self.initial_stage_level = self.initial_stage_level.max(1);
        self.level_up_probability_percent = self.level_up_probability_percent.min(100);
        self.spawn_half_extent = self.spawn_half_extent.abs();
        self.game_over_fade_seconds = self.game_over_fade_seconds.max(0.0);
        self.game_over_delay_seconds = self.game_over_delay_seconds.max(0.0);
        self
    }

    pub fn with_target_enemy_count(mut self, count: u32) -> Self {
        self.initial_target_enemy_count = count;
        self
    }

    pub fn with_level_up_probability(mut self, percent: u32) -> Self {
        self.level_up_probability_percent = percent;
        self
    }

    pub fn with_stage_level(mut self, level: u32) -> Self {
        self.initial_stage_level = level;
        self
    }
}

impl Default for StageConfig {
    fn default() -> Self {
        Self::new()
    }
}
