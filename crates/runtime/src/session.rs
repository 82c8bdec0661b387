//! Session orchestrator.
//!
//! A [`Session`] owns one stage and every collaborator it needs, advances the
//! virtual clock and routes the resulting events back into the stage:
//!
//! ```text
//! advance(dt) ──► VirtualClock::pop_due ──► StageController::on_timer
//! damage_enemy ──► World::damage ──► death ──► StageController::on_enemy_destroyed
//! pick_reward ──► StageController::on_reward_overlap ──► player scroll bonus
//! ```

use std::sync::Arc;

use game_content::{Content, ScrollCatalog};
use game_core::{
    ActorHandle, ActorKind, ActorSpawner, CharacterStat, GameConfig, GameMode, PcgRng,
    StageConfig, StageController, StageEnv, StageId, StageState, StatSheet, StatTable,
};
use serde::Serialize;

use crate::audio::AudioRecorder;
use crate::clock::VirtualClock;
use crate::error::{Result, RuntimeError};
use crate::game_mode::{HudView, SessionGameMode};
use crate::profile::PlayerProfile;
use crate::world::World;

/// Parameters of one run.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub stage_id: StageId,
    pub game_seed: u64,
    pub player_level: u32,
    pub game: GameConfig,
    pub stage: StageConfig,
}

impl SessionConfig {
    pub fn new(game_seed: u64) -> Self {
        Self {
            stage_id: StageId(0),
            game_seed,
            player_level: 1,
            game: GameConfig::default(),
            stage: StageConfig::default(),
        }
    }

    pub fn with_player_level(mut self, level: u32) -> Self {
        self.player_level = level;
        self
    }

    pub fn with_stage(mut self, stage: StageConfig) -> Self {
        self.stage = stage;
        self
    }

    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }
}

/// Result of touching a reward pickup.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RewardOutcome {
    /// The stage was not waiting for this pickup.
    Ignored,
    /// The decoy; the stage advanced but nothing was granted.
    Empty,
    /// A scroll bonus was added to the player.
    Scroll { name: String },
}

/// End-of-run report.
#[derive(Clone, Debug, Serialize)]
pub struct SessionSummary {
    pub elapsed_seconds: f64,
    pub state: StageState,
    pub stage_level: u32,
    pub target_enemy_count: u32,
    pub accumulated_reward: u64,
    pub reward_cycles: u32,
    pub game_over: bool,
    pub hud: HudView,
    pub scrolls: Vec<String>,
    pub player_stat: CharacterStat,
    pub player_hp: f32,
    pub reports: usize,
}

/// Engine services lent to the stage on every call.
struct Host {
    world: World,
    clock: VirtualClock,
    game_mode: SessionGameMode,
    audio: AudioRecorder,
    tables: Arc<StatTable>,
    rng: PcgRng,
}

impl Host {
    fn env(&mut self) -> StageEnv<'_> {
        StageEnv::new(
            &mut self.world,
            &mut self.clock,
            &mut self.audio,
            Some(&mut self.game_mode as &mut dyn GameMode),
            self.tables.as_ref(),
            &self.rng,
        )
    }
}

pub struct Session {
    stage: StageController,
    host: Host,
    player: StatSheet,
    scrolls: ScrollCatalog,
    granted: Vec<String>,
    reward_cycles: u32,
    torn_down: bool,
}

impl Session {
    pub fn new(
        config: SessionConfig,
        tables: Arc<StatTable>,
        scrolls: ScrollCatalog,
        profile: PlayerProfile,
    ) -> Self {
        let player = StatSheet::new(config.player_level, tables.as_tables());
        let world = World::new(&config.game, Arc::clone(&tables));
        Self {
            stage: StageController::new(config.stage_id, config.stage, config.game_seed),
            host: Host {
                world,
                clock: VirtualClock::new(),
                game_mode: SessionGameMode::new(profile),
                audio: AudioRecorder::new(),
                tables,
                rng: PcgRng,
            },
            player,
            scrolls,
            granted: Vec::new(),
            reward_cycles: 0,
            torn_down: false,
        }
    }

    /// Builds a session from loaded content.
    pub fn from_content(content: Content, game_seed: u64, profile: PlayerProfile) -> Self {
        let config = SessionConfig::new(game_seed)
            .with_game(content.game)
            .with_stage(content.stage);
        Self::new(config, Arc::new(content.stats), content.scrolls, profile)
    }

    // ===== accessors =====

    pub fn stage(&self) -> &StageController {
        &self.stage
    }

    pub fn state(&self) -> StageState {
        self.stage.state()
    }

    pub fn world(&self) -> &World {
        &self.host.world
    }

    pub fn clock(&self) -> &VirtualClock {
        &self.host.clock
    }

    pub fn game_mode(&self) -> &SessionGameMode {
        &self.host.game_mode
    }

    pub fn audio(&self) -> &AudioRecorder {
        &self.host.audio
    }

    pub fn player(&self) -> &StatSheet {
        &self.player
    }

    pub fn profile(&self) -> &PlayerProfile {
        self.host.game_mode.profile()
    }

    pub fn reward_cycles(&self) -> u32 {
        self.reward_cycles
    }

    pub fn is_game_over(&self) -> bool {
        self.stage.session().game_over
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Hands the profile back for persisting.
    pub fn into_profile(self) -> PlayerProfile {
        self.host.game_mode.into_profile()
    }

    // ===== driving =====

    pub fn begin_play(&mut self) {
        tracing::info!(
            stage = self.stage.id().0,
            player_level = self.player.level(),
            "session begin play"
        );
        self.stage.begin_play(&mut self.host.env());
    }

    /// Advances virtual time by `dt` seconds and delivers every timer that
    /// fires on the way. Returns the number of timers delivered.
    pub fn advance(&mut self, dt: f64) -> usize {
        if self.torn_down || !dt.is_finite() || dt <= 0.0 {
            return 0;
        }

        let until = self.host.clock.now() + dt;
        let mut fired = 0;
        while let Some(token) = self.host.clock.pop_due(until) {
            fired += 1;
            if token.stage != self.stage.id() {
                tracing::warn!(stage = token.stage.0, timer = %token.timer, "timer for unknown stage");
                continue;
            }
            self.stage.on_timer(token.timer, &mut self.host.env());
        }
        self.host.clock.set_now(until);
        fired
    }

    /// Damages an enemy. If it dies, it is removed from the world and the
    /// stage is told. Returns the enemy's remaining HP.
    pub fn damage_enemy(&mut self, enemy: ActorHandle, amount: f32) -> Result<f32> {
        self.ensure_live()?;
        match self.host.world.get(enemy) {
            None => return Err(RuntimeError::UnknownActor(enemy)),
            Some(actor) if !matches!(actor.kind(), ActorKind::Enemy { .. }) => {
                return Err(RuntimeError::NotAnEnemy(enemy));
            }
            Some(_) => {}
        }

        let hp = self
            .host
            .world
            .damage(enemy, amount)
            .ok_or(RuntimeError::UnknownActor(enemy))?;

        for dead in self.host.world.drain_deaths() {
            self.host.world.destroy(dead);
            self.stage.on_enemy_destroyed(dead, &mut self.host.env());
        }
        Ok(hp)
    }

    /// The player touches a reward pickup.
    ///
    /// Pickup `i` of the wave grants scroll `i - 1` of the catalogue (cycling);
    /// the decoy at index 0 grants nothing. The touched pickup is consumed.
    pub fn pick_reward(&mut self, pickup: ActorHandle) -> Result<RewardOutcome> {
        self.ensure_live()?;
        let empty = match self.host.world.get(pickup).map(|actor| actor.kind()) {
            Some(ActorKind::Reward { empty }) => empty,
            Some(_) => return Err(RuntimeError::NotAReward(pickup)),
            None => return Err(RuntimeError::UnknownActor(pickup)),
        };
        let index = self
            .stage
            .session()
            .active_rewards
            .iter()
            .position(|handle| *handle == pickup);

        if !self.stage.on_reward_overlap(pickup, &mut self.host.env()) {
            return Ok(RewardOutcome::Ignored);
        }
        self.host.world.destroy(pickup);
        self.reward_cycles += 1;

        let scroll = match index {
            Some(i) if i > 0 && !empty => self.scrolls.nth_cycled(i - 1).cloned(),
            _ => None,
        };
        let Some(scroll) = scroll else {
            tracing::info!(%pickup, "empty reward picked");
            return Ok(RewardOutcome::Empty);
        };

        self.player
            .add_scroll_stat(scroll.bonus, self.host.tables.as_ref());
        tracing::info!(
            %pickup,
            scroll = %scroll.name,
            max_hp = self.player.max_hp(),
            hp = self.player.current_hp(),
            "scroll granted"
        );
        self.granted.push(scroll.name.clone());
        Ok(RewardOutcome::Scroll { name: scroll.name })
    }

    /// Damages the player; the run ends when HP reaches zero. Returns the
    /// remaining HP.
    pub fn damage_player(&mut self, amount: f32) -> Result<f32> {
        self.ensure_live()?;
        let hp = self.player.apply_damage(amount);
        if self.player.is_dead() && !self.is_game_over() {
            tracing::info!("player died");
            self.game_over()?;
        }
        Ok(hp)
    }

    pub fn heal_player(&mut self, percent: f32) -> Result<f32> {
        self.ensure_live()?;
        self.player.heal_hp_ratio(percent);
        Ok(self.player.current_hp())
    }

    /// Ends the run. Only the first call reaches the stage.
    pub fn game_over(&mut self) -> Result<()> {
        self.ensure_live()?;
        if self.is_game_over() {
            tracing::debug!("game over already signalled");
            return Ok(());
        }
        self.stage.game_over(&mut self.host.env());
        Ok(())
    }

    /// Stops the stage: cancels its timers and drops every tracked actor.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.stage.teardown(&mut self.host.env());
        self.torn_down = true;
    }

    pub fn summary(&self) -> SessionSummary {
        let stage = self.stage.session();
        SessionSummary {
            elapsed_seconds: self.host.clock.now(),
            state: stage.current_state,
            stage_level: stage.current_stage_level,
            target_enemy_count: stage.target_enemy_count,
            accumulated_reward: stage.accumulated_reward_amount,
            reward_cycles: self.reward_cycles,
            game_over: stage.game_over,
            hud: self.host.game_mode.hud().clone(),
            scrolls: self.granted.clone(),
            player_stat: self.player.total_stat(),
            player_hp: self.player.current_hp(),
            reports: self.host.game_mode.events().len(),
        }
    }

    fn ensure_live(&self) -> Result<()> {
        if self.torn_down {
            return Err(RuntimeError::TornDown);
        }
        Ok(())
    }
}
