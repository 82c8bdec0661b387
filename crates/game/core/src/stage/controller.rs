use crate::config::StageConfig;
use crate::env::{
    ActorHandle, ActorKind, AudioCue, StageEnv, TimerHandle, TimerToken, compute_seed,
};
use crate::geometry::Position;
use crate::observer::{Observers, SubscriptionId};
use crate::stage::{StageId, StageSession, StageState, StageTimer};

/// RNG context values (see [`compute_seed`]).
const ROLL_REWARD: u32 = 0;
const ROLL_SPAWN_X: u32 = 1;
const ROLL_SPAWN_Y: u32 = 2;

/// Drives one stage through its wave cycle.
///
/// The controller never holds on to collaborators: each entry point borrows a
/// [`StageEnv`] for the duration of the call. Timers come back through
/// [`on_timer`](Self::on_timer), enemy deaths through
/// [`on_enemy_destroyed`](Self::on_enemy_destroyed) and pickup overlaps
/// through [`on_reward_overlap`](Self::on_reward_overlap). Events for actors
/// the stage does not track are ignored, which is how a subscription ends.
#[derive(Debug)]
pub struct StageController {
    id: StageId,
    config: StageConfig,
    session: StageSession,
    game_seed: u64,
    draw_nonce: u64,
    tracked_enemies: Vec<ActorHandle>,
    ready_timer: Option<TimerHandle>,
    spawn_timer: Option<TimerHandle>,
    game_over_timer: Option<TimerHandle>,
    torn_down: bool,
    on_state_changed: Observers<StageState>,
}

impl StageController {
    pub fn new(id: StageId, config: StageConfig, game_seed: u64) -> Self {
        let config = config.normalized();
        let session = StageSession::from_config(&config);
        Self {
            id,
            config,
            session,
            game_seed,
            draw_nonce: 0,
            tracked_enemies: Vec::new(),
            ready_timer: None,
            spawn_timer: None,
            game_over_timer: None,
            torn_down: false,
            on_state_changed: Observers::new(),
        }
    }

    pub fn id(&self) -> StageId {
        self.id
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn session(&self) -> &StageSession {
        &self.session
    }

    pub fn state(&self) -> StageState {
        self.session.current_state
    }

    /// Enemies spawned this wave that are still alive.
    pub fn tracked_enemies(&self) -> &[ActorHandle] {
        &self.tracked_enemies
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn subscribe_state_changed(
        &mut self,
        callback: impl FnMut(&StageState) + Send + 'static,
    ) -> SubscriptionId {
        self.on_state_changed.subscribe(callback)
    }

    pub fn unsubscribe_state_changed(&mut self, id: SubscriptionId) -> bool {
        self.on_state_changed.unsubscribe(id)
    }

    /// Starts the ambient music and enters READY.
    pub fn begin_play(&mut self, env: &mut StageEnv<'_>) {
        let max_level = env.caps().max_level().max(1);
        if self.session.current_stage_level > max_level {
            tracing::warn!(
                stage = self.id.0,
                level = self.session.current_stage_level,
                max_level,
                "initial stage level above table, clamped"
            );
            self.session.current_stage_level = max_level;
        }

        tracing::info!(stage = self.id.0, "stage begin play");
        env.audio().play_loop(AudioCue::StageBgm);
        self.set_state(StageState::Ready, env);
    }

    /// Switches state and runs the entry actions of the new state.
    pub fn set_state(&mut self, state: StageState, env: &mut StageEnv<'_>) {
        if self.torn_down {
            tracing::debug!(stage = self.id.0, %state, "state change on torn down stage ignored");
            return;
        }

        let previous = self.session.current_state;
        self.cancel_state_timers(previous, env);
        self.session.current_state = state;

        tracing::info!(
            stage = self.id.0,
            from = %previous,
            to = %state,
            level = self.session.current_stage_level,
            target = self.session.target_enemy_count,
            "stage state changed"
        );
        self.on_state_changed.notify(&state);

        match state {
            StageState::Ready => self.enter_ready(env),
            StageState::Battle => self.enter_battle(env),
            StageState::Reward => self.enter_reward(env),
        }
    }

    /// Routes a fired timer back into the stage.
    pub fn on_timer(&mut self, timer: StageTimer, env: &mut StageEnv<'_>) {
        if self.torn_down {
            return;
        }

        match timer {
            StageTimer::Preparation => {
                self.ready_timer = None;
                if self.session.current_state == StageState::Ready {
                    self.set_state(StageState::Battle, env);
                } else {
                    tracing::debug!(stage = self.id.0, "stale preparation timer ignored");
                }
            }
            StageTimer::EnemySpawn => {
                if self.session.current_state == StageState::Battle && self.spawn_timer.is_some() {
                    self.spawn_enemy(env);
                } else {
                    tracing::debug!(stage = self.id.0, "stale spawn timer ignored");
                }
            }
            StageTimer::GameOver => {
                self.game_over_timer = None;
                self.play_game_over_music(env);
            }
        }
    }

    /// Handles the death of an enemy. Returns `false` if the stage does not
    /// track `enemy`.
    pub fn on_enemy_destroyed(&mut self, enemy: ActorHandle, env: &mut StageEnv<'_>) -> bool {
        let Some(index) = self.tracked_enemies.iter().position(|h| *h == enemy) else {
            return false;
        };
        self.tracked_enemies.swap_remove(index);

        self.session.accumulated_reward_amount += u64::from(self.session.current_stage_level);
        self.session.destroyed_enemy_count += 1;

        let killed = self.session.destroyed_enemy_count;
        let target = self.session.target_enemy_count;
        tracing::debug!(stage = self.id.0, %enemy, killed, target, "enemy destroyed");
        env.report("enemy_count_changed", |gm| gm.on_enemy_count_changed(killed, target));

        if killed >= target {
            env.report("enemy_killed", |gm| gm.on_enemy_killed(killed));

            self.session.current_enemy_count = 0;
            self.session.destroyed_enemy_count = 0;
            self.set_state(StageState::Reward, env);
        }

        true
    }

    /// Resolves the player touching a reward pickup. Returns `false` if the
    /// pickup is not one of this stage's active rewards.
    pub fn on_reward_overlap(&mut self, pickup: ActorHandle, env: &mut StageEnv<'_>) -> bool {
        if self.torn_down
            || self.session.current_state != StageState::Reward
            || !self.session.active_rewards.contains(&pickup)
        {
            return false;
        }

        for reward in std::mem::take(&mut self.session.active_rewards) {
            if reward != pickup && env.spawner().is_alive(reward) {
                env.spawner().destroy(reward);
            }
        }

        let nonce = self.next_draw();
        let roll = env
            .rng()
            .roll_percentile(compute_seed(self.game_seed, nonce, self.id.0, ROLL_REWARD));

        if roll < self.session.level_up_probability_percent {
            let max_level = env.caps().max_level().max(1);
            self.session.current_stage_level = (self.session.current_stage_level + 1).min(max_level);
            tracing::info!(
                stage = self.id.0,
                roll,
                level = self.session.current_stage_level,
                "reward raised stage level"
            );
        } else {
            self.session.target_enemy_count = self.session.target_enemy_count.saturating_add(1);
            tracing::info!(
                stage = self.id.0,
                roll,
                target = self.session.target_enemy_count,
                "reward raised wave size"
            );
        }

        self.set_state(StageState::Ready, env);
        true
    }

    /// Signals game over: returns the accumulated reward, fades the music and
    /// schedules the final report. The stage state is left as it is.
    pub fn game_over(&mut self, env: &mut StageEnv<'_>) {
        if self.torn_down {
            return;
        }

        self.session.game_over = true;
        let amount = self.session.accumulated_reward_amount;
        tracing::info!(stage = self.id.0, reward = amount, state = %self.session.current_state, "game over");

        env.report("reward_returned", |gm| gm.on_reward_returned(amount));
        env.report("new_game_count", |gm| gm.on_new_game_count());

        env.audio().fade_out(self.config.game_over_fade_seconds);

        if let Some(handle) = self.game_over_timer.take() {
            env.timers().cancel(handle);
        }
        let token = TimerToken::new(self.id, StageTimer::GameOver);
        self.game_over_timer =
            Some(env.timers().schedule(self.config.game_over_delay_seconds, false, token));
    }

    /// Cancels every pending timer and drops all enemy and pickup tracking.
    ///
    /// Must be called before the stage is unloaded; afterwards every entry
    /// point is a no-op.
    pub fn teardown(&mut self, env: &mut StageEnv<'_>) {
        if self.torn_down {
            return;
        }

        for handle in [
            self.ready_timer.take(),
            self.spawn_timer.take(),
            self.game_over_timer.take(),
        ]
        .into_iter()
        .flatten()
        {
            env.timers().cancel(handle);
        }

        self.tracked_enemies.clear();
        self.session.active_rewards.clear();
        self.torn_down = true;
        tracing::info!(stage = self.id.0, "stage torn down");
    }

    // ===== state entry =====

    fn enter_ready(&mut self, env: &mut StageEnv<'_>) {
        let true_level = self.session.true_stage_level();
        let killed = self.session.destroyed_enemy_count;
        let target = self.session.target_enemy_count;

        env.report("stage_advance", |gm| gm.on_stage_advance(true_level));
        env.report("stage_clear", |gm| gm.on_stage_clear(true_level.saturating_sub(1)));
        env.report("enemy_count_changed", |gm| gm.on_enemy_count_changed(killed, target));
        env.report("objective_visibility", |gm| gm.on_objective_visibility_changed(true));
        env.report("splendor_achievements", |gm| {
            gm.on_splendor_achievements_cleared(true_level.saturating_sub(1))
        });

        let token = TimerToken::new(self.id, StageTimer::Preparation);
        self.ready_timer = Some(env.timers().schedule(self.session.preparation_seconds, false, token));
    }

    fn enter_battle(&mut self, env: &mut StageEnv<'_>) {
        let token = TimerToken::new(self.id, StageTimer::EnemySpawn);
        self.spawn_timer = Some(env.timers().schedule(self.session.spawn_interval_seconds, true, token));
    }

    fn enter_reward(&mut self, env: &mut StageEnv<'_>) {
        env.report("objective_visibility", |gm| gm.on_objective_visibility_changed(false));
        self.session.accumulated_reward_amount += u64::from(self.session.current_stage_level);

        for reward in std::mem::take(&mut self.session.active_rewards) {
            if env.spawner().is_alive(reward) {
                env.spawner().destroy(reward);
            }
        }

        let mut spawned = Vec::with_capacity(self.session.reward_spawn_points.len());
        for (index, offset) in self.session.reward_spawn_points.iter().enumerate() {
            let position = self.config.origin + *offset;
            let kind = ActorKind::Reward { empty: index == 0 };
            match env.spawner().spawn_deferred(kind, position) {
                Some(handle) => spawned.push((handle, position)),
                None => tracing::warn!(stage = self.id.0, index, %position, "reward spawn failed"),
            }
        }

        for (handle, position) in spawned {
            env.spawner().finish_spawn(handle, position);
            self.session.active_rewards.push(handle);
        }

        tracing::debug!(
            stage = self.id.0,
            rewards = self.session.active_rewards.len(),
            "rewards spawned"
        );
    }

    // ===== battle =====

    fn spawn_enemy(&mut self, env: &mut StageEnv<'_>) {
        let nonce = self.next_draw();
        let extent = self.config.spawn_half_extent;
        let dx = env
            .rng()
            .range_f32(compute_seed(self.game_seed, nonce, self.id.0, ROLL_SPAWN_X), -extent, extent);
        let dy = env
            .rng()
            .range_f32(compute_seed(self.game_seed, nonce, self.id.0, ROLL_SPAWN_Y), -extent, extent);
        let position = self.config.origin + Position::new(dx, dy, self.config.spawn_height);

        let level = self.session.current_stage_level;
        match env.spawner().spawn_deferred(ActorKind::Enemy { level }, position) {
            Some(handle) => {
                env.spawner().finish_spawn(handle, position);
                self.tracked_enemies.push(handle);
                self.session.current_enemy_count += 1;
                tracing::debug!(
                    stage = self.id.0,
                    enemy = %handle,
                    %position,
                    level,
                    spawned = self.session.current_enemy_count,
                    "enemy spawned"
                );
            }
            None => tracing::warn!(stage = self.id.0, %position, "enemy spawn failed"),
        }

        if self.session.current_enemy_count >= self.session.target_enemy_count
            && let Some(handle) = self.spawn_timer.take()
        {
            env.timers().cancel(handle);
        }
    }

    fn play_game_over_music(&mut self, env: &mut StageEnv<'_>) {
        env.report("stage_level_uploaded", |gm| gm.on_stage_level_uploaded());

        let killed = self.session.destroyed_enemy_count;
        if killed < self.session.target_enemy_count {
            env.report("enemy_killed", |gm| gm.on_enemy_killed(killed));
        }

        env.audio().stop();
        env.audio().play_once(AudioCue::GameOver);
    }

    // ===== helpers =====

    fn cancel_state_timers(&mut self, leaving: StageState, env: &mut StageEnv<'_>) {
        let timer = match leaving {
            StageState::Ready => self.ready_timer.take(),
            StageState::Battle => self.spawn_timer.take(),
            StageState::Reward => None,
        };
        if let Some(handle) = timer {
            env.timers().cancel(handle);
        }
    }

    fn next_draw(&mut self) -> u64 {
        let nonce = self.draw_nonce;
        self.draw_nonce += 1;
        nonce
    }
}
