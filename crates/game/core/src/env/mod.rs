//! Collaborator traits consumed by the rules.
//!
//! Read-only oracles expose level tables, stat caps and randomness; mutable
//! collaborators spawn actors, schedule timers, play audio and receive
//! game-mode reports. [`StageEnv`] bundles one call's worth of them so the
//! stage can reach everything it needs without hard coupling to a host.
mod audio;
mod error;
mod game_mode;
mod rng;
mod spawner;
mod tables;
mod timer;

pub use audio::{Audio, AudioCue};
pub use error::OracleError;
pub use game_mode::GameMode;
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use spawner::{ActorHandle, ActorKind, ActorSpawner};
pub use tables::{LevelTableOracle, StatCapsOracle, StatTable, StatTables};
pub use timer::{TimerHandle, TimerService, TimerToken};

/// Collaborators lent to a stage for the duration of one call.
///
/// The game mode is optional: a stage running without one (editor previews,
/// tests) keeps its own bookkeeping and skips every report.
pub struct StageEnv<'a> {
    spawner: &'a mut dyn ActorSpawner,
    timers: &'a mut dyn TimerService,
    audio: &'a mut dyn Audio,
    game_mode: Option<&'a mut dyn GameMode>,
    caps: &'a dyn StatCapsOracle,
    rng: &'a dyn RngOracle,
}

impl<'a> StageEnv<'a> {
    pub fn new(
        spawner: &'a mut dyn ActorSpawner,
        timers: &'a mut dyn TimerService,
        audio: &'a mut dyn Audio,
        game_mode: Option<&'a mut dyn GameMode>,
        caps: &'a dyn StatCapsOracle,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            spawner,
            timers,
            audio,
            game_mode,
            caps,
            rng,
        }
    }

    pub fn spawner(&mut self) -> &mut dyn ActorSpawner {
        &mut *self.spawner
    }

    pub fn timers(&mut self) -> &mut dyn TimerService {
        &mut *self.timers
    }

    pub fn audio(&mut self) -> &mut dyn Audio {
        &mut *self.audio
    }

    pub fn caps(&self) -> &'a dyn StatCapsOracle {
        self.caps
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn has_game_mode(&self) -> bool {
        self.game_mode.is_some()
    }

    /// Runs `report` against the game mode, or logs and skips if none is set.
    pub fn report(&mut self, what: &'static str, report: impl FnOnce(&mut dyn GameMode)) {
        match self.game_mode.as_deref_mut() {
            Some(game_mode) => report(game_mode),
            None => tracing::debug!(report = what, "no game mode, report skipped"),
        }
    }
}
