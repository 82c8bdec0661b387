//! Deterministic stage and stat rules for the arena game.
//!
//! `game-core` defines the canonical gameplay rules (the stage state machine
//! and the character stat model) and exposes pure APIs that hosts drive from
//! their own game loop. Every engine capability the rules need is consumed
//! through the collaborator traits in [`env`], so the same rules run inside an
//! engine adapter, the headless runtime, or a unit test with a virtual clock.
pub mod config;
pub mod env;
pub mod error;
pub mod geometry;
pub mod observer;
pub mod stage;
pub mod stats;

pub use config::{GameConfig, StageConfig};
pub use env::{
    ActorHandle, ActorKind, ActorSpawner, Audio, AudioCue, GameMode, LevelTableOracle,
    OracleError, PcgRng, RngOracle, StageEnv, StatCapsOracle, StatTable, StatTables,
    TimerHandle, TimerService, TimerToken, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use geometry::Position;
pub use observer::{Observers, SubscriptionId};
pub use stage::{StageController, StageId, StageSession, StageState, StageTimer};
pub use stats::{CharacterStat, HpChange, StatSheet};
