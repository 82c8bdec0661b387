//! Headless host for The Infinity Room stage rules.
//!
//! game-core decides *what* happens; this crate provides the engine services a
//! stage expects and wires them into a playable [`Session`]:
//! - [`clock`] drives timers on a virtual time line
//! - [`world`] is the actor arena enemies and pickups live in
//! - [`game_mode`] records game-mode reports and keeps the HUD view
//! - [`audio`] tracks the music the stage requests
//! - [`profile`] and [`repository`] hold and persist the player's save data
//! - [`session`] owns all of the above and routes events between them
pub mod audio;
pub mod clock;
pub mod error;
pub mod game_mode;
pub mod profile;
pub mod repository;
pub mod session;
pub mod world;

pub use audio::{AudioCommand, AudioRecorder};
pub use clock::VirtualClock;
pub use error::{Result, RuntimeError};
pub use game_mode::{GameModeEvent, HudView, SessionGameMode};
pub use profile::{PlayerProfile, ProfileError, Settings};
pub use repository::{
    FileProfileRepository, InMemoryProfileRepository, ProfileRepository, RepositoryError,
};
pub use session::{RewardOutcome, Session, SessionConfig, SessionSummary};
pub use world::{Actor, ActorPhase, World};
