//! Repository layer for the player's save data.
//!
//! Repositories handle data that outlives a run (money, totals, settings).
//! Static content (level tables, scrolls, stage tuning) is loaded by
//! `game-content`, not stored here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileProfileRepository;
pub use memory::InMemoryProfileRepository;
pub use traits::ProfileRepository;
