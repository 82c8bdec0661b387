//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON/TOML file into the game-core or content type the
//! runtime consumes; [`ContentFactory`] loads a whole data directory.

pub mod config;
pub mod factory;
pub mod scrolls;
pub mod stats;

pub use config::{ConfigLoader, StageFile};
pub use factory::{Content, ContentFactory};
pub use scrolls::ScrollLoader;
pub use stats::{StatTableLoader, StatTableSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
