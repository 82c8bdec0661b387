//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Character level tables and stat caps (data-driven via RON)
//! - Scroll catalogue granted by reward pickups (data-driven via RON)
//! - Stage and world configuration (data-driven via TOML)
//!
//! Content is consumed by the runtime host and never appears in stage state.

pub mod scroll;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scroll::{ScrollCatalog, ScrollDefinition};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, Content, ContentFactory, LoadResult, ScrollLoader, StageFile, StatTableLoader,
    StatTableSpec,
};
