//! Character stat system.
//!
//! A character's total stat is composed from three layers and clamped to the
//! global caps:
//!
//! ```text
//! total = clamp(base(level) + weapon + Σ scrolls, max_stat)
//! ```
//!
//! [`StatSheet`] owns the layers, current HP and level; [`CharacterStat`] is the
//! additive record every layer is expressed in.

pub mod character;
pub mod sheet;

pub use character::CharacterStat;
pub use sheet::{HP_EPSILON, HpChange, StatSheet};
