use core::fmt;

use crate::geometry::Position;

/// Opaque arena handle to a spawned actor.
///
/// The generation distinguishes a live actor from a later actor that reused
/// the same slot, so stale handles never alias new actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorHandle {
    pub index: u32,
    pub generation: u32,
}

impl ActorHandle {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for ActorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// What a stage asks the world to spawn, with the initialization parameters
/// that must be applied before the actor finishes spawning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    /// Hostile character leveled to the current stage level.
    Enemy { level: u32 },
    /// Reward pickup; `empty` marks the decoy that grants nothing.
    Reward { empty: bool },
}

/// World capability used by stages to create and remove actors.
///
/// Spawning is two-phase: [`spawn_deferred`](Self::spawn_deferred) reserves and
/// configures the actor, [`finish_spawn`](Self::finish_spawn) places it in the
/// world. A `None` from the first phase is a spawn failure.
pub trait ActorSpawner {
    fn spawn_deferred(&mut self, kind: ActorKind, position: Position) -> Option<ActorHandle>;

    fn finish_spawn(&mut self, handle: ActorHandle, position: Position);

    /// Removes the actor. Returns `false` if it was already gone.
    fn destroy(&mut self, handle: ActorHandle) -> bool;

    fn is_alive(&self, handle: ActorHandle) -> bool;
}
