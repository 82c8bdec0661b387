/// Phase of a stage's wave cycle.
///
/// ```text
/// READY ──(preparation timer)──▶ BATTLE ──(wave destroyed)──▶ REWARD
///   ▲                                                           │
///   └──────────────────────(pickup chosen)──────────────────────┘
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StageState {
    /// Preparation countdown before the next wave.
    #[default]
    Ready,
    /// Enemies are spawning and being fought.
    Battle,
    /// Wave cleared; reward pickups are on the field.
    Reward,
}

/// Identifier of a stage instance within a host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageId(pub u32);

/// Timers a stage schedules on the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StageTimer {
    /// One-shot: READY preparation has elapsed.
    Preparation,
    /// Repeating: spawn the next enemy of the wave.
    EnemySpawn,
    /// One-shot: game-over fade has finished.
    GameOver,
}
