use crate::stage::{StageId, StageTimer};

/// Handle to a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerHandle(pub u64);

/// Routing information delivered back to the host when a timer fires.
///
/// The host hands the token to [`StageController::on_timer`] of the stage
/// named by `stage`.
///
/// [`StageController::on_timer`]: crate::stage::StageController::on_timer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerToken {
    pub stage: StageId,
    pub timer: StageTimer,
}

impl TimerToken {
    pub const fn new(stage: StageId, timer: StageTimer) -> Self {
        Self { stage, timer }
    }
}

/// Host timer capability.
pub trait TimerService {
    /// Schedules `token` to fire after `delay_seconds`, then every
    /// `delay_seconds` while `repeating` until cancelled.
    fn schedule(&mut self, delay_seconds: f32, repeating: bool, token: TimerToken) -> TimerHandle;

    /// Cancels a pending timer. Returns `false` if it already fired (one-shot)
    /// or was never scheduled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}
