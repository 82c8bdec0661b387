//! Wave-based stage state machine.
//!
//! A stage cycles READY → BATTLE → REWARD → READY. The controller owns the
//! session counters and reacts to three kinds of input delivered by its host:
//! fired timers, destroyed enemies and overlapped reward pickups.
mod controller;
mod session;
mod state;

pub use controller::StageController;
pub use session::StageSession;
pub use state::{StageId, StageState, StageTimer};
