pub mod controller;
pub mod session;

pub use controller::{Planner, SessionEvent, TurnOutcome, GENERATION_TIMEOUT, TIMEOUT_MESSAGE};
pub use session::{MonotonicMillis, PlanId, PlanLogEntry, PlanSession, SessionId};
