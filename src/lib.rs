//! trip-planner-rs: a lightweight, type-safe library for conversational
//! travel itinerary generation.
//!
//! A per-session [`Planner`] collects trip constraints from free-text chat,
//! prompts a generative backend for a structured plan, defensively repairs
//! the backend's semi-structured reply, normalizes it into a canonical
//! day-by-day model, and persists every turn and plan so the conversation
//! survives reloads and plans can be opened by deep link.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trip_planner_rs::{GeminiClient, MemoryStore, Planner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeminiClient::from_env()?;
//!     let planner = Planner::new(Arc::new(client), Arc::new(MemoryStore::new()));
//!
//!     let outcome = planner
//!         .submit("I want to go to Paris for 3 days, 2 travelers, mid-range budget")
//!         .await?;
//!     println!("{}", outcome.turn.text);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod error;
pub mod render;
pub mod schemas;
pub mod services;
pub mod store;
pub mod types;

pub use self::core::{
    MonotonicMillis, PlanId, PlanLogEntry, PlanSession, Planner, SessionEvent, SessionId,
    TurnOutcome, GENERATION_TIMEOUT, TIMEOUT_MESSAGE,
};
pub use error::{PlannerError, Result};
pub use render::{chat_summary, load_itinerary, DayNavigator};
pub use services::{build_prompt, normalize, repair, GeminiClient, GenerationBackend};
pub use store::{FileStore, MemoryStore, PlanRecord, SessionStore, StoredResponse};
pub use types::{
    ConversationTurn, DayPlan, DaySlot, FlightInfo, HotelInfo, Meals, RawPlanDetails, RawTripPlan,
    Role, TripPlan, WeatherInfo,
};

#[cfg(feature = "cli")]
pub mod cli;
