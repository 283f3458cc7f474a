//! Untrusted decoded shape of the generation backend's JSON reply.
//!
//! Everything here is tolerant: every field defaults when absent, and the
//! numeric fields the backend is asked to emit as numbers (`travelers`,
//! `rating`, `day`) also accept numeric strings, because the backend does not
//! reliably honor the type hints in the prompt. The canonical model in
//! [`crate::types::plan`] is produced from this by the normalizer only.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Top-level reply object: a chat message plus an optional structured plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTripPlan {
    /// Short human-facing message about the trip
    pub content: String,
    /// Structured plan; absent while the backend is still asking questions
    pub detailed_plan: Option<RawPlanDetails>,
    /// Short follow-up suggestions for the destination
    pub suggestions: Vec<String>,
}

/// The structured plan body under `detailedPlan`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPlanDetails {
    pub destination: String,
    pub description: String,
    /// Famous landmark or place name used for thumbnail lookups
    pub thumbnail: String,
    pub duration: String,
    #[serde(deserialize_with = "lenient_u32")]
    #[schemars(with = "Option<u32>")]
    pub travelers: Option<u32>,
    pub budget: String,
    pub interest: String,
    pub total_cost: String,
    pub flights: Option<RawFlight>,
    pub hotel: Option<RawHotel>,
    pub daily_plan: Vec<RawDayPlan>,
    pub weather: Option<RawWeather>,
}

/// One day of the itinerary as the backend emits it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RawDayPlan {
    #[serde(deserialize_with = "lenient_u32")]
    #[schemars(with = "Option<u32>")]
    pub day: Option<u32>,
    pub title: String,
    pub description: String,
    /// Activities in chronological order; the first three feed the
    /// morning/afternoon/evening slots
    pub activities: Vec<String>,
    /// Index-aligned with `activities`; may be shorter
    pub activities_description: Vec<String>,
    pub travel_tips: Vec<String>,
    pub meals: Option<RawMeals>,
    pub notes: String,
    pub image: String,
    pub weather: String,
    pub transport: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RawMeals {
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RawFlight {
    pub departure: String,
    pub price: String,
    pub airline: String,
    pub duration: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RawHotel {
    pub name: String,
    pub location: String,
    pub price: String,
    #[serde(deserialize_with = "lenient_f32")]
    #[schemars(with = "Option<f32>")]
    pub rating: Option<f32>,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RawWeather {
    pub temp: String,
    pub condition: String,
    pub recommendation: String,
}

/// Accept `3`, `"3"`, or anything else (treated as absent).
fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_u64().map(|n| n as u32),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Accept `4.5`, `"4.5"`, or anything else (treated as absent).
fn lenient_f32<'de, D>(deserializer: D) -> std::result::Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64().map(|n| n as f32),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}
