//! Read-only rendering contract over the canonical plan.
//!
//! Everything here consumes [`TripPlan`] values produced by the normalizer,
//! so fields are only ever empty, never absent. Empty strings render as "-"
//! in the chat digest, matching the bubble views built on this contract.

use crate::core::session::PlanId;
use crate::error::{PlannerError, Result};
use crate::store::SessionStore;
use crate::types::plan::{DayPlan, TripPlan};

const PREVIEW_DAYS: usize = 2;
const PREVIEW_ACTIVITIES: usize = 2;
const PREVIEW_ACTIVITY_CHARS: usize = 60;

/// Compact plan digest for a chat bubble: summary line, weather, flight,
/// cost, hotel, a two-day itinerary preview, and the follow-up suggestions.
pub fn chat_summary(plan: &TripPlan) -> String {
    let mut lines = Vec::new();

    lines.push(plan.summary_message.clone());
    lines.push(String::new());

    lines.push("Weather".to_string());
    lines.push(format!("  Temp: {}", or_dash(&plan.weather.temperature_range)));
    lines.push(format!("  Condition: {}", or_dash(&plan.weather.condition)));
    lines.push(format!(
        "  Tip: {}",
        or_dash(&plan.weather.packing_recommendation)
    ));

    lines.push("Flight".to_string());
    lines.push(format!("  {}", or_dash(&plan.flight.departure_label)));
    lines.push(format!("  {}", or_dash(&plan.flight.airline)));
    lines.push(format!("  {}", or_dash(&plan.flight.price)));
    lines.push(format!("  {}", or_dash(&plan.flight.duration)));

    lines.push("Trip Cost".to_string());
    lines.push(format!("  {}", or_dash(&plan.total_cost_label)));
    lines.push(format!("  {} travelers", plan.traveler_count));

    lines.push("Hotel".to_string());
    if plan.hotel.rating > 0.0 {
        lines.push(format!("  {} ({}*)", or_dash(&plan.hotel.name), plan.hotel.rating));
    } else {
        lines.push(format!("  {} (-)", or_dash(&plan.hotel.name)));
    }
    lines.push(format!("  {}", or_dash(&plan.hotel.location)));
    lines.push(format!("  {}", or_dash(&plan.hotel.price)));
    let amenities = plan.hotel.amenities.join(", ");
    lines.push(format!("  {}", or_dash(&amenities)));

    lines.push("Itinerary".to_string());
    if plan.days.is_empty() {
        lines.push("  No itinerary available.".to_string());
    } else {
        for day in plan.days.iter().take(PREVIEW_DAYS) {
            lines.push(format!("  Day {}: {}", day.day_number, day.title));
            for activity in day.activities.iter().take(PREVIEW_ACTIVITIES) {
                lines.push(format!("    - {}", truncate_chars(activity, PREVIEW_ACTIVITY_CHARS)));
            }
        }
    }

    lines.push("Suggestions".to_string());
    if plan.suggestions.is_empty() {
        lines.push("  No suggestions available.".to_string());
    } else {
        for suggestion in &plan.suggestions {
            lines.push(format!("  - {}", suggestion));
        }
    }

    lines.join("\n")
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}...")
}

/// Pages through a plan's days by index. All navigation clamps to the valid
/// range, so callers can wire prev/next buttons without bounds checks.
#[derive(Debug, Clone)]
pub struct DayNavigator {
    plan: TripPlan,
    index: usize,
}

impl DayNavigator {
    pub fn new(plan: TripPlan) -> Self {
        Self { plan, index: 0 }
    }

    pub fn plan(&self) -> &TripPlan {
        &self.plan
    }

    pub fn day_count(&self) -> usize {
        self.plan.days.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The day currently in view; `None` only for a planless navigator
    pub fn current(&self) -> Option<&DayPlan> {
        self.plan.day_clamped(self.index)
    }

    pub fn go_to(&mut self, index: usize) -> Option<&DayPlan> {
        self.index = clamp_index(index, self.plan.days.len());
        self.current()
    }

    pub fn next(&mut self) -> Option<&DayPlan> {
        self.go_to(self.index.saturating_add(1))
    }

    pub fn prev(&mut self) -> Option<&DayPlan> {
        self.go_to(self.index.saturating_sub(1))
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        index.min(len - 1)
    }
}

/// Deep-link read: latest itinerary recorded under a plan id.
///
/// A missing record or a record without a plan body is the user-visible
/// "itinerary not found" state, reported as an error value, never a panic.
pub fn load_itinerary(store: &dyn SessionStore, plan_id: &PlanId) -> Result<TripPlan> {
    let record = store
        .load_plan(plan_id)?
        .ok_or_else(|| PlannerError::Storage("No itinerary found for this plan id".to_string()))?;

    record.generated_plan.detailed_plan.ok_or_else(|| {
        PlannerError::Storage("Itinerary data is missing or corrupted".to_string())
    })
}
