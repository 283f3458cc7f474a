//! Canonical plan model consumed by every view.
//!
//! Unlike [`crate::types::raw`], nothing here is optional: strings may be
//! empty and lists may have no entries, but a renderer can index any field
//! without a null check. The normalizer is the only producer of these values.

use serde::{Deserialize, Serialize};

/// Structured travel plan produced by a successful generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TripPlan {
    /// Short human-facing message shown in the chat bubble
    pub summary_message: String,
    pub destination: String,
    pub description: String,
    /// Famous landmark or place name for thumbnail lookups
    pub thumbnail_hint: String,
    pub duration_label: String,
    pub traveler_count: u32,
    pub budget_label: String,
    pub interest_label: String,
    pub total_cost_label: String,
    pub flight: FlightInfo,
    pub hotel: HotelInfo,
    /// Never empty when a plan exists; day numbers are consecutive from 1
    pub days: Vec<DayPlan>,
    pub weather: WeatherInfo,
    pub suggestions: Vec<String>,
}

/// One day of the itinerary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DayPlan {
    /// 1-based, unique, consecutive within a plan
    pub day_number: u32,
    pub title: String,
    pub description: String,
    pub morning: DaySlot,
    pub afternoon: DaySlot,
    pub evening: DaySlot,
    /// Full chronological activity list (the slots cover the first three)
    pub activities: Vec<String>,
    /// Index-aligned with `activities`; same length or shorter
    pub activity_descriptions: Vec<String>,
    pub travel_tips: Vec<String>,
    pub meals: Meals,
    pub notes: String,
    pub transport: String,
    pub weather_label: String,
    pub image_hint: String,
}

/// Convenience slot for single-day rendering. `activity` is always populated:
/// a real activity or the fixed "No ... activity listed." placeholder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DaySlot {
    pub activity: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Meals {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlightInfo {
    pub departure_label: String,
    pub price: String,
    pub airline: String,
    pub duration: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelInfo {
    pub name: String,
    pub location: String,
    pub price: String,
    pub rating: f32,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeatherInfo {
    pub temperature_range: String,
    pub condition: String,
    pub packing_recommendation: String,
}

impl TripPlan {
    /// Number of days in the itinerary
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Day by 0-based index, clamped to the valid range. Only `None` when the
    /// plan has no days at all (which a recorded plan never does).
    pub fn day_clamped(&self, index: usize) -> Option<&DayPlan> {
        if self.days.is_empty() {
            return None;
        }
        let clamped = index.min(self.days.len() - 1);
        self.days.get(clamped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_with_days(n: u32) -> TripPlan {
        TripPlan {
            days: (1..=n)
                .map(|day_number| DayPlan {
                    day_number,
                    title: format!("Day {day_number}"),
                    ..DayPlan::default()
                })
                .collect(),
            ..TripPlan::default()
        }
    }

    #[test]
    fn test_day_clamped_in_range() {
        let plan = plan_with_days(3);
        assert_eq!(plan.day_clamped(1).unwrap().day_number, 2);
    }

    #[test]
    fn test_day_clamped_out_of_range() {
        let plan = plan_with_days(3);
        assert_eq!(plan.day_clamped(99).unwrap().day_number, 3);
        assert!(plan_with_days(0).day_clamped(0).is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(plan_with_days(1)).unwrap();
        assert!(json.get("summaryMessage").is_some());
        assert!(json["days"][0].get("dayNumber").is_some());
        assert!(json["days"][0].get("activityDescriptions").is_some());
    }
}
