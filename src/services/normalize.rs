//! Maps the untrusted decoded plan into the canonical model.
//!
//! Total and pure: any [`RawTripPlan`] produces a [`TripPlan`] with every
//! field populated (empty string / empty list when the backend gave nothing),
//! so renderers never meet a null.

use crate::types::plan::{
    DayPlan, DaySlot, FlightInfo, HotelInfo, Meals, TripPlan, WeatherInfo,
};
use crate::types::raw::{RawDayPlan, RawTripPlan};

const SLOT_NAMES: [&str; 3] = ["morning", "afternoon", "evening"];

/// Normalize a repaired backend reply into the canonical plan model.
pub fn normalize(raw: RawTripPlan) -> TripPlan {
    let details = raw.detailed_plan.unwrap_or_default();

    let flight = details.flights.unwrap_or_default();
    let hotel = details.hotel.unwrap_or_default();
    let weather = details.weather.unwrap_or_default();

    let days = details
        .daily_plan
        .into_iter()
        .enumerate()
        .map(|(index, day)| normalize_day(index as u32 + 1, day))
        .collect();

    TripPlan {
        summary_message: raw.content,
        destination: details.destination,
        description: details.description,
        thumbnail_hint: details.thumbnail,
        duration_label: details.duration,
        traveler_count: details.travelers.unwrap_or(0),
        budget_label: details.budget,
        interest_label: details.interest,
        total_cost_label: details.total_cost,
        flight: FlightInfo {
            departure_label: flight.departure,
            price: flight.price,
            airline: flight.airline,
            duration: flight.duration,
        },
        hotel: HotelInfo {
            name: hotel.name,
            location: hotel.location,
            price: hotel.price,
            rating: hotel.rating.unwrap_or(0.0),
            amenities: hotel.amenities,
        },
        days,
        weather: WeatherInfo {
            temperature_range: weather.temp,
            condition: weather.condition,
            packing_recommendation: weather.recommendation,
        },
        suggestions: raw.suggestions,
    }
}

/// Day numbers are rewritten positionally so they stay unique and consecutive
/// from 1 regardless of what the backend emitted.
fn normalize_day(day_number: u32, day: RawDayPlan) -> DayPlan {
    let meals = day.meals.unwrap_or_default();

    let mut descriptions = day.activities_description;
    descriptions.truncate(day.activities.len());

    let slot = |index: usize| -> DaySlot {
        let activity = day
            .activities
            .get(index)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("No {} activity listed.", SLOT_NAMES[index]));
        let description = descriptions.get(index).cloned().unwrap_or_default();
        DaySlot {
            activity,
            description,
        }
    };

    let morning = slot(0);
    let afternoon = slot(1);
    let evening = slot(2);

    DayPlan {
        day_number,
        title: day.title,
        description: day.description,
        morning,
        afternoon,
        evening,
        activities: day.activities,
        activity_descriptions: descriptions,
        travel_tips: day.travel_tips,
        meals: Meals {
            breakfast: meals.breakfast.unwrap_or_default(),
            lunch: meals.lunch.unwrap_or_default(),
            dinner: meals.dinner.unwrap_or_default(),
        },
        notes: day.notes,
        transport: day.transport,
        weather_label: day.weather,
        image_hint: day.image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::raw::{RawMeals, RawPlanDetails};

    fn raw_day(activities: &[&str], descriptions: &[&str]) -> RawDayPlan {
        RawDayPlan {
            activities: activities.iter().map(|s| s.to_string()).collect(),
            activities_description: descriptions.iter().map(|s| s.to_string()).collect(),
            ..RawDayPlan::default()
        }
    }

    fn raw_plan(days: Vec<RawDayPlan>) -> RawTripPlan {
        RawTripPlan {
            content: "Enjoy!".to_string(),
            detailed_plan: Some(RawPlanDetails {
                destination: "Paris".to_string(),
                daily_plan: days,
                ..RawPlanDetails::default()
            }),
            suggestions: vec![],
        }
    }

    #[test]
    fn test_slots_always_populated() {
        for activity_count in 0..=3 {
            let activities: Vec<&str> = ["Louvre", "Seine cruise", "Le Marais dinner"]
                [..activity_count]
                .to_vec();
            let plan = normalize(raw_plan(vec![raw_day(&activities, &[])]));
            let day = &plan.days[0];

            for slot in [&day.morning, &day.afternoon, &day.evening] {
                assert!(!slot.activity.is_empty());
            }
            if activity_count == 0 {
                assert_eq!(day.morning.activity, "No morning activity listed.");
                assert_eq!(day.afternoon.activity, "No afternoon activity listed.");
                assert_eq!(day.evening.activity, "No evening activity listed.");
            }
        }
    }

    #[test]
    fn test_blank_activity_gets_placeholder() {
        let plan = normalize(raw_plan(vec![raw_day(&["  ", "Seine cruise"], &[])]));
        let day = &plan.days[0];
        assert_eq!(day.morning.activity, "No morning activity listed.");
        assert_eq!(day.afternoon.activity, "Seine cruise");
    }

    #[test]
    fn test_description_alignment() {
        let day = raw_day(&["Louvre", "Seine cruise"], &["World-class art"]);
        let plan = normalize(raw_plan(vec![day]));
        let day = &plan.days[0];

        assert_eq!(day.morning.description, "World-class art");
        assert_eq!(day.afternoon.description, "");
        assert!(day.activity_descriptions.len() <= day.activities.len());
    }

    #[test]
    fn test_excess_descriptions_dropped() {
        let day = raw_day(&["Louvre"], &["World-class art", "orphan", "orphan"]);
        let plan = normalize(raw_plan(vec![day]));
        assert_eq!(plan.days[0].activity_descriptions, vec!["World-class art"]);
    }

    #[test]
    fn test_days_renumbered_consecutively() {
        let mut first = raw_day(&["Louvre"], &[]);
        first.day = Some(4);
        let mut second = raw_day(&["Versailles"], &[]);
        second.day = Some(4);
        let mut third = raw_day(&["Montmartre"], &[]);
        third.day = None;

        let plan = normalize(raw_plan(vec![first, second, third]));
        let numbers: Vec<u32> = plan.days.iter().map(|d| d.day_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_meals_default_to_empty_strings() {
        let mut day = raw_day(&["Louvre"], &[]);
        day.meals = Some(RawMeals {
            breakfast: Some("Croissants".to_string()),
            lunch: None,
            dinner: None,
        });
        let plan = normalize(raw_plan(vec![day]));

        assert_eq!(plan.days[0].meals.breakfast, "Croissants");
        assert_eq!(plan.days[0].meals.lunch, "");
        assert_eq!(plan.days[0].meals.dinner, "");
    }

    #[test]
    fn test_missing_sections_become_empty_values() {
        let plan = normalize(RawTripPlan {
            content: "hi".to_string(),
            detailed_plan: None,
            suggestions: vec![],
        });

        assert_eq!(plan.destination, "");
        assert_eq!(plan.flight.airline, "");
        assert_eq!(plan.hotel.rating, 0.0);
        assert_eq!(plan.weather.condition, "");
        assert!(plan.days.is_empty());
    }
}
