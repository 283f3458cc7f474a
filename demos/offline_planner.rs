use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use trip_planner_rs::{
    chat_summary, load_itinerary, DayNavigator, GenerationBackend, MemoryStore, Planner, Result,
};

/// Scripted backend so the full pipeline runs without a network connection:
/// the first reply is a clarifying question, the second a complete plan.
#[derive(Default)]
struct ScriptedBackend {
    calls: std::sync::Mutex<usize>,
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        if *calls == 1 {
            return Ok("How many days will you stay, and what is your budget?".to_string());
        }

        Ok(json!({
            "content": "Three delicious days in Paris, coming right up!",
            "detailedPlan": {
                "destination": "Paris",
                "description": "The city of light, built for eating your way through it",
                "thumbnail": "Eiffel Tower",
                "duration": "3 days",
                "travelers": 2,
                "budget": "mid-range",
                "interest": "food",
                "totalCost": "$1800",
                "flights": {
                    "departure": "JFK to CDG",
                    "price": "$650",
                    "airline": "Air France",
                    "duration": "7h 20m"
                },
                "hotel": {
                    "name": "Hotel des Arts",
                    "location": "Montmartre",
                    "price": "$160/night",
                    "rating": 4.5,
                    "amenities": ["WiFi", "Breakfast", "Rooftop bar"]
                },
                "dailyPlan": [
                    {
                        "day": 1,
                        "title": "Le Marais on foot",
                        "activities": [
                            "Pastry crawl through Le Marais with stops at two famous bakeries",
                            "Picnic lunch along the Seine with market cheese and a fresh baguette",
                            "Classic bistro dinner in Saint-Germain"
                        ],
                        "activitiesDescription": [
                            "Start early to beat the lines",
                            "Markets close mid-afternoon"
                        ],
                        "travelTips": ["Buy a carnet of metro tickets"],
                        "meals": { "breakfast": "Croissants", "lunch": "Picnic", "dinner": "Bistro" }
                    },
                    {
                        "day": 2,
                        "title": "Museums and Montmartre",
                        "activities": [
                            "Musee d'Orsay impressionist wing",
                            "Climb to Sacre-Coeur at golden hour"
                        ],
                        "travelTips": ["Book museum slots online"]
                    },
                    {
                        "day": 3,
                        "title": "Versailles day trip",
                        "activities": []
                    }
                ],
                "weather": {
                    "temp": "15-22C",
                    "condition": "Partly cloudy",
                    "recommendation": "Pack a light jacket"
                }
            },
            "suggestions": ["Book the Louvre ahead", "Try a food tour", "Carry cash for markets"]
        })
        .to_string())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();

    let store = Arc::new(MemoryStore::new());
    let planner = Planner::new(Arc::new(ScriptedBackend::default()), store.clone());

    println!("=== Trip Planner (offline demo) ===\n");

    println!("> I want to travel somewhere nice");
    let outcome = planner.submit("I want to travel somewhere nice").await?;
    println!("assistant: {}\n", outcome.turn.text);

    println!("> Paris, 3 days, 2 travelers, mid-range, food");
    let outcome = planner
        .submit("Paris, 3 days, 2 travelers, mid-range, food")
        .await?;

    let plan = outcome.plan.clone().expect("scripted reply carries a plan");
    println!("{}\n", chat_summary(&plan));

    println!("--- Day navigator ---");
    let mut navigator = DayNavigator::new(plan);
    loop {
        let day = navigator.current().expect("plan has days");
        println!(
            "Day {}: {} | morning: {} | evening: {}",
            day.day_number, day.title, day.morning.activity, day.evening.activity
        );
        if navigator.index() + 1 >= navigator.day_count() {
            break;
        }
        navigator.next();
    }

    println!("\n--- Deep link ---");
    let reloaded = load_itinerary(store.as_ref(), &outcome.plan_id)?;
    println!(
        "Loaded {} ({} days) back from the store under {}",
        reloaded.destination,
        reloaded.days.len(),
        outcome.plan_id
    );

    Ok(())
}
