use crate::types::turn::ConversationTurn;

/// Number of itinerary days requested when the user never specified one
pub const DEFAULT_DAY_COUNT: u32 = 7;

/// Build the single instruction string sent to the generation backend.
///
/// Pure function of (history, utterance). The instruction pins down the
/// assistant's tone, lists the trip constraints it must collect before
/// planning, embeds the conversation so far, and spells out the exact JSON
/// object the reply must contain once all constraints are known. Day count
/// and per-activity length guidance are part of the contract so downstream
/// truncation stays predictable.
pub fn build_prompt(history: &[ConversationTurn], utterance: &str) -> String {
    format!(
        "You are an AI travel planner.\n\
         If the user is casually chatting or has not provided all necessary trip \
         details, you may reply normally, but always steer the conversation back \
         to their travel plans.\n\n\
         If any key trip detail is missing, ask ONLY for the missing ones, one \
         short sentence per question, with no explanations or extra text:\n\
         - Destination city or place they want to visit\n\
         - Travel dates or duration of the trip\n\
         - Number of travelers\n\
         - Budget\n\
         - Interests or preferred activities (adventure, relaxation, food, culture)\n\n\
         Only once the user has provided all required details, generate a concise \
         full trip itinerary containing flight details (departure city, airline, \
         price, duration), hotel details (name, location, price per night, rating, \
         key amenities), a daily plan with one entry per requested day (default \
         {default_days} days if none was specified) where each day has a day \
         number, an engaging title, and 6-8 detailed activities of 30-40 words \
         each, weather info (temperature range, condition, packing tips), and 4-5 \
         brief travel suggestions for the destination.\n\n\
         Conversation so far:\n{history}\n\n\
         When you produce the itinerary, return ONLY a valid JSON object matching \
         this exact structure (no explanations, no markdown, no extra text):\n\n\
         {contract}\n\n\
         User input:\n{utterance}",
        default_days = DEFAULT_DAY_COUNT,
        history = serialize_history(history),
        contract = OUTPUT_CONTRACT,
        utterance = utterance.trim(),
    )
}

/// Serialize turns into `User:`/`AI:` labelled lines for prompt context
fn serialize_history(history: &[ConversationTurn]) -> String {
    if history.is_empty() {
        return "(no prior messages)".to_string();
    }

    history
        .iter()
        .map(|turn| format!("{}: {}", turn.speaker_label(), turn.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The reply shape, with every field name the repair parser and normalizer
/// expect. Kept as a literal template rather than a generated schema so the
/// backend sees the same compact form the views were built against.
const OUTPUT_CONTRACT: &str = r#"{
  "content": "string with a short friendly message about the trip and destination",
  "detailedPlan": {
    "destination": "string (required)",
    "description": "string (required, a short description of the place)",
    "thumbnail": "string with a famous landmark or place name",
    "duration": "string (required)",
    "travelers": number (required),
    "budget": "string (required)",
    "interest": "string (required)",
    "totalCost": "string",
    "flights": {
      "departure": "string",
      "price": "string",
      "airline": "string",
      "duration": "string"
    },
    "hotel": {
      "name": "string",
      "location": "string",
      "price": "string",
      "rating": number,
      "amenities": ["string"]
    },
    "dailyPlan": [
      {
        "day": number,
        "title": "string",
        "description": "string",
        "activities": ["string", "string", "..."],
        "activitiesDescription": ["string", "string", "..."],
        "travelTips": ["string", "string", "..."],
        "meals": {
          "breakfast": "string",
          "lunch": "string",
          "dinner": "string"
        },
        "notes": "string",
        "image": "string",
        "weather": "string",
        "transport": "string"
      }
    ],
    "weather": {
      "temp": "string",
      "condition": "string",
      "recommendation": "string"
    }
  },
  "suggestions": ["string", "string", "..."]
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_contract_keys() {
        let prompt = build_prompt(&[], "Trip to Rome");

        assert!(prompt.contains("\"content\""));
        assert!(prompt.contains("\"detailedPlan\""));
        assert!(prompt.contains("\"dailyPlan\""));
        assert!(prompt.contains("\"activitiesDescription\""));
        assert!(prompt.contains("\"suggestions\""));
    }

    #[test]
    fn test_prompt_embeds_history_with_labels() {
        let history = vec![
            ConversationTurn::user("I want to go to Paris", 1),
            ConversationTurn::assistant("How many days will you stay?", 2),
        ];
        let prompt = build_prompt(&history, "3 days");

        assert!(prompt.contains("User: I want to go to Paris"));
        assert!(prompt.contains("AI: How many days will you stay?"));
        assert!(prompt.ends_with("3 days"));
    }

    #[test]
    fn test_prompt_mentions_default_day_count() {
        let prompt = build_prompt(&[], "Somewhere warm");
        assert!(prompt.contains("default 7 days"));
    }

    #[test]
    fn test_empty_history_placeholder() {
        let prompt = build_prompt(&[], "Hi");
        assert!(prompt.contains("(no prior messages)"));
    }

    #[test]
    fn test_pure_function() {
        let history = vec![ConversationTurn::user("Bali, please", 1)];
        assert_eq!(
            build_prompt(&history, "2 travelers"),
            build_prompt(&history, "2 travelers")
        );
    }
}
