use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Result;
use crate::store::kv::{KeyValue, KvStore};

/// In-process string map with browser-local-storage semantics.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValue for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .lock()
            .expect("memory store lock poisoned")
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .expect("memory store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Volatile session store, the default for tests and demos.
pub type MemoryStore = KvStore<MemoryKv>;

impl MemoryStore {
    pub fn new() -> Self {
        KvStore::with_backing(MemoryKv::default())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{PlanRecord, SessionStore, StoredResponse};
    use crate::types::plan::TripPlan;
    use crate::types::turn::ConversationTurn;

    #[test]
    fn test_create_and_load_session() {
        let store = MemoryStore::new();
        let session_id = store.create_session().unwrap();

        let session = store.load(&session_id).unwrap().unwrap();
        assert_eq!(session.session_id, session_id);
        assert!(session.turns.is_empty());
    }

    #[test]
    fn test_append_turn_persists() {
        let store = MemoryStore::new();
        let session_id = store.create_session().unwrap();

        store
            .append_turn(&session_id, &ConversationTurn::user("hi", 1))
            .unwrap();
        store
            .append_turn(&session_id, &ConversationTurn::assistant("hello", 2))
            .unwrap();

        let session = store.load(&session_id).unwrap().unwrap();
        assert_eq!(session.turn_count(), 2);
        assert_eq!(session.turns[1].text, "hello");
    }

    #[test]
    fn test_record_plan_appends_history_and_audit_log() {
        let store = MemoryStore::new();
        let session_id = store.create_session().unwrap();
        let plan_id = crate::core::session::PlanId::from_millis(99);

        let mut plan = TripPlan::default();
        plan.destination = "Paris".to_string();
        let record = PlanRecord {
            id: "99".to_string(),
            plan_id: plan_id.clone(),
            timestamp: 99,
            user_prompt: "Paris, 3 days".to_string(),
            generated_plan: StoredResponse::success(&plan),
        };
        store.record_plan(&session_id, &record).unwrap();

        let loaded = store.load_plan(&plan_id).unwrap().unwrap();
        assert_eq!(loaded.user_prompt, "Paris, 3 days");

        let session = store.load(&session_id).unwrap().unwrap();
        assert_eq!(session.plans.len(), 1);
        assert_eq!(session.plans[0].plan.destination, "Paris");
    }

    #[test]
    fn test_failed_generation_skips_audit_log() {
        let store = MemoryStore::new();
        let session_id = store.create_session().unwrap();
        let plan_id = crate::core::session::PlanId::from_millis(100);

        let err = crate::error::PlannerError::MalformedOutput {
            raw: "no JSON here".to_string(),
        };
        let record = PlanRecord {
            id: "100".to_string(),
            plan_id: plan_id.clone(),
            timestamp: 100,
            user_prompt: "somewhere warm".to_string(),
            generated_plan: StoredResponse::failure(&err),
        };
        store.record_plan(&session_id, &record).unwrap();

        // Diagnostic record is retrievable, audit log stays empty
        assert!(store.load_plan(&plan_id).unwrap().is_some());
        let session = store.load(&session_id).unwrap().unwrap();
        assert!(session.plans.is_empty());
    }

    #[test]
    fn test_load_plan_returns_last_entry() {
        let store = MemoryStore::new();
        let session_id = store.create_session().unwrap();
        let plan_id = crate::core::session::PlanId::from_millis(5);

        for (i, destination) in ["Paris", "Rome"].iter().enumerate() {
            let mut plan = TripPlan::default();
            plan.destination = destination.to_string();
            let record = PlanRecord {
                id: i.to_string(),
                plan_id: plan_id.clone(),
                timestamp: i as u64,
                user_prompt: format!("{destination} please"),
                generated_plan: StoredResponse::success(&plan),
            };
            store.record_plan(&session_id, &record).unwrap();
        }

        let last = store.load_plan(&plan_id).unwrap().unwrap();
        assert_eq!(
            last.generated_plan.detailed_plan.unwrap().destination,
            "Rome"
        );
    }
}
