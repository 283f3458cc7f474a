//! Session and plan-history persistence.
//!
//! The schema is core-owned; the storage mechanics are a plain string
//! key-value collaborator (the browser-local storage model: synchronous
//! writes, last-write-wins per key, no cross-session merge). Two backings are
//! provided: an in-memory map and a one-file-per-key directory.

pub mod file;
pub mod kv;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::core::session::{PlanId, PlanSession, SessionId};
use crate::error::{PlannerError, Result};
use crate::types::plan::TripPlan;

pub use file::FileStore;
pub use kv::{KeyValue, KvStore};
pub use memory::MemoryStore;

/// Persistence seam written exclusively by the conversation controller and
/// read by renderers.
pub trait SessionStore: Send + Sync {
    /// Mint a new session id and persist an empty session under it
    fn create_session(&self) -> Result<SessionId>;

    /// Append one turn to the session's turn log
    fn append_turn(
        &self,
        session_id: &SessionId,
        turn: &crate::types::turn::ConversationTurn,
    ) -> Result<()>;

    /// Append one generation record to the plan's history key; successful
    /// records are also added to the session's plan audit log
    fn record_plan(&self, session_id: &SessionId, record: &PlanRecord) -> Result<()>;

    /// Load a session by id; `None` when nothing was ever written under it
    fn load(&self, session_id: &SessionId) -> Result<Option<PlanSession>>;

    /// Load the latest generation record for a plan id (deep-link read)
    fn load_plan(&self, plan_id: &PlanId) -> Result<Option<PlanRecord>>;
}

/// One entry of a `chatHistory-<planId>` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRecord {
    pub id: String,
    pub plan_id: PlanId,
    pub timestamp: u64,
    #[serde(rename = "userPrompt")]
    pub user_prompt: String,
    #[serde(rename = "generatedPlan")]
    pub generated_plan: StoredResponse,
}

/// The persisted backend outcome: a plan on success, a diagnostic
/// (`error` + `raw`) on failure. Deep-link views require `detailedPlan`;
/// its absence is their "itinerary not found" state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "detailedPlan", skip_serializing_if = "Option::is_none")]
    pub detailed_plan: Option<TripPlan>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl StoredResponse {
    pub fn success(plan: &TripPlan) -> Self {
        Self {
            content: Some(plan.summary_message.clone()),
            detailed_plan: Some(plan.clone()),
            suggestions: plan.suggestions.clone(),
            error: None,
            raw: None,
        }
    }

    pub fn failure(error: &PlannerError) -> Self {
        Self {
            content: None,
            detailed_plan: None,
            suggestions: Vec::new(),
            error: Some(error.error_code().to_string()),
            raw: error.raw_output().map(|s| s.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.detailed_plan.is_some()
    }
}

/// Storage key for a plan's generation history
pub fn history_key(plan_id: &PlanId) -> String {
    format!("chatHistory-{}", plan_id)
}

/// Storage key for a session document
pub fn session_key(session_id: &SessionId) -> String {
    format!("session-{}", session_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_patterns() {
        assert_eq!(
            history_key(&PlanId::from_millis(1752079875010)),
            "chatHistory-plan-1752079875010"
        );
        assert_eq!(session_key(&SessionId::from_millis(7)), "session-chat-7");
    }

    #[test]
    fn test_stored_response_wire_shape() {
        let mut plan = TripPlan::default();
        plan.summary_message = "Bon voyage!".to_string();
        let record = PlanRecord {
            id: "1".to_string(),
            plan_id: PlanId::from_millis(1),
            timestamp: 1,
            user_prompt: "Paris please".to_string(),
            generated_plan: StoredResponse::success(&plan),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["plan_id"], "plan-1");
        assert_eq!(json["userPrompt"], "Paris please");
        assert!(json["generatedPlan"]["detailedPlan"].is_object());
        assert_eq!(json["generatedPlan"]["content"], "Bon voyage!");
    }

    #[test]
    fn test_failure_record_has_no_plan() {
        let err = PlannerError::MalformedOutput {
            raw: "Sure! Let me help...".to_string(),
        };
        let stored = StoredResponse::failure(&err);

        assert!(!stored.is_success());
        assert_eq!(stored.error.as_deref(), Some("MALFORMED_OUTPUT"));
        assert_eq!(stored.raw.as_deref(), Some("Sure! Let me help..."));

        let json = serde_json::to_value(&stored).unwrap();
        assert!(json.get("detailedPlan").is_none());
    }
}
