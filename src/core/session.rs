use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::plan::TripPlan;
use crate::types::turn::ConversationTurn;

/// Identity of one open conversation surface, e.g. `chat-1752079716977`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn from_millis(millis: u64) -> Self {
        Self(format!("chat-{millis}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable identity of one generated plan, e.g. `plan-1752079875010`.
/// Independent of the session id so a plan can be opened by deep link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(String);

impl PlanId {
    pub fn from_millis(millis: u64) -> Self {
        Self(format!("plan-{millis}"))
    }

    /// Accept either a full `plan-<millis>` id or the bare millis part, the
    /// two shapes deep links arrive in.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("plan-") {
            Self(raw.to_string())
        } else {
            Self(format!("plan-{raw}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One successful generation in the session's append-only audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanLogEntry {
    pub plan_id: PlanId,
    pub plan: TripPlan,
    /// The user utterance that produced this plan
    pub utterance: String,
    pub created_at: u64,
}

/// The active conversation: its identity, turn log, and plan audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSession {
    pub session_id: SessionId,
    pub turns: Vec<ConversationTurn>,
    /// Successful generations only, in creation order
    pub plans: Vec<PlanLogEntry>,
}

impl PlanSession {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            turns: Vec::new(),
            plans: Vec::new(),
        }
    }

    pub fn push_turn(&mut self, turn: ConversationTurn) {
        debug_assert!(
            self.turns
                .last()
                .map(|last| turn.timestamp > last.timestamp)
                .unwrap_or(true),
            "turn timestamps must be strictly increasing"
        );
        self.turns.push(turn);
    }

    pub fn record_plan(&mut self, entry: PlanLogEntry) {
        self.plans.push(entry);
    }

    pub fn plan(&self, plan_id: &PlanId) -> Option<&PlanLogEntry> {
        self.plans.iter().find(|entry| &entry.plan_id == plan_id)
    }

    pub fn last_plan(&self) -> Option<&PlanLogEntry> {
        self.plans.last()
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Millisecond clock that never repeats a value, so ids and turn timestamps
/// minted in the same millisecond stay distinct and ordered.
#[derive(Debug, Default)]
pub struct MonotonicMillis {
    last: u64,
}

impl MonotonicMillis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> u64 {
        let now = now_millis();
        self.last = now.max(self.last + 1);
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::turn::ConversationTurn;

    #[test]
    fn test_id_formats() {
        assert_eq!(SessionId::from_millis(7).as_str(), "chat-7");
        assert_eq!(PlanId::from_millis(7).as_str(), "plan-7");
    }

    #[test]
    fn test_plan_id_parse_both_shapes() {
        assert_eq!(PlanId::parse("plan-1752079716977").as_str(), "plan-1752079716977");
        assert_eq!(PlanId::parse("1752079716977").as_str(), "plan-1752079716977");
    }

    #[test]
    fn test_session_turn_log() {
        let mut session = PlanSession::new(SessionId::from_millis(1));
        session.push_turn(ConversationTurn::user("hi", 1));
        session.push_turn(ConversationTurn::assistant("hello", 2));
        assert_eq!(session.turn_count(), 2);
    }

    #[test]
    fn test_plan_lookup() {
        let mut session = PlanSession::new(SessionId::from_millis(1));
        let plan_id = PlanId::from_millis(9);
        session.record_plan(PlanLogEntry {
            plan_id: plan_id.clone(),
            plan: TripPlan::default(),
            utterance: "Paris, 3 days".to_string(),
            created_at: 9,
        });

        assert!(session.plan(&plan_id).is_some());
        assert!(session.plan(&PlanId::from_millis(10)).is_none());
        assert_eq!(session.last_plan().unwrap().utterance, "Paris, 3 days");
    }

    #[test]
    fn test_monotonic_millis_never_repeats() {
        let mut clock = MonotonicMillis::new();
        let mut previous = clock.next();
        for _ in 0..100 {
            let next = clock.next();
            assert!(next > previous);
            previous = next;
        }
    }
}
