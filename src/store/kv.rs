use std::sync::Mutex;

use tracing::debug;

use crate::core::session::{MonotonicMillis, PlanId, PlanLogEntry, PlanSession, SessionId};
use crate::error::{PlannerError, Result};
use crate::store::{history_key, session_key, PlanRecord, SessionStore};
use crate::types::turn::ConversationTurn;

/// Minimal string key-value collaborator. Writes are synchronous and
/// last-write-wins per key.
pub trait KeyValue: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// [`SessionStore`] over any [`KeyValue`] backing.
#[derive(Debug)]
pub struct KvStore<K> {
    kv: K,
    clock: Mutex<MonotonicMillis>,
}

impl<K: KeyValue> KvStore<K> {
    pub fn with_backing(kv: K) -> Self {
        Self {
            kv,
            clock: Mutex::new(MonotonicMillis::new()),
        }
    }

    fn next_millis(&self) -> u64 {
        self.clock
            .lock()
            .expect("store clock lock poisoned")
            .next()
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.kv.get(key)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn write_json<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.kv.set(key, &text)
    }

    fn load_or_new_session(&self, session_id: &SessionId) -> Result<PlanSession> {
        Ok(self
            .read_json::<PlanSession>(&session_key(session_id))?
            .unwrap_or_else(|| PlanSession::new(session_id.clone())))
    }
}

impl<K: KeyValue> SessionStore for KvStore<K> {
    fn create_session(&self) -> Result<SessionId> {
        let session_id = SessionId::from_millis(self.next_millis());
        let session = PlanSession::new(session_id.clone());
        self.write_json(&session_key(&session_id), &session)?;
        debug!(target: "tripplanner::store", session = %session_id, "session created");
        Ok(session_id)
    }

    fn append_turn(&self, session_id: &SessionId, turn: &ConversationTurn) -> Result<()> {
        let mut session = self.load_or_new_session(session_id)?;
        session.push_turn(turn.clone());
        self.write_json(&session_key(session_id), &session)
    }

    fn record_plan(&self, session_id: &SessionId, record: &PlanRecord) -> Result<()> {
        let key = history_key(&record.plan_id);
        let mut history: Vec<PlanRecord> = self.read_json(&key)?.unwrap_or_default();
        history.push(record.clone());
        self.write_json(&key, &history)?;

        // Only successful generations enter the session's audit log
        if let Some(plan) = &record.generated_plan.detailed_plan {
            let mut session = self.load_or_new_session(session_id)?;
            session.record_plan(PlanLogEntry {
                plan_id: record.plan_id.clone(),
                plan: plan.clone(),
                utterance: record.user_prompt.clone(),
                created_at: record.timestamp,
            });
            self.write_json(&session_key(session_id), &session)?;
        }

        Ok(())
    }

    fn load(&self, session_id: &SessionId) -> Result<Option<PlanSession>> {
        self.read_json(&session_key(session_id))
    }

    fn load_plan(&self, plan_id: &PlanId) -> Result<Option<PlanRecord>> {
        let history: Vec<PlanRecord> = self
            .read_json(&history_key(plan_id))?
            .unwrap_or_default();
        Ok(history.into_iter().last())
    }
}

/// Map an I/O failure into the storage error variant
pub(crate) fn storage_error(context: &str, err: impl std::fmt::Display) -> PlannerError {
    PlannerError::Storage(format!("{context}: {err}"))
}
