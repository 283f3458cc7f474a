use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::core::session::{MonotonicMillis, PlanId, PlanLogEntry, PlanSession, SessionId};
use crate::error::{PlannerError, Result};
use crate::services::gemini_client::GenerationBackend;
use crate::services::normalize::normalize;
use crate::services::prompt::build_prompt;
use crate::services::repair::repair;
use crate::store::{PlanRecord, SessionStore, StoredResponse};
use crate::types::plan::TripPlan;
use crate::types::turn::{ConversationTurn, Role};

/// Hard deadline for one generation call. Policy constant, not configurable.
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(15);

/// Fixed assistant reply when the backend misses the deadline
pub const TIMEOUT_MESSAGE: &str =
    "Sorry, the trip planner took too long to respond. Please try sending your message again.";

const BACKEND_ERROR_MESSAGE: &str =
    "Sorry, I'm having trouble reaching the trip planner right now. Please try again later.";

/// Session-changed notifications for renderers
#[derive(Debug, Clone)]
pub enum SessionEvent {
    TurnAppended { role: Role },
    PlanRecorded { plan_id: PlanId },
    SessionClosed,
}

/// What one accepted submission produced: the appended assistant turn, plus
/// the plan when generation succeeded. `diagnostic` carries the error code
/// when the turn is a failure reply.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub turn: ConversationTurn,
    pub plan: Option<TripPlan>,
    pub plan_id: PlanId,
    pub diagnostic: Option<&'static str>,
}

impl TurnOutcome {
    pub fn is_plan(&self) -> bool {
        self.plan.is_some()
    }
}

/// Per-session conversation controller.
///
/// Owns the generation-epoch counter and the active-session pointer, appends
/// every turn, and is the only writer of the session store. At most one
/// generation is live per session: a newer `submit` supersedes an in-flight
/// one, whose result is then discarded without appending anything.
pub struct Planner {
    backend: Arc<dyn GenerationBackend>,
    store: Arc<dyn SessionStore>,
    state: Mutex<PlannerState>,
    events: broadcast::Sender<SessionEvent>,
}

struct PlannerState {
    session: Option<PlanSession>,
    epoch: u64,
    clock: MonotonicMillis,
}

impl Planner {
    pub fn new(backend: Arc<dyn GenerationBackend>, store: Arc<dyn SessionStore>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            backend,
            store,
            state: Mutex::new(PlannerState {
                session: None,
                epoch: 0,
                clock: MonotonicMillis::new(),
            }),
            events,
        }
    }

    /// Subscribe to session-changed notifications
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the active session, if one is open
    pub fn session(&self) -> Option<PlanSession> {
        self.state
            .lock()
            .expect("planner state lock poisoned")
            .session
            .clone()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.state
            .lock()
            .expect("planner state lock poisoned")
            .session
            .as_ref()
            .map(|session| session.session_id.clone())
    }

    /// Close the conversation surface: abandon any in-flight generation and
    /// clear the active-session pointer. Recorded history stays retrievable
    /// through the store by plan id.
    pub fn close(&self) {
        let mut state = self.state.lock().expect("planner state lock poisoned");
        state.epoch += 1;
        if let Some(session) = state.session.take() {
            info!(target: "tripplanner::turns", session = %session.session_id, "session closed");
        }
        drop(state);
        let _ = self.events.send(SessionEvent::SessionClosed);
    }

    /// Handle one user utterance.
    ///
    /// Appends the user turn immediately, then runs prompt building,
    /// generation (under [`GENERATION_TIMEOUT`]), repair, and normalization,
    /// and appends exactly one assistant turn: the plan summary on success, a
    /// diagnostic reply on failure. Resolves once that turn is appended.
    ///
    /// Errors out without appending anything on empty input, and with
    /// [`PlannerError::Cancelled`] when a newer submission superseded this
    /// one before its result landed.
    pub async fn submit(&self, utterance: &str) -> Result<TurnOutcome> {
        let text = utterance.trim().to_string();
        if text.is_empty() {
            return Err(PlannerError::EmptyInput);
        }

        let (epoch, session_id, prompt) = {
            let mut state = self.state.lock().expect("planner state lock poisoned");
            state.epoch += 1;
            let epoch = state.epoch;

            if state.session.is_none() {
                let session_id = self.store.create_session()?;
                state.session = Some(PlanSession::new(session_id));
            }

            let timestamp = state.clock.next();
            let session = state.session.as_mut().expect("session just ensured");
            let turn = ConversationTurn::user(text.clone(), timestamp);
            session.push_turn(turn.clone());
            self.store.append_turn(&session.session_id, &turn)?;

            let prompt = build_prompt(&session.turns, &text);
            (epoch, session.session_id.clone(), prompt)
        };

        info!(target: "tripplanner::turns", session = %session_id, "user turn appended");
        let _ = self.events.send(SessionEvent::TurnAppended { role: Role::User });

        let generated = match timeout(GENERATION_TIMEOUT, self.backend.generate(&prompt)).await {
            Err(_) => Err(PlannerError::Timeout),
            Ok(result) => result,
        };

        let result = generated.and_then(|raw| repair(&raw).map(normalize));
        self.finish(epoch, &session_id, &text, result)
    }

    /// Append the assistant turn and persist the generation record, unless
    /// this generation went stale while its backend call was outstanding.
    fn finish(
        &self,
        epoch: u64,
        session_id: &SessionId,
        utterance: &str,
        result: Result<TripPlan>,
    ) -> Result<TurnOutcome> {
        let mut state = self.state.lock().expect("planner state lock poisoned");

        if state.epoch != epoch {
            debug!(
                target: "tripplanner::turns",
                session = %session_id,
                "stale generation discarded"
            );
            return Err(PlannerError::Cancelled);
        }

        let state_ref = &mut *state;
        let Some(session) = state_ref.session.as_mut() else {
            return Err(PlannerError::Cancelled);
        };

        let timestamp = state_ref.clock.next();
        let plan_id = PlanId::from_millis(timestamp);

        let (turn, plan, stored, diagnostic) = match result {
            Ok(plan) => {
                let turn = ConversationTurn::assistant(plan.summary_message.clone(), timestamp);
                let stored = StoredResponse::success(&plan);
                (turn, Some(plan), stored, None)
            }
            Err(err) => {
                let reply = match &err {
                    PlannerError::Timeout => TIMEOUT_MESSAGE.to_string(),
                    PlannerError::MalformedOutput { raw }
                    | PlannerError::SchemaMismatch { raw } => raw.clone(),
                    _ => BACKEND_ERROR_MESSAGE.to_string(),
                };
                warn!(
                    target: "tripplanner::turns",
                    session = %session_id,
                    code = err.error_code(),
                    "generation failed; diagnostic turn appended"
                );
                let turn = ConversationTurn::assistant(reply, timestamp);
                (turn, None, StoredResponse::failure(&err), Some(err.error_code()))
            }
        };

        session.push_turn(turn.clone());
        self.store.append_turn(session_id, &turn)?;

        let record = PlanRecord {
            id: timestamp.to_string(),
            plan_id: plan_id.clone(),
            timestamp,
            user_prompt: utterance.to_string(),
            generated_plan: stored,
        };
        self.store.record_plan(session_id, &record)?;

        if let Some(plan) = &plan {
            session.record_plan(PlanLogEntry {
                plan_id: plan_id.clone(),
                plan: plan.clone(),
                utterance: utterance.to_string(),
                created_at: timestamp,
            });
        }

        drop(state);

        let _ = self
            .events
            .send(SessionEvent::TurnAppended { role: Role::Assistant });
        if plan.is_some() {
            let _ = self.events.send(SessionEvent::PlanRecorded {
                plan_id: plan_id.clone(),
            });
        }

        Ok(TurnOutcome {
            turn,
            plan,
            plan_id,
            diagnostic,
        })
    }
}
