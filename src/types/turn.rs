use serde::{Deserialize, Serialize};

/// Who authored a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the conversation log.
///
/// Turns are append-only: once created they are never mutated, and their
/// timestamps are strictly increasing within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    /// Milliseconds since the Unix epoch, bumped to stay monotonic per session
    pub timestamp: u64,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>, timestamp: u64) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp,
        }
    }

    pub fn assistant(text: impl Into<String>, timestamp: u64) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp,
        }
    }

    /// History label used when serializing turns into a prompt
    pub fn speaker_label(&self) -> &'static str {
        match self.role {
            Role::User => "User",
            Role::Assistant => "AI",
        }
    }
}
