use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of most-recent turns forwarded to the free-form generation
/// collaborator. Older turns stay in the history for display and audit but
/// are excluded from generation context.
pub const GENERATION_WINDOW: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into(), timestamp: Utc::now() }
    }
}

/// Append-only transcript of one conversation session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn::new(Role::User, content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn::new(Role::Assistant, content));
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// The trailing window used as generation context.
    pub fn recent(&self, window: usize) -> &[ChatTurn] {
        let start = self.turns.len().saturating_sub(window);
        &self.turns[start..]
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
