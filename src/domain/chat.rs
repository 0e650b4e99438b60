//! Chat transcript entities for the tutor panel.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Who produced a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Tutor,
}

/// One entry in the tutor transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    /// Unix seconds at send time
    pub timestamp: u64,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: unix_seconds(),
        }
    }

    pub fn tutor(text: impl Into<String>) -> Self {
        Self {
            role: Role::Tutor,
            text: text.into(),
            timestamp: unix_seconds(),
        }
    }
}

/// Transcript a first-run session starts with
pub fn default_history() -> Vec<ChatMessage> {
    vec![ChatMessage::tutor(
        "Hello! I'm your dedicated JEE AI Tutor. How can I help you today? \
         You can ask me to solve a problem, explain a concept, or even \
         research latest trends!",
    )]
}

pub(crate) fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_history_is_single_tutor_greeting() {
        let history = default_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, Role::Tutor);
        assert!(history[0].text.starts_with("Hello!"));
    }

    #[test]
    fn test_message_roles_serialize_snake_case() {
        let msg = ChatMessage::user("What is escape velocity?");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        let back: ChatMessage = serde_json::from_value(json).unwrap();
        assert_eq!(back.role, Role::User);
    }
}
