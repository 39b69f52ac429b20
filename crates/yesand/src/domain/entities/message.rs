//! Message Entity
//!
//! One turn of the caller's conversation history.

use serde::{Deserialize, Serialize};

/// Who spoke a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Ai,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Human => "human",
            Role::Ai => "ai",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in the improv conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
        }
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self {
            role: Role::Ai,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        let msg: Message = serde_json::from_str(r#"{"role":"ai","content":"Yes, and"}"#).unwrap();
        assert_eq!(msg.role, Role::Ai);
        assert_eq!(
            serde_json::to_string(&Message::human("hi")).unwrap(),
            r#"{"role":"human","content":"hi"}"#
        );
    }

    #[test]
    fn test_unknown_role_rejected() {
        let parsed = serde_json::from_str::<Message>(r#"{"role":"system","content":"x"}"#);
        assert!(parsed.is_err());
    }
}
