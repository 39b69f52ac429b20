//! Conversation DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use yesand::{Message, Role};

/// Speaker of a history entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    Human,
    Ai,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TurnMessage {
    pub role: TurnRole,
    pub content: String,
}

impl From<&TurnMessage> for Message {
    fn from(msg: &TurnMessage) -> Self {
        let role = match msg.role {
            TurnRole::Human => Role::Human,
            TurnRole::Ai => Role::Ai,
        };
        Message {
            role,
            content: msg.content.clone(),
        }
    }
}

/// Persona plus the full history so far, oldest first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub persona_id: String,
    #[serde(default)]
    pub messages: Vec<TurnMessage>,
}

impl ChatRequest {
    pub fn history(&self) -> Vec<Message> {
        self.messages.iter().map(Message::from).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub message: String,
}

/// One SSE event of a streamed turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    Chunk { content: String },
    Done,
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_event_wire_format() {
        let chunk = StreamEvent::Chunk {
            content: "yes, and".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&chunk).unwrap(),
            r#"{"type":"chunk","content":"yes, and"}"#
        );
        assert_eq!(
            serde_json::to_string(&StreamEvent::Done).unwrap(),
            r#"{"type":"done"}"#
        );
        assert_eq!(
            serde_json::to_string(&StreamEvent::Error {
                message: "boom".to_string()
            })
            .unwrap(),
            r#"{"type":"error","message":"boom"}"#
        );
    }

    #[test]
    fn test_request_history() {
        let request: ChatRequest = serde_json::from_str(
            r#"{"persona_id":"brutalist","messages":[{"role":"human","content":"A room"},{"role":"ai","content":"Yes, and"}]}"#,
        )
        .unwrap();

        assert_eq!(
            request.history(),
            vec![Message::human("A room"), Message::ai("Yes, and")]
        );
    }
}
