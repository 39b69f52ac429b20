//! Client-side parsing of the server's `/chat/stream` events

use serde::Deserialize;

/// One event sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    Chunk { content: String },
    Done,
    Error { message: String },
}

/// Parse one `data` payload. Payloads that do not parse are skipped.
pub fn parse_event(data: &str) -> Option<StreamEvent> {
    match serde_json::from_str(data) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::debug!("Skipping unparseable event {:?}: {}", data, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events() {
        assert_eq!(
            parse_event(r#"{"type":"chunk","content":"yes, and café"}"#),
            Some(StreamEvent::Chunk {
                content: "yes, and café".to_string()
            })
        );
        assert_eq!(parse_event(r#"{"type":"done"}"#), Some(StreamEvent::Done));
        assert_eq!(
            parse_event(r#"{"type":"error","message":"LLM down"}"#),
            Some(StreamEvent::Error {
                message: "LLM down".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_payloads_skipped() {
        assert_eq!(parse_event(""), None);
        assert_eq!(parse_event("not json"), None);
        assert_eq!(parse_event(r#"{"type":"progress"}"#), None);
    }
}
