//! Transcript flattening for image-prompt synthesis

use crate::domain::entities::Message;

/// One `role: content` line per message, oldest first, newline-joined.
pub fn transcript(history: &[Message]) -> String {
    history
        .iter()
        .map(|msg| format!("{}: {}", msg.role, msg.content))
        .collect::<Vec<_>>()
        .join("\n")
}
