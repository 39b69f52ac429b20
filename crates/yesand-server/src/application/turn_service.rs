//! Turn Application Service
//!
//! Produces the persona's next improv line, batch or streamed. Both paths
//! enforce the "yes, and" opening.

use std::sync::Arc;

use futures::{Stream, StreamExt};
use yesand::{
    ensure_yes_and, ChatMessage, ChatModel, CompletionOptions, DomainError, Message, Persona,
    YesAndGate,
};

use crate::config::Settings;

pub const TURN_TEMPERATURE: f32 = 0.9;

/// Persona system prompt followed by the history in order
pub fn build_turn_messages(persona: &Persona, history: &[Message]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage::system(persona.agent_system_prompt.clone()));
    messages.extend(history.iter().map(ChatMessage::from));
    messages
}

fn turn_failed(err: DomainError) -> DomainError {
    match err {
        DomainError::TurnFailed(_) => err,
        other => DomainError::TurnFailed(other.detail()),
    }
}

pub struct TurnService {
    chat: Arc<dyn ChatModel>,
    settings: Arc<Settings>,
}

impl TurnService {
    pub fn new(chat: Arc<dyn ChatModel>, settings: Arc<Settings>) -> Self {
        Self { chat, settings }
    }

    /// One complete reply that opens with "yes, and"
    pub async fn run_turn(&self, persona: &Persona, history: &[Message]) -> Result<String, DomainError> {
        let messages = build_turn_messages(persona, history);
        let options = CompletionOptions::new(self.settings.turn_model(false), TURN_TEMPERATURE);

        let response = self
            .chat
            .complete(&messages, &options)
            .await
            .map_err(turn_failed)?;

        tracing::debug!(
            "Turn for {} via {} ({} tokens)",
            persona.id,
            self.chat.provider_name(),
            response.usage.total_tokens
        );

        Ok(ensure_yes_and(&response.content))
    }

    /// Reply fragments whose concatenation opens with "yes, and".
    ///
    /// Nothing is requested until the stream is first polled; dropping the
    /// stream drops the upstream connection. An empty upstream yields no
    /// fragments at all.
    pub fn stream_turn(
        &self,
        persona: &Persona,
        history: &[Message],
    ) -> impl Stream<Item = Result<String, DomainError>> + Send + 'static {
        let chat = Arc::clone(&self.chat);
        let messages = build_turn_messages(persona, history);
        let options = CompletionOptions::new(self.settings.turn_model(true), TURN_TEMPERATURE);

        async_stream::try_stream! {
            let mut upstream = chat.stream(&messages, &options).await.map_err(turn_failed)?;
            let mut gate = YesAndGate::new();

            while let Some(fragment) = upstream.next().await {
                let fragment = fragment.map_err(turn_failed)?;
                if let Some(out) = gate.push(&fragment) {
                    yield out;
                }
            }

            if let Some(out) = gate.finish() {
                yield out;
            }
        }
    }
}
