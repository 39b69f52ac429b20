//! Synthesis Application Service
//!
//! Condenses a conversation into one image prompt in the persona's style.

use std::sync::Arc;

use yesand::{
    transcript, ChatMessage, ChatModel, CompletionOptions, DomainError, Message, Persona,
};

use crate::config::Settings;

pub const SYNTHESIS_TEMPERATURE: f32 = 0.3;

/// Synthesizer system prompt followed by the whole history as one transcript
pub fn build_synthesis_messages(persona: &Persona, history: &[Message]) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(persona.synthesizer_system_prompt.clone()),
        ChatMessage::user(transcript(history)),
    ]
}

pub struct SynthesisService {
    chat: Arc<dyn ChatModel>,
    settings: Arc<Settings>,
}

impl SynthesisService {
    pub fn new(chat: Arc<dyn ChatModel>, settings: Arc<Settings>) -> Self {
        Self { chat, settings }
    }

    /// Image prompt for the conversation, returned verbatim
    pub async fn synthesize(&self, persona: &Persona, history: &[Message]) -> Result<String, DomainError> {
        let messages = build_synthesis_messages(persona, history);
        let options = CompletionOptions::new(self.settings.synthesis_model(), SYNTHESIS_TEMPERATURE);

        let response = self
            .chat
            .complete(&messages, &options)
            .await
            .map_err(|e| match e {
                DomainError::SynthesisFailed(_) => e,
                other => DomainError::SynthesisFailed(other.detail()),
            })?;

        tracing::debug!("Synthesized prompt for {} ({} chars)", persona.id, response.content.len());

        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OPENAI_SYNTHESIS_MODEL, OPENAI_TEXT_MODEL};
    use crate::test_support::{test_persona, ScriptedChatModel};
    use yesand::MessageRole;

    fn history() -> Vec<Message> {
        vec![
            Message::human("A lighthouse"),
            Message::ai("Yes, and the fog"),
        ]
    }

    #[tokio::test]
    async fn test_synthesize_returns_content_verbatim() {
        let chat = Arc::new(ScriptedChatModel::replying("  Concrete lighthouse in fog  "));
        let service = SynthesisService::new(chat, Arc::new(Settings::from_pairs(Vec::<(String, String)>::new())));

        let prompt = service
            .synthesize(&test_persona("brutalist"), &history())
            .await
            .unwrap();
        assert_eq!(prompt, "  Concrete lighthouse in fog  ");
    }

    #[tokio::test]
    async fn test_synthesis_request_shape() {
        let chat = Arc::new(ScriptedChatModel::replying("prompt"));
        let persona = test_persona("brutalist");
        let service = SynthesisService::new(
            chat.clone(),
            Arc::new(Settings::from_pairs([(OPENAI_TEXT_MODEL, "gpt-4.1")])),
        );

        service.synthesize(&persona, &history()).await.unwrap();

        let calls = chat.calls();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.options.model, "gpt-4.1");
        assert_eq!(call.options.temperature, SYNTHESIS_TEMPERATURE);
        assert_eq!(call.messages.len(), 2);
        assert_eq!(call.messages[0].role, MessageRole::System);
        assert_eq!(call.messages[0].content, persona.synthesizer_system_prompt);
        assert_eq!(call.messages[1].role, MessageRole::User);
        assert_eq!(
            call.messages[1].content,
            "human: A lighthouse\nai: Yes, and the fog"
        );
    }

    #[tokio::test]
    async fn test_synthesis_model_override() {
        let chat = Arc::new(ScriptedChatModel::replying("prompt"));
        let service = SynthesisService::new(
            chat.clone(),
            Arc::new(Settings::from_pairs([
                (OPENAI_TEXT_MODEL, "gpt-4.1"),
                (OPENAI_SYNTHESIS_MODEL, "gpt-4o-mini"),
            ])),
        );

        service.synthesize(&test_persona("romantic"), &[]).await.unwrap();
        assert_eq!(chat.calls()[0].options.model, "gpt-4o-mini");
        assert_eq!(chat.calls()[0].messages[1].content, "");
    }

    #[tokio::test]
    async fn test_synthesis_failure() {
        let chat = Arc::new(ScriptedChatModel::failing("rate limited"));
        let service = SynthesisService::new(chat, Arc::new(Settings::from_pairs(Vec::<(String, String)>::new())));

        let err = service
            .synthesize(&test_persona("brutalist"), &history())
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::SynthesisFailed("rate limited".to_string()));
    }
}
