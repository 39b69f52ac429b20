//! OpenAI chat completions

use std::time::Duration;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest_eventsource::{retry::Never, Event, EventSource};
use serde::{Deserialize, Serialize};
use yesand::{
    ChatMessage, ChatModel, CompletionOptions, CompletionResponse, DomainError, FragmentStream,
    TokenUsage,
};

use super::{map_http_error, send, OpenAiClient, REQUEST_TIMEOUT};

const STREAM_DONE: &str = "[DONE]";
/// Longest silence tolerated between two stream events
const STREAM_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// [`ChatModel`] backed by `/chat/completions`
#[derive(Clone)]
pub struct OpenAiChatModel {
    client: OpenAiClient,
}

impl OpenAiChatModel {
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }
}

// ============================================
// Request/Response Types
// ============================================

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
}

impl<'a> ChatCompletionRequest<'a> {
    fn new(messages: &'a [ChatMessage], options: &'a CompletionOptions, stream: bool) -> Self {
        Self {
            model: &options.model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            stream,
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    /// Set when the upstream fails after the stream has started
    error: Option<ChunkError>,
}

#[derive(Deserialize)]
struct ChunkError {
    message: String,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Deserialize, Default)]
struct Delta {
    content: Option<String>,
}

impl From<ChatCompletionResponse> for CompletionResponse {
    fn from(raw: ChatCompletionResponse) -> Self {
        let (content, finish_reason) = raw
            .choices
            .into_iter()
            .next()
            .map(|choice| (choice.message.content.unwrap_or_default(), choice.finish_reason))
            .unwrap_or_default();

        let usage = raw
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Self {
            content,
            model: raw.model,
            usage,
            finish_reason,
        }
    }
}

/// One decoded stream payload
#[derive(Debug, PartialEq, Eq)]
enum StreamItem {
    Text(String),
    Done,
}

/// Role-only and empty deltas decode to `Text("")`
fn decode_chunk(payload: &str) -> Result<StreamItem, DomainError> {
    if payload.trim() == STREAM_DONE {
        return Ok(StreamItem::Done);
    }

    let chunk: ChatCompletionChunk = serde_json::from_str(payload)
        .map_err(|e| DomainError::ExternalService(format!("Malformed stream chunk: {}", e)))?;

    if let Some(error) = chunk.error {
        return Err(DomainError::ExternalService(format!(
            "OpenAI stream error: {}",
            error.message
        )));
    }

    let text = chunk
        .choices
        .into_iter()
        .filter_map(|choice| choice.delta.content)
        .collect::<String>();
    Ok(StreamItem::Text(text))
}

async fn stream_error(err: reqwest_eventsource::Error) -> DomainError {
    match err {
        reqwest_eventsource::Error::InvalidStatusCode(status, response) => {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            map_http_error(status, body)
        }
        other => DomainError::ExternalService(format!("Stream error: {}", other)),
    }
}

/// `data` payloads of an opened event source, until the server closes it
fn payloads(mut events: EventSource) -> impl Stream<Item = Result<String, DomainError>> + Send {
    async_stream::stream! {
        while let Some(event) = events.next().await {
            match event {
                Ok(Event::Open) => {}
                Ok(Event::Message(message)) => yield Ok(message.data),
                Err(reqwest_eventsource::Error::StreamEnded) => break,
                Err(e) => {
                    yield Err(stream_error(e).await);
                    break;
                }
            }
        }
    }
}

/// Decode payloads into text fragments, stopping at `[DONE]`.
///
/// Empty deltas are skipped. Waiting longer than `idle` for the next
/// payload fails the stream.
fn fragments<S>(payloads: S, idle: Duration) -> impl Stream<Item = Result<String, DomainError>> + Send
where
    S: Stream<Item = Result<String, DomainError>> + Send,
{
    async_stream::try_stream! {
        let mut payloads = Box::pin(payloads);

        loop {
            let next = tokio::time::timeout(idle, payloads.next())
                .await
                .map_err(|_| DomainError::ExternalService(format!("Stream idle for {:?}", idle)))?;
            let payload = match next {
                Some(payload) => payload?,
                None => break,
            };

            match decode_chunk(&payload)? {
                StreamItem::Done => break,
                StreamItem::Text(text) if !text.is_empty() => yield text,
                StreamItem::Text(_) => {}
            }
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let body = ChatCompletionRequest::new(messages, options, false);
        let request = self.client.post("chat/completions")?.timeout(REQUEST_TIMEOUT).json(&body);

        tracing::debug!(
            "Chat completion: model={} messages={} temperature={}",
            options.model,
            messages.len(),
            options.temperature
        );

        let response = send(request).await?;
        let raw: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| DomainError::ExternalService(format!("Parse error: {}", e)))?;

        Ok(raw.into())
    }

    async fn stream(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<FragmentStream, DomainError> {
        let body = ChatCompletionRequest::new(messages, options, true);
        let request = self.client.post("chat/completions")?.json(&body);

        tracing::debug!(
            "Chat stream: model={} messages={} temperature={}",
            options.model,
            messages.len(),
            options.temperature
        );

        let mut events = EventSource::new(request)
            .map_err(|e| DomainError::ExternalService(format!("Failed to open stream: {}", e)))?;
        events.set_retry_policy(Box::new(Never));

        // Surface connection and status failures before handing out the stream
        match events.next().await {
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(stream_error(e).await),
            None => {
                return Err(DomainError::ExternalService(
                    "Stream closed before opening".to_string(),
                ))
            }
        }

        Ok(Box::pin(fragments(payloads(events), STREAM_IDLE_TIMEOUT)))
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yesand::MessageRole;

    #[test]
    fn test_request_body_shape() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let options = CompletionOptions::new("gpt-4o", 0.9);

        let batch = serde_json::to_value(ChatCompletionRequest::new(&messages, &options, false)).unwrap();
        assert_eq!(batch["model"], "gpt-4o");
        assert_eq!(batch["messages"][0]["role"], "system");
        assert_eq!(batch["messages"][1]["content"], "hi");
        assert!(batch.get("stream").is_none());
        assert!(batch.get("max_tokens").is_none());

        let streamed = serde_json::to_value(ChatCompletionRequest::new(&messages, &options, true)).unwrap();
        assert_eq!(streamed["stream"], true);
        assert_eq!(messages[0].role, MessageRole::System);
    }

    #[test]
    fn test_response_conversion() {
        let raw: ChatCompletionResponse = serde_json::from_str(
            r#"{"model":"gpt-4o","choices":[{"message":{"role":"assistant","content":"Yes, and"},"finish_reason":"stop"}],
                "usage":{"prompt_tokens":5,"completion_tokens":3,"total_tokens":8}}"#,
        )
        .unwrap();
        let response: CompletionResponse = raw.into();
        assert_eq!(response.content, "Yes, and");
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.total_tokens, 8);
    }

    #[test]
    fn test_null_content_becomes_empty() {
        let raw: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null},"finish_reason":null}]}"#)
                .unwrap();
        let response: CompletionResponse = raw.into();
        assert_eq!(response.content, "");

        let raw: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(CompletionResponse::from(raw).content, "");
    }

    #[test]
    fn test_decode_chunk() {
        assert_eq!(
            decode_chunk(r#"{"choices":[{"delta":{"content":"Yes, "}}]}"#).unwrap(),
            StreamItem::Text("Yes, ".to_string())
        );
        assert_eq!(
            decode_chunk(r#"{"choices":[{"delta":{"role":"assistant"}}]}"#).unwrap(),
            StreamItem::Text(String::new())
        );
        assert_eq!(decode_chunk(r#"{"choices":[]}"#).unwrap(), StreamItem::Text(String::new()));
        assert_eq!(decode_chunk("[DONE]").unwrap(), StreamItem::Done);
        assert!(decode_chunk("not json").is_err());
    }

    #[test]
    fn test_decode_chunk_in_band_error() {
        let err = decode_chunk(r#"{"error":{"message":"The server is overloaded","type":"server_error"}}"#)
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::ExternalService("OpenAI stream error: The server is overloaded".to_string())
        );
    }

    fn scripted(payloads: &[&str]) -> impl Stream<Item = Result<String, DomainError>> + Send {
        let items: Vec<Result<String, DomainError>> =
            payloads.iter().map(|p| Ok(p.to_string())).collect();
        futures::stream::iter(items)
    }

    async fn collect(
        stream: impl Stream<Item = Result<String, DomainError>> + Send,
    ) -> Vec<Result<String, DomainError>> {
        stream.collect().await
    }

    #[tokio::test]
    async fn test_fragments_stop_at_done() {
        let out = collect(fragments(
            scripted(&[
                r#"{"choices":[{"delta":{"role":"assistant"}}]}"#,
                r#"{"choices":[{"delta":{"content":"Yes, and "}}]}"#,
                r#"{"choices":[{"delta":{"content":"fog"}}]}"#,
                "[DONE]",
                r#"{"choices":[{"delta":{"content":"ignored"}}]}"#,
            ]),
            Duration::from_secs(5),
        ))
        .await;

        assert_eq!(out, vec![Ok("Yes, and ".to_string()), Ok("fog".to_string())]);
    }

    #[tokio::test]
    async fn test_fragments_end_with_source() {
        let out = collect(fragments(
            scripted(&[r#"{"choices":[{"delta":{"content":"Hi"}}]}"#]),
            Duration::from_secs(5),
        ))
        .await;

        assert_eq!(out, vec![Ok("Hi".to_string())]);
    }

    #[tokio::test]
    async fn test_fragments_fail_on_in_band_error() {
        let out = collect(fragments(
            scripted(&[
                r#"{"choices":[{"delta":{"content":"Yes, and "}}]}"#,
                r#"{"error":{"message":"The server is overloaded"}}"#,
                r#"{"choices":[{"delta":{"content":"never"}}]}"#,
            ]),
            Duration::from_secs(5),
        ))
        .await;

        assert_eq!(out.len(), 2);
        assert_eq!(out[0], Ok("Yes, and ".to_string()));
        assert!(matches!(&out[1], Err(DomainError::ExternalService(msg)) if msg.contains("overloaded")));
    }

    #[tokio::test]
    async fn test_fragments_pass_transport_error() {
        let source = futures::stream::iter(vec![
            Ok(r#"{"choices":[{"delta":{"content":"Yes"}}]}"#.to_string()),
            Err(DomainError::ExternalService("Stream error: reset".to_string())),
        ]);
        let out = collect(fragments(source, Duration::from_secs(5))).await;

        assert_eq!(
            out,
            vec![
                Ok("Yes".to_string()),
                Err(DomainError::ExternalService("Stream error: reset".to_string())),
            ]
        );
    }

    #[tokio::test]
    async fn test_fragments_fail_when_upstream_stalls() {
        let stalled = scripted(&[r#"{"choices":[{"delta":{"content":"Yes"}}]}"#])
            .chain(futures::stream::pending());
        let out = collect(fragments(stalled, Duration::from_millis(20))).await;

        assert_eq!(out.len(), 2);
        assert_eq!(out[0], Ok("Yes".to_string()));
        assert!(matches!(&out[1], Err(DomainError::ExternalService(msg)) if msg.contains("idle")));
    }
}
