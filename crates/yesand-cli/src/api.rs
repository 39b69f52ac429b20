//! Yes-And API Client

use anyhow::{bail, Context, Result};
use futures::StreamExt;
use reqwest::{Client, Response};
use reqwest_eventsource::{retry::Never, Event, EventSource};
use serde::{Deserialize, Serialize};
use yesand::Message;

use crate::sse::{parse_event, StreamEvent};

/// API Client for the Yes-And server
pub struct YesAndClient {
    client: Client,
    base_url: String,
}

// ============================================
// API Types
// ============================================

#[derive(Debug, Deserialize)]
pub struct Aesthetic {
    pub pulls_toward: Vec<String>,
    pub pulls_away_from: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PersonaInfo {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub aesthetic: Aesthetic,
}

#[derive(Debug, Deserialize)]
struct PersonasResponse {
    personas: Vec<PersonaInfo>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    persona_id: &'a str,
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub image_url: String,
    pub prompt_used: String,
}

#[derive(Debug, Deserialize)]
struct SuggestResponse {
    word: String,
}

async fn check(resp: Response) -> Result<Response> {
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("API error ({}): {}", status, body);
    }
    Ok(resp)
}

impl YesAndClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    /// List all personas
    pub async fn list_personas(&self) -> Result<Vec<PersonaInfo>> {
        let resp = self
            .client
            .get(self.url("/personas"))
            .send()
            .await
            .context("Failed to connect to Yes-And API")?;

        let body: PersonasResponse = check(resp)
            .await?
            .json()
            .await
            .context("Failed to parse response")?;

        Ok(body.personas)
    }

    /// Random audience suggestion
    pub async fn suggest(&self) -> Result<String> {
        let resp = self
            .client
            .get(self.url("/suggest"))
            .send()
            .await
            .context("Failed to connect to Yes-And API")?;

        let body: SuggestResponse = check(resp)
            .await?
            .json()
            .await
            .context("Failed to parse response")?;

        Ok(body.word)
    }

    /// One batch turn
    pub async fn chat(&self, persona_id: &str, messages: &[Message]) -> Result<String> {
        let resp = self
            .client
            .post(self.url("/chat"))
            .json(&ChatRequest {
                persona_id,
                messages,
            })
            .send()
            .await
            .context("Failed to connect to Yes-And API")?;

        let body: ChatResponse = check(resp)
            .await?
            .json()
            .await
            .context("Failed to parse response")?;

        Ok(body.message)
    }

    /// One streamed turn; `on_chunk` sees each fragment as it arrives.
    /// Returns the full reply.
    pub async fn chat_stream<F>(
        &self,
        persona_id: &str,
        messages: &[Message],
        mut on_chunk: F,
    ) -> Result<String>
    where
        F: FnMut(&str),
    {
        let request = self.client.post(self.url("/chat/stream")).json(&ChatRequest {
            persona_id,
            messages,
        });

        let mut events = EventSource::new(request).context("Failed to build stream request")?;
        events.set_retry_policy(Box::new(Never));
        let mut reply = String::new();

        while let Some(event) = events.next().await {
            let message = match event {
                Ok(Event::Open) => continue,
                Ok(Event::Message(message)) => message,
                Err(reqwest_eventsource::Error::StreamEnded) => break,
                Err(reqwest_eventsource::Error::InvalidStatusCode(status, resp)) => {
                    let body = resp.text().await.unwrap_or_default();
                    bail!("API error ({}): {}", status, body);
                }
                Err(e) => bail!("Stream interrupted: {}", e),
            };

            match parse_event(&message.data) {
                Some(StreamEvent::Chunk { content }) => {
                    on_chunk(&content);
                    reply.push_str(&content);
                }
                Some(StreamEvent::Done) => return Ok(reply),
                Some(StreamEvent::Error { message }) => bail!("LLM error: {}", message),
                None => {}
            }
        }

        tracing::debug!("Stream ended without a done event");
        Ok(reply)
    }

    /// Synthesize a prompt from the conversation and generate its image
    pub async fn generate(&self, persona_id: &str, messages: &[Message]) -> Result<GenerateResponse> {
        let resp = self
            .client
            .post(self.url("/generate"))
            .json(&ChatRequest {
                persona_id,
                messages,
            })
            .send()
            .await
            .context("Failed to connect to Yes-And API")?;

        check(resp)
            .await?
            .json()
            .await
            .context("Failed to parse response")
    }

    /// Fetch image bytes through the server's download proxy
    pub async fn download(&self, image_url: &str) -> Result<Vec<u8>> {
        let url = self.url(&format!(
            "/proxy-image?url={}",
            urlencoding::encode(image_url)
        ));
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to connect to Yes-And API")?;

        let bytes = check(resp)
            .await?
            .bytes()
            .await
            .context("Failed to read image")?;

        Ok(bytes.to_vec())
    }
}
