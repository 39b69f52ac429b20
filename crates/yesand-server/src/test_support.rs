//! Scripted fakes for the model ports

use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};
use parking_lot::Mutex;
use yesand::{
    ChatMessage, ChatModel, CompletionOptions, CompletionResponse, DomainError, FetchedImage,
    FragmentStream, GeneratedImage, ImageFetcher, ImageGenerator, ImageRequest, Persona,
    PersonaDefinition, PersonaSource,
};

use crate::adapters::EmbeddedPersonaSource;
use crate::application::{
    ImageService, PersonaStore, ProxyService, SuggestionService, SynthesisService, TurnService,
};
use crate::config::Settings;
use crate::AppState;

/// Minimal complete persona record
pub fn persona_yaml(id: &str) -> String {
    format!(
        "id: {id}\n\
         name: {id}\n\
         tagline: Tagline for {id}\n\
         voice:\n  tone: Even\n  rhythm: Steady\n\
         aesthetic:\n  pulls_toward: [Light]\n  pulls_away_from: [Noise]\n\
         agent_system_prompt: You are {id}. Respond briefly.\n\
         synthesizer_system_prompt: You are the {id} synthesizer.\n"
    )
}

pub fn test_persona(id: &str) -> Persona {
    Persona::from_yaml("test.yaml", &persona_yaml(id)).unwrap()
}

/// Shared record of which fake was called, in order
pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub messages: Vec<ChatMessage>,
    pub options: CompletionOptions,
    pub streamed: bool,
}

/// Chat model that replays a fixed reply or fragment script
pub struct ScriptedChatModel {
    reply: Result<String, DomainError>,
    fragments: Vec<Result<String, DomainError>>,
    calls: Mutex<Vec<RecordedCall>>,
    dropped: Arc<AtomicBool>,
    log: Option<CallLog>,
}

impl ScriptedChatModel {
    fn scripted(reply: Result<String, DomainError>, fragments: Vec<Result<String, DomainError>>) -> Self {
        Self {
            reply,
            fragments,
            calls: Mutex::new(Vec::new()),
            dropped: Arc::new(AtomicBool::new(false)),
            log: None,
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::scripted(Ok(text.to_string()), vec![Ok(text.to_string())])
    }

    pub fn streaming(fragments: &[&str]) -> Self {
        Self::scripted(
            Ok(fragments.concat()),
            fragments.iter().map(|f| Ok(f.to_string())).collect(),
        )
    }

    /// Both batch and stream fail before producing anything
    pub fn failing(message: &str) -> Self {
        Self::scripted(Err(DomainError::ExternalService(message.to_string())), Vec::new())
    }

    /// Append a mid-stream failure after the scripted fragments
    pub fn with_stream_error(mut self, message: &str) -> Self {
        self.fragments
            .push(Err(DomainError::ExternalService(message.to_string())));
        self
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// True once a stream handed out by this model has been dropped
    pub fn upstream_dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }

    fn record(&self, messages: &[ChatMessage], options: &CompletionOptions, streamed: bool) {
        self.calls.lock().push(RecordedCall {
            messages: messages.to_vec(),
            options: options.clone(),
            streamed,
        });
        if let Some(log) = &self.log {
            log.lock().push("chat");
        }
    }
}

#[async_trait]
impl ChatModel for ScriptedChatModel {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        self.record(messages, options, false);
        let content = self.reply.clone()?;
        Ok(CompletionResponse {
            content,
            model: options.model.clone(),
            ..Default::default()
        })
    }

    async fn stream(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<FragmentStream, DomainError> {
        self.record(messages, options, true);
        if let Err(e) = &self.reply {
            return Err(e.clone());
        }
        let inner = stream::iter(self.fragments.clone()).boxed();
        Ok(DropFlag {
            inner,
            dropped: Arc::clone(&self.dropped),
        }
        .boxed())
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

/// Sets a flag when the wrapped stream is dropped
struct DropFlag {
    inner: FragmentStream,
    dropped: Arc<AtomicBool>,
}

impl Stream for DropFlag {
    type Item = Result<String, DomainError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

pub struct ScriptedImageGenerator {
    result: Result<Vec<GeneratedImage>, DomainError>,
    requests: Mutex<Vec<ImageRequest>>,
    log: Option<CallLog>,
}

impl ScriptedImageGenerator {
    pub fn returning(images: Vec<GeneratedImage>) -> Self {
        Self {
            result: Ok(images),
            requests: Mutex::new(Vec::new()),
            log: None,
        }
    }

    pub fn with_url(url: &str) -> Self {
        Self::returning(vec![GeneratedImage {
            url: Some(url.to_string()),
            revised_prompt: None,
        }])
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(DomainError::ExternalService(message.to_string())),
            requests: Mutex::new(Vec::new()),
            log: None,
        }
    }

    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl ImageGenerator for ScriptedImageGenerator {
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>, DomainError> {
        self.requests.lock().push(request.clone());
        if let Some(log) = &self.log {
            log.lock().push("image");
        }
        self.result.clone()
    }
}

pub struct ScriptedImageFetcher {
    result: Result<FetchedImage, DomainError>,
    urls: Mutex<Vec<String>>,
}

impl ScriptedImageFetcher {
    pub fn returning(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            result: Ok(FetchedImage {
                bytes,
                content_type,
            }),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(DomainError::ExternalService(message.to_string())),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }
}

#[async_trait]
impl ImageFetcher for ScriptedImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, DomainError> {
        self.urls.lock().push(url.to_string());
        self.result.clone()
    }
}

/// In-memory definitions that count how often they were read
pub struct StaticPersonaSource {
    definitions: Vec<PersonaDefinition>,
    reads: AtomicUsize,
}

impl StaticPersonaSource {
    pub fn new(definitions: Vec<PersonaDefinition>) -> Self {
        Self {
            definitions,
            reads: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl PersonaSource for StaticPersonaSource {
    fn definitions(&self) -> Result<Vec<PersonaDefinition>, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.definitions.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

/// App state over the bundled personas and the given fakes
pub fn test_state(
    chat: Arc<ScriptedChatModel>,
    images: Arc<ScriptedImageGenerator>,
    fetcher: Arc<ScriptedImageFetcher>,
) -> AppState {
    let settings = Arc::new(Settings::from_pairs(Vec::<(String, String)>::new()));

    AppState {
        personas: Arc::new(PersonaStore::new(Arc::new(EmbeddedPersonaSource))),
        turns: Arc::new(TurnService::new(chat.clone(), settings.clone())),
        synthesizer: Arc::new(SynthesisService::new(chat, settings.clone())),
        images: Arc::new(ImageService::new(images, settings)),
        proxy: Arc::new(ProxyService::new(fetcher)),
        suggestions: Arc::new(SuggestionService::with_words(["LIGHTHOUSE"])),
    }
}
