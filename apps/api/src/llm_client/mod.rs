/// LLM Client: the only module that talks to the Anthropic Messages API.
///
/// ARCHITECTURAL RULE: handlers reach the model through `CompletionStreamer`,
/// never through reqwest directly.
///
/// Model and output budget are fixed constants, not configuration.
use std::collections::VecDeque;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, BoxStream, FusedStream};
use futures::{Stream, StreamExt, TryStreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod sse;

use sse::{SseDecoder, SseEvent};

const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for every prediction.
pub const MODEL: &str = "claude-sonnet-4-20250514";
pub const MAX_TOKENS: u32 = 1024;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("stream error ({kind}): {message}")]
    Stream { kind: String, message: String },
}

/// Text produced by the model, one delta per item, in arrival order.
pub type TextStream = BoxStream<'static, Result<String, LlmError>>;

/// Opens a token stream for a single-turn prompt.
///
/// `AppState` carries an `Arc<dyn CompletionStreamer>`; swapping it is how
/// tests script the upstream without a network.
#[async_trait]
pub trait CompletionStreamer: Send + Sync {
    /// Resolves once the upstream has accepted the request; errors after that
    /// point arrive as items of the returned stream.
    async fn stream(&self, prompt: &str) -> Result<TextStream, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<AnthropicMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    #[serde(rename = "type", default)]
    kind: String,
    message: String,
}

/// Messages API stream events. Everything but text deltas, errors and the
/// terminal `message_stop` is ignored.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum StreamEvent {
    ContentBlockDelta { delta: Delta },
    MessageStop,
    Error { error: AnthropicErrorBody },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Delta {
    TextDelta { text: String },
    #[serde(other)]
    Other,
}

/// Streams completions from the Anthropic Messages API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl LlmClient {
    pub fn new(client: Client, api_key: String, api_url: String) -> Self {
        Self {
            client,
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl CompletionStreamer for LlmClient {
    async fn stream(&self, prompt: &str) -> Result<TextStream, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
            stream: true,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}: {}", status, body);
            // Try to parse error message
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!("LLM stream opened (model: {MODEL})");
        Ok(text_deltas(response.bytes_stream()).boxed())
    }
}

struct DeltaReader {
    bytes: BoxStream<'static, Result<Bytes, LlmError>>,
    decoder: SseDecoder,
    pending: VecDeque<Result<String, LlmError>>,
    finished: bool,
}

impl DeltaReader {
    fn handle(&mut self, event: SseEvent) {
        if self.finished {
            return;
        }
        match serde_json::from_str::<StreamEvent>(&event.data) {
            Ok(StreamEvent::ContentBlockDelta {
                delta: Delta::TextDelta { text },
            }) => {
                if !text.is_empty() {
                    self.pending.push_back(Ok(text));
                }
            }
            Ok(StreamEvent::MessageStop) => self.finished = true,
            Ok(StreamEvent::Error { error }) => {
                self.pending.push_back(Err(LlmError::Stream {
                    kind: error.kind,
                    message: error.message,
                }));
                self.finished = true;
            }
            Ok(_) => {}
            Err(e) => {
                self.pending.push_back(Err(LlmError::Parse(e)));
                self.finished = true;
            }
        }
    }
}

/// Turns a raw Messages API SSE body into its text deltas.
///
/// Lazy and single-pass: a network chunk is only read once every delta from
/// the previous one has been yielded. The stream ends after `message_stop`, at
/// end of body, or right after the first error item. Once ended it stays
/// ended.
pub fn text_deltas<S, E>(bytes: S) -> impl FusedStream<Item = Result<String, LlmError>>
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<LlmError> + 'static,
{
    let reader = DeltaReader {
        bytes: bytes.map_err(Into::into).boxed(),
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    stream::unfold(Some(reader), |state| async move {
        let mut reader = state?;
        loop {
            if let Some(item) = reader.pending.pop_front() {
                return if item.is_err() {
                    Some((item, None))
                } else {
                    Some((item, Some(reader)))
                };
            }
            if reader.finished {
                return None;
            }
            match reader.bytes.next().await {
                Some(Ok(chunk)) => {
                    for event in reader.decoder.push(&chunk) {
                        reader.handle(event);
                    }
                }
                Some(Err(e)) => return Some((Err(e), None)),
                None => {
                    if let Some(event) = reader.decoder.finish() {
                        reader.handle(event);
                    }
                    reader.finished = true;
                }
            }
        }
    })
    .fuse()
}
