//! Prediction relay: forwards model text deltas to the HTTP body as they arrive.
//!
//! The prompt is rendered once from the full posting snapshot before the
//! upstream call. After that every delta becomes exactly one body chunk: no
//! buffering, no reordering, no trailer. Deltas are whole `String`s, so chunk
//! boundaries never split a character.

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt, TryStreamExt};
use posting::JobPosting;
use tracing::{debug, error, info};

use crate::llm_client::{CompletionStreamer, LlmError};
use crate::prediction::prompts::build_prompt;

pub type ByteStream = BoxStream<'static, Result<Bytes, LlmError>>;

/// Opens the upstream stream for `posting`.
///
/// Errors returned here happen before any byte is produced and are reported
/// as a request-level failure; errors inside the stream abort the body.
pub async fn open_relay(
    llm: &dyn CompletionStreamer,
    posting: &JobPosting,
) -> Result<ByteStream, LlmError> {
    let prompt = build_prompt(posting);
    debug!("Prompt rendered ({} bytes) for '{}'", prompt.len(), posting.title);

    let deltas = llm.stream(&prompt).await?;
    info!("Relaying prediction for '{}'", posting.title);

    Ok(relay(deltas).boxed())
}

/// Maps each text delta to one byte chunk, preserving order.
pub fn relay<S>(deltas: S) -> impl Stream<Item = Result<Bytes, LlmError>>
where
    S: Stream<Item = Result<String, LlmError>>,
{
    deltas
        .map_ok(Bytes::from)
        .inspect_err(|e| error!("Prediction stream failed mid-relay: {e}"))
}
