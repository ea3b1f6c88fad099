//! Consumption of the `/api/predict` body.
//!
//! `fragments` turns raw body chunks into decoded text fragments; `drive`
//! applies them to the view in arrival order.

use bytes::Bytes;
use futures::stream::{self, FusedStream, Stream, StreamExt};

use crate::decoder::Utf8StreamDecoder;
use crate::errors::ClientError;
use crate::view::{PopupView, Renderer};

/// Lazily decodes a byte stream into non-empty text fragments.
///
/// The sequence is finite and cannot be restarted: it ends at end of body, or
/// right after yielding the first error. Polling past the end keeps returning
/// `None`.
pub fn fragments<S>(bytes: S) -> impl FusedStream<Item = Result<String, ClientError>>
where
    S: Stream<Item = Result<Bytes, ClientError>>,
{
    let state = Some((Box::pin(bytes), Utf8StreamDecoder::new()));

    stream::unfold(state, |state| async move {
        let (mut bytes, mut decoder) = state?;
        loop {
            match bytes.next().await {
                Some(Ok(chunk)) => {
                    let text = decoder.decode(&chunk);
                    if !text.is_empty() {
                        return Some((Ok(text), Some((bytes, decoder))));
                    }
                }
                Some(Err(e)) => return Some((Err(e), None)),
                None => {
                    let tail = decoder.finish();
                    return (!tail.is_empty()).then(|| (Ok(tail), None));
                }
            }
        }
    })
    .fuse()
}

/// Appends every fragment to the view, stopping at the first error.
///
/// Returns the number of fragments applied.
pub async fn drive<S, R>(fragments: S, view: &mut PopupView<R>) -> Result<usize, ClientError>
where
    S: Stream<Item = Result<String, ClientError>>,
    R: Renderer,
{
    futures::pin_mut!(fragments);

    let mut applied = 0;
    while let Some(fragment) = fragments.next().await {
        view.append(&fragment?);
        applied += 1;
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::tests::{Event, RecordingRenderer};

    fn chunks(parts: &[&[u8]]) -> Vec<Result<Bytes, ClientError>> {
        parts.iter().map(|p| Ok(Bytes::copy_from_slice(p))).collect()
    }

    #[tokio::test]
    async fn test_split_code_point_is_joined() {
        let bytes = "≈ $95k".as_bytes();
        let body = chunks(&[&bytes[..1], &bytes[1..2], &bytes[2..]]);

        let decoded: Vec<String> = fragments(stream::iter(body))
            .map(Result::unwrap)
            .collect()
            .await;

        assert_eq!(decoded, vec!["≈ $95k".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_body_yields_nothing() {
        let mut stream = Box::pin(fragments(stream::iter(chunks(&[]))));
        assert!(stream.next().await.is_none());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_stays_ended_after_error() {
        let mut body = chunks(&[&b"x"[..]]);
        body.push(Err(ClientError::NoJob));
        let mut stream = Box::pin(fragments(stream::iter(body)));

        assert_eq!(stream.next().await.unwrap().unwrap(), "x");
        assert!(stream.next().await.unwrap().is_err());
        assert!(stream.next().await.is_none());
        assert!(stream.is_terminated());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_dangling_bytes_flush_as_replacement() {
        let body = chunks(&[&b"abc"[..], &b"\xe2\x82"[..]]);
        let decoded: Vec<String> = fragments(stream::iter(body))
            .map(Result::unwrap)
            .collect()
            .await;

        assert_eq!(decoded, vec!["abc".to_string(), "\u{FFFD}".to_string()]);
    }

    #[tokio::test]
    async fn test_drive_renders_progressively_in_order() {
        let body = chunks(&[&b"Range: "[..], &b"$150k"[..], &b" - $180k"[..]]);
        let mut view = PopupView::new(RecordingRenderer::default());

        let applied = drive(fragments(stream::iter(body)), &mut view).await.unwrap();

        assert_eq!(applied, 3);
        assert_eq!(view.prediction(), "Range: $150k - $180k");
        assert_eq!(
            view.renderer().events,
            vec![
                Event::Fragment("Range: ".to_string()),
                Event::Fragment("$150k".to_string()),
                Event::Fragment(" - $180k".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_drive_stops_at_error_after_partial_text() {
        let mut body = chunks(&[&b"partial "[..]]);
        body.push(Err(ClientError::NoJob));
        body.extend(chunks(&[&b"never"[..]]));
        let mut view = PopupView::new(RecordingRenderer::default());

        let result = drive(fragments(stream::iter(body)), &mut view).await;

        assert!(result.is_err());
        assert_eq!(view.prediction(), "partial ");
    }
}
