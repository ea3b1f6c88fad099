//! Incremental server-sent-events framing.
//!
//! Network chunks arrive at arbitrary byte offsets: an event (or a multi-byte
//! character inside one) may be split across any number of chunks. The decoder
//! buffers raw bytes and only decodes complete, blank-line-terminated blocks,
//! which always end on an ASCII boundary.

/// One dispatched SSE event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Value of the `event:` field, if any.
    pub event: Option<String>,
    /// All `data:` lines of the block, joined with `\n`.
    pub data: String,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a chunk and returns every event completed by it, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        // `\r` only ever appears as part of a line terminator (JSON escapes it).
        self.buffer.extend(chunk.iter().copied().filter(|b| *b != b'\r'));

        let mut events = Vec::new();
        while let Some(end) = find_block_end(&self.buffer) {
            let block: Vec<u8> = self.buffer.drain(..end + 2).collect();
            if let Some(event) = parse_block(&block[..end]) {
                events.push(event);
            }
        }
        events
    }

    /// Flushes a trailing block that was not followed by a blank line.
    pub fn finish(&mut self) -> Option<SseEvent> {
        let block = std::mem::take(&mut self.buffer);
        parse_block(&block)
    }
}

fn find_block_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\n\n")
}

fn parse_block(block: &[u8]) -> Option<SseEvent> {
    let text = String::from_utf8_lossy(block);

    let mut event = None;
    let mut data: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        let (field, value) = line.split_once(':').unwrap_or((line, ""));
        let value = value.strip_prefix(' ').unwrap_or(value);
        match field {
            "event" => event = Some(value.to_string()),
            "data" => data.push(value),
            _ => {}
        }
    }

    if data.is_empty() {
        return None;
    }

    Some(SseEvent {
        event,
        data: data.join("\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_EVENTS: &str = "event: content_block_delta\n\
        data: {\"type\":\"content_block_delta\",\"delta\":{\"type\":\"text_delta\",\"text\":\"Hé\"}}\n\n\
        event: message_stop\n\
        data: {\"type\":\"message_stop\"}\n\n";

    #[test]
    fn test_decodes_complete_events() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(TWO_EVENTS.as_bytes());

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event.as_deref(), Some("content_block_delta"));
        assert!(events[0].data.contains("\"text\":\"Hé\""));
        assert_eq!(events[1].data, "{\"type\":\"message_stop\"}");
    }

    #[test]
    fn test_any_split_point_yields_same_events() {
        let bytes = TWO_EVENTS.as_bytes();
        let expected = SseDecoder::new().push(bytes);

        for split in 0..=bytes.len() {
            let mut decoder = SseDecoder::new();
            let mut events = decoder.push(&bytes[..split]);
            events.extend(decoder.push(&bytes[split..]));
            assert_eq!(events, expected, "split at byte {split}");
        }
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b"event: ping\r\ndata: {}\r\n\r\n");

        assert_eq!(
            events,
            vec![SseEvent {
                event: Some("ping".to_string()),
                data: "{}".to_string(),
            }]
        );
    }

    #[test]
    fn test_comments_and_dataless_blocks_are_skipped() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b": keep-alive\n\nevent: ping\n\n");
        assert!(events.is_empty());
    }

    #[test]
    fn test_multiline_data_is_joined() {
        let mut decoder = SseDecoder::new();
        let events = decoder.push(b"data: first\ndata: second\n\n");
        assert_eq!(events[0].data, "first\nsecond");
    }

    #[test]
    fn test_finish_flushes_unterminated_block() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: tail").is_empty());

        let event = decoder.finish().unwrap();
        assert_eq!(event.data, "tail");
        assert_eq!(decoder.finish(), None);
    }
}
