use encoding_rs::{CoderResult, Decoder, UTF_8};

/// Streaming UTF-8 decoder for response bodies.
///
/// Bytes of a code point split across chunks are held back until the rest
/// arrives. Malformed input becomes U+FFFD, as does a sequence still
/// incomplete at `finish`.
pub struct Utf8StreamDecoder {
    decoder: Decoder,
    finished: bool,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self {
            decoder: UTF_8.new_decoder(),
            finished: false,
        }
    }

    /// Decodes one chunk, carrying any trailing partial sequence forward.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.run(chunk, false)
    }

    /// Flushes held-back bytes. Later calls return an empty string.
    pub fn finish(&mut self) -> String {
        self.run(&[], true)
    }

    fn run(&mut self, mut src: &[u8], last: bool) -> String {
        let mut out = String::new();
        if self.finished {
            return out;
        }
        self.finished = last;

        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(src.len())
                .unwrap_or(src.len() * 3 + 4);
            out.reserve(needed);

            let (result, read, _had_replacements) =
                self.decoder.decode_to_string(src, &mut out, last);
            src = &src[read..];

            match result {
                CoderResult::InputEmpty => return out,
                CoderResult::OutputFull => continue,
            }
        }
    }
}

impl Default for Utf8StreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}
