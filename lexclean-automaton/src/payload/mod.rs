// lexclean-automaton/src/payload/mod.rs

/// Shortest run of base64-alphabet characters considered a candidate payload.
pub const MIN_PAYLOAD_CHARS: usize = 4;

/// Bytes of the standard and URL-safe base64 alphabets, padding included.
pub fn is_payload_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'-' | b'_' | b'=')
}

/// A maximal run of base64-alphabet characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadRun<'a> {
    pub start: usize,
    pub text: &'a str,
}

impl<'a> PayloadRun<'a> {
    /// The run trimmed to a length a base64 decoder can accept.
    ///
    /// A quantum of one leftover character never decodes, so it is dropped.
    pub fn decodable(&self) -> &'a str {
        let unpadded = self.text.trim_end_matches('=').len();
        if unpadded % 4 == 1 {
            &self.text[..unpadded - 1]
        } else {
            self.text
        }
    }

    /// Whether the run uses the URL-safe alphabet.
    pub fn is_url_safe(&self) -> bool {
        self.text.bytes().any(|b| b == b'-' || b == b'_')
    }
}

/// Iterates the maximal base64-alphabet runs of a string.
pub struct PayloadRuns<'a> {
    input: &'a str,
    pos: usize,
    min_len: usize,
}

impl<'a> PayloadRuns<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0, min_len: MIN_PAYLOAD_CHARS }
    }

    pub fn with_min_len(input: &'a str, min_len: usize) -> Self {
        Self { input, pos: 0, min_len: min_len.max(1) }
    }
}

impl<'a> Iterator for PayloadRuns<'a> {
    type Item = PayloadRun<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() {
            while self.pos < bytes.len() && !is_payload_byte(bytes[self.pos]) {
                self.pos += 1;
            }
            let start = self.pos;
            while self.pos < bytes.len() && is_payload_byte(bytes[self.pos]) {
                self.pos += 1;
            }
            // Alphabet bytes are ASCII, so both ends sit on char boundaries.
            if self.pos - start >= self.min_len {
                return Some(PayloadRun { start, text: &self.input[start..self.pos] });
            }
        }
        None
    }
}
