//! Incremental body decoder.
//!
//! Physical reads can cut a UTF-8 sequence or the `[DONE]` marker in half.
//! [`ChunkDecoder`] keeps the undecoded byte tail and any text that might
//! still turn into the terminator, and only releases text once it is certain
//! to be content.

use crate::models::TERMINATOR;

/// What one call to [`ChunkDecoder::feed`] produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Text that is definitely content, in stream order.
    pub text: String,
    /// Set when the terminator was found in the cumulative tail.
    pub terminated: bool,
}

#[derive(Debug, Default)]
pub struct ChunkDecoder {
    /// Trailing bytes of an incomplete UTF-8 sequence.
    residual: Vec<u8>,
    /// Decoded text that is a prefix of the terminator.
    held: String,
    terminated: bool,
}

impl ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Feeds one physical chunk. After the terminator has been seen every
    /// further byte is ignored.
    pub fn feed(&mut self, chunk: &[u8]) -> Decoded {
        if self.terminated {
            return Decoded {
                text: String::new(),
                terminated: true,
            };
        }

        self.residual.extend_from_slice(chunk);
        let decoded = self.take_complete_utf8();

        let mut pending = std::mem::take(&mut self.held);
        pending.push_str(&decoded);

        if let Some(at) = pending.find(TERMINATOR) {
            pending.truncate(at);
            self.residual.clear();
            self.terminated = true;
            return Decoded {
                text: pending,
                terminated: true,
            };
        }

        let keep = held_suffix_len(&pending);
        self.held = pending.split_off(pending.len() - keep);
        Decoded {
            text: pending,
            terminated: false,
        }
    }

    /// Releases whatever is still buffered once the body has ended. Bytes
    /// that never formed a complete character are replaced lossily.
    pub fn finish(&mut self) -> String {
        let mut rest = std::mem::take(&mut self.held);
        if !self.residual.is_empty() {
            rest.push_str(&String::from_utf8_lossy(&self.residual));
            self.residual.clear();
        }
        if self.terminated {
            rest.clear();
        }
        rest
    }

    /// Splits off the longest valid UTF-8 prefix of the residual buffer,
    /// leaving an incomplete trailing sequence behind. Invalid bytes in the
    /// middle are replaced.
    fn take_complete_utf8(&mut self) -> String {
        let mut out = String::new();
        loop {
            match std::str::from_utf8(&self.residual) {
                Ok(text) => {
                    out.push_str(text);
                    self.residual.clear();
                    return out;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.residual[..valid]));
                    match err.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.residual.drain(..valid + bad);
                        }
                        None => {
                            self.residual.drain(..valid);
                            return out;
                        }
                    }
                }
            }
        }
    }
}

/// Length of the longest suffix of `text` that is a proper prefix of the
/// terminator.
fn held_suffix_len(text: &str) -> usize {
    (1..TERMINATOR.len().min(text.len() + 1))
        .rev()
        .find(|&len| {
            let start = text.len() - len;
            text.is_char_boundary(start) && TERMINATOR.starts_with(&text[start..])
        })
        .unwrap_or(0)
}
