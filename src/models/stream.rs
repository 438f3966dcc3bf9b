use serde::{Deserialize, Serialize};

use crate::error::{Result, StreamError};

/// In-band end-of-stream marker.
pub const TERMINATOR: &str = "[DONE]";
pub const TERMINATOR_LINE: &str = "[DONE]\n";

/// Raw query string of `GET /stream`. `count` stays textual so a bad value
/// falls back to the default instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamQuery {
    pub count: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRequest {
    pub count: usize,
}

impl StreamRequest {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Server-side resolution: absent, non-numeric and negative counts all
    /// become `default`.
    pub fn resolve(raw: Option<&str>, default: usize) -> Self {
        let count = raw
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(default);
        Self { count }
    }

    /// Client-side validation of what the user typed. Only strictly positive
    /// integers pass.
    pub fn parse_input(input: &str) -> Result<Self> {
        match input.trim().parse::<i64>() {
            Ok(count) if count > 0 => Ok(Self {
                count: count as usize,
            }),
            _ => Err(StreamError::Validation(
                "Invalid input: number must be positive".to_string(),
            )),
        }
    }
}
