use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of one consumer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Validating,
    Requesting,
    Streaming,
    Completed,
    Failed,
}

impl SessionState {
    /// True while a stream is in flight and a new start must be ignored.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            SessionState::Validating | SessionState::Requesting | SessionState::Streaming
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Validating => "validating",
            SessionState::Requesting => "requesting",
            SessionState::Streaming => "streaming",
            SessionState::Completed => "completed",
            SessionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "reason")]
pub enum StreamOutcome {
    /// The `[DONE]` terminator was observed.
    Terminated,
    /// The body closed before any terminator arrived.
    Truncated,
    /// Validation or transport failure.
    Failed(String),
}

impl StreamOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, StreamOutcome::Failed(_))
    }

    /// State the session passes through before returning to idle.
    pub fn final_state(&self) -> SessionState {
        match self {
            StreamOutcome::Terminated | StreamOutcome::Truncated => SessionState::Completed,
            StreamOutcome::Failed(_) => SessionState::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_states() {
        assert!(!SessionState::Idle.is_active());
        assert!(SessionState::Validating.is_active());
        assert!(SessionState::Streaming.is_active());
        assert!(!SessionState::Completed.is_active());
        assert!(!SessionState::Failed.is_active());
    }

    #[test]
    fn test_truncated_still_completes() {
        assert_eq!(StreamOutcome::Truncated.final_state(), SessionState::Completed);
        assert!(StreamOutcome::Truncated.is_success());
        assert_eq!(
            StreamOutcome::Failed("boom".into()).final_state(),
            SessionState::Failed
        );
    }
}
