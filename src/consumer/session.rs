use crate::models::{SessionState, StreamOutcome, TraceEvent, TraceKind, TraceLog};
use uuid::Uuid;

pub const FINISHED_LINE: &str = "\nStream finished.";
pub const INVALID_INPUT_MESSAGE: &str = "Please enter a valid positive number.";

/// Sinks for the presentation layer. Every method defaults to a no-op.
pub trait SessionObserver: Send {
    fn on_text_appended(&mut self, _text: &str) {}
    fn on_trace_event(&mut self, _event: &TraceEvent) {}
    fn on_session_state_changed(&mut self, _state: SessionState) {}
}

/// Observer that forwards everything to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl SessionObserver for LogObserver {
    fn on_trace_event(&mut self, event: &TraceEvent) {
        match event.kind {
            TraceKind::Error => log::error!("[{}] {}", event.kind, event.message),
            TraceKind::Chunk => log::debug!("[{}] {}", event.kind, event.message),
            _ => log::info!("[{}] {}", event.kind, event.message),
        }
    }

    fn on_session_state_changed(&mut self, state: SessionState) {
        log::debug!("Session state: {}", state);
    }
}

/// Client-held state of one stream: the display buffer, the trace and the
/// lifecycle state. Owned by the caller and handed to
/// [`StreamConsumer::run`](super::StreamConsumer::run).
pub struct StreamSession {
    id: Uuid,
    state: SessionState,
    content: String,
    notice: String,
    trace: TraceLog,
    outcome: Option<StreamOutcome>,
    observer: Box<dyn SessionObserver>,
}

impl Default for StreamSession {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamSession {
    pub fn new() -> Self {
        Self::with_observer(LogObserver)
    }

    pub fn with_observer(observer: impl SessionObserver + 'static) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Idle,
            content: String::new(),
            notice: String::new(),
            trace: TraceLog::new(),
            outcome: None,
            observer: Box::new(observer),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Stream content received so far, without terminator or status lines.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Everything the display buffer shows.
    pub fn display(&self) -> String {
        format!("{}{}", self.content, self.notice)
    }

    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }

    pub fn outcome(&self) -> Option<&StreamOutcome> {
        self.outcome.as_ref()
    }

    /// Resets the session for a new stream and enters `Validating`.
    /// Returns `false`, leaving everything untouched, when a stream is
    /// already active.
    pub fn begin(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.id = Uuid::new_v4();
        self.content.clear();
        self.notice.clear();
        self.trace = TraceLog::new();
        self.outcome = None;
        self.transition(SessionState::Validating);
        true
    }

    pub(crate) fn transition(&mut self, state: SessionState) {
        if self.state != state {
            self.state = state;
            self.observer.on_session_state_changed(state);
        }
    }

    pub(crate) fn record(&mut self, kind: TraceKind, message: impl Into<String>) {
        let event = self.trace.record(kind, message);
        self.observer.on_trace_event(event);
    }

    pub(crate) fn append(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.content.push_str(text);
        self.observer.on_text_appended(text);
    }

    /// Status text shown after (or instead of) the content.
    pub(crate) fn set_notice(&mut self, notice: &str) {
        self.notice.push_str(notice);
        self.observer.on_text_appended(notice);
    }

    /// Passes through the terminal state and returns to `Idle`.
    pub(crate) fn finish(&mut self, outcome: StreamOutcome) -> StreamOutcome {
        self.transition(outcome.final_state());
        self.outcome = Some(outcome.clone());
        self.transition(SessionState::Idle);
        outcome
    }
}
