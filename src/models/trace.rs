use chrono::{DateTime, Local, Utc};
use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Request,
    Response,
    Chunk,
    Complete,
    Error,
}

impl TraceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceKind::Request => "REQUEST",
            TraceKind::Response => "RESPONSE",
            TraceKind::Chunk => "CHUNK",
            TraceKind::Complete => "COMPLETE",
            TraceKind::Error => "ERROR",
        }
    }

    /// Panel color for this kind.
    pub fn color(&self) -> Color {
        match self {
            TraceKind::Request => Color::Blue,
            TraceKind::Response => Color::Yellow,
            TraceKind::Chunk => Color::Green,
            TraceKind::Complete => Color::Magenta,
            TraceKind::Error => Color::Red,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TraceKind::Complete | TraceKind::Error)
    }
}

impl fmt::Display for TraceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub timestamp: DateTime<Utc>,
    /// Monotonic offset from the start of the owning session.
    pub elapsed: Duration,
    pub kind: TraceKind,
    pub message: String,
}

impl TraceEvent {
    /// Wall-clock time rendered the way the trace panel shows it.
    pub fn clock(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M:%S%.3f")
            .to_string()
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.clock(), self.kind, self.message)
    }
}

/// Ordered trace of one session.
///
/// Events are stamped on insertion, so order of insertion is order of
/// observation. Wall-clock stamps are clamped so they never run backwards
/// even if the system clock does.
#[derive(Debug, Clone)]
pub struct TraceLog {
    origin: Instant,
    events: Vec<TraceEvent>,
}

impl Default for TraceLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceLog {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            events: Vec::new(),
        }
    }

    pub fn record(&mut self, kind: TraceKind, message: impl Into<String>) -> &TraceEvent {
        let mut timestamp = Utc::now();
        let mut elapsed = self.origin.elapsed();
        if let Some(last) = self.events.last() {
            timestamp = timestamp.max(last.timestamp);
            elapsed = elapsed.max(last.elapsed);
        }

        self.events.push(TraceEvent {
            timestamp,
            elapsed,
            kind,
            message: message.into(),
        });
        &self.events[self.events.len() - 1]
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn kinds(&self) -> Vec<TraceKind> {
        self.events.iter().map(|event| event.kind).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn count(&self, kind: TraceKind) -> usize {
        self.events.iter().filter(|event| event.kind == kind).count()
    }

    /// Checks the kind sequence: either a lone `error` (rejected before any
    /// request), or `request`, optional `response`, any number of `chunk`
    /// (only after a response), and exactly one terminal event at the end.
    pub fn is_well_formed(&self) -> bool {
        let kinds = self.kinds();
        match kinds.as_slice() {
            [TraceKind::Error] => true,
            [TraceKind::Request, TraceKind::Error] => true,
            [TraceKind::Request, TraceKind::Response, middle @ .., last] => {
                last.is_terminal() && middle.iter().all(|kind| *kind == TraceKind::Chunk)
            }
            _ => false,
        }
    }

    pub fn is_monotonic(&self) -> bool {
        self.events.windows(2).all(|pair| {
            pair[0].timestamp <= pair[1].timestamp && pair[0].elapsed <= pair[1].elapsed
        })
    }
}
