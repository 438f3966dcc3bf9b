//! Terminal rendering for `wordstream watch`: streamed text goes to stdout as
//! it arrives, trace lines go to stderr with one color per kind.

use crate::consumer::SessionObserver;
use crate::models::{SessionState, TraceEvent};
use colored::*;
use std::io::{self, Write};

pub struct ConsoleObserver {
    show_trace: bool,
}

impl ConsoleObserver {
    pub fn new(show_trace: bool) -> Self {
        Self { show_trace }
    }
}

/// One trace panel line: dimmed clock, bold kind tag, message, all in the
/// kind's color.
pub fn render_trace_line(event: &TraceEvent) -> String {
    let color = event.kind.color();
    format!(
        "{} {} {}",
        event.clock().dimmed(),
        format!("[{}]", event.kind).color(color).bold(),
        event.message.color(color)
    )
}

impl SessionObserver for ConsoleObserver {
    fn on_text_appended(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }

    fn on_trace_event(&mut self, event: &TraceEvent) {
        if self.show_trace {
            eprintln!("{}", render_trace_line(event));
        }
    }

    fn on_session_state_changed(&mut self, state: SessionState) {
        log::debug!("Session state: {}", state);
    }
}
