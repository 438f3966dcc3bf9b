pub mod decoder;
pub mod session;

use crate::{
    config::ConsumerConfig,
    error::StreamError,
    models::{SessionState, StreamOutcome, StreamRequest, TraceKind},
};
use futures::StreamExt;
use reqwest::Client;

pub use decoder::{ChunkDecoder, Decoded};
pub use session::{
    LogObserver, SessionObserver, StreamSession, FINISHED_LINE, INVALID_INPUT_MESSAGE,
};

const SNIPPET_LIMIT: usize = 60;

/// Drives one streaming exchange per call against the word producer.
#[derive(Clone)]
pub struct StreamConsumer {
    client: Client,
    config: ConsumerConfig,
}

impl StreamConsumer {
    pub fn new(config: ConsumerConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn with_client(client: Client, config: ConsumerConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ConsumerConfig {
        &self.config
    }

    /// Runs one session from the user's raw input to completion.
    ///
    /// Returns `None` without touching the session when it is already
    /// active. Otherwise the session ends back in `Idle` and the outcome is
    /// returned; failures are recorded in the trace, never retried.
    pub async fn run(&self, session: &mut StreamSession, input: &str) -> Option<StreamOutcome> {
        if !session.begin() {
            log::warn!("Session {} is already streaming, ignoring start", session.id());
            return None;
        }

        let request = match StreamRequest::parse_input(input) {
            Ok(request) => request,
            Err(err) => {
                session.set_notice(INVALID_INPUT_MESSAGE);
                session.record(TraceKind::Error, err_message(&err));
                return Some(session.finish(StreamOutcome::Failed(err.to_string())));
            }
        };

        Some(self.exchange(session, request).await)
    }

    async fn exchange(&self, session: &mut StreamSession, request: StreamRequest) -> StreamOutcome {
        session.transition(SessionState::Requesting);
        session.record(
            TraceKind::Request,
            format!("GET {}", self.config.request_target(request.count)),
        );

        let url = self.config.request_url(request.count);
        log::debug!("Session {} requesting {}", session.id(), url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => return fail(session, StreamError::from(err)),
        };

        let status = response.status();
        if !status.is_success() {
            session.set_notice(&format!("Server error: {}", status.as_u16()));
            session.record(
                TraceKind::Error,
                format!("Server responded with {}", status.as_u16()),
            );
            return session.finish(StreamOutcome::Failed(
                StreamError::Status(status.as_u16()).to_string(),
            ));
        }

        session.transition(SessionState::Streaming);
        session.record(
            TraceKind::Response,
            format!("{} - Stream started", status),
        );

        let mut body = Box::pin(response.bytes_stream());
        let mut decoder = ChunkDecoder::new();

        while let Some(next) = body.next().await {
            let chunk = match next {
                Ok(chunk) => chunk,
                Err(err) => return fail(session, StreamError::from(err)),
            };

            let decoded = decoder.feed(&chunk);
            if !decoded.text.is_empty() {
                session.append(&decoded.text);
                session.record(TraceKind::Chunk, describe_chunk(&decoded.text));
            }

            if decoded.terminated {
                session.record(TraceKind::Complete, "Stream completed");
                session.set_notice(FINISHED_LINE);
                return session.finish(StreamOutcome::Terminated);
            }
        }

        let rest = decoder.finish();
        if !rest.is_empty() {
            session.append(&rest);
            session.record(TraceKind::Chunk, describe_chunk(&rest));
        }
        log::warn!("Session {} ended without a terminator", session.id());
        session.record(
            TraceKind::Complete,
            "Stream closed without [DONE] terminator",
        );
        session.set_notice(FINISHED_LINE);
        session.finish(StreamOutcome::Truncated)
    }
}

fn fail(session: &mut StreamSession, err: StreamError) -> StreamOutcome {
    session.record(TraceKind::Error, err_message(&err));
    session.set_notice(&format!("\nStream failed: {}", err));
    session.finish(StreamOutcome::Failed(err.to_string()))
}

fn err_message(err: &StreamError) -> String {
    match err {
        StreamError::Validation(message) => message.clone(),
        other => other.to_string(),
    }
}

/// Trace text for a received piece of content.
fn describe_chunk(text: &str) -> String {
    let trimmed = text.trim();
    let snippet: String = trimmed.chars().take(SNIPPET_LIMIT).collect();
    if snippet.len() < trimmed.len() {
        format!("Received: \"{}...\" ({} bytes)", snippet, text.len())
    } else {
        format!("Received: \"{}\"", snippet)
    }
}
