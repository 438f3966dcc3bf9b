pub mod source;

use crate::{
    config::ProducerConfig,
    error::StreamError,
    models::{StreamRequest, TERMINATOR_LINE},
};
use bytes::Bytes;
use futures::stream::Stream;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::wrappers::ReceiverStream;

pub use source::{RandomWords, ScriptedWords, WordSource};

pub type WordStream = Pin<Box<dyn Stream<Item = Result<Bytes, StreamError>> + Send>>;

type SourceFactory = Arc<dyn Fn() -> Box<dyn WordSource> + Send + Sync>;

/// One item as it appears on the wire.
pub fn frame_item(word: &str) -> Bytes {
    Bytes::from(format!("{}\n", word))
}

pub fn terminator_frame() -> Bytes {
    Bytes::from_static(TERMINATOR_LINE.as_bytes())
}

/// Builds paced word streams, one independent emission task per request.
#[derive(Clone)]
pub struct WordProducer {
    config: ProducerConfig,
    sources: SourceFactory,
}

impl WordProducer {
    pub fn new(config: ProducerConfig) -> Self {
        Self {
            config,
            sources: Arc::new(|| Box::new(RandomWords::new()) as Box<dyn WordSource>),
        }
    }

    /// Replaces the per-request content source.
    pub fn with_source<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn WordSource> + Send + Sync + 'static,
    {
        self.sources = Arc::new(factory);
        self
    }

    pub fn config(&self) -> &ProducerConfig {
        &self.config
    }

    pub fn resolve(&self, raw_count: Option<&str>) -> StreamRequest {
        StreamRequest::resolve(raw_count, self.config.default_count)
    }

    pub fn stream(&self, request: StreamRequest) -> WordStream {
        word_stream(request.count, self.config.item_delay, (self.sources)())
    }
}

/// Emits `count` newline-terminated words, sleeping `delay` after each, then
/// the terminator line, then ends.
///
/// The emission loop runs on its own task and stops as soon as the receiving
/// side is dropped, which is how a vanished consumer shows up here.
pub fn word_stream(count: usize, delay: Duration, mut source: Box<dyn WordSource>) -> WordStream {
    let (tx, rx) = tokio::sync::mpsc::channel(1);

    tokio::spawn(async move {
        for index in 0..count {
            let word = source.next_word();
            if tx.send(Ok(frame_item(&word))).await.is_err() {
                log::debug!("Consumer went away after {} of {} words", index, count);
                return;
            }
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        if tx.send(Ok(terminator_frame())).await.is_err() {
            log::debug!("Consumer went away before the terminator");
            return;
        }
        log::debug!("Stream of {} words finished", count);
    });

    Box::pin(ReceiverStream::new(rx))
}
