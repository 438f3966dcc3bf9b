//! wordstream: paced word streaming over chunked HTTP.
//!
//! The [`producer`] emits `N` newline-terminated words with a fixed delay
//! between them, then a `[DONE]` line, and is served by [`server`]. The
//! [`consumer`] reads that body incrementally, decodes it across arbitrary
//! chunk boundaries and records every transport occurrence in an ordered
//! trace held by a caller-owned [`StreamSession`].

pub mod config;
pub mod console;
pub mod consumer;
pub mod error;
pub mod logger;
pub mod models;
pub mod producer;
#[cfg(feature = "server")]
pub mod server;

pub use config::{Config, ConsumerConfig, ProducerConfig, ServerConfig};
pub use consumer::{SessionObserver, StreamConsumer, StreamSession};
pub use error::{Result, StreamError};
pub use models::{
    SessionState, StreamOutcome, StreamRequest, TraceEvent, TraceKind, TraceLog, TERMINATOR,
};
pub use producer::{RandomWords, ScriptedWords, WordProducer, WordSource};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
