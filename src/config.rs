use std::env;
use std::time::Duration;

use crate::error::{Result, StreamError};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_COUNT: usize = 12;
pub const DEFAULT_ITEM_DELAY_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct ProducerConfig {
    /// Count used when the request carries no usable `count`.
    pub default_count: usize,
    pub item_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    pub base_url: String,
    pub stream_path: String,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub producer: ProducerConfig,
    pub consumer: ConsumerConfig,
    pub json_logs: bool,
    pub log_file: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| StreamError::Config(format!("PORT is not a valid port: {}", raw)))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(ServerConfig { host, port })
    }

    pub fn with_address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ProducerConfig {
    fn default() -> Self {
        ProducerConfig {
            default_count: DEFAULT_COUNT,
            item_delay: Duration::from_millis(DEFAULT_ITEM_DELAY_MS),
        }
    }
}

impl ProducerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self> {
        let default_count = match env::var("STREAM_DEFAULT_COUNT") {
            Ok(raw) => raw.parse().map_err(|_| {
                StreamError::Config(format!("STREAM_DEFAULT_COUNT is not a count: {}", raw))
            })?,
            Err(_) => DEFAULT_COUNT,
        };
        let delay_ms = match env::var("STREAM_ITEM_DELAY_MS") {
            Ok(raw) => raw.parse().map_err(|_| {
                StreamError::Config(format!("STREAM_ITEM_DELAY_MS is not a duration: {}", raw))
            })?,
            Err(_) => DEFAULT_ITEM_DELAY_MS,
        };

        Ok(ProducerConfig {
            default_count,
            item_delay: Duration::from_millis(delay_ms),
        })
    }

    pub fn with_default_count(mut self, count: usize) -> Self {
        self.default_count = count;
        self
    }

    pub fn with_item_delay(mut self, delay: Duration) -> Self {
        self.item_delay = delay;
        self
    }
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        ConsumerConfig {
            base_url: format!("http://{}:{}", DEFAULT_HOST, DEFAULT_PORT),
            stream_path: "/stream".to_string(),
        }
    }
}

impl ConsumerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = env::var("STREAM_BASE_URL") {
            config.base_url = base_url;
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Path and query for one stream request, as shown in traces.
    pub fn request_target(&self, count: usize) -> String {
        format!("{}?count={}", self.stream_path, count)
    }

    pub fn request_url(&self, count: usize) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.request_target(count)
        )
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self> {
        let json_logs = env::var("LOG_FORMAT").map_or(false, |val| val == "json");
        let log_file = env::var("LOG_FILE").ok().filter(|path| !path.is_empty());

        Ok(Config {
            server: ServerConfig::from_env()?,
            producer: ProducerConfig::from_env()?,
            consumer: ConsumerConfig::from_env(),
            json_logs,
            log_file,
        })
    }

    pub fn with_server(mut self, config: ServerConfig) -> Self {
        self.server = config;
        self
    }

    pub fn with_producer(mut self, config: ProducerConfig) -> Self {
        self.producer = config;
        self
    }

    pub fn with_consumer(mut self, config: ConsumerConfig) -> Self {
        self.consumer = config;
        self
    }
}
