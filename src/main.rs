use clap::{Parser, Subcommand};
use wordstream::{
    console::ConsoleObserver,
    logger::{self, LogLevel, LoggerConfig},
    Config, StreamConsumer, StreamOutcome, StreamSession,
};

#[derive(Debug, Parser)]
#[command(name = "wordstream", version, about = "Paced word streaming over chunked HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the word producer.
    Serve {
        /// Port to listen on (overrides PORT).
        #[arg(long)]
        port: Option<u16>,
    },
    /// Consume one stream and render text and trace.
    Watch {
        /// Number of words to request.
        #[arg(allow_hyphen_values = true)]
        count: String,

        /// Producer base URL (overrides STREAM_BASE_URL).
        #[arg(long)]
        url: Option<String>,

        /// Print the trace as JSON lines when the session ends.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let mut config = Config::from_env()?;
    let mut logger_config = if config.json_logs {
        LoggerConfig::production()
    } else {
        LoggerConfig::new().with_level(LogLevel::Info)
    };
    if let Some(path) = &config.log_file {
        logger_config = logger_config.with_file_output(path);
    }
    logger::init_with_config(logger_config)?;

    if dotenv_loaded {
        log::debug!("✅ .env file loaded");
    }

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            logger::log_startup_info("wordstream", wordstream::VERSION, &config.server.bind_address());
            logger::log_config_info(&config);
            wordstream::server::serve(config).await?;
        }
        Command::Watch { count, url, json } => {
            if let Some(url) = url {
                config.consumer = config.consumer.with_base_url(url);
            }
            let consumer = StreamConsumer::new(config.consumer);
            let mut session = StreamSession::with_observer(ConsoleObserver::new(!json));

            let outcome = consumer.run(&mut session, &count).await;
            println!();

            if json {
                for event in session.trace().events() {
                    println!("{}", serde_json::to_string(event)?);
                }
            }

            if let Some(StreamOutcome::Failed(reason)) = outcome {
                log::error!("❌ {}", reason);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
