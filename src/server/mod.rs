pub mod handlers;

use crate::{config::Config, error::Result, producer::WordProducer};
use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;

pub use handlers::{health, stream_words};

/// Registers the producer routes on an app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/stream", web::get().to(stream_words));
}

/// Builds the server on an already bound listener. Every request gets its
/// own emission task; the producer itself is shared read-only.
pub fn build(listener: TcpListener, producer: WordProducer) -> Result<Server> {
    let data = web::Data::new(producer);
    let server = HttpServer::new(move || App::new().app_data(data.clone()).configure(configure))
        .listen(listener)?
        .run();
    Ok(server)
}

pub async fn serve(config: Config) -> Result<()> {
    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)?;
    log::info!("🌐 Listening on http://{}", listener.local_addr()?);

    let producer = WordProducer::new(config.producer);
    build(listener, producer)?.await?;

    log::info!("Server stopped");
    Ok(())
}
