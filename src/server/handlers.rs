use crate::{models::StreamQuery, producer::WordProducer};
use actix_web::{
    http::header::{self, HeaderValue},
    web, HttpResponse, Responder,
};

pub const CONTENT_TYPE: &str = "text/plain; charset=utf-8";
pub const CACHE_CONTROL: &str = "no-cache, no-transform";

/// `GET /stream?count=N`
///
/// Missing, negative and non-numeric counts fall back to the configured
/// default. The body length is never announced; the connection close after
/// `[DONE]` is the only length signal.
pub async fn stream_words(
    producer: web::Data<WordProducer>,
    query: web::Query<StreamQuery>,
) -> HttpResponse {
    let request = producer.resolve(query.count.as_deref());
    log::info!(
        "Streaming {} words every {}ms",
        request.count,
        producer.config().item_delay.as_millis()
    );

    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE)))
        .insert_header((header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL)))
        // Connection and Transfer-Encoding are hop-by-hop: actix emits
        // `transfer-encoding: chunked` for an unsized body and keeps HTTP/1.1
        // connections alive on its own.
        .streaming(producer.stream(request))
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().content_type(CONTENT_TYPE).body("ok")
}
