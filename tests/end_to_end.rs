//! Real producer server, real consumer, loopback socket.

use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use wordstream::{
    server, ConsumerConfig, ProducerConfig, ScriptedWords, SessionObserver, StreamConsumer,
    StreamOutcome, StreamSession, TraceKind, WordProducer,
};

#[derive(Clone, Default)]
struct Collected(Arc<Mutex<Vec<String>>>);

impl SessionObserver for Collected {
    fn on_text_appended(&mut self, text: &str) {
        self.0.lock().unwrap().push(text.to_string());
    }
}

fn start(producer: WordProducer) -> (String, actix_web::dev::ServerHandle) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    let server = server::build(listener, producer).unwrap();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    (format!("http://{}", address), handle)
}

fn scripted(delay: Duration) -> WordProducer {
    WordProducer::new(ProducerConfig::new().with_item_delay(delay))
        .with_source(|| Box::new(ScriptedWords::new(["amber", "birch", "cedar", "dune"])))
}

#[actix_web::test]
async fn paced_stream_arrives_in_order() {
    let (base_url, handle) = start(scripted(Duration::from_millis(20)));
    let consumer = StreamConsumer::new(ConsumerConfig::new().with_base_url(base_url));

    let collected = Collected::default();
    let mut session = StreamSession::with_observer(collected.clone());
    let outcome = consumer.run(&mut session, "3").await;

    assert_eq!(outcome, Some(StreamOutcome::Terminated));
    assert_eq!(session.content(), "amber\nbirch\ncedar\n");

    let trace = session.trace();
    assert!(trace.is_well_formed());
    assert!(trace.is_monotonic());
    assert!(trace.count(TraceKind::Chunk) >= 1);
    assert_eq!(trace.kinds().last(), Some(&TraceKind::Complete));

    let appended = collected.0.lock().unwrap().concat();
    assert!(appended.starts_with("amber\nbirch\ncedar\n"));
    assert!(!appended.contains("[DONE]"));

    handle.stop(true).await;
}

#[actix_web::test]
async fn zero_count_body_is_terminator_only() {
    let (base_url, handle) = start(scripted(Duration::ZERO));

    // The consumer refuses 0, so fetch the raw body directly.
    let response = reqwest::get(format!("{}/stream?count=0", base_url))
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["content-type"],
        "text/plain; charset=utf-8"
    );
    assert_eq!(response.headers()["cache-control"], "no-cache, no-transform");
    assert_eq!(response.headers()["transfer-encoding"], "chunked");
    assert_eq!(response.text().await.unwrap(), "[DONE]\n");

    handle.stop(true).await;
}

#[actix_web::test]
async fn random_words_round_trip() {
    let producer = WordProducer::new(ProducerConfig::new().with_item_delay(Duration::ZERO));
    let (base_url, handle) = start(producer);
    let consumer = StreamConsumer::new(ConsumerConfig::new().with_base_url(base_url));

    let mut session = StreamSession::new();
    let outcome = consumer.run(&mut session, "25").await;

    assert_eq!(outcome, Some(StreamOutcome::Terminated));
    let words: Vec<&str> = session.content().lines().collect();
    assert_eq!(words.len(), 25);
    for word in words {
        assert!((3..=10).contains(&word.len()), "{word}");
        assert!(word.bytes().all(|b| b.is_ascii_lowercase()), "{word}");
    }

    handle.stop(true).await;
}

#[actix_web::test]
async fn sessions_are_independent() {
    let (base_url, handle) = start(scripted(Duration::from_millis(5)));
    let consumer = StreamConsumer::new(ConsumerConfig::new().with_base_url(base_url));

    let mut first = StreamSession::new();
    let mut second = StreamSession::new();
    let (a, b) = futures::join!(
        consumer.run(&mut first, "2"),
        consumer.run(&mut second, "4")
    );

    assert_eq!(a, Some(StreamOutcome::Terminated));
    assert_eq!(b, Some(StreamOutcome::Terminated));
    assert_eq!(first.content(), "amber\nbirch\n");
    assert_eq!(second.content(), "amber\nbirch\ncedar\ndune\n");
    assert_ne!(first.id(), second.id());

    handle.stop(true).await;
}
