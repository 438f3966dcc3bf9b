//! Consumer tests against a wiremock producer.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordstream::consumer::{FINISHED_LINE, INVALID_INPUT_MESSAGE};
use wordstream::{
    ConsumerConfig, SessionState, StreamConsumer, StreamOutcome, StreamSession, TraceKind,
};

fn consumer_for(server: &MockServer) -> StreamConsumer {
    StreamConsumer::new(ConsumerConfig::new().with_base_url(server.uri()))
}

#[tokio::test]
async fn three_words_complete_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stream"))
        .and(query_param("count", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("alpha\nbeta\ngamma\n[DONE]\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut session = StreamSession::new();
    let outcome = consumer_for(&mock_server)
        .run(&mut session, "3")
        .await
        .expect("session was idle");

    assert_eq!(outcome, StreamOutcome::Terminated);
    assert_eq!(session.content(), "alpha\nbeta\ngamma\n");
    assert_eq!(session.content().lines().count(), 3);
    assert!(!session.display().contains("[DONE]"));
    assert!(session.display().ends_with(FINISHED_LINE));
    assert_eq!(session.state(), SessionState::Idle);

    let trace = session.trace();
    assert!(trace.is_well_formed());
    assert!(trace.is_monotonic());
    assert_eq!(trace.kinds()[0], TraceKind::Request);
    assert_eq!(trace.events()[0].message, "GET /stream?count=3");
    assert_eq!(trace.kinds()[1], TraceKind::Response);
    assert!(trace.count(TraceKind::Chunk) >= 1);
    assert_eq!(trace.count(TraceKind::Complete), 1);
    assert_eq!(trace.events().last().unwrap().message, "Stream completed");
}

#[tokio::test]
async fn terminator_only_body_leaves_buffer_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stream"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[DONE]\n"))
        .mount(&mock_server)
        .await;

    let mut session = StreamSession::new();
    let outcome = consumer_for(&mock_server).run(&mut session, "1").await;

    assert_eq!(outcome, Some(StreamOutcome::Terminated));
    assert!(session.content().is_empty());
    assert_eq!(
        session.trace().kinds(),
        vec![TraceKind::Request, TraceKind::Response, TraceKind::Complete]
    );
}

#[tokio::test]
async fn server_error_fails_with_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stream"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut session = StreamSession::new();
    let outcome = consumer_for(&mock_server)
        .run(&mut session, "3")
        .await
        .expect("session was idle");

    assert!(matches!(outcome, StreamOutcome::Failed(_)));
    assert_eq!(outcome.final_state(), SessionState::Failed);
    assert_eq!(
        session.trace().kinds(),
        vec![TraceKind::Request, TraceKind::Error]
    );
    assert_eq!(
        session.trace().events()[1].message,
        "Server responded with 500"
    );
    assert_eq!(session.display(), "Server error: 500");
    assert!(session.content().is_empty());
}

#[tokio::test]
async fn invalid_input_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[DONE]\n"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let consumer = consumer_for(&mock_server);
    for input in ["", "0", "-5", "-1", "abc"] {
        let mut session = StreamSession::new();
        let outcome = consumer.run(&mut session, input).await;

        assert!(matches!(outcome, Some(StreamOutcome::Failed(_))), "{input:?}");
        assert_eq!(session.trace().kinds(), vec![TraceKind::Error], "{input:?}");
        assert_eq!(session.display(), INVALID_INPUT_MESSAGE);
        assert_eq!(session.state(), SessionState::Idle);
    }
}

#[tokio::test]
async fn missing_terminator_is_flagged_as_truncated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stream"))
        .respond_with(ResponseTemplate::new(200).set_body_string("one\ntwo\n"))
        .mount(&mock_server)
        .await;

    let mut session = StreamSession::new();
    let outcome = consumer_for(&mock_server).run(&mut session, "5").await;

    assert_eq!(outcome, Some(StreamOutcome::Truncated));
    assert_eq!(session.content(), "one\ntwo\n");
    assert!(session.trace().is_well_formed());

    let last = session.trace().events().last().unwrap();
    assert_eq!(last.kind, TraceKind::Complete);
    assert_eq!(last.message, "Stream closed without [DONE] terminator");
}

#[tokio::test]
async fn content_after_terminator_is_ignored() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stream"))
        .respond_with(ResponseTemplate::new(200).set_body_string("a\n[DONE]\nextra\n"))
        .mount(&mock_server)
        .await;

    let mut session = StreamSession::new();
    consumer_for(&mock_server).run(&mut session, "1").await;

    assert_eq!(session.content(), "a\n");
    assert_eq!(session.trace().count(TraceKind::Complete), 1);
}
