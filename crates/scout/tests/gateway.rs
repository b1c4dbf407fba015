use futures::StreamExt;
use scout::{
    models::{event::StreamEvent, message::Message, request::ChatRequest},
    orchestrator::Orchestrator,
    providers::{
        anthropic::AnthropicProvider,
        brave::BraveSearch,
        configs::{AnthropicProviderConfig, BraveSearchConfig},
    },
    search::SearchInvoker,
};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn orchestrator(anthropic: &MockServer, brave: &MockServer) -> Orchestrator {
    let provider = AnthropicProvider::new(
        AnthropicProviderConfig::new("test-key").with_host(anthropic.uri()),
    )
    .unwrap();
    let search = BraveSearch::new(BraveSearchConfig::new("brave-key").with_host(brave.uri())).unwrap();
    Orchestrator::new(Arc::new(provider), SearchInvoker::new(Arc::new(search)))
}

fn message(content: Value, stop_reason: &str) -> Value {
    json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-5-sonnet-latest",
        "content": content,
        "stop_reason": stop_reason,
        "usage": {"input_tokens": 12, "output_tokens": 30}
    })
}

#[tokio::test]
async fn test_tool_round_trip_over_http() {
    let anthropic = MockServer::start().await;
    let brave = MockServer::start().await;

    let final_answer = message(json!([{"type": "text", "text": "Rust 1.80 is out."}]), "end_turn");

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_string_contains("tool_result"))
        .respond_with(ResponseTemplate::new(200).set_body_json(final_answer.clone()))
        .with_priority(1)
        .expect(1)
        .mount(&anthropic)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(message(
            json!([{
                "type": "tool_use",
                "id": "toolu_01A",
                "name": "brave_search",
                "input": {"query": "latest rust release", "num_results": 2}
            }]),
            "tool_use",
        )))
        .expect(1)
        .mount(&anthropic)
        .await;

    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .and(query_param("q", "latest rust release"))
        .and(query_param("count", "2"))
        .and(header("X-Subscription-Token", "brave-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "web": {"results": [
                {"title": "Announcing Rust 1.80", "url": "https://blog.rust-lang.org", "description": "Release notes"}
            ]}
        })))
        .expect(1)
        .mount(&brave)
        .await;

    let completion = orchestrator(&anthropic, &brave)
        .exchange(ChatRequest::new(vec![Message::user("What is the latest Rust?")]))
        .await
        .unwrap();

    assert_eq!(completion.body(), &final_answer);

    let requests = anthropic.received_requests().await.unwrap();
    let resubmitted: Value = serde_json::from_slice(&requests[1].body).unwrap();
    let tool_result = &resubmitted["messages"][2]["content"][0];
    assert_eq!(tool_result["type"], json!("tool_result"));
    assert_eq!(tool_result["tool_use_id"], json!("toolu_01A"));
    assert!(tool_result["content"]
        .as_str()
        .unwrap()
        .contains("Announcing Rust 1.80"));
}

#[tokio::test]
async fn test_stream_over_http() {
    let anthropic = MockServer::start().await;
    let brave = MockServer::start().await;

    let body = concat!(
        "event: message_start\n",
        "data: {\"type\":\"message_start\",\"message\":{\"id\":\"msg_01\"}}\n\n",
        "event: ping\n",
        "data: {\"type\":\"ping\"}\n\n",
        "event: content_block_delta\n",
        "data: {\"type\":\"content_block_delta\",\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"Hello\"}}\n\n",
        "event: message_stop\n",
        "data: {\"type\":\"message_stop\"}\n\n",
    );

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_string_contains("\"stream\":true"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(body),
        )
        .mount(&anthropic)
        .await;

    let events: Vec<StreamEvent> = orchestrator(&anthropic, &brave)
        .exchange_stream(ChatRequest::new(vec![Message::user("Hi")]))
        .unwrap()
        .collect()
        .await;

    assert_eq!(events.len(), 4);
    assert_eq!(events[1].to_value()["delta"]["text"], json!("Hello"));
    assert!(matches!(events[2], StreamEvent::Stop(_)));
    assert_eq!(events[3], StreamEvent::Done);
}

#[tokio::test]
async fn test_provider_error_is_classified() {
    let anthropic = MockServer::start().await;
    let brave = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(529)
                .insert_header("request-id", "req_overloaded")
                .set_body_json(json!({
                    "type": "error",
                    "error": {"type": "overloaded_error", "message": "Overloaded"}
                })),
        )
        .mount(&anthropic)
        .await;

    let err = orchestrator(&anthropic, &brave)
        .exchange(ChatRequest::new(vec![Message::user("Hi")]))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 529);
    assert_eq!(
        err.to_string(),
        "InternalServerError: Overloaded"
    );
}
