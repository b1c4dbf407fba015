use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use scout::orchestrator::Orchestrator;
use scout::providers::base::{Provider, SearchBackend};
use scout::search::SearchInvoker;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::routes::configure;
use crate::state::AppState;

pub use scout::providers::mock::{search_payload, MockProvider, MockSearch};

/// Router wired to clones of the given doubles, so the test keeps its handles
pub fn app<P, S>(provider: &P, search: &S) -> Router
where
    P: Provider + Clone + 'static,
    S: SearchBackend + Clone + 'static,
{
    let orchestrator = Orchestrator::new(
        Arc::new(provider.clone()),
        SearchInvoker::new(Arc::new(search.clone())),
    );
    configure(AppState::new(orchestrator))
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_body(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn read_json(response: Response) -> Value {
    serde_json::from_str(&read_body(response).await).unwrap()
}

pub fn text_response(text: &str) -> Value {
    json!({
        "id": "msg_1",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn"
    })
}
