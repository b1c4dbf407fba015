use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use futures::{stream::StreamExt, Stream};
use scout::models::event::StreamEvent;
use scout::models::request::ChatRequest;
use serde_json::Value;
use std::{
    convert::Infallible,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

// Server-sent events body fed from the forwarding task
pub struct SseResponse {
    rx: ReceiverStream<String>,
}

impl SseResponse {
    fn new(rx: ReceiverStream<String>) -> Self {
        Self { rx }
    }
}

impl Stream for SseResponse {
    type Item = Result<Bytes, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx)
            .poll_next(cx)
            .map(|opt| opt.map(|s| Ok(Bytes::from(s))))
    }
}

impl IntoResponse for SseResponse {
    fn into_response(self) -> Response {
        let body = Body::from_stream(self);
        (
            [
                (header::CONTENT_TYPE, "text/event-stream"),
                (header::CACHE_CONTROL, "no-cache"),
                (header::CONNECTION, "keep-alive"),
            ],
            body,
        )
            .into_response()
    }
}

fn format_event(event: &StreamEvent) -> String {
    format!("data: {}\n\n", event.to_value())
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    let completion = state.orchestrator.exchange(request).await?;
    Ok(Json(completion.into_body()))
}

async fn chat_stream(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<SseResponse, ApiError> {
    let Json(request) = payload?;
    let mut events = state.orchestrator.exchange_stream(request)?;

    let (tx, rx) = mpsc::channel(100);

    tokio::spawn(async move {
        while let Some(event) = events.next().await {
            let terminal = event.is_terminal();
            if let Err(e) = tx.send(format_event(&event)).await {
                tracing::info!("client went away, dropping provider stream: {}", e);
                break;
            }
            if terminal {
                break;
            }
            // Stop pulling from the provider once nobody is listening
            if tx.is_closed() {
                tracing::info!("client went away, dropping provider stream");
                break;
            }
        }
    });

    Ok(SseResponse::new(ReceiverStream::new(rx)))
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/stream", post(chat_stream))
        .with_state(state)
}
