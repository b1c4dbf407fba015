use futures::{Stream, StreamExt};
use serde_json::Value;

use super::base::ProviderEventStream;
use crate::errors::{ProviderError, ProviderResult};

/// One server-sent event as framed on the wire
#[derive(Debug, Clone, PartialEq)]
pub struct SseEvent {
    pub event: Option<String>,
    pub data: String,
}

/// Incremental decoder for a `text/event-stream` body
///
/// Bytes are buffered until a full line is available, so multi-byte characters split
/// across network chunks decode correctly.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk, returning every event completed by it
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();

        while let Some(line) = take_line(&mut self.buffer) {
            if let Some(event) = self.process_line(&line) {
                events.push(event);
            }
        }

        events
    }

    /// Flush whatever is left once the body has ended
    pub fn finish(&mut self) -> Option<SseEvent> {
        if !self.buffer.is_empty() {
            let line = String::from_utf8_lossy(&std::mem::take(&mut self.buffer)).into_owned();
            if let Some(event) = self.process_line(&line) {
                return Some(event);
            }
        }
        self.dispatch()
    }

    fn process_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        if self.data.is_empty() && self.event.is_none() {
            return None;
        }
        let event = SseEvent {
            event: self.event.take(),
            data: std::mem::take(&mut self.data).join("\n"),
        };
        Some(event)
    }
}

/// Remove and return the next `\n` terminated line, without its terminator
fn take_line(buffer: &mut Vec<u8>) -> Option<String> {
    let pos = buffer.iter().position(|b| *b == b'\n')?;
    let mut line: Vec<u8> = buffer.drain(..=pos).collect();
    line.pop();
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Some(String::from_utf8_lossy(&line).into_owned())
}

/// Turn a raw SSE event from the messages endpoint into a JSON event, if it carries one
///
/// Keep-alive pings are skipped and `error` events become stream faults.
pub fn decode_message_event(event: SseEvent) -> Option<ProviderResult<Value>> {
    if event.event.as_deref() == Some("ping") || event.data.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(&event.data) {
        Ok(value) => value,
        Err(e) => return Some(Err(e.into())),
    };

    let is_error = event.event.as_deref() == Some("error")
        || value.get("type").and_then(Value::as_str) == Some("error");
    if is_error {
        let message = extract_error_message(&value).unwrap_or_else(|| value.to_string());
        return Some(Err(ProviderError::Stream(message)));
    }

    Some(Ok(value))
}

/// Decode a byte stream in event-stream framing into provider events
pub fn message_event_stream<S, B, E>(body: S) -> ProviderEventStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<ProviderError> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut decoder = SseDecoder::new();
        futures::pin_mut!(body);

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    yield Err::<Value, ProviderError>(e.into());
                    return;
                }
            };
            for event in decoder.push(chunk.as_ref()) {
                if let Some(item) = decode_message_event(event) {
                    let failed = item.is_err();
                    yield item;
                    if failed {
                        return;
                    }
                }
            }
        }

        if let Some(item) = decoder.finish().and_then(decode_message_event) {
            yield item;
        }
    })
}

/// Pull a human readable message out of a provider error body
pub fn extract_error_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(|error| error.get("message").or(Some(error)))
        .or_else(|| body.get("message"))
        .and_then(|message| match message {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        })
}

/// Convert a non-success HTTP response into a classified provider error
pub async fn error_from_response(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let request_id = response
        .headers()
        .get("request-id")
        .and_then(|value| value.to_str().ok())
        .map(String::from);

    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => return e.into(),
    };

    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| extract_error_message(&body))
        .unwrap_or(text);

    ProviderError::api(status, message, request_id)
}
