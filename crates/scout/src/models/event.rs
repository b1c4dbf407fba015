use serde::{Serialize, Serializer};
use serde_json::{json, Value};

/// An event relayed to a streaming caller. Events are final once emitted.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// An incremental provider event (message start, content deltas, ...)
    Delta(Value),
    /// The provider's own end-of-message event
    Stop(Value),
    /// The relay finished normally
    Done,
    /// The relay failed after the stream had started
    Error { error: String },
}

impl StreamEvent {
    /// Classify an event decoded from the provider stream
    pub fn from_provider(event: Value) -> Self {
        if event.get("type").and_then(Value::as_str) == Some("message_stop") {
            StreamEvent::Stop(event)
        } else {
            StreamEvent::Delta(event)
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        StreamEvent::Error {
            error: message.into(),
        }
    }

    /// Whether this event ends the stream
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Done | StreamEvent::Error { .. })
    }

    pub fn to_value(&self) -> Value {
        match self {
            StreamEvent::Delta(event) | StreamEvent::Stop(event) => event.clone(),
            StreamEvent::Done => json!({"type": "done"}),
            StreamEvent::Error { error } => json!({"type": "error", "error": error}),
        }
    }
}

impl Serialize for StreamEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
