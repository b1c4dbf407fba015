//! These models represent the objects passed around by the gateway
//!
//! There are a few related formats we need to interact with:
//! - chat requests sent by callers, which already follow the anthropic messages layout
//! - anthropic messages/tools, sent from the gateway to the LLM
//! - anthropic responses and stream events, relayed back to the caller untouched
//! - brave web search payloads, either relayed raw or narrowed into search results
//!
//! Because the caller speaks the provider's own dialect, the internal models stay close
//! to the anthropic wire format and keep unknown content opaque instead of dropping it.
pub mod catalog;
pub mod completion;
pub mod content;
pub mod event;
pub mod message;
pub mod request;
pub mod role;
pub mod tool;
