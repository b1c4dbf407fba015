use futures::stream::BoxStream;
use futures::StreamExt;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::errors::{GatewayError, GatewayResult};
use crate::models::completion::Completion;
use crate::models::event::StreamEvent;
use crate::models::message::Message;
use crate::models::request::{
    non_empty_system, AnalyzeRequest, ChatRequest, MessagesRequest, ANALYSIS_MAX_TOKENS,
    ANALYSIS_MODEL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
use crate::models::tool::ToolCall;
use crate::prompt_template::search_analysis_prompt;
use crate::providers::base::Provider;
use crate::search::{SearchInvoker, SearchResultSet, DIRECT_DEFAULT_COUNT};
use crate::tools::BuiltinTool;

/// Orchestrator pairs the model provider with the tools it may call during an exchange
pub struct Orchestrator {
    provider: Arc<dyn Provider>,
    search: SearchInvoker,
    web_search: bool,
}

impl Orchestrator {
    /// Create a new Orchestrator with web search enabled
    pub fn new(provider: Arc<dyn Provider>, search: SearchInvoker) -> Self {
        Self {
            provider,
            search,
            web_search: true,
        }
    }

    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }

    pub fn search(&self) -> &SearchInvoker {
        &self.search
    }

    /// Tools offered to the model on every exchange
    fn builtin_tools(&self) -> Vec<BuiltinTool> {
        if self.web_search {
            vec![BuiltinTool::WebSearch]
        } else {
            Vec::new()
        }
    }

    /// Validate a caller request and turn it into the provider payload
    fn build_request(&self, request: ChatRequest) -> GatewayResult<MessagesRequest> {
        let messages = match request.messages {
            Some(messages) if !messages.is_empty() => messages,
            _ => return Err(GatewayError::validation("Invalid messages")),
        };

        let caller_tools = request.tools.unwrap_or_default();
        if self.web_search {
            if let Some(tool) = caller_tools.iter().find(|t| BuiltinTool::is_reserved(&t.name)) {
                return Err(GatewayError::validation(format!(
                    "Tool name '{}' is reserved",
                    tool.name
                )));
            }
        }

        let mut tools: Vec<_> = self
            .builtin_tools()
            .iter()
            .map(BuiltinTool::declaration)
            .collect();
        tools.extend(caller_tools);

        let mut outbound = MessagesRequest::new(
            request.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            messages,
        );
        outbound.temperature = Some(request.temperature.unwrap_or(DEFAULT_TEMPERATURE));
        outbound.system = non_empty_system(request.system);
        outbound.tools = tools;
        Ok(outbound)
    }

    /// Run a tool the gateway owns and return its JSON output
    async fn dispatch_tool_call(&self, tool: BuiltinTool, call: &ToolCall) -> Value {
        match tool {
            BuiltinTool::WebSearch => self.search.run_tool(&call.input).await,
        }
    }

    /// Complete one chat turn. When the model stops to call a built-in tool, the tool runs
    /// and the conversation is resubmitted once; the second response is returned.
    pub async fn exchange(&self, request: ChatRequest) -> GatewayResult<Completion> {
        let mut outbound = self.build_request(request)?;
        let completion = self.provider.complete(&outbound).await?;

        if !completion.is_tool_use() {
            return Ok(completion);
        }

        let Some(call) = completion.first_tool_call() else {
            tracing::warn!("tool_use stop without a tool_use block, returning response as is");
            return Ok(completion);
        };

        let tool = match BuiltinTool::from_name(&call.name) {
            Some(tool) if self.web_search => tool,
            _ => {
                tracing::debug!(tool = %call.name, "tool is not handled by the gateway");
                return Ok(completion);
            }
        };

        tracing::info!(tool = %tool, id = %call.id, "dispatching tool call");
        let output = self.dispatch_tool_call(tool, &call).await;
        let content = serde_json::to_string_pretty(&output)
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        outbound.messages.push(completion.to_assistant_message());
        outbound.messages.push(Message::tool_result(call.id, content));

        Ok(self.provider.complete(&outbound).await?)
    }

    /// Relay the provider's incremental events. Validation failures are returned before
    /// the stream exists; afterwards the stream always ends with exactly one `Done` or
    /// `Error` event.
    pub fn exchange_stream(
        &self,
        request: ChatRequest,
    ) -> GatewayResult<BoxStream<'static, StreamEvent>> {
        let outbound = self.build_request(request)?.streaming();
        let provider = Arc::clone(&self.provider);

        Ok(Box::pin(async_stream::stream! {
            let mut events = match provider.stream(&outbound).await {
                Ok(events) => events,
                Err(e) => {
                    tracing::error!(error = %e, "failed to open provider stream");
                    yield StreamEvent::error(e.to_string());
                    return;
                }
            };

            while let Some(event) = events.next().await {
                match event {
                    Ok(event) => yield StreamEvent::from_provider(event),
                    Err(e) => {
                        tracing::error!(error = %e, "provider stream failed");
                        yield StreamEvent::error(e.to_string());
                        return;
                    }
                }
            }

            yield StreamEvent::Done;
        }))
    }

    /// Search the web, then ask the model to summarize the results
    pub async fn analyze_search(&self, request: AnalyzeRequest) -> GatewayResult<Value> {
        let query = request.query().unwrap_or_default().to_string();
        let payload = self
            .search
            .raw(
                request.query(),
                Some(request.num_results.unwrap_or(DIRECT_DEFAULT_COUNT)),
            )
            .await?;

        let results = SearchResultSet::from_payload(&query, &payload);
        let prompt = search_analysis_prompt(&query, &results.results)
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        let outbound = MessagesRequest::new(
            request.model.unwrap_or_else(|| ANALYSIS_MODEL.to_string()),
            request.max_tokens.unwrap_or(ANALYSIS_MAX_TOKENS),
            vec![Message::user(prompt)],
        );
        let analysis = self.provider.complete(&outbound).await?;

        Ok(json!({
            "search_results": payload,
            "claude_analysis": analysis.into_body(),
        }))
    }
}
