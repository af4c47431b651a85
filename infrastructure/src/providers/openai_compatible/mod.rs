//! Adapter for OpenAI-style chat completion endpoints.
//!
//! One adapter serves every vendor in the preset table; only the base URL,
//! model and key differ.

pub mod types;

use async_trait::async_trait;
use hostscope_application::{ChatProvider, ProviderError};
use hostscope_domain::{Message, ProviderReply};
use serde_json::Value;
use tracing::debug;

use super::http::{decode, read_success_body, transport_error};
use types::{ChatCompletionRequest, ChatCompletionResponse, convert_messages, convert_response, convert_tools};

/// `POST {base_url}/chat/completions` with a bearer key.
pub struct OpenAiCompatibleProvider {
    client: reqwest::Client,
    name: String,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiCompatibleProvider {
    pub fn new(
        client: reqwest::Client,
        name: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            name: name.into(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            max_tokens: 4096,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn send(
        &self,
        history: &[Message],
        tools: &[Value],
        system_prompt: &str,
    ) -> Result<ProviderReply, ProviderError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: convert_messages(history, system_prompt),
            tools: convert_tools(tools),
            max_tokens: self.max_tokens,
        };

        debug!(
            provider = %self.name,
            endpoint = %self.endpoint(),
            messages = request.messages.len(),
            "Chat completion request"
        );
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let body = read_success_body(response).await?;
        let parsed: ChatCompletionResponse = decode(&body)?;
        convert_response(parsed, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use hostscope_domain::{ContentSegment, StopReason, ToolArguments};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn provider(base_url: &str) -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(
            reqwest::Client::new(),
            "deepseek",
            "sk-ds",
            base_url,
            "deepseek-chat",
        )
    }

    #[tokio::test]
    async fn test_round_trip_with_tool_call() {
        let seen: Arc<Mutex<Option<(HeaderMap, Value)>>> = Arc::new(Mutex::new(None));
        let captured = seen.clone();
        // Replies with the last message it was sent, so the reply exercises
        // both directions of the tool call conversion.
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    let last = body["messages"].as_array().and_then(|m| m.last()).cloned();
                    *captured.lock().unwrap() = Some((headers, body));
                    Json(json!({
                        "model": "deepseek-chat",
                        "choices": [{"message": last, "finish_reason": "tool_calls"}]
                    }))
                }
            }),
        );
        let base = serve(app).await;

        let mut previous = ToolArguments::new();
        previous.insert("pattern".to_string(), json!("500"));
        let arguments = json!({
            "limit": 5,
            "verbose": true,
            "filter": {"status": ["failed"], "ratio": 0.5}
        })
        .as_object()
        .cloned()
        .unwrap();
        let history = vec![
            Message::user_text("why 500?"),
            Message::assistant(vec![ContentSegment::invocation("call_1", "grep", previous)]),
            Message::tool_results(vec![ContentSegment::result("call_1", "main.go:10: w.WriteHeader(500)")]),
            Message::assistant(vec![
                ContentSegment::text("Checking the failed orders."),
                ContentSegment::invocation("call_2", "searchOrders", arguments.clone()),
            ]),
        ];
        let tools = vec![json!({"name": "searchOrders", "description": "Search", "input_schema": {"type": "object", "properties": {}}})];

        let reply = provider(&format!("{base}/v1/"))
            .send(&history, &tools, "Be brief.")
            .await
            .unwrap();

        assert_eq!(reply.stop_reason, StopReason::ToolUse);
        assert_eq!(reply.segments, history[3].segments);
        let (id, name, args) = reply.invocations().next().unwrap();
        assert_eq!((id, name), ("call_2", "searchOrders"));
        assert_eq!(args, &arguments);
        assert_eq!(args["limit"], json!(5));
        assert_eq!(args["verbose"], json!(true));
        assert_eq!(args["filter"]["ratio"], json!(0.5));

        let (headers, body) = seen.lock().unwrap().take().unwrap();
        assert_eq!(headers["authorization"], "Bearer sk-ds");
        assert_eq!(body["model"], "deepseek-chat");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][2]["tool_calls"][0]["function"]["arguments"], "{\"pattern\":\"500\"}");
        assert_eq!(body["messages"][3]["role"], "tool");
        assert_eq!(body["messages"][3]["tool_call_id"], "call_1");
        assert_eq!(body["messages"][4]["content"], "Checking the failed orders.");
        assert!(body["messages"][4]["tool_calls"][0]["function"]["arguments"].is_string());
        assert_eq!(body["tools"][0]["function"]["name"], "searchOrders");
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let app = Router::new().route(
            "/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "{\"error\":\"bad key\"}") }),
        );
        let base = serve(app).await;

        let err = provider(&base)
            .send(&[Message::user_text("hi")], &[], "")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(
            err.to_string(),
            "API request failed with status 401: {\"error\":\"bad key\"}"
        );
    }
}
