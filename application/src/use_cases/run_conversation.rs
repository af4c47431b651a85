//! Run Conversation use case
//!
//! Drives one user message through the bounded tool-use loop:
//!
//! 1. snapshot the history and call the provider with the tool schemas
//! 2. stream each text segment to the client as soon as the reply arrives
//! 3. if the reply asks for tools, append it, run every invocation in order
//!    and append one message with all results, then go back to 1
//! 4. otherwise append the reply and finish
//!
//! The loop makes at most [`MAX_TURNS`](hostscope_domain::MAX_TURNS)
//! provider calls. Tool failures are folded into the result text; only
//! provider failures, a broken pairing rule or cancellation abort the turn.

use std::sync::Arc;

use hostscope_domain::{
    ContentSegment, DomainError, LoopState, Message, PromptTemplate, ProviderReply,
};
use serde_json::{Value, json};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::ports::audit_sink::AuditEventKind;
use crate::ports::chat_provider::{ChatProvider, ProviderError};
use crate::ports::tool_schema::ToolSchemaPort;
use crate::ports::turn_output::{OutputEvent, TurnOutput};
use crate::session::ChatSession;
use crate::tools::catalog::ToolCatalog;
use crate::tools::dispatcher::ToolDispatcher;
use crate::use_cases::shared::check_cancelled;

/// Errors that abort a turn.
#[derive(Error, Debug)]
pub enum RunConversationError {
    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    MalformedHistory(#[from] DomainError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl RunConversationError {
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            RunConversationError::Cancelled
                | RunConversationError::Provider(ProviderError::Cancelled)
        )
    }
}

/// One user message plus the caller context it arrived with.
#[derive(Debug, Clone)]
pub struct RunConversationInput {
    pub message: String,
    /// End user's `Authorization` header, forwarded to host API tools.
    pub authorization: Option<String>,
    pub cancellation: CancellationToken,
}

impl RunConversationInput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            authorization: None,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_authorization(mut self, authorization: Option<String>) -> Self {
        self.authorization = authorization;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }
}

/// What happened during a turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConversationOutput {
    /// Provider calls made.
    pub turns: usize,
    /// Tool invocations executed.
    pub tool_calls: usize,
    /// The model still wanted tools when the budget ran out.
    pub budget_exhausted: bool,
    /// All assistant text streamed during the turn.
    pub text: String,
}

/// Use case for answering user messages with the tool-use loop.
///
/// Shared by every session: it only holds immutable, `Arc`-shared state.
pub struct RunConversationUseCase {
    provider: Arc<dyn ChatProvider>,
    dispatcher: Arc<ToolDispatcher>,
    tool_schemas: Vec<Value>,
    system_prompt: String,
}

impl RunConversationUseCase {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        dispatcher: Arc<ToolDispatcher>,
        schema: &dyn ToolSchemaPort,
    ) -> Self {
        let tool_schemas = schema.catalog_schema(dispatcher.catalog());
        let system_prompt = PromptTemplate::system_prompt(None, dispatcher.catalog().definitions());
        Self {
            provider,
            dispatcher,
            tool_schemas,
            system_prompt,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn tool_schemas(&self) -> &[Value] {
        &self.tool_schemas
    }

    pub fn provider(&self) -> &dyn ChatProvider {
        self.provider.as_ref()
    }

    pub fn catalog(&self) -> &ToolCatalog {
        self.dispatcher.catalog()
    }

    /// Append the user message, run the loop and report the outcome.
    ///
    /// On failure an `error` audit record and an [`OutputEvent::Error`] are
    /// written; text already streamed stays valid. [`OutputEvent::Done`] is
    /// emitted exactly once in every case.
    pub async fn execute(
        &self,
        session: &ChatSession,
        input: RunConversationInput,
        output: &dyn TurnOutput,
    ) -> Result<RunConversationOutput, RunConversationError> {
        session.add_user_message(&input.message);

        let result = self.run_turns(session, &input, output).await;
        if let Err(e) = &result {
            warn!(session_id = %session.id(), error = %e, state = %LoopState::Aborted, "Turn aborted");
            session.audit(AuditEventKind::Error, json!({ "error": e.to_string() }));
            output.emit(OutputEvent::Error(format!("Error: {}", e)));
        }
        output.emit(OutputEvent::Done);
        result
    }

    async fn run_turns(
        &self,
        session: &ChatSession,
        input: &RunConversationInput,
        output: &dyn TurnOutput,
    ) -> Result<RunConversationOutput, RunConversationError> {
        let mut summary = RunConversationOutput::default();
        let mut state = LoopState::AwaitingModel;

        while state == LoopState::AwaitingModel {
            check_cancelled(&input.cancellation)?;

            let history = session.snapshot();
            let reply = self.send_cancellable(&history, &input.cancellation).await?;
            summary.turns += 1;
            if let Some(usage) = reply.usage {
                debug!(
                    turn = summary.turns,
                    input_tokens = usage.input_tokens,
                    output_tokens = usage.output_tokens,
                    stop_reason = %reply.stop_reason,
                    "Provider reply"
                );
            }

            let segments = self.stream_reply(session, output, reply, &mut summary.text);
            state = LoopState::after_reply(segments.iter().any(|s| s.as_invocation().is_some()));

            if state == LoopState::Done {
                if !segments.is_empty() {
                    session.push_assistant(segments);
                }
                break;
            }

            session.push_assistant(segments.clone());
            let results = self
                .run_invocations(session, output, &segments, input)
                .await;
            summary.tool_calls += results.len();
            session.append_tool_results(results)?;

            state = LoopState::after_tools(summary.turns);
            if state == LoopState::Done {
                summary.budget_exhausted = true;
                warn!(
                    session_id = %session.id(),
                    turns = summary.turns,
                    "Turn budget exhausted while the model still requested tools"
                );
            }
        }

        info!(
            session_id = %session.id(),
            turns = summary.turns,
            tool_calls = summary.tool_calls,
            "Turn complete"
        );
        Ok(summary)
    }

    async fn send_cancellable(
        &self,
        history: &[Message],
        cancellation: &CancellationToken,
    ) -> Result<ProviderReply, RunConversationError> {
        debug!(
            provider = self.provider.name(),
            model = self.provider.model(),
            messages = history.len(),
            "Calling provider"
        );
        let call = self
            .provider
            .send(history, &self.tool_schemas, &self.system_prompt);

        tokio::select! {
            biased;
            _ = cancellation.cancelled() => Err(RunConversationError::Cancelled),
            reply = call => reply.map_err(RunConversationError::from),
        }
    }

    /// Emit and audit each text segment; keep text and invocations, in
    /// order, for the assistant message.
    fn stream_reply(
        &self,
        session: &ChatSession,
        output: &dyn TurnOutput,
        reply: ProviderReply,
        transcript: &mut String,
    ) -> Vec<ContentSegment> {
        let mut kept = Vec::with_capacity(reply.segments.len());
        for segment in reply.segments {
            match &segment {
                ContentSegment::Text { text } => {
                    output.emit(OutputEvent::Text(text.clone()));
                    session.audit(AuditEventKind::AssistantMessage, json!({ "content": text }));
                    transcript.push_str(text);
                }
                ContentSegment::ToolInvocation { .. } => {}
                ContentSegment::ToolResult { .. } => {
                    warn!("Provider reply contained a tool result segment, ignoring it");
                    continue;
                }
            }
            kept.push(segment);
        }
        kept
    }

    /// Run every invocation sequentially and build one result per call, in
    /// invocation order.
    async fn run_invocations(
        &self,
        session: &ChatSession,
        output: &dyn TurnOutput,
        segments: &[ContentSegment],
        input: &RunConversationInput,
    ) -> Vec<ContentSegment> {
        let mut results = Vec::new();
        for (id, name, arguments) in segments.iter().filter_map(|s| s.as_invocation()) {
            output.emit(OutputEvent::ToolStarted {
                id: id.to_string(),
                name: name.to_string(),
            });
            session.audit(
                AuditEventKind::ToolUse,
                json!({ "tool_name": name, "tool_id": id, "input": arguments }),
            );

            let outcome = self
                .dispatcher
                .execute(
                    name,
                    arguments,
                    input.authorization.as_deref(),
                    &input.cancellation,
                )
                .await;
            let is_error = outcome.is_err();
            let content = outcome.unwrap_or_else(|e| {
                debug!(tool = %name, error = %e, "Tool failed");
                format!("Error: {}", e)
            });

            session.audit(
                AuditEventKind::ToolResult,
                json!({
                    "tool_name": name,
                    "tool_id": id,
                    "result": content,
                    "error": is_error,
                }),
            );
            output.emit(OutputEvent::ToolFinished {
                id: id.to_string(),
                name: name.to_string(),
                is_error,
            });
            results.push(ContentSegment::result(id, content));
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::audit_sink::NoAuditSink;
    use crate::ports::builtin_tool::BuiltinTool;
    use crate::session::tests::MemoryAuditSink;
    use crate::tools::catalog::ToolCatalog;
    use async_trait::async_trait;
    use hostscope_domain::{
        Conversation, MAX_TURNS, Role, StopReason, ToolArguments, ToolDefinition, ToolError,
    };
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Pops scripted replies; records every history it was sent.
    struct ScriptedProvider {
        replies: Mutex<VecDeque<Result<ProviderReply, ProviderError>>>,
        histories: Mutex<Vec<Vec<Message>>>,
    }

    impl ScriptedProvider {
        fn new(replies: Vec<Result<ProviderReply, ProviderError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                histories: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.histories.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-model"
        }

        async fn send(
            &self,
            history: &[Message],
            _tools: &[Value],
            _system_prompt: &str,
        ) -> Result<ProviderReply, ProviderError> {
            self.histories.lock().unwrap().push(history.to_vec());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ProviderReply::from_text("done")))
        }
    }

    /// Asks for a tool on every call, with a fresh invocation id.
    #[derive(Default)]
    struct AlwaysToolProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChatProvider for AlwaysToolProvider {
        fn name(&self) -> &str {
            "always-tool"
        }

        fn model(&self) -> &str {
            "loop-model"
        }

        async fn send(
            &self,
            _history: &[Message],
            _tools: &[Value],
            _system_prompt: &str,
        ) -> Result<ProviderReply, ProviderError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ProviderReply::new(
                vec![ContentSegment::invocation(
                    format!("call_{n}"),
                    "echo",
                    ToolArguments::new(),
                )],
                StopReason::ToolUse,
            ))
        }
    }

    struct EchoTool(ToolDefinition);

    #[async_trait]
    impl BuiltinTool for EchoTool {
        fn definition(&self) -> &ToolDefinition {
            &self.0
        }

        async fn execute(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
            match arguments.get("fail") {
                Some(_) => Err(ToolError::execution_failed("boom")),
                None => Ok(format!("echoed {}", arguments.len())),
            }
        }
    }

    struct NameOnlySchema;

    impl ToolSchemaPort for NameOnlySchema {
        fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
            json!({ "name": tool.name })
        }
    }

    #[derive(Default)]
    struct RecordingOutput {
        events: Mutex<Vec<OutputEvent>>,
    }

    impl TurnOutput for RecordingOutput {
        fn emit(&self, event: OutputEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn dispatcher() -> Arc<ToolDispatcher> {
        let mut catalog = ToolCatalog::new();
        catalog.register_builtin(Arc::new(EchoTool(ToolDefinition::new("echo", "Echo"))));
        Arc::new(ToolDispatcher::new(Arc::new(catalog)))
    }

    fn use_case(provider: Arc<dyn ChatProvider>) -> RunConversationUseCase {
        RunConversationUseCase::new(provider, dispatcher(), &NameOnlySchema)
    }

    fn args(value: Value) -> ToolArguments {
        value.as_object().cloned().unwrap()
    }

    fn rebuild(messages: Vec<Message>) -> Conversation {
        let mut conv = Conversation::new();
        for msg in messages {
            match msg.role {
                Role::User if msg.has_results() => conv.append_tool_results(msg.segments).unwrap(),
                Role::User => conv.push_user_text(msg.text_content()),
                Role::Assistant => conv.push_assistant(msg.segments),
            }
        }
        conv
    }

    #[tokio::test]
    async fn test_text_only_reply_finishes_in_one_turn() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(ProviderReply::from_text(
            "Looks fine.",
        ))]));
        let uc = use_case(provider.clone());
        let session = ChatSession::start("t1", Arc::new(NoAuditSink), Value::Null);
        let output = RecordingOutput::default();

        let result = uc
            .execute(&session, RunConversationInput::new("status?"), &output)
            .await
            .unwrap();

        assert_eq!(result.turns, 1);
        assert_eq!(result.tool_calls, 0);
        assert_eq!(result.text, "Looks fine.");
        assert_eq!(session.message_count(), 2);
        assert_eq!(
            *output.events.lock().unwrap(),
            vec![OutputEvent::Text("Looks fine.".to_string()), OutputEvent::Done]
        );
    }

    #[tokio::test]
    async fn test_results_pair_with_invocations_in_order() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(ProviderReply::new(
                vec![
                    ContentSegment::text("Checking."),
                    ContentSegment::invocation("a", "echo", args(json!({"x": 1}))),
                    ContentSegment::invocation("b", "missing_tool", ToolArguments::new()),
                    ContentSegment::invocation("c", "echo", args(json!({"fail": true}))),
                ],
                StopReason::ToolUse,
            )),
            Ok(ProviderReply::from_text("Found it.")),
        ]));
        let uc = use_case(provider.clone());
        let session = ChatSession::start("t2", Arc::new(NoAuditSink), Value::Null);

        let result = uc
            .execute(
                &session,
                RunConversationInput::new("why?"),
                &RecordingOutput::default(),
            )
            .await
            .unwrap();
        assert_eq!(result.turns, 2);
        assert_eq!(result.tool_calls, 3);

        let history = session.snapshot();
        assert_eq!(history.len(), 4);
        let results: Vec<_> = history[2].results().collect();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], ("a", "echoed 1"));
        assert_eq!(results[1].0, "b");
        assert!(results[1].1.starts_with("Error: [UNKNOWN_TOOL]"));
        assert_eq!(results[2].0, "c");
        assert!(results[2].1.contains("boom"));

        // The second provider call saw the complete, well-formed history.
        let second = provider.histories.lock().unwrap()[1].clone();
        assert_eq!(second.len(), 3);
        assert!(rebuild(second).validate().is_ok());
        assert!(rebuild(history).validate().is_ok());
    }

    #[tokio::test]
    async fn test_always_tool_provider_stops_after_ten_calls() {
        let provider = Arc::new(AlwaysToolProvider::default());
        let uc = use_case(provider.clone());
        let session = ChatSession::start("t3", Arc::new(NoAuditSink), Value::Null);

        let result = uc
            .execute(
                &session,
                RunConversationInput::new("loop"),
                &RecordingOutput::default(),
            )
            .await
            .unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), MAX_TURNS);
        assert_eq!(result.turns, 10);
        assert_eq!(result.tool_calls, 10);
        assert!(result.budget_exhausted);
        // user + 10 × (assistant, results)
        assert_eq!(session.message_count(), 21);
    }

    #[tokio::test]
    async fn test_session_audit_records_in_order() {
        let sink = Arc::new(MemoryAuditSink::default());
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(ProviderReply::new(
                vec![
                    ContentSegment::text("Let me check."),
                    ContentSegment::invocation("t1", "echo", ToolArguments::new()),
                ],
                StopReason::ToolUse,
            )),
            Ok(ProviderReply::new(vec![], StopReason::EndTurn)),
        ]));
        let uc = use_case(provider);
        let session = ChatSession::start("audit", sink.clone(), json!({"user": "dev"}));

        uc.execute(
            &session,
            RunConversationInput::new("help"),
            &RecordingOutput::default(),
        )
        .await
        .unwrap();

        assert_eq!(
            sink.kinds(),
            vec![
                AuditEventKind::SessionStart,
                AuditEventKind::UserMessage,
                AuditEventKind::AssistantMessage,
                AuditEventKind::ToolUse,
                AuditEventKind::ToolResult,
            ]
        );
        let records = sink.records.lock().unwrap();
        assert_eq!(records[3].data["tool_name"], "echo");
        assert_eq!(records[3].data["tool_id"], "t1");
        assert_eq!(records[4].data["result"], "echoed 0");
        assert_eq!(records[4].data["error"], false);
        // Empty final reply is not appended.
        assert_eq!(session.message_count(), 3);
    }

    #[tokio::test]
    async fn test_provider_error_aborts_turn_and_keeps_streamed_text() {
        let sink = Arc::new(MemoryAuditSink::default());
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(ProviderReply::new(
                vec![
                    ContentSegment::text("Reading."),
                    ContentSegment::invocation("a", "echo", ToolArguments::new()),
                ],
                StopReason::ToolUse,
            )),
            Err(ProviderError::Upstream {
                status: 500,
                body: "overloaded".to_string(),
            }),
        ]));
        let uc = use_case(provider);
        let session = ChatSession::start("err", sink.clone(), Value::Null);
        let output = RecordingOutput::default();

        let err = uc
            .execute(&session, RunConversationInput::new("go"), &output)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RunConversationError::Provider(ProviderError::Upstream { status: 500, .. })
        ));

        let events = output.events.lock().unwrap();
        assert_eq!(events[0], OutputEvent::Text("Reading.".to_string()));
        assert_eq!(
            events[events.len() - 2],
            OutputEvent::Error(
                "Error: API request failed with status 500: overloaded".to_string()
            )
        );
        assert_eq!(events.last(), Some(&OutputEvent::Done));
        assert_eq!(sink.kinds().last(), Some(&AuditEventKind::Error));
        // History stays well-formed up to the failure.
        assert_eq!(session.message_count(), 3);
    }

    #[tokio::test]
    async fn test_cancelled_before_first_call() {
        let provider = Arc::new(ScriptedProvider::new(vec![]));
        let uc = use_case(provider.clone());
        let session = ChatSession::start("cancel", Arc::new(NoAuditSink), Value::Null);
        let token = CancellationToken::new();
        token.cancel();

        let err = uc
            .execute(
                &session,
                RunConversationInput::new("hi").with_cancellation(token),
                &RecordingOutput::default(),
            )
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(provider.calls(), 0);
    }

    #[test]
    fn test_schemas_follow_catalog() {
        let uc = use_case(Arc::new(ScriptedProvider::new(vec![])));
        assert_eq!(uc.tool_schemas(), &[json!({"name": "echo"})]);
        assert!(uc.system_prompt().contains("- echo: Echo"));
    }
}
