//! CLI entrypoint for hostscope
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use hostscope_application::{
    AuditSink, ChatSession, NoAuditSink, RunConversationUseCase, ToolCatalog, ToolDispatcher,
};
use hostscope_domain::PromptTemplate;
use hostscope_infrastructure::{
    CodeIndex, ConfigLoader, FileConfig, HttpApiInvoker, JsonSchemaToolConverter,
    JsonlAuditSink, OpenApiLoader, ProviderFactory, build_client, builtin_tools,
};
use hostscope_presentation::{ChatRepl, Cli, ConsoleFormatter};
use serde_json::json;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use uuid::Uuid;

/// Application name and description from the host's API document.
type AppInfo = (String, String);

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting hostscope");

    let mut config = load_config(&cli)?;
    apply_overrides(&mut config, &cli);

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        println!();
        println!("{}", serde_json::to_string_pretty(&config.redacted())?);
        return Ok(ExitCode::SUCCESS);
    }

    config.validate().context("invalid configuration")?;

    // === Dependency Injection ===
    let (catalog, host_base_url, app) = build_catalog(&config)?;

    if cli.list_tools {
        print!("{}", ConsoleFormatter::tool_list(&catalog));
        return Ok(ExitCode::SUCCESS);
    }

    let provider_client = build_client(
        config.network.provider_timeout(),
        config.network.connect_timeout(),
    );
    let provider = ProviderFactory::create(&config.provider, provider_client)
        .context("failed to configure provider")?;

    let tool_client = build_client(
        config.network.tool_timeout(),
        config.network.connect_timeout(),
    );
    let dispatcher = Arc::new(
        ToolDispatcher::new(Arc::new(catalog))
            .with_api(Arc::new(HttpApiInvoker::new(tool_client)), host_base_url),
    );

    let mut use_case =
        RunConversationUseCase::new(provider, dispatcher.clone(), &JsonSchemaToolConverter);
    if let Some((title, description)) = &app {
        use_case = use_case.with_system_prompt(PromptTemplate::system_prompt(
            Some((title.as_str(), description.as_str())),
            dispatcher.catalog().definitions(),
        ));
    }

    let session_id = new_session_id();
    let session = Arc::new(ChatSession::start(
        session_id.clone(),
        open_audit_sink(&config, &session_id),
        json!({ "user": std::env::var("USER").unwrap_or_default() }),
    ));

    let repl = ChatRepl::new(Arc::new(use_case), session.clone())
        .with_authorization(cli.auth.clone());

    // One-shot mode
    if let Some(prompt) = &cli.prompt {
        let result = repl.ask(prompt).await;
        session.end("completed");
        return Ok(if result.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    repl.run().await?;
    Ok(ExitCode::SUCCESS)
}

/// Console logging at the `-v` level, plus an optional plain-text file.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("--log-file must name a file: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    ConfigLoader::load(cli.config.as_deref())
        .map_err(|e| anyhow!("failed to load configuration: {e}"))
}

/// Command-line flags win over every config layer.
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(kind) = &cli.provider {
        config.provider.kind = kind.clone();
    }
    if let Some(model) = &cli.model {
        config.provider.model = Some(model.clone());
    }
    if let Some(source) = &cli.source {
        config.source.path = source.clone();
    }
    if !cli.log_file_paths.is_empty() {
        config.logs.files = cli.log_file_paths.clone();
    }
    if let Some(spec) = &cli.api_spec {
        config.api.spec = Some(spec.clone());
    }
    if let Some(url) = &cli.host_url {
        config.api.host_base_url = Some(url.clone());
    }
}

/// Built-in tools first, then the host API tools, which take over any
/// built-in name they share. Returns the host base URL
/// (configured, else the document's first server) and the application info.
fn build_catalog(config: &FileConfig) -> Result<(ToolCatalog, Option<String>, Option<AppInfo>)> {
    let code_index = config
        .code_index
        .path
        .as_deref()
        .and_then(|path| match CodeIndex::load(path) {
            Ok(index) => Some(index),
            Err(e) => {
                warn!(error = %e, "Code index unavailable, search_code_index disabled");
                None
            }
        });

    let mut catalog = ToolCatalog::new();
    for tool in builtin_tools(&config.source.path, &config.logs.files, code_index) {
        catalog.register_builtin(tool);
    }

    let mut host_base_url = config.api.host_base_url.clone();
    let mut app = None;
    if let Some(spec) = &config.api.spec {
        let outcome = OpenApiLoader::load(spec)
            .with_context(|| format!("failed to load API document {}", spec.display()))?;
        let document = outcome.document;
        if host_base_url.is_none() {
            host_base_url = document.server_url.clone();
        }
        let registered = catalog.register_api_tools(document.tools);
        if host_base_url.is_none() && registered > 0 {
            warn!("No host base URL configured or declared; API tools will fail until one is set");
        }
        info!(tools = registered, "Registered host API tools");
        app = Some((document.title, document.description));
    }

    Ok((catalog, host_base_url, app))
}

fn new_session_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(16);
    id
}

fn open_audit_sink(config: &FileConfig, session_id: &str) -> Arc<dyn AuditSink> {
    if !config.audit.enabled {
        return Arc::new(NoAuditSink);
    }
    match JsonlAuditSink::for_session(&config.audit.dir, session_id) {
        Some(sink) => {
            info!(path = %sink.path().display(), "Writing session audit log");
            Arc::new(sink)
        }
        None => Arc::new(NoAuditSink),
    }
}
