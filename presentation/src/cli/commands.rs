//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for hostscope
#[derive(Parser, Debug)]
#[command(name = "hostscope")]
#[command(author, version, about = "Conversational debugging agent for a running application")]
#[command(long_about = r#"
hostscope answers questions about a host application by letting a model call
read-only tools: the source tree, the application's logs, an optional code
index and the application's own REST API (from its OpenAPI document).

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./hostscope.toml    Project-level config
3. ~/.config/hostscope/config.toml   Global config
Environment variables HOSTSCOPE_<SECTION>__<KEY> override all files.

Example:
  hostscope --source ./shop --log-file-path ./shop/app.log "Why does GET /orders return 500?"
  hostscope --api-spec openapi.yaml --host-url http://localhost:8080 --auth "Bearer $TOKEN"
  hostscope --provider deepseek --model deepseek-chat
"#)]
pub struct Cli {
    /// Question to answer once and exit (starts chat mode when omitted)
    pub prompt: Option<String>,

    /// Provider preset (anthropic, openai, deepseek, ollama, custom, ...)
    #[arg(long, value_name = "KIND")]
    pub provider: Option<String>,

    /// Model identifier sent to the provider
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Source tree the file tools are rooted at
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Log file searched by read_logs (can be specified multiple times)
    #[arg(long = "log-file-path", value_name = "FILE")]
    pub log_file_paths: Vec<PathBuf>,

    /// OpenAPI document (YAML or JSON) of the host application
    #[arg(long, value_name = "PATH")]
    pub api_spec: Option<PathBuf>,

    /// Base URL of the host application API
    #[arg(long, value_name = "URL")]
    pub host_url: Option<String>,

    /// Authorization header forwarded to host API calls
    #[arg(long, value_name = "HEADER")]
    pub auth: Option<String>,

    /// Print the tool catalog and exit
    #[arg(long)]
    pub list_tools: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the effective config, then exit
    #[arg(long)]
    pub show_config: bool,
}
