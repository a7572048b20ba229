use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::time::Duration;

use crate::config::{ACCESS_TOKEN_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ServerConfig};
use crate::gateway::{DEFAULT_DIRECTION, DEFAULT_PAGE, DEFAULT_SIZE};

/// OSS Compass MCP Server - repository health and activity metrics for AI agents
///
/// Available tool categories:
/// - `metric_model`: contributor personas, activity and collaboration scores
/// - `enriched_data`: fork, issue, commit, release, star and watch records
/// - `pull_request`: pull request metadata with per-call token
#[derive(Parser, Debug)]
#[command(name = "compass-mcp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable specific tools by name (comma-separated)
    ///
    /// Example: --tools get_project_activity,get_fork_enriched_data
    ///
    /// If not specified, all tools are enabled.
    #[arg(long, value_delimiter = ',', conflicts_with = "tool")]
    pub tools: Option<Vec<String>>,

    /// Enable specific tool by name (can be specified multiple times)
    ///
    /// Example: --tool get_project_activity --tool get_pull_requests
    ///
    /// If not specified, all tools are enabled.
    #[arg(long = "tool", conflicts_with = "tools")]
    pub tool: Vec<String>,

    /// Enable the tools listed in a toolset (bundled name or JSON file)
    ///
    /// Bundled: metric_model, enriched_data, pull_request
    ///
    /// JSON format:
    /// ```json
    /// { "tools": ["get_project_activity", "get_pull_requests"] }
    /// ```
    #[arg(long, value_name = "NAME|PATH", conflicts_with_all = ["tool", "tools"])]
    pub toolset: Option<String>,

    /// Serve over SSE on this address instead of stdio
    /// Example: --sse 0.0.0.0:8000
    #[arg(long, value_name = "ADDR")]
    pub sse: Option<SocketAddr>,

    /// List available tool categories and exit
    #[arg(long)]
    pub list_categories: bool,

    /// List available tool names and exit
    #[arg(long)]
    pub list_tools: bool,

    /// List bundled toolsets and exit
    #[arg(long)]
    pub list_toolsets: bool,

    /// Compass API root URL
    #[arg(long, value_name = "URL", env = "COMPASS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 30)
    #[arg(
        long,
        value_name = "SECONDS",
        env = "COMPASS_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub timeout: u64,

    /// Compass access token
    ///
    /// Usually supplied through GITEE_ACCESS_TOKEN in the environment or `.env`.
    #[arg(long, value_name = "TOKEN", env = ACCESS_TOKEN_ENV, hide_env_values = true)]
    pub access_token: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Invoke one tool directly and print its JSON result
    Call {
        /// Tool name (see --list-tools)
        tool: String,

        /// Repository address, e.g. https://github.com/oss-compass/compass-web-service
        #[arg(long)]
        label: String,

        /// Start date, YYYY-MM-DD
        #[arg(long)]
        begin_date: String,

        /// End date, YYYY-MM-DD
        #[arg(long)]
        end_date: String,

        /// Page number
        #[arg(long, default_value_t = DEFAULT_PAGE, allow_negative_numbers = true)]
        page: i64,

        /// Items per page
        #[arg(long, default_value_t = DEFAULT_SIZE, allow_negative_numbers = true)]
        size: i64,

        /// Sort direction: desc or asc
        #[arg(long, default_value = DEFAULT_DIRECTION)]
        direction: String,

        /// Per-call token (only honored by get_pull_requests)
        #[arg(long = "token", value_name = "TOKEN")]
        token: Option<String>,
    },
}

impl Cli {
    /// Get the set of enabled tool names
    ///
    /// Returns None if no filter specified (enable all tools)
    /// Returns Some(HashSet) if filter specified (enable only these tools)
    pub async fn enabled_tools(&self) -> anyhow::Result<Option<HashSet<String>>> {
        // Priority 1: --toolset (bundled name or JSON file)
        if let Some(ref spec) = self.toolset {
            let tools = super::toolset::load_toolset(spec).await?;
            return Ok(Some(tools.into_iter().collect()));
        }

        // Priority 2: --tools (comma-separated)
        if let Some(tools) = &self.tools {
            return Ok(Some(tools.iter().cloned().collect()));
        }

        // Priority 3: --tool (repeated flags)
        if !self.tool.is_empty() {
            return Ok(Some(self.tool.iter().cloned().collect()));
        }

        Ok(None)
    }

    /// Build the immutable gateway configuration.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(
            self.access_token.clone(),
            self.base_url.clone(),
            Duration::from_secs(self.timeout),
        )
    }
}

/// Get all available tool categories
pub fn available_categories() -> Vec<&'static str> {
    crate::server::metadata::CATEGORIES
        .iter()
        .map(|(name, _)| *name)
        .collect()
}

/// Get all available tool names
pub fn available_tools() -> Vec<&'static str> {
    crate::server::metadata::all_tool_metadata()
        .iter()
        .map(|tool| tool.name)
        .collect()
}

/// Names in `requested` that are not known tools, sorted.
pub fn invalid_tools(requested: &HashSet<String>) -> Vec<String> {
    let available = available_tools();
    let mut invalid: Vec<String> = requested
        .iter()
        .filter(|tool| !available.contains(&tool.as_str()))
        .cloned()
        .collect();
    invalid.sort();
    invalid
}
