//! Static tool metadata for the Compass MCP server.
//!
//! Each tool is one row binding a name and description to a fixed upstream
//! endpoint; the gateway does the rest.

mod category_metadata;
mod routing;
mod types;

pub use category_metadata::all_tool_metadata;
pub use routing::{CATEGORIES, build_routing_table};
pub use types::{MetricArgs, PullRequestArgs, ToolMetadata};
