//! Static metadata for all tools across the Compass categories.
//!
//! This module aggregates tool metadata from the category submodules
//! so the table is built once and never instantiated per call.

use super::types::ToolMetadata;
use once_cell::sync::Lazy;

mod enriched_data;
mod metric_model;
mod pull_request;

use enriched_data::enriched_data_tools;
use metric_model::metric_model_tools;
use pull_request::pull_request_tools;

/// All tools with static metadata, cached and sorted alphabetically.
static CACHED_TOOL_METADATA: Lazy<Vec<ToolMetadata>> = Lazy::new(|| {
    let mut tools = Vec::new();

    // Metric model scores (personas, activity, collaboration)
    tools.extend(metric_model_tools());

    // Per-event enriched data searches
    tools.extend(enriched_data_tools());

    // Pull request metadata with per-call token
    tools.extend(pull_request_tools());

    // Sort alphabetically by tool name for consistent ordering
    tools.sort_by(|a, b| a.name.cmp(b.name));

    tools
});

/// Returns a static reference to all tool metadata (cached, sorted).
pub fn all_tool_metadata() -> &'static [ToolMetadata] {
    &CACHED_TOOL_METADATA
}
