//! Tool categories and the tool_name -> metadata routing table.

use std::collections::HashMap;

use super::category_metadata::all_tool_metadata;
use super::types::ToolMetadata;

/// Tool categories with a one-line summary, in display order.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("metric_model", "Aggregated metric model scores (personas, activity, collaboration)"),
    ("enriched_data", "Per-event enriched data searches (forks, issues, commits, releases, ...)"),
    ("pull_request", "Pull request metadata with optional per-call access token"),
];

/// Build routing table: tool_name -> metadata
pub fn build_routing_table() -> HashMap<&'static str, &'static ToolMetadata> {
    all_tool_metadata()
        .iter()
        .map(|tool| (tool.name, tool))
        .collect()
}
