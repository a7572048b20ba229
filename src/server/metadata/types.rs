//! Core types for static tool metadata and tool arguments.

use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

use crate::gateway::{DEFAULT_DIRECTION, DEFAULT_PAGE, DEFAULT_SIZE, MetricRequest};

/// Metadata for a single tool.
#[derive(Debug, Clone)]
pub struct ToolMetadata {
    pub name: &'static str,
    pub category: &'static str,
    /// Upstream path relative to the base URL.
    pub endpoint: &'static str,
    pub description: &'static str,
    pub schema: Value,
    /// Whether the tool takes an `access_token` argument that wins over the
    /// configured token.
    pub accepts_token_override: bool,
}

/// Helper to build schema from Args type.
pub fn build_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or(Value::Null)
}

/// Arguments shared by every metric and enriched-data tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MetricArgs {
    /// Repository address to query, e.g. 'https://github.com/oss-compass/compass-web-service'.
    pub label: String,
    /// Start of the query window, format 'YYYY-MM-DD'.
    pub begin_date: String,
    /// End of the query window, format 'YYYY-MM-DD'.
    pub end_date: String,
    /// Page number, defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Items per page, defaults to 10.
    #[serde(default = "default_size")]
    pub size: i64,
    /// Sort direction, 'desc' (default) or 'asc'.
    #[serde(default = "default_direction")]
    pub direction: String,
}

/// Arguments for the pull request metadata tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PullRequestArgs {
    #[serde(flatten)]
    pub query: MetricArgs,
    /// Compass access token. Falls back to the GITEE_ACCESS_TOKEN environment variable.
    #[serde(default)]
    pub access_token: Option<String>,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_size() -> i64 {
    DEFAULT_SIZE
}

fn default_direction() -> String {
    DEFAULT_DIRECTION.to_string()
}

impl From<MetricArgs> for MetricRequest {
    fn from(args: MetricArgs) -> Self {
        Self {
            label: args.label,
            begin_date: args.begin_date,
            end_date: args.end_date,
            direction: args.direction,
            page: args.page,
            size: args.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metric_args_defaults() {
        let args: MetricArgs = serde_json::from_value(json!({
            "label": "https://github.com/a/b",
            "begin_date": "2023-01-01",
            "end_date": "2023-12-31"
        }))
        .expect("valid args");

        let request = MetricRequest::from(args);
        assert_eq!(request.page, 1);
        assert_eq!(request.size, 10);
        assert_eq!(request.direction, "desc");
    }

    #[test]
    fn test_metric_args_require_label() {
        let result = serde_json::from_value::<MetricArgs>(json!({
            "begin_date": "2023-01-01",
            "end_date": "2023-12-31"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_pull_request_args_flatten() {
        let args: PullRequestArgs = serde_json::from_value(json!({
            "label": "https://gitee.com/a/b",
            "begin_date": "2024-01-01",
            "end_date": "2024-02-01",
            "direction": "asc",
            "page": 3,
            "access_token": "abc"
        }))
        .expect("valid args");

        assert_eq!(args.access_token.as_deref(), Some("abc"));
        assert_eq!(args.query.direction, "asc");
        assert_eq!(args.query.page, 3);
        assert_eq!(args.query.size, 10);
    }

    #[test]
    fn test_schema_lists_required_fields() {
        let schema = build_schema::<MetricArgs>();
        let required = schema["required"].as_array().expect("required array");
        for field in ["label", "begin_date", "end_date"] {
            assert!(required.iter().any(|v| v == field), "missing {field}");
        }
        assert!(!required.iter().any(|v| v == "page"));
    }
}
