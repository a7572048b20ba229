//! Toolset resolution for `--toolset`
//!
//! Provides standardized handling of toolset specifications:
//! - Toolset names: "metric_model", "enriched_data" → search standard locations
//! - File paths: "/path/to/file.json", "./config.json" → use directly
//!
//! Standard search locations (in order):
//! 1. {config_dir}/compass-mcp/toolset/{name}.json
//! 2. Toolsets embedded in the binary
//!
//! Cross-platform config directory resolution:
//! - Linux: ~/.config/compass-mcp/toolset/
//! - macOS: ~/Library/Application Support/compass-mcp/toolset/
//! - Windows: %APPDATA%\compass-mcp\toolset\

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

const EMBEDDED_PREFIX: &str = "embedded:";

/// Toolset configuration loaded from JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsetConfig {
    /// List of individual tool names to enable
    pub tools: Vec<String>,
}

/// Load toolset from embedded assets
fn load_embedded_toolset(name: &str) -> Result<ToolsetConfig> {
    let path = format!("toolset/{name}.json");
    let content = crate::embedded::get_file(&path)
        .ok_or_else(|| anyhow::anyhow!("Embedded toolset '{name}' not found"))?;

    serde_json::from_str(content)
        .with_context(|| format!("Failed to parse embedded toolset '{name}'"))
}

/// Whether `spec` names a file rather than a toolset.
fn is_path_spec(spec: &str) -> bool {
    let path = Path::new(spec);
    path.is_absolute()
        || spec.contains('/')
        || spec.contains(MAIN_SEPARATOR)
        || spec.starts_with('.')
        || path.extension().is_some()
}

/// User config location for a named toolset.
fn user_toolset_path(name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join("compass-mcp")
            .join("toolset")
            .join(format!("{name}.json"))
    })
}

/// Resolve toolset specification to a file path (or an embedded marker)
///
/// # Examples
/// ```ignore
/// // Toolset name: user config dir first, then the bundled copy
/// resolve_toolset_path("metric_model")?;
///
/// // Relative path
/// resolve_toolset_path("./my-toolset.json")?;
/// ```
pub fn resolve_toolset_path(spec: &str) -> Result<PathBuf> {
    if is_path_spec(spec) {
        let path_buf = PathBuf::from(spec);
        if !path_buf.exists() {
            bail!("Toolset file not found: {}", path_buf.display());
        }
        return Ok(path_buf);
    }

    if let Some(path) = user_toolset_path(spec)
        && path.exists()
    {
        return Ok(path);
    }

    let embedded_path = format!("toolset/{spec}.json");
    if crate::embedded::get_file(&embedded_path).is_some() {
        return Ok(PathBuf::from(format!("{EMBEDDED_PREFIX}{spec}")));
    }

    bail!(
        "Toolset '{}' not found in config directory or embedded toolsets (available: {})",
        spec,
        crate::embedded::list_toolsets().join(", ")
    )
}

/// Load toolset JSON file and extract tool names
pub async fn load_toolset_file(path: &Path) -> Result<Vec<String>> {
    let path_str = path.to_string_lossy();

    if let Some(name) = path_str.strip_prefix(EMBEDDED_PREFIX) {
        let config = load_embedded_toolset(name)?;
        return Ok(config.tools);
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read toolset file: {}", path.display()))?;

    let toolset: ToolsetConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse toolset file: {}", path.display()))?;

    Ok(toolset.tools)
}

/// Resolve and load a toolset in one step.
pub async fn load_toolset(spec: &str) -> Result<Vec<String>> {
    let path = resolve_toolset_path(spec)?;
    load_toolset_file(&path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_path_detection() {
        assert!(is_path_spec("./toolset.json"));
        assert!(is_path_spec("/etc/compass/toolset.json"));
        assert!(is_path_spec("custom.json"));
        assert!(!is_path_spec("metric_model"));
    }

    #[tokio::test]
    async fn test_load_embedded_toolset_by_name() {
        let tools = load_toolset("pull_request").await.expect("bundled toolset");
        assert_eq!(tools, vec!["get_pull_requests".to_string()]);
    }

    #[tokio::test]
    async fn test_load_toolset_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        write!(
            file,
            r#"{{"tools": ["get_project_activity", "get_fork_enriched_data"]}}"#
        )
        .expect("write toolset");

        let spec = file.path().to_string_lossy().to_string();
        let tools = load_toolset(&spec).await.expect("file toolset");
        assert_eq!(tools, vec!["get_project_activity", "get_fork_enriched_data"]);
    }

    #[tokio::test]
    async fn test_invalid_toolset_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        write!(file, "not json").expect("write");

        let spec = file.path().to_string_lossy().to_string();
        assert!(load_toolset(&spec).await.is_err());
    }

    #[test]
    fn test_unknown_toolset_name() {
        let err = resolve_toolset_path("no_such_toolset_anywhere").expect_err("unknown");
        assert!(err.to_string().contains("no_such_toolset_anywhere"));
    }

    #[test]
    fn test_missing_file() {
        assert!(resolve_toolset_path("./does-not-exist.json").is_err());
    }
}
