//! Embedded .compass assets bundled at compile time
//!
//! The bundled toolsets mirror the services this server historically ran as:
//! one for metric models, one for enriched data and one for pull requests.

use include_dir::{Dir, include_dir};

/// Embedded .compass directory with toolset files
///
/// Directory structure:
/// ```text
/// .compass/
/// └── toolset/
///     ├── enriched_data.json
///     ├── metric_model.json
///     └── pull_request.json
/// ```
pub static COMPASS_ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/.compass");

/// Get any embedded file by path relative to .compass/
pub fn get_file(path: &str) -> Option<&'static str> {
    COMPASS_ASSETS.get_file(path)?.contents_utf8()
}

/// List all available bundled toolsets
///
/// Returns toolset names (without .json extension), sorted
pub fn list_toolsets() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = COMPASS_ASSETS
        .get_dir("toolset")
        .map(|dir| {
            dir.files()
                .filter_map(|file| {
                    let name = file.path().file_name()?.to_str()?;
                    name.strip_suffix(".json")
                })
                .collect()
        })
        .unwrap_or_default();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_toolsets_present() {
        assert_eq!(
            list_toolsets(),
            vec!["enriched_data", "metric_model", "pull_request"]
        );
    }

    #[test]
    fn test_get_file() {
        let content = get_file("toolset/pull_request.json").expect("bundled");
        assert!(content.contains("get_pull_requests"));
        assert!(get_file("toolset/missing.json").is_none());
    }
}
