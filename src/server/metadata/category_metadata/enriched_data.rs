//! Enriched data tools: per-event search over forks, issues, commits, releases, stars and watches

use crate::server::metadata::types::{MetricArgs, ToolMetadata, build_schema};

pub fn enriched_data_tools() -> Vec<ToolMetadata> {
    vec![
        ToolMetadata {
            name: "get_fork_enriched_data",
            category: "enriched_data",
            endpoint: "api/v2/fork/search",
            description: "Get fork enriched data for a GitHub/Gitee repository: who forked the repository and when.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
        ToolMetadata {
            name: "get_pull_event_enriched_data",
            category: "enriched_data",
            endpoint: "api/v2/pull_event/search",
            description: "Get pull request event enriched data: merge, close, comment and other events on pull requests.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
        ToolMetadata {
            name: "get_git_commit_enriched_data",
            category: "enriched_data",
            endpoint: "api/v2/git/search",
            description: "Get git commit enriched data: author, committer and lines added/removed for every commit.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
        ToolMetadata {
            name: "get_issue_enriched_data",
            category: "enriched_data",
            endpoint: "api/v2/issue/search",
            description: "Get issue enriched data: issue creation, state changes and assignees.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
        ToolMetadata {
            name: "get_pull_request_enriched_data",
            category: "enriched_data",
            endpoint: "api/v2/metadata/pullRequests",
            description: "Get pull request enriched data: creator, merger, state and labels of every pull request.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
        ToolMetadata {
            name: "get_repo_enriched_data",
            category: "enriched_data",
            endpoint: "api/v2/repo/search",
            description: "Get repository enriched data: star, fork and subscriber counts and release history.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
        ToolMetadata {
            name: "get_stargazer_enriched_data",
            category: "enriched_data",
            endpoint: "api/v2/stargazer/search",
            description: "Get stargazer enriched data: who starred the repository and when.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
        ToolMetadata {
            name: "get_watch_enriched_data",
            category: "enriched_data",
            endpoint: "api/v2/watch/search",
            description: "Get watch enriched data: who watches the repository and since when.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
        ToolMetadata {
            name: "get_releases_enriched_data",
            category: "enriched_data",
            endpoint: "api/v2/releases/search",
            description: "Get releases enriched data: the detailed list of every published release.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
        ToolMetadata {
            name: "get_github_event_data",
            category: "enriched_data",
            endpoint: "api/v2/event/search",
            description: "Get raw GitHub event data, including PushEvent, CreateEvent and other event types.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
        ToolMetadata {
            name: "get_github_repo_event_data",
            category: "enriched_data",
            endpoint: "api/v2/repo_event/search",
            description: "Get repository-level GitHub event aggregates: push, PR and issue contributions per period.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
    ]
}
