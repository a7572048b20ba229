//! Pull request metadata tool (token may be passed per call)

use crate::server::metadata::types::{PullRequestArgs, ToolMetadata, build_schema};

pub fn pull_request_tools() -> Vec<ToolMetadata> {
    vec![ToolMetadata {
        name: "get_pull_requests",
        category: "pull_request",
        endpoint: "api/v2/metadata/pullRequests",
        description: "Fetch pull request metadata for a repository from the Compass API. Uses the access_token argument when given, otherwise the GITEE_ACCESS_TOKEN environment variable. Returns the pull request data as a JSON string, or an error object if the request fails.",
        schema: build_schema::<PullRequestArgs>(),
        accepts_token_override: true,
    }]
}
