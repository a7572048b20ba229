//! Metric model tools: contributor personas, activity and collaboration scores

use crate::server::metadata::types::{MetricArgs, ToolMetadata, build_schema};

pub fn metric_model_tools() -> Vec<ToolMetadata> {
    vec![
        ToolMetadata {
            name: "get_contributor_milestone_persona",
            category: "metric_model",
            endpoint: "api/v2/metricModel/contributorMilestonePersona",
            description: "Get the contributor milestone persona of a project. Classifies contributors as casual, regular or core according to their long-term participation. Returns the persona data as a JSON string.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
        ToolMetadata {
            name: "get_contributor_role_persona",
            category: "metric_model",
            endpoint: "api/v2/metricModel/contributorRolePersona",
            description: "Get the contributor role persona of a project. Distinguishes organization contributors from individual contributors. Returns the persona data as a JSON string.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
        ToolMetadata {
            name: "get_contributor_domain_persona",
            category: "metric_model",
            endpoint: "api/v2/metricModel/contributorDomainPersona",
            description: "Get the contributor domain persona of a project. Groups contributors by contribution area such as code, issues and documentation. Returns the persona data as a JSON string.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
        ToolMetadata {
            name: "get_organizations_activity",
            category: "metric_model",
            endpoint: "api/v2/metricModel/organizationsActivity",
            description: "Get organization activity for a project. Analyzes contributions coming from different companies and institutions. Returns the activity data as a JSON string.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
        ToolMetadata {
            name: "get_project_activity",
            category: "metric_model",
            endpoint: "api/v2/metricModel/activity",
            description: "Get the overall activity metrics of a project: contributor count, commit frequency, PR and issue comment activity. Returns the activity score and related metrics as a JSON string.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
        ToolMetadata {
            name: "get_community_service_and_support",
            category: "metric_model",
            endpoint: "api/v2/metricModel/communityServiceAndSupport",
            description: "Get community service and support metrics of a project. Analyzes issue and PR response times and handling efficiency. Returns the metrics as a JSON string.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
        ToolMetadata {
            name: "get_collaboration_development_index",
            category: "metric_model",
            endpoint: "api/v2/metricModel/collaborationDevelopmentIndex",
            description: "Get the collaboration development index of a project. Measures code review, merge rate and PR/issue linkage. Returns the index as a JSON string.",
            schema: build_schema::<MetricArgs>(),
            accepts_token_override: false,
        },
    ]
}
