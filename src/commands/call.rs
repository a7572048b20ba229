use anyhow::Result;
use serde_json::{Map, Value, json};

use crate::server::CompassServer;
use crate::server::metadata::all_tool_metadata;

/// Query arguments for a one-shot `call`.
#[derive(Debug, Clone)]
pub struct CallArgs {
    pub label: String,
    pub begin_date: String,
    pub end_date: String,
    pub page: i64,
    pub size: i64,
    pub direction: String,
    pub token: Option<String>,
}

impl CallArgs {
    /// Tool arguments as the MCP client would send them.
    fn into_arguments(self) -> Map<String, Value> {
        let mut arguments = Map::new();
        arguments.insert("label".into(), json!(self.label));
        arguments.insert("begin_date".into(), json!(self.begin_date));
        arguments.insert("end_date".into(), json!(self.end_date));
        arguments.insert("page".into(), json!(self.page));
        arguments.insert("size".into(), json!(self.size));
        arguments.insert("direction".into(), json!(self.direction));
        if let Some(token) = self.token {
            arguments.insert("access_token".into(), json!(token));
        }
        arguments
    }
}

/// Run one tool outside of any MCP session and print its result to stdout.
///
/// Handy for checking connectivity and credentials against the upstream API.
pub async fn handle_call(server: &CompassServer, tool: &str, args: CallArgs) -> Result<()> {
    let accepts_token = all_tool_metadata()
        .iter()
        .any(|meta| meta.name == tool && meta.accepts_token_override);
    if args.token.is_some() && !accepts_token {
        log::warn!("--token is ignored by '{tool}'; it uses the configured access token");
    }

    let result = server
        .dispatch(tool, Some(args.into_arguments()))
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.message))?;

    println!("{result}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments_include_token_only_when_given() {
        let args = CallArgs {
            label: "https://github.com/a/b".into(),
            begin_date: "2023-01-01".into(),
            end_date: "2023-12-31".into(),
            page: 2,
            size: 50,
            direction: "asc".into(),
            token: None,
        };
        let arguments = args.clone().into_arguments();
        assert!(!arguments.contains_key("access_token"));
        assert_eq!(arguments["page"], 2);
        assert_eq!(arguments["direction"], "asc");

        let arguments = CallArgs {
            token: Some("tok".into()),
            ..args
        }
        .into_arguments();
        assert_eq!(arguments["access_token"], "tok");
    }
}
