use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::MarxResult;

#[derive(Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WorkspaceConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Glob patterns for paths to include in workspace traversal. If empty or not specified, all paths are included.
    pub includes: Option<Vec<String>>,
    /// Glob patterns for paths to exclude from workspace traversal.
    pub excludes: Option<Vec<String>>,
}

pub fn parse_workspace_config(yaml_str: &str) -> MarxResult<WorkspaceConfig> {
    let config: WorkspaceConfig = serde_yaml::from_str(yaml_str)?;
    Ok(config)
}
