//! Tools the agent can call, and the registry that dispatches them.

mod distance;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm::{FunctionSchema, ToolSchema};

pub use distance::{calculate_distance, CalculateDistance, DistanceOutcome, DistanceResult};

/// A callable tool.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model uses to call the tool.
    fn name(&self) -> &str;

    /// Description shown to the model.
    fn description(&self) -> &str;

    /// JSON Schema of the tool's arguments.
    fn parameters_schema(&self) -> Value;

    /// Run the tool with already-decoded JSON arguments.
    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Name and description of a registered tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Registry of available tools, keyed by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    pub fn list_tools(&self) -> Vec<ToolInfo> {
        let mut tools: Vec<ToolInfo> = self
            .tools
            .values()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    /// Tool definitions in the chat-completions `tools` format.
    pub fn get_tool_schemas(&self) -> Vec<ToolSchema> {
        let mut names: Vec<&String> = self.tools.keys().collect();
        names.sort();
        names
            .into_iter()
            .map(|name| {
                let tool = &self.tools[name];
                ToolSchema {
                    schema_type: "function".to_string(),
                    function: FunctionSchema {
                        name: tool.name().to_string(),
                        description: tool.description().to_string(),
                        parameters: tool.parameters_schema(),
                    },
                }
            })
            .collect()
    }

    /// Execute a tool by name.
    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;
        tool.execute(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input back."
        }

        fn parameters_schema(&self) -> Value {
            json!({ "type": "object", "properties": { "text": { "type": "string" } } })
        }

        async fn execute(&self, args: Value) -> anyhow::Result<String> {
            Ok(args["text"].as_str().unwrap_or_default().to_string())
        }
    }

    #[tokio::test]
    async fn dispatches_by_name_and_rejects_unknown_tools() {
        let registry = ToolRegistry::new().with_tool(Arc::new(Echo));

        let out = registry
            .execute("echo", json!({ "text": "hello" }))
            .await
            .expect("echo");
        assert_eq!(out, "hello");

        let err = registry.execute("missing", Value::Null).await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: missing");
    }

    #[test]
    fn schemas_use_function_format() {
        let registry = ToolRegistry::new().with_tool(Arc::new(Echo));
        let schemas = registry.get_tool_schemas();
        assert_eq!(schemas.len(), 1);
        let value = serde_json::to_value(&schemas[0]).expect("serialize");
        assert_eq!(value["type"], "function");
        assert_eq!(value["function"]["name"], "echo");
        assert_eq!(value["function"]["parameters"]["type"], "object");
    }
}
