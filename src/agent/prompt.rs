//! Instructions for the distance agent.

use crate::tools::ToolRegistry;

pub const AGENT_NAME: &str = "Distance Calculator";

/// Build the system prompt, listing the registered tools.
pub fn build_system_prompt(tools: &ToolRegistry) -> String {
    let tool_descriptions = tools
        .list_tools()
        .iter()
        .map(|t| format!("- **{}**: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a helpful agent that calculates distances between places.
When asked about distance between two places, use the calculate_distance tool.
Provide the results in a clear, friendly manner.

You have access to the following tools:
{tool_descriptions}

If a tool returns an "error" field, tell the user the distance could not be calculated and include the reason."#,
        tool_descriptions = tool_descriptions
    )
}
