//! Core agent loop implementation.

use std::sync::Arc;

use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::Config;
use crate::llm::{ChatMessage, LlmClient, OpenAiClient, Role, ToolCall};
use crate::maps::DistanceLookup;
use crate::tools::{CalculateDistance, ToolRegistry};

use super::prompt::{build_system_prompt, AGENT_NAME};

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    /// The agent's final natural-language answer
    pub final_output: String,

    /// Number of LLM turns used
    pub turns: usize,

    /// Tool calls, tool results and the final response, in order
    pub log: Vec<RunLogEntry>,
}

/// A single entry in the run log.
#[derive(Debug, Clone, Serialize)]
pub struct RunLogEntry {
    /// Timestamp (RFC 3339)
    pub timestamp: String,

    pub entry_type: LogEntryType,

    pub content: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogEntryType {
    ToolCall,
    ToolResult,
    Response,
}

/// The distance agent.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    model: String,
    max_turns: usize,
}

impl Agent {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: ToolRegistry,
        model: impl Into<String>,
        max_turns: usize,
    ) -> Self {
        Self {
            llm,
            tools,
            model: model.into(),
            max_turns,
        }
    }

    /// Build the agent from configuration with the given distance lookup
    /// wired into its `calculate_distance` tool.
    pub fn from_config(config: &Config, lookup: Arc<dyn DistanceLookup>) -> Self {
        let llm = Arc::new(OpenAiClient::new(
            config.api_key.clone(),
            &config.llm_base_url,
        ));
        let tools = ToolRegistry::new().with_tool(Arc::new(CalculateDistance::new(lookup)));

        Self::new(llm, tools, config.default_model.clone(), config.max_turns)
    }

    /// Run a query to completion and return the final answer.
    pub async fn run(&self, query: &str) -> anyhow::Result<RunResult> {
        let run_id = Uuid::new_v4();
        self.run_inner(query)
            .instrument(tracing::info_span!("agent_run", agent = AGENT_NAME, %run_id))
            .await
    }

    async fn run_inner(&self, query: &str) -> anyhow::Result<RunResult> {
        let mut log = Vec::new();
        let mut messages = vec![
            ChatMessage::system(build_system_prompt(&self.tools)),
            ChatMessage::user(query),
        ];
        let tool_schemas = self.tools.get_tool_schemas();

        for turn in 0..self.max_turns {
            tracing::debug!("Agent turn {}", turn + 1);

            let response = self
                .llm
                .chat_completion(&self.model, &messages, Some(tool_schemas.as_slice()))
                .await?;

            if let Some(tool_calls) = response.tool_calls.filter(|c| !c.is_empty()) {
                messages.push(ChatMessage {
                    role: Role::Assistant,
                    content: response.content.clone(),
                    tool_calls: Some(tool_calls.clone()),
                    tool_call_id: None,
                });

                for tool_call in &tool_calls {
                    log.push(log_entry(
                        LogEntryType::ToolCall,
                        format!(
                            "Calling tool: {} with args: {}",
                            tool_call.function.name, tool_call.function.arguments
                        ),
                    ));

                    let result_str = match self.execute_tool_call(tool_call).await {
                        Ok(output) => output,
                        Err(e) => format!("Error: {}", e),
                    };
                    tracing::debug!("Tool {} returned: {}", tool_call.function.name, result_str);

                    log.push(log_entry(
                        LogEntryType::ToolResult,
                        truncate_for_log(&result_str, 1000),
                    ));
                    messages.push(ChatMessage::tool_result(tool_call.id.clone(), result_str));
                }

                continue;
            }

            return match response.content.filter(|c| !c.trim().is_empty()) {
                Some(content) => {
                    log.push(log_entry(
                        LogEntryType::Response,
                        truncate_for_log(&content, 2000),
                    ));
                    tracing::info!("Agent finished after {} turn(s)", turn + 1);
                    Ok(RunResult {
                        final_output: content,
                        turns: turn + 1,
                        log,
                    })
                }
                None => Err(anyhow::anyhow!("LLM returned empty response")),
            };
        }

        Err(anyhow::anyhow!("Max turns ({}) exceeded", self.max_turns))
    }

    async fn execute_tool_call(&self, tool_call: &ToolCall) -> anyhow::Result<String> {
        let args: serde_json::Value = if tool_call.function.arguments.trim().is_empty() {
            serde_json::Value::Object(Default::default())
        } else {
            serde_json::from_str(&tool_call.function.arguments)
                .map_err(|e| anyhow::anyhow!("Invalid tool arguments: {}", e))?
        };

        self.tools.execute(&tool_call.function.name, args).await
    }
}

fn log_entry(entry_type: LogEntryType, content: String) -> RunLogEntry {
    RunLogEntry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        entry_type,
        content,
    }
}

/// Truncate a string for logging, respecting char boundaries.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated]", &s[..end])
}
