//! Agent module - the "tools in a loop" runtime behind the HTTP endpoint.
//!
//! 1. Build context with the agent instructions and the user query
//! 2. Call the LLM with the available tools
//! 3. If the LLM requests tool calls, execute them and feed the results back
//! 4. Repeat until the LLM produces a final answer or the turn limit is hit

mod agent_loop;
mod prompt;

pub use agent_loop::{Agent, LogEntryType, RunLogEntry, RunResult};
pub use prompt::{build_system_prompt, AGENT_NAME};
