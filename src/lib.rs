//! # Distance Agent
//!
//! An HTTP service that answers travel-distance questions in natural language.
//!
//! This library provides:
//! - An HTTP API (`POST /calculate-distance`) that forwards a query to the agent
//! - A tool-based agent loop over an OpenAI-compatible chat-completions backend
//! - A `calculate_distance` tool backed by the Google Distance Matrix API
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Receive a query via the API
//! 2. Build context with the agent instructions and available tools
//! 3. Call the LLM, execute any tool calls it requests
//! 4. Feed results back to the LLM, repeat until it answers
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use distance_agent::{agent::Agent, config::Config, maps::DistanceMatrixClient};
//!
//! let config = Config::from_env()?;
//! let maps = Arc::new(DistanceMatrixClient::new(&config.maps));
//! let agent = Agent::from_config(&config, maps);
//! let result = agent.run("How far is Lyon from Marseille?").await?;
//! println!("{}", result.final_output);
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod maps;
pub mod tools;

pub use config::Config;
