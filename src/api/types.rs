//! API request and response types.

use serde::{Deserialize, Serialize};

/// Body of `POST /calculate-distance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceQuery {
    /// Free-text question, e.g. "distance between Paris and Berlin"
    pub query: String,
}

/// Successful answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceResponse {
    /// The agent's final answer
    pub response: String,
}

/// Error body for any failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
