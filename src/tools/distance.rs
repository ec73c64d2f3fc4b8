//! Driving distance tool backed by the Distance Matrix lookup.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use super::Tool;
use crate::maps::{DistanceLookup, MapsError};

/// Successful lookup, flattened for the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistanceResult {
    pub distance: String,
    pub duration: String,
    pub origin: String,
    pub destination: String,
}

/// Result of one tool invocation. Failures are values, never propagated.
#[derive(Debug)]
pub enum DistanceOutcome {
    Success(DistanceResult),
    Failure(MapsError),
}

impl DistanceOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DistanceOutcome::Success(_))
    }

    /// Text reported to the model for a failed lookup.
    pub fn error_message(&self) -> Option<String> {
        match self {
            DistanceOutcome::Success(_) => None,
            DistanceOutcome::Failure(e) => Some(format!("Error calculating distance: {}", e)),
        }
    }
}

/// Serializes to either `{distance, duration, origin, destination}` or `{error}`.
impl Serialize for DistanceOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct ErrorRecord {
            error: String,
        }

        match self {
            DistanceOutcome::Success(result) => result.serialize(serializer),
            DistanceOutcome::Failure(_) => ErrorRecord {
                error: self.error_message().unwrap_or_default(),
            }
            .serialize(serializer),
        }
    }
}

/// Look up the driving distance between two places.
pub async fn calculate_distance(
    lookup: &dyn DistanceLookup,
    origin: &str,
    destination: &str,
) -> DistanceOutcome {
    match lookup.distance(origin, destination).await {
        Ok(estimate) => DistanceOutcome::Success(DistanceResult {
            distance: estimate.distance,
            duration: estimate.duration,
            origin: origin.to_string(),
            destination: destination.to_string(),
        }),
        Err(e) => {
            if e.is_no_route() {
                tracing::info!("No route between \"{}\" and \"{}\": {}", origin, destination, e);
            } else {
                tracing::warn!(
                    "Distance lookup failed for \"{}\" -> \"{}\": {}",
                    origin,
                    destination,
                    e
                );
            }
            DistanceOutcome::Failure(e)
        }
    }
}

/// The `calculate_distance` tool exposed to the agent.
pub struct CalculateDistance {
    lookup: Arc<dyn DistanceLookup>,
}

impl CalculateDistance {
    pub fn new(lookup: Arc<dyn DistanceLookup>) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl Tool for CalculateDistance {
    fn name(&self) -> &str {
        "calculate_distance"
    }

    fn description(&self) -> &str {
        "Calculate the distance between two places using Google Maps."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "origin": {
                    "type": "string",
                    "description": "Starting place, e.g. a city name or address"
                },
                "destination": {
                    "type": "string",
                    "description": "Destination place, e.g. a city name or address"
                }
            },
            "required": ["origin", "destination"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let (origin, destination) = match (args["origin"].as_str(), args["destination"].as_str()) {
            (Some(o), Some(d)) => (o, d),
            _ => {
                return Ok(json!({
                    "error": "Error calculating distance: 'origin' and 'destination' must be strings"
                })
                .to_string())
            }
        };

        let outcome = calculate_distance(self.lookup.as_ref(), origin, destination).await;
        Ok(serde_json::to_string(&outcome)?)
    }
}
