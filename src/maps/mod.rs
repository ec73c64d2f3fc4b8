//! Mapping-service access: the Google Distance Matrix client and the
//! `DistanceLookup` seam the distance tool is written against.

mod client;
mod error;
mod types;

use async_trait::async_trait;

pub use client::{estimate_from_response, DistanceMatrixClient};
pub use error::MapsError;
pub use types::{DistanceMatrixResponse, TravelEstimate};

/// Driving distance lookup between two free-text places.
#[async_trait]
pub trait DistanceLookup: Send + Sync {
    async fn distance(&self, origin: &str, destination: &str) -> Result<TravelEstimate, MapsError>;
}
