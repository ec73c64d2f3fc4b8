use async_trait::async_trait;

use super::error::MapsError;
use super::types::{DistanceMatrixResponse, TravelEstimate};
use super::DistanceLookup;
use crate::config::MapsConfig;

/// Google Distance Matrix client.
///
/// Built once at startup and shared by reference; it holds no mutable state.
pub struct DistanceMatrixClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl DistanceMatrixClient {
    pub fn new(config: &MapsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl DistanceLookup for DistanceMatrixClient {
    async fn distance(&self, origin: &str, destination: &str) -> Result<TravelEstimate, MapsError> {
        let api_key = self.api_key.as_deref().ok_or(MapsError::MissingApiKey)?;
        let url = format!("{}/distancematrix/json", self.base_url);
        tracing::debug!(
            "[MAPS] distance matrix lookup: \"{}\" -> \"{}\"",
            origin,
            destination
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("origins", origin),
                ("destinations", destination),
                ("mode", "driving"),
                ("units", "metric"),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(MapsError::request)?;

        let status = response.status();
        let text = response.text().await.map_err(MapsError::request)?;

        if !status.is_success() {
            tracing::error!(
                "Distance matrix returned non-success status: {}. Body: {}",
                status,
                text
            );
            return Err(MapsError::Api {
                status: format!("HTTP {}", status.as_u16()),
                message: text,
            });
        }

        let body: DistanceMatrixResponse = serde_json::from_str(&text).map_err(|e| {
            tracing::error!("Failed to parse DistanceMatrixResponse: {}. Body: {}", e, text);
            e
        })?;

        estimate_from_response(body)
    }
}

/// Pull the first row/element out of a Distance Matrix response.
pub fn estimate_from_response(body: DistanceMatrixResponse) -> Result<TravelEstimate, MapsError> {
    if body.status != "OK" {
        return Err(MapsError::Api {
            message: body
                .error_message
                .unwrap_or_else(|| "no error message".to_string()),
            status: body.status,
        });
    }

    let element = body
        .rows
        .into_iter()
        .next()
        .ok_or_else(|| MapsError::MalformedResponse("response has no rows".to_string()))?
        .elements
        .into_iter()
        .next()
        .ok_or_else(|| MapsError::MalformedResponse("first row has no elements".to_string()))?;

    if element.status != "OK" {
        return Err(MapsError::NoRoute {
            status: element.status,
        });
    }

    let distance = element
        .distance
        .ok_or_else(|| MapsError::MalformedResponse("element has no distance".to_string()))?;
    let duration = element
        .duration
        .ok_or_else(|| MapsError::MalformedResponse("element has no duration".to_string()))?;

    Ok(TravelEstimate {
        distance: distance.text,
        duration: duration.text,
    })
}
