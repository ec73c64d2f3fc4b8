use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapsError {
    #[error("Must provide API key (set GOOGLE_MAPS_API_KEY)")]
    MissingApiKey,

    // Built with the URL stripped: the query string carries the API key.
    #[error("Request failed: {0}")]
    Request(reqwest::Error),

    // Top-level status other than OK, e.g. REQUEST_DENIED or OVER_QUERY_LIMIT
    #[error("{status} ({message})")]
    Api { status: String, message: String },

    // The request succeeded but the element carries no route
    #[error("No route found ({status})")]
    NoRoute { status: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl MapsError {
    pub fn request(e: reqwest::Error) -> Self {
        MapsError::Request(e.without_url())
    }

    /// Whether the provider answered normally but found nothing to route.
    pub fn is_no_route(&self) -> bool {
        matches!(self, MapsError::NoRoute { .. })
    }
}
