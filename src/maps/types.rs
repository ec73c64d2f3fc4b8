use serde::Deserialize;

/// Distance Matrix response body. Only the fields we read are modeled;
/// everything is defaulted so shape problems surface as `MalformedResponse`
/// instead of decode errors.
#[derive(Deserialize, Debug, Default)]
pub struct DistanceMatrixResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

#[derive(Deserialize, Debug, Default)]
pub struct MatrixRow {
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

#[derive(Deserialize, Debug, Default)]
pub struct MatrixElement {
    #[serde(default)]
    pub status: String,
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
}

#[derive(Deserialize, Debug)]
pub struct TextValue {
    pub text: String,
}

/// Distance and duration for one origin/destination pair, as display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelEstimate {
    pub distance: String,
    pub duration: String,
}
