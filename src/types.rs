use serde::Serialize;

use crate::features::FeatureRecord;
use crate::roster::{City, Team};
use crate::service::WinProbability;

/// Request body for `/predict` is `features::MatchState` as-is.
pub use crate::features::MatchState as PredictRequest;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    #[serde(flatten)]
    pub probability: WinProbability,
    pub features: FeatureRecord,
}

#[derive(Debug, Serialize)]
pub struct RosterResponse {
    pub teams: Vec<Team>,
    pub cities: Vec<City>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}
