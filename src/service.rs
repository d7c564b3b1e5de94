//! Validation, inference and labelling for one prediction request.

use serde::Serialize;
use std::fmt;

use crate::error::PredictError;
use crate::features::{derive_features, FeatureRecord, MatchState};
use crate::model::SharedPredictor;
use crate::roster::Team;

/// Win chances labelled with team names, in whole percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinProbability {
    pub batting_team: Team,
    pub batting_win_pct: u8,
    pub bowling_team: Team,
    pub bowling_win_pct: u8,
}

impl fmt::Display for WinProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Win Probability: {}%", self.batting_team, self.batting_win_pct)?;
        write!(f, "{} Win Probability: {}%", self.bowling_team, self.bowling_win_pct)
    }
}

/// Probability to whole percent, ties to even.
pub fn to_percent(p: f64) -> u8 {
    if !p.is_finite() {
        return 0;
    }
    (p * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}

#[derive(Clone)]
pub struct WinPredictorService {
    model: SharedPredictor,
}

impl WinPredictorService {
    pub fn new(model: SharedPredictor) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Derive features and run the model. Validation failures never reach
    /// the model; model failures come back as `PredictError::Prediction`.
    pub fn predict(&self, state: &MatchState) -> Result<WinProbability, PredictError> {
        self.predict_with_features(state).map(|(_, probability)| probability)
    }

    /// Like `predict`, also returning the feature record the model saw.
    pub fn predict_with_features(
        &self,
        state: &MatchState,
    ) -> Result<(FeatureRecord, WinProbability), PredictError> {
        let rec = derive_features(state)?;
        let probability = self.predict_features(&rec)?;
        Ok((rec, probability))
    }

    pub fn predict_features(&self, rec: &FeatureRecord) -> Result<WinProbability, PredictError> {
        let (p_loss, p_win) = self
            .model
            .predict_probability(rec)
            .map_err(|e| PredictError::Prediction(format!("{:#}", e)))?;
        if !p_loss.is_finite() || !p_win.is_finite() {
            return Err(PredictError::Prediction(format!(
                "model returned non-finite probabilities ({}, {})",
                p_loss, p_win
            )));
        }

        Ok(WinProbability {
            batting_team: rec.batting_team,
            batting_win_pct: to_percent(p_win),
            bowling_team: rec.bowling_team,
            bowling_win_pct: to_percent(p_loss),
        })
    }

    /// Run the default match state once so a bad artifact fails at startup.
    pub fn warmup(&self) -> Result<WinProbability, PredictError> {
        self.predict(&MatchState::default())
    }
}
