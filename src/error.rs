use thiserror::Error;

/// Input rejected before the model is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("overs must be greater than 0 to compute current run rate")]
    ZeroOvers,
    #[error("balls left cannot be zero or negative")]
    NoBallsRemaining,
    #[error("wickets remaining is negative")]
    NegativeWickets,
    #[error("batting and bowling team must be different")]
    SameTeam,
    #[error("target must be at least 1")]
    InvalidTarget,
}

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("prediction failed: {0}")]
    Prediction(String),
}

impl PredictError {
    pub fn is_validation(&self) -> bool {
        matches!(self, PredictError::Validation(_))
    }
}
