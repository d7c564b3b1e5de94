//! Match state -> model feature record.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::roster::{City, Team};

/// Balls in a T20 innings.
pub const INNINGS_BALLS: i32 = 120;

/// Wickets available to the batting side.
pub const TOTAL_WICKETS: i32 = 10;

/// Column names in model input order.
pub const FEATURE_NAMES: [&str; 9] = [
    "batting_team",
    "bowling_team",
    "city",
    "runs_left",
    "balls_left",
    "wickets",
    "total_runs_x",
    "crr",
    "rrr",
];

/// Categorical columns, a prefix of `FEATURE_NAMES`.
pub const CATEGORICAL_FEATURES: [&str; 3] = ["batting_team", "bowling_team", "city"];

/// Numeric columns, the remainder of `FEATURE_NAMES`.
pub const NUMERIC_FEATURES: [&str; 6] = [
    "runs_left",
    "balls_left",
    "wickets",
    "total_runs_x",
    "crr",
    "rrr",
];

/// Live second-innings state as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub batting_team: Team,
    pub bowling_team: Team,
    pub city: City,
    pub target: u32,
    pub current_score: u32,
    pub overs_completed: f64,
    pub wickets_fallen: u32,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            batting_team: Team::MumbaiIndians,
            bowling_team: Team::ChennaiSuperKings,
            city: City::Mumbai,
            target: 150,
            current_score: 50,
            overs_completed: 5.0,
            wickets_fallen: 2,
        }
    }
}

/// Feature row handed to the predictor. Field names match `FEATURE_NAMES`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub batting_team: Team,
    pub bowling_team: Team,
    pub city: City,
    pub runs_left: i64,
    pub balls_left: i32,
    pub wickets: i32,
    pub total_runs_x: u32,
    pub crr: f64,
    pub rrr: f64,
}

impl FeatureRecord {
    /// Categorical values in `CATEGORICAL_FEATURES` order.
    pub fn categorical(&self) -> [&'static str; 3] {
        [
            self.batting_team.name(),
            self.bowling_team.name(),
            self.city.name(),
        ]
    }

    /// Numeric values in `NUMERIC_FEATURES` order.
    pub fn numeric(&self) -> [f64; 6] {
        [
            self.runs_left as f64,
            self.balls_left as f64,
            self.wickets as f64,
            self.total_runs_x as f64,
            self.crr,
            self.rrr,
        ]
    }
}

/// Validate a match state and derive the model's feature row.
///
/// Deterministic; the only failures are the checks below, which run before
/// any value is handed on.
pub fn derive_features(state: &MatchState) -> Result<FeatureRecord, ValidationError> {
    if state.batting_team == state.bowling_team {
        return Err(ValidationError::SameTeam);
    }
    if state.target == 0 {
        return Err(ValidationError::InvalidTarget);
    }
    // Negated so NaN is rejected too.
    if !(state.overs_completed > 0.0) {
        return Err(ValidationError::ZeroOvers);
    }

    let runs_left = i64::from(state.target) - i64::from(state.current_score);

    let balls_bowled = (state.overs_completed * 6.0).floor();
    let balls_left = if balls_bowled >= f64::from(INNINGS_BALLS) {
        0
    } else {
        INNINGS_BALLS - balls_bowled as i32
    };
    if balls_left <= 0 {
        return Err(ValidationError::NoBallsRemaining);
    }

    let wickets = i64::from(TOTAL_WICKETS) - i64::from(state.wickets_fallen);
    if wickets < 0 {
        return Err(ValidationError::NegativeWickets);
    }

    let crr = f64::from(state.current_score) / state.overs_completed;
    let rrr = if balls_left > 0 {
        (runs_left as f64 * 6.0) / f64::from(balls_left)
    } else {
        0.0
    };

    Ok(FeatureRecord {
        batting_team: state.batting_team,
        bowling_team: state.bowling_team,
        city: state.city,
        runs_left,
        balls_left,
        wickets: wickets as i32,
        total_runs_x: state.target,
        crr: finite_or_zero(crr),
        rrr: finite_or_zero(rrr),
    })
}

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}
