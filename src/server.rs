use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::error::PredictError;
use crate::roster::{City, Team};
use crate::service::WinPredictorService;
use crate::types::{ErrorResponse, HealthResponse, PredictRequest, PredictResponse, RosterResponse};

// ---------- Server state ----------

#[derive(Clone)]
pub struct AppState {
    pub service: WinPredictorService,
    /// Log each derived feature record.
    pub log_features: bool,
}

// ---------- Errors ----------

/// Every failure leaves as an `ErrorResponse` JSON body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    message: String,
}

impl From<PredictError> for ApiError {
    fn from(e: PredictError) -> Self {
        let (status, error) = match &e {
            PredictError::Validation(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            PredictError::Prediction(_) => (StatusCode::INTERNAL_SERVER_ERROR, "prediction_failed"),
        };
        Self {
            status,
            error,
            message: e.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            error: "invalid_request",
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.error,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

// ---------- Handlers ----------

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model: state.service.model_name().to_string(),
    })
}

async fn roster() -> Json<RosterResponse> {
    Json(RosterResponse {
        teams: Team::sorted(),
        cities: City::sorted(),
    })
}

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::info!("rejected request body: {}", e.body_text());
        ApiError::from(e)
    })?;

    let (features, probability) = state.service.predict_with_features(&req).map_err(|e| {
        if e.is_validation() {
            tracing::info!("rejected match state: {}", e);
        } else {
            tracing::error!("{}", e);
        }
        ApiError::from(e)
    })?;

    if state.log_features {
        tracing::info!(
            "features batting={} bowling={} city={} runs_left={} balls_left={} wickets={} target={} crr={:.3} rrr={:.3}",
            features.batting_team,
            features.bowling_team,
            features.city,
            features.runs_left,
            features.balls_left,
            features.wickets,
            features.total_runs_x,
            features.crr,
            features.rrr
        );
    }

    Ok(Json(PredictResponse {
        probability,
        features,
    }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/roster", get(roster))
        .route("/predict", post(predict))
        .with_state(state)
}
