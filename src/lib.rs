//! IPL second-innings win predictor: match state in, labelled win
//! percentages out.

pub mod config;
pub mod encoder;
pub mod error;
pub mod features;
pub mod model;
pub mod roster;
pub mod server;
pub mod service;
#[cfg(feature = "torch")]
pub mod torch_model;
pub mod types;

pub use error::{PredictError, ValidationError};
pub use features::{derive_features, FeatureRecord, MatchState};
pub use model::{LogisticPipeline, SharedPredictor, WinPredictor};
pub use roster::{City, Team};
pub use service::{WinPredictorService, WinProbability};
