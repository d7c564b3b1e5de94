use anyhow::{bail, Context, Result};
use std::env;

use crate::model::{LogisticPipeline, SharedPredictor};

pub const DEFAULT_MODEL_PATH: &str = "models/ipl_win_predictor.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Logistic,
    Torch,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub backend: Backend,
    pub model_path: String,
    /// TorchScript backend only.
    pub meta_path: Option<String>,
    pub port: u16,
    pub log_features: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| env::var(k).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let backend = match get("MODEL_BACKEND").as_deref() {
            None | Some("logistic") => Backend::Logistic,
            Some("torch") => Backend::Torch,
            Some(other) => bail!("unknown MODEL_BACKEND {:?} (expected logistic or torch)", other),
        };
        let port = match get("PORT") {
            Some(p) => p.parse().with_context(|| format!("invalid PORT {:?}", p))?,
            None => 8080,
        };
        let meta_path = get("META_PATH");
        if backend == Backend::Torch && meta_path.is_none() {
            bail!("META_PATH must be set for the torch backend");
        }

        Ok(Self {
            backend,
            model_path: get("MODEL_PATH").unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string()),
            meta_path,
            port,
            log_features: get("LOG_FEATURES").as_deref() == Some("1"),
        })
    }

    pub fn load_predictor(&self) -> Result<SharedPredictor> {
        match self.backend {
            Backend::Logistic => Ok(std::sync::Arc::new(LogisticPipeline::load(&self.model_path)?)),
            Backend::Torch => self.load_torch(),
        }
    }

    #[cfg(feature = "torch")]
    fn load_torch(&self) -> Result<SharedPredictor> {
        let meta = self.meta_path.as_deref().context("META_PATH not set")?;
        Ok(std::sync::Arc::new(crate::torch_model::TorchPipeline::load(
            &self.model_path,
            meta,
        )?))
    }

    #[cfg(not(feature = "torch"))]
    fn load_torch(&self) -> Result<SharedPredictor> {
        bail!("torch backend requested but built without the `torch` feature")
    }
}
