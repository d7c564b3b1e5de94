use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{fs, path::Path, sync::Arc};

use crate::encoder::OneHotLayout;
use crate::features::{FeatureRecord, FEATURE_NAMES};

/// Anything that can turn a feature record into win/loss probabilities.
pub trait WinPredictor: Send + Sync {
    /// Returns `(p_loss, p_win)` from the batting side's point of view.
    /// The pair is expected, but not checked, to sum to 1.
    fn predict_probability(&self, rec: &FeatureRecord) -> Result<(f64, f64)>;

    fn name(&self) -> &str;
}

pub type SharedPredictor = Arc<dyn WinPredictor>;

/// Checks an artifact's column list against the columns we produce.
pub(crate) fn check_feature_names(feat_list: &[String]) -> Result<()> {
    if feat_list.len() != FEATURE_NAMES.len()
        || feat_list.iter().zip(FEATURE_NAMES).any(|(a, b)| a != b)
    {
        bail!(
            "artifact feature list {:?} does not match expected {:?}",
            feat_list,
            FEATURE_NAMES
        );
    }
    Ok(())
}

#[derive(Deserialize)]
struct LogisticJson {
    feature_names: Vec<String>,
    encoder: OneHotLayout,
    coefficients: Vec<f64>,
    intercept: f64,
}

/// One-hot encoder followed by a binary logistic regression.
#[derive(Debug)]
pub struct LogisticPipeline {
    encoder: OneHotLayout,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticPipeline {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path)
            .with_context(|| format!("failed to read model artifact at {}", path.display()))?;
        Self::from_json(&txt)
            .with_context(|| format!("failed to load model artifact {}", path.display()))
    }

    pub fn from_json(txt: &str) -> Result<Self> {
        let raw: LogisticJson =
            serde_json::from_str(txt).context("failed to parse logistic artifact")?;
        check_feature_names(&raw.feature_names)?;

        let width = raw.encoder.width();
        if raw.coefficients.len() != width {
            bail!(
                "coefficient count {} does not match encoded width {}",
                raw.coefficients.len(),
                width
            );
        }
        if !raw.intercept.is_finite() || raw.coefficients.iter().any(|c| !c.is_finite()) {
            bail!("artifact contains non-finite parameters");
        }

        Ok(Self {
            encoder: raw.encoder,
            coefficients: raw.coefficients,
            intercept: raw.intercept,
        })
    }
}

impl WinPredictor for LogisticPipeline {
    fn predict_probability(&self, rec: &FeatureRecord) -> Result<(f64, f64)> {
        let x = self.encoder.encode(rec)?;
        let z: f64 = self
            .coefficients
            .iter()
            .zip(&x)
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.intercept;
        let p_win = 1.0 / (1.0 + (-z).exp());
        Ok((1.0 - p_win, p_win))
    }

    fn name(&self) -> &str {
        "logistic"
    }
}
