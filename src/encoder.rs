//! Dense encoding of a feature record for model inference.

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::features::{FeatureRecord, NUMERIC_FEATURES};

/// One-hot categories per categorical column, as fitted.
#[derive(Debug, Clone, Deserialize)]
pub struct OneHotLayout {
    pub batting_team: Vec<String>,
    pub bowling_team: Vec<String>,
    pub city: Vec<String>,
    /// Drop the first category of every column (reference level).
    #[serde(default)]
    pub drop_first: bool,
}

impl OneHotLayout {
    fn columns(&self) -> [&[String]; 3] {
        [&self.batting_team[..], &self.bowling_team[..], &self.city[..]]
    }

    fn block_width(&self, categories: &[String]) -> usize {
        if self.drop_first {
            categories.len().saturating_sub(1)
        } else {
            categories.len()
        }
    }

    /// Length of the encoded vector: one-hot blocks plus numeric columns.
    pub fn width(&self) -> usize {
        self.columns()
            .iter()
            .map(|c| self.block_width(c))
            .sum::<usize>()
            + NUMERIC_FEATURES.len()
    }

    /// Encode a record. Unknown categories are an error, not a zero block.
    pub fn encode(&self, rec: &FeatureRecord) -> Result<Vec<f64>> {
        let mut out = Vec::with_capacity(self.width());

        for (categories, value) in self.columns().iter().zip(rec.categorical()) {
            let Some(idx) = categories.iter().position(|c| c == value) else {
                bail!("category {:?} not seen during fitting", value);
            };
            let start = out.len();
            out.resize(start + self.block_width(categories), 0.0);
            let slot = if self.drop_first { idx.checked_sub(1) } else { Some(idx) };
            if let Some(slot) = slot {
                out[start + slot] = 1.0;
            }
        }

        out.extend_from_slice(&rec.numeric());
        Ok(out)
    }
}
