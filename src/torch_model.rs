use anyhow::{bail, Context, Result};
use parking_lot::Mutex;
use serde::Deserialize;
use std::{fs, path::Path};
use tch::{kind::Kind, CModule, Device, Tensor};

use crate::encoder::OneHotLayout;
use crate::features::FeatureRecord;
use crate::model::{check_feature_names, WinPredictor};

#[derive(Deserialize)]
struct MetaJson {
    feat_list: Vec<String>,
    encoder: OneHotLayout,
}

/// Parse meta.json and check its column list; returns the one-hot layout.
fn parse_meta(txt: &str) -> Result<OneHotLayout> {
    let meta: MetaJson = serde_json::from_str(txt).with_context(|| "failed to parse meta.json")?;
    check_feature_names(&meta.feat_list)?;
    Ok(meta.encoder)
}

/// TorchScript classifier with two output logits: [loss, win].
pub struct TorchPipeline {
    model: Mutex<CModule>,
    device: Device,
    encoder: OneHotLayout,
}

impl TorchPipeline {
    pub fn load(model_path: impl AsRef<Path>, meta_path: impl AsRef<Path>) -> Result<Self> {
        let device = Device::Cpu;
        let (model_path, meta_path) = (model_path.as_ref(), meta_path.as_ref());

        // meta.json carries the column list and the one-hot layout
        let meta_txt = fs::read_to_string(meta_path)
            .with_context(|| format!("failed to read meta at {}", meta_path.display()))?;
        let encoder = parse_meta(&meta_txt)?;

        let model = CModule::load_on_device(model_path, device)
            .with_context(|| format!("failed to load TorchScript {}", model_path.display()))?;

        // Probe output shape with a dummy forward; expect [B=1, 2]
        let in_dim = encoder.width() as i64;
        let dummy = Tensor::zeros([1, in_dim], (Kind::Float, device));
        let t = model.forward_ts(&[dummy])?;
        let sz = t.size();
        if sz != [1, 2] {
            bail!("unexpected model output size: {:?}", sz);
        }

        Ok(Self {
            model: Mutex::new(model),
            device,
            encoder,
        })
    }
}

impl WinPredictor for TorchPipeline {
    fn predict_probability(&self, rec: &FeatureRecord) -> Result<(f64, f64)> {
        let x: Vec<f32> = self.encoder.encode(rec)?.into_iter().map(|v| v as f32).collect();
        let input = Tensor::from_slice(&x)
            .reshape([1, x.len() as i64])
            .to_device(self.device);

        let logits = self.model.lock().forward_ts(&[input])?;
        let probs = logits.softmax(-1, Kind::Double);

        let p_loss = probs.double_value(&[0, 0]);
        let p_win = probs.double_value(&[0, 1]);
        Ok((p_loss, p_win))
    }

    fn name(&self) -> &str {
        "torch"
    }
}
