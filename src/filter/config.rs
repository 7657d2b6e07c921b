use crate::foundation::error::{FrameliftError, FrameliftResult};

/// Selects between the two filter variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityMode {
    /// No de-ringing clamp; plain normalized sampling without aspect
    /// correction or edge inset.
    Fast,
    /// De-ringing clamp after reconstruction plus aspect-ratio-corrected,
    /// edge-inset sampling.
    Accurate,
}

/// Runtime filter configuration, hot-swappable between frames.
///
/// Defaults mirror the tuning the filter ships with: aggressive sharpening
/// and full contrast adaptation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Sharpening blend intensity in `[0, 2]`; 0 leaves the reconstructed
    /// estimate untouched, values above 1 extrapolate.
    pub sharpening: f32,
    /// High-contrast adaptation in `[0, 2]`, clamped to `[0, 1]` where used.
    pub contrast: f32,
    /// Minimum luma gradient treated as an edge. Must be > 0.
    pub edge_threshold: f32,
    /// Weight applied to detected edges in gradient and sharpening passes.
    pub edge_weight: f32,
    /// `false` short-circuits every pixel to the direct letterbox sample.
    pub enhance: bool,
    /// Variant selection, see [`QualityMode`].
    pub quality: QualityMode,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            sharpening: 2.0,
            contrast: 2.0,
            edge_threshold: 0.15,
            edge_weight: 1.2,
            enhance: true,
            quality: QualityMode::Accurate,
        }
    }
}

impl FilterConfig {
    /// Fail fast on values the filter math cannot take.
    pub fn validate(&self) -> FrameliftResult<()> {
        for (name, v) in [
            ("sharpening", self.sharpening),
            ("contrast", self.contrast),
            ("edge_threshold", self.edge_threshold),
            ("edge_weight", self.edge_weight),
        ] {
            if !v.is_finite() {
                return Err(FrameliftError::validation(format!(
                    "config field '{name}' must be finite"
                )));
            }
        }
        if !(0.0..=2.0).contains(&self.sharpening) {
            return Err(FrameliftError::validation("sharpening must be in [0, 2]"));
        }
        if !(0.0..=2.0).contains(&self.contrast) {
            return Err(FrameliftError::validation("contrast must be in [0, 2]"));
        }
        if self.edge_threshold <= 0.0 {
            return Err(FrameliftError::validation("edge_threshold must be > 0"));
        }
        if self.edge_weight <= 0.0 {
            return Err(FrameliftError::validation("edge_weight must be > 0"));
        }
        Ok(())
    }

    /// Build a configuration from loosely-typed parameters.
    ///
    /// `params` must be `null` (all defaults) or an object; unknown keys are
    /// rejected so typos fail loudly.
    pub fn from_params(params: &serde_json::Value) -> FrameliftResult<Self> {
        let mut cfg = Self::default();
        if params.is_null() {
            return Ok(cfg);
        }
        let obj = params
            .as_object()
            .ok_or_else(|| FrameliftError::validation("filter params must be an object"))?;

        for (key, value) in obj {
            match key.as_str() {
                "sharpening" => cfg.sharpening = number_field(key, value)?,
                "contrast" => cfg.contrast = number_field(key, value)?,
                "edge_threshold" => cfg.edge_threshold = number_field(key, value)?,
                "edge_weight" => cfg.edge_weight = number_field(key, value)?,
                "enhance" => {
                    cfg.enhance = value.as_bool().ok_or_else(|| {
                        FrameliftError::validation("'enhance' must be a boolean")
                    })?;
                }
                "quality" => {
                    let s = value.as_str().ok_or_else(|| {
                        FrameliftError::validation("'quality' must be a string")
                    })?;
                    cfg.quality = parse_quality_mode(s)?;
                }
                other => {
                    return Err(FrameliftError::validation(format!(
                        "unknown filter param '{other}'"
                    )));
                }
            }
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

fn number_field(name: &str, value: &serde_json::Value) -> FrameliftResult<f32> {
    let v = value
        .as_f64()
        .ok_or_else(|| FrameliftError::validation(format!("'{name}' must be a number")))?;
    let f = v as f32;
    if !f.is_finite() {
        return Err(FrameliftError::validation(format!(
            "'{name}' must be finite"
        )));
    }
    Ok(f)
}

/// Parse a quality-mode name.
pub fn parse_quality_mode(s: &str) -> FrameliftResult<QualityMode> {
    match s.trim().to_ascii_lowercase().as_str() {
        "fast" | "performance" => Ok(QualityMode::Fast),
        "accurate" | "quality" => Ok(QualityMode::Accurate),
        other => Err(FrameliftError::validation(format!(
            "unknown quality mode '{other}'"
        ))),
    }
}
