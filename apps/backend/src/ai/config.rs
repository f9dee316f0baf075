//! Predictor configuration.
//!
//! Mirrors the JSON shape accepted in `PREDICTOR_CONFIG`. Every field is
//! optional in the input; missing fields take the defaults below.

use serde::{Deserialize, Serialize};

use crate::ai::pattern_table::MAX_ORDER_CAP;
use crate::config::ConfigError;

pub const DEFAULT_MAX_ORDER: usize = 3;
pub const DEFAULT_SIGNIFICANCE_THRESHOLD: u32 = 2;

/// Tunable constants of the pattern predictor.
///
/// # Example JSON Config
///
/// ```json
/// {"max_order": 4, "significance_threshold": 3, "seed": 12345}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PredictorConfig {
    /// Longest pattern key (K). Keys of every length `1..=max_order` are learned.
    pub max_order: usize,

    /// A pattern is trusted once its total observation count exceeds this value.
    pub significance_threshold: u32,

    /// Probability of ignoring the model and playing uniformly at random.
    ///
    /// Keeps the opponent from being perfectly exploitable. `0.0` disables it.
    pub exploration: f64,

    /// Base RNG seed. Sessions derive their own seed from it, so two sessions
    /// never share a random stream even when the base seed is fixed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl PredictorConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(|err| ConfigError::Invalid {
            key: "PREDICTOR_CONFIG",
            detail: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_order == 0 || self.max_order > MAX_ORDER_CAP {
            return Err(ConfigError::Invalid {
                key: "max_order",
                detail: format!("must be within 1..={MAX_ORDER_CAP}, got {}", self.max_order),
            });
        }
        if !(0.0..=1.0).contains(&self.exploration) {
            return Err(ConfigError::Invalid {
                key: "exploration",
                detail: format!("must be a probability, got {}", self.exploration),
            });
        }
        Ok(())
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            max_order: DEFAULT_MAX_ORDER,
            significance_threshold: DEFAULT_SIGNIFICANCE_THRESHOLD,
            exploration: 0.0,
            seed: None,
        }
    }
}
