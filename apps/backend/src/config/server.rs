use super::{parse_or, ConfigError, ConfigSource, GameConfig};
use crate::ai::PredictorConfig;

/// Everything the binary needs to boot.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Hand-detector endpoint. `None` runs without gesture recognition.
    pub classifier_url: Option<String>,
    /// Browser origins allowed by CORS. Empty means localhost only.
    pub cors_allowed_origins: Vec<String>,
    pub game: GameConfig,
    pub predictor: PredictorConfig,
}

impl ServerConfig {
    pub fn from_source<S: ConfigSource + ?Sized>(source: &S) -> Result<Self, ConfigError> {
        let predictor = match source.get("PREDICTOR_CONFIG") {
            Some(raw) => PredictorConfig::from_json(&raw)?,
            None => {
                let config = PredictorConfig {
                    seed: source
                        .get("PREDICTOR_SEED")
                        .map(|raw| {
                            raw.trim().parse::<u64>().map_err(|err| ConfigError::Invalid {
                                key: "PREDICTOR_SEED",
                                detail: format!("{err}"),
                            })
                        })
                        .transpose()?,
                    ..PredictorConfig::default()
                };
                config.validate()?;
                config
            }
        };

        Ok(Self {
            host: source
                .get("BACKEND_HOST")
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(source, "BACKEND_PORT", 3001)?,
            classifier_url: source.get("CLASSIFIER_URL"),
            cors_allowed_origins: source
                .get("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
            game: GameConfig::from_source(source)?,
            predictor,
        })
    }
}

/// Comma-separated origins; blanks, `null` and non-http(s) entries are dropped.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}
