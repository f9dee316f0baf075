use std::time::Duration;

use super::{parse_or, ConfigError, ConfigSource};

/// Round pacing and the win condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Score that ends the game.
    pub win_threshold: u32,
    /// Countdown starts here and runs down to 0.
    pub countdown_from: u32,
    /// Pause after each countdown value.
    pub tick: Duration,
    /// Back-off after a round fails with a processing error.
    pub error_cooldown: Duration,
}

impl GameConfig {
    pub const DEFAULT_WIN_THRESHOLD: u32 = 5;
    pub const DEFAULT_COUNTDOWN_FROM: u32 = 3;
    pub const DEFAULT_TICK_MS: u64 = 1000;
    pub const DEFAULT_ERROR_COOLDOWN_MS: u64 = 3000;

    pub fn from_source<S: ConfigSource + ?Sized>(source: &S) -> Result<Self, ConfigError> {
        let config = Self {
            win_threshold: parse_or(source, "GAME_WIN_THRESHOLD", Self::DEFAULT_WIN_THRESHOLD)?,
            countdown_from: parse_or(
                source,
                "GAME_COUNTDOWN_FROM",
                Self::DEFAULT_COUNTDOWN_FROM,
            )?,
            tick: Duration::from_millis(parse_or(source, "GAME_TICK_MS", Self::DEFAULT_TICK_MS)?),
            error_cooldown: Duration::from_millis(parse_or(
                source,
                "GAME_ERROR_COOLDOWN_MS",
                Self::DEFAULT_ERROR_COOLDOWN_MS,
            )?),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_threshold == 0 {
            return Err(ConfigError::Invalid {
                key: "GAME_WIN_THRESHOLD",
                detail: "must be at least 1".to_string(),
            });
        }
        if self.tick.is_zero() {
            return Err(ConfigError::Invalid {
                key: "GAME_TICK_MS",
                detail: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Fast pacing for tests and local demos.
    pub fn quick(tick: Duration) -> Self {
        Self {
            tick,
            error_cooldown: tick * 3,
            ..Self::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win_threshold: Self::DEFAULT_WIN_THRESHOLD,
            countdown_from: Self::DEFAULT_COUNTDOWN_FROM,
            tick: Duration::from_millis(Self::DEFAULT_TICK_MS),
            error_cooldown: Duration::from_millis(Self::DEFAULT_ERROR_COOLDOWN_MS),
        }
    }
}
