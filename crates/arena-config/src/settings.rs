//! Configuration structures.

use serde::{Deserialize, Serialize};

use arena_core::error::{ArenaError, ArenaResult};
use arena_core::types::StrategyKind;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub feed: FeedSettings,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default = "default_models")]
    pub models: Vec<ModelSpec>,
}

impl AppConfig {
    pub fn validate(&self) -> ArenaResult<()> {
        if self.models.is_empty() {
            return Err(ArenaError::Config("at least one model required".into()));
        }
        let mut names: Vec<&str> = self.models.iter().map(|m| m.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        if names.len() != self.models.len() {
            return Err(ArenaError::Config("model names must be unique".into()));
        }
        if self.engine.initial_capital <= 0.0 {
            return Err(ArenaError::Config(
                "initial capital must be positive".into(),
            ));
        }
        if self.engine.tick_interval_ms == 0 {
            return Err(ArenaError::Config(
                "tick interval must be greater than 0".into(),
            ));
        }
        if self.engine.history_capacity == 0 {
            return Err(ArenaError::Config(
                "history capacity must be greater than 0".into(),
            ));
        }
        if self.feed.interval_secs == 0 {
            return Err(ArenaError::Config(
                "feed interval must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "arena".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Quote feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSettings {
    pub base_url: String,
    /// Name of the environment variable holding the provider API key.
    pub api_key_env: String,
    pub interval_secs: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            base_url: "https://openapiv1.coinstats.app".to_string(),
            api_key_env: "COINSTATS_API_KEY".to_string(),
            interval_secs: 60,
        }
    }
}

/// Simulation engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    pub tick_interval_ms: u64,
    pub initial_capital: f64,
    pub history_capacity: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 5_000,
            initial_capital: 10_000.0,
            history_capacity: 100,
        }
    }
}

/// One simulated model: a display name bound to a strategy kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSpec {
    pub name: String,
    pub strategy: StrategyKind,
}

fn default_models() -> Vec<ModelSpec> {
    let lineup = [
        ("GPT 5", StrategyKind::Momentum),
        ("CLAUDE SONNET 4.5", StrategyKind::Conservative),
        ("GEMINI 2.5 PRO", StrategyKind::Balanced),
        ("GROK 4", StrategyKind::Reactive),
        ("DEEPSEEK CHAT V3.1", StrategyKind::Swing),
        ("QWEN3 MAX", StrategyKind::Experimental),
    ];
    lineup
        .into_iter()
        .map(|(name, strategy)| ModelSpec {
            name: name.to_string(),
            strategy,
        })
        .collect()
}
