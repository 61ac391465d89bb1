use serde::{Deserialize, Serialize};
use std::{fmt::Display, fs, path::Path};

use crate::{frequency::Threshold, ConfigError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub charts: ChartConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Knobs for the text pipeline itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Let the segmenter guess words missing from its dictionary.
    #[serde(default = "default_true")]
    pub use_hmm: bool,
    /// Rows in the most-common table.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Threshold used when a request does not carry one.
    #[serde(default)]
    pub default_min_count: Threshold,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_word_size_range")]
    pub word_size_range: (u32, u32),
    #[serde(default = "default_ranked_limit")]
    pub ranked_limit: usize,
    #[serde(default = "default_pie_limit")]
    pub pie_limit: usize,
    #[serde(default = "default_radar_limit")]
    pub radar_limit: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_true() -> bool {
    true
}

fn default_top_n() -> usize {
    20
}

fn default_width() -> u32 {
    1000
}

fn default_height() -> u32 {
    600
}

fn default_word_size_range() -> (u32, u32) {
    (20, 100)
}

fn default_ranked_limit() -> usize {
    20
}

fn default_pie_limit() -> usize {
    20
}

fn default_radar_limit() -> usize {
    6
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            use_hmm: true,
            top_n: default_top_n(),
            default_min_count: Threshold::default(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: default_width(),
            height: default_height(),
            word_size_range: default_word_size_range(),
            ranked_limit: default_ranked_limit(),
            pie_limit: default_pie_limit(),
            radar_limit: default_radar_limit(),
        }
    }
}

impl ChartConfig {
    /// Rejects settings under which a chart could never draw anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "charts canvas must not be empty, got {}x{}",
                self.width, self.height
            )));
        }
        let limits = [
            ("ranked_limit", self.ranked_limit),
            ("pie_limit", self.pie_limit),
            ("radar_limit", self.radar_limit),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, limit)| *limit == 0) {
            return Err(ConfigError::Invalid(format!("charts.{} must be at least 1", name)));
        }
        let (low, high) = self.word_size_range;
        if low > high {
            return Err(ConfigError::Invalid(format!(
                "charts.word_size_range is reversed: ({}, {})",
                low, high
            )));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Loads a config from a `.json`/`.toml` path, or parses `config` itself
    /// as inline JSON (then TOML when that feature is on). The result is
    /// validated before it is returned.
    pub fn from_config(config: &str) -> Result<AppConfig, ConfigError> {
        let parsed = Self::parse(config)?;
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.charts.validate()
    }

    fn parse(config: &str) -> Result<AppConfig, ConfigError> {
        if Path::new(config).exists() {
            let config_content = fs::read_to_string(config)?;
            if config.ends_with(".json") {
                Ok(serde_json::from_str(&config_content)?)
            } else if config.ends_with(".toml") {
                #[cfg(feature = "toml_config")]
                {
                    Ok(toml::from_str(&config_content)?)
                }
                #[cfg(not(feature = "toml_config"))]
                {
                    Err(ConfigError::TomlNotEnabled)
                }
            } else {
                Err(ConfigError::UnsupportedFormat)
            }
        } else {
            serde_json::from_str(config).or_else(|_| {
                #[cfg(feature = "toml_config")]
                {
                    toml::from_str(config).map_err(|e| e.into())
                }
                #[cfg(not(feature = "toml_config"))]
                {
                    Err(ConfigError::UnsupportedFormat)
                }
            })
        }
    }

    /// `None` means "run with defaults".
    pub fn load(config: Option<&str>) -> Result<AppConfig, ConfigError> {
        match config {
            Some(config) => Self::from_config(config),
            None => Ok(AppConfig::default()),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Display for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => Err(std::fmt::Error),
        }
    }
}
