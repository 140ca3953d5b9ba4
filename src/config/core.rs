use serde::{Deserialize, Serialize};

use super::thresholds::DetectionSettings;

/// Root configuration structure for claimguard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimguardConfig {
    /// Detection thresholds
    #[serde(default)]
    pub thresholds: DetectionSettings,

    /// Report and export defaults
    #[serde(default)]
    pub output: OutputConfig,

    /// Engine execution options
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report format when `--format` is not given (terminal, markdown, json)
    #[serde(default)]
    pub default_format: Option<String>,

    /// Field delimiter for exports
    #[serde(default)]
    pub delimiter: Option<char>,

    /// Disable colors in terminal reports
    #[serde(default)]
    pub plain: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Run the analyzers on the rayon pool instead of one after another
    #[serde(default)]
    pub parallel: bool,
}

/// On-disk shape before thresholds are coerced.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawConfig {
    #[serde(default)]
    pub thresholds: Option<toml::Value>,
    #[serde(default)]
    pub output: Option<OutputConfig>,
    #[serde(default)]
    pub engine: Option<EngineConfig>,
}
