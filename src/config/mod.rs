//! Configuration for detection runs.
//!
//! Thresholds resolve in layers, later layers winning:
//! built-in defaults, then `.claimguard.toml` (nearest ancestor of the
//! working directory, or an explicit `--config` path), then environment
//! variables and command-line flags.

mod core;
mod loader;
mod thresholds;

pub use self::core::{ClaimguardConfig, EngineConfig, OutputConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from, parse_config,
    CONFIG_FILE_NAME,
};
pub use thresholds::DetectionSettings;
