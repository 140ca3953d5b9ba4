use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::{ClaimguardConfig, RawConfig};
use super::thresholds::DetectionSettings;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".claimguard.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a config file body.
///
/// TOML syntax errors are fatal. Threshold entries are coerced loosely:
/// a non-numeric or out-of-range threshold keeps its default.
pub fn parse_config(contents: &str) -> std::result::Result<ClaimguardConfig, String> {
    let raw = toml::from_str::<RawConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))?;

    let thresholds = match raw.thresholds {
        Some(table) => {
            let value = serde_json::to_value(&table).map_err(|e| e.to_string())?;
            DetectionSettings::from_value(&value).map_err(|e| e.to_string())?
        }
        None => DetectionSettings::default(),
    };

    Ok(ClaimguardConfig {
        thresholds,
        output: raw.output.unwrap_or_default(),
        engine: raw.engine.unwrap_or_default(),
    })
}

/// Load an explicitly requested config file. Missing or malformed files
/// are errors here, unlike during discovery.
pub fn load_config_from(path: &Path) -> Result<ClaimguardConfig> {
    let contents = read_config_file(path)
        .map_err(|e| Error::configuration(path, format!("cannot read file: {e}")))?;
    let config = parse_config(&contents).map_err(|e| Error::configuration(path, e))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading config from one candidate path during discovery
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<ClaimguardConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors of `start`, nearest first, up to `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find the nearest `.claimguard.toml` above `start`, or fall back to defaults.
pub fn discover_config(start: PathBuf) -> ClaimguardConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ClaimguardConfig::default()
        })
}

pub fn load_config() -> ClaimguardConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            ClaimguardConfig::default()
        }
    }
}
