//! CLI command implementations for claimguard.
//!
//! Available commands:
//! - **analyze**: Run every detector over a claims file and write a report
//! - **export**: Write one detector's findings as delimited text
//! - **init**: Write a default `.claimguard.toml`
//!
//! Every command resolves its settings the same way: built-in defaults,
//! then the config file, then environment variables and flags.

pub mod analyze;
pub mod export;
pub mod init;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use export::{handle_export, ExportConfig};
pub use init::init_config;

use crate::cli::ThresholdArgs;
use crate::config::{self, ClaimguardConfig, DetectionSettings};
use crate::core::{normalize_rows, ClaimRecord};
use crate::io;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The explicit config file if one was given, otherwise the discovered one.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ClaimguardConfig> {
    match explicit {
        Some(path) => Ok(config::load_config_from(path)?),
        None => Ok(config::load_config()),
    }
}

/// Config-file thresholds with command-line and environment overrides.
pub fn resolve_settings(
    config: &ClaimguardConfig,
    overrides: &ThresholdArgs,
) -> Result<DetectionSettings> {
    let settings = config.thresholds.merge_value(&overrides.to_value())?;
    log::debug!("Effective thresholds: {settings:?}");
    Ok(settings)
}

/// Load and normalize every claim in `path`.
pub fn load_records(path: &Path) -> Result<Vec<ClaimRecord>> {
    let rows = io::load_rows(path)
        .with_context(|| format!("Failed to load claims from {}", path.display()))?;
    Ok(normalize_rows(&rows))
}

/// Buffered file writer, or stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                io::ensure_dir(parent)?;
            }
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(std::io::stdout()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            indoc! {"
                [thresholds]
                vin_threshold = 5
                days_threshold = 14
            "},
        )
        .unwrap();

        let config = resolve_config(Some(&path)).unwrap();
        let overrides = ThresholdArgs {
            days_threshold: Some(7),
            ..Default::default()
        };
        let settings = resolve_settings(&config, &overrides).unwrap();

        assert_eq!(settings.vin_threshold, 5);
        assert_eq!(settings.days_threshold, 7);
        assert_eq!(settings.dollar_threshold, 2.0);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(resolve_config(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_open_output_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("report.md");
        {
            let mut out = open_output(Some(&path)).unwrap();
            out.write_all(b"ok").unwrap();
            out.flush().unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ok");
    }
}
