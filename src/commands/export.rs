use super::{load_records, open_output, resolve_config, resolve_settings};
use crate::cli::ThresholdArgs;
use crate::detectors::{AnalyzerKind, DetectionEngine};
use crate::io::{self, StatsTable};
use anyhow::{Context, Result};
use std::path::PathBuf;

const DEFAULT_DELIMITER: char = ',';

/// Configuration for the export command.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub path: PathBuf,
    pub analyzer: AnalyzerKind,
    pub output: Option<PathBuf>,
    pub delimiter: Option<char>,
    pub stats: bool,
    pub thresholds: ThresholdArgs,
    pub config: Option<PathBuf>,
}

pub fn handle_export(config: ExportConfig) -> Result<()> {
    let file_config = resolve_config(config.config.as_deref())?;
    let settings = resolve_settings(&file_config, &config.thresholds)?;
    let delimiter = io::delimiter_byte(
        config
            .delimiter
            .or(file_config.output.delimiter)
            .unwrap_or(DEFAULT_DELIMITER),
    )?;

    let records = load_records(&config.path)?;
    let report = DetectionEngine::new(settings)
        .with_parallel(file_config.engine.parallel)
        .run(&records);

    let out = open_output(config.output.as_deref())?;
    if config.stats {
        let table = StatsTable::for_analyzer(&report, config.analyzer).with_context(|| {
            format!(
                "{} reports individual claims and has no group statistics",
                config.analyzer.label()
            )
        })?;
        io::write_group_stats(&table, out, delimiter)?;
    } else {
        let findings = report.findings(config.analyzer);
        log::info!(
            "Exporting {} flagged claims from {}",
            findings.flagged_records().len(),
            config.analyzer.label()
        );
        io::write_records(findings.flagged_records(), out, delimiter)?;
    }

    if let Some(path) = &config.output {
        log::info!("Export written to {}", path.display());
    }
    Ok(())
}
