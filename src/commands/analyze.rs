use super::{load_records, open_output, resolve_config, resolve_settings};
use crate::cli::{OutputFormat, ThresholdArgs};
use crate::detectors::DetectionEngine;
use crate::output::{create_writer, OutputWriter, TerminalWriter};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Configuration for the analyze command.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub thresholds: ThresholdArgs,
    pub config: Option<PathBuf>,
    pub parallel: bool,
    pub plain: bool,
    pub top: usize,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let file_config = resolve_config(config.config.as_deref())?;
    let settings = resolve_settings(&file_config, &config.thresholds)?;

    let format = config
        .format
        .or_else(|| {
            file_config
                .output
                .default_format
                .as_deref()
                .and_then(OutputFormat::parse)
        })
        .unwrap_or_default();
    let plain = config.plain || file_config.output.plain;
    if plain {
        colored::control::set_override(false);
    }

    let records = load_records(&config.path)?;
    log::info!(
        "Analyzing {} claims from {}",
        records.len(),
        config.path.display()
    );

    let report = DetectionEngine::new(settings)
        .with_parallel(config.parallel || file_config.engine.parallel)
        .run(&records);

    let out = open_output(config.output.as_deref())?;
    let mut writer: Box<dyn OutputWriter> = match format {
        OutputFormat::Terminal => Box::new(
            TerminalWriter::new(out)
                .with_plain(plain)
                .with_row_limit(config.top),
        ),
        other => create_writer(other, out, plain),
    };
    writer
        .write_report(&report)
        .context("Failed to write report")?;

    if let Some(path) = &config.output {
        log::info!("Report written to {}", path.display());
    }
    Ok(())
}
