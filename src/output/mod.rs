//! Composite report writers.

pub mod json;
pub mod markdown;
pub mod terminal;

pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;

use crate::detectors::DetectionReport;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Markdown,
    Json,
}

impl OutputFormat {
    /// Parse a format name from a config file, ignoring case.
    pub fn parse(name: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(name, true).ok()
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &DetectionReport) -> anyhow::Result<()>;
}

/// Writer for `format` over any byte sink.
pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
    plain: bool,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer).with_plain(plain)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
    }
}

pub(crate) fn money(amount: f64) -> String {
    format!("${amount:.2}")
}
