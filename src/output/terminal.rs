use super::markdown::high_dollar_table;
use super::{money, OutputWriter};
use crate::detectors::{AnalyzerKind, DetectionReport};
use crate::io::StatsTable;
use crate::summary::Summary;
use colored::*;
use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{ContentArrangement, Table};
use std::io::Write;

const DEFAULT_ROW_LIMIT: usize = 10;

pub struct TerminalWriter<W: Write> {
    writer: W,
    plain: bool,
    row_limit: usize,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            plain: false,
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }

    /// ASCII table borders instead of box-drawing characters.
    pub fn with_plain(mut self, plain: bool) -> Self {
        self.plain = plain;
        self
    }

    /// Maximum rows shown per detector table.
    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &DetectionReport) -> anyhow::Result<()> {
        self.write_header()?;
        self.write_summary(&report.summary)?;
        for kind in AnalyzerKind::ALL {
            self.write_analyzer(report, kind)?;
        }
        self.write_footer(&report.summary)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn rule(&self) -> &'static str {
        if self.plain {
            "==========================================="
        } else {
            "═══════════════════════════════════════════"
        }
    }

    fn table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(if self.plain { ASCII_FULL } else { UTF8_FULL })
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(headers.to_vec());
        table
    }

    fn write_header(&mut self) -> anyhow::Result<()> {
        let rule = self.rule();
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", rule.cyan())?;
        writeln!(self.writer, "{}", "    HIGH RISK PATTERN DETECTION REPORT".bold().cyan())?;
        writeln!(self.writer, "{}", rule.cyan())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, summary: &Summary) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Portfolio".bold())?;
        writeln!(self.writer, "  Total claims analyzed: {}", summary.total_claims)?;
        writeln!(self.writer, "  Total amount paid:     {}", money(summary.total_paid))?;
        writeln!(self.writer, "  Average claim amount:  {}", money(summary.average_paid))?;
        writeln!(self.writer, "  Maximum claim amount:  {}", money(summary.max_paid))?;
        writeln!(self.writer, "  Unique VINs:           {}", summary.unique_vins)?;
        writeln!(self.writer, "  Unique dealers:        {}", summary.unique_dealers)?;
        writeln!(self.writer)?;

        let mut table = self.table(&["Pattern", "Flagged", "Claims", "Amount"]);
        for pattern in &summary.patterns {
            table.add_row(vec![
                pattern.label.clone(),
                format!("{} {}", pattern.flagged_units, pattern.unit),
                pattern.claims_flagged.to_string(),
                money(pattern.flagged_amount),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_analyzer(
        &mut self,
        report: &DetectionReport,
        kind: AnalyzerKind,
    ) -> anyhow::Result<()> {
        let table =
            StatsTable::for_display(report, kind).unwrap_or_else(|| high_dollar_table(report));
        let count = report.findings(kind).flagged_units();

        let heading = format!("{} ({} {})", kind.label(), count, kind.unit());
        if count == 0 {
            writeln!(self.writer, "{}", heading.dimmed())?;
            writeln!(self.writer)?;
            return Ok(());
        }
        writeln!(self.writer, "{}", heading.bold().yellow())?;

        let mut rendered = self.table(&table.headers);
        for row in table.rows.iter().take(self.row_limit) {
            rendered.add_row(row.clone());
        }
        writeln!(self.writer, "{rendered}")?;
        if table.rows.len() > self.row_limit {
            writeln!(
                self.writer,
                "  ... {} more not shown",
                table.rows.len() - self.row_limit
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_footer(&mut self, summary: &Summary) -> anyhow::Result<()> {
        let total = summary.total_risk_signals.to_string();
        let total = if summary.total_risk_signals == 0 {
            total.green()
        } else {
            total.red().bold()
        };
        writeln!(self.writer, "{}", self.rule().cyan())?;
        writeln!(self.writer, "Total risk signals: {total}")?;
        Ok(())
    }
}
