use super::{money, OutputWriter};
use crate::detectors::{AnalyzerKind, DetectionReport};
use crate::io::StatsTable;
use crate::summary::Summary;
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &DetectionReport) -> anyhow::Result<()> {
        self.write_header()?;
        self.write_summary(&report.summary)?;
        self.write_patterns(&report.summary)?;
        for kind in AnalyzerKind::ALL {
            self.write_analyzer(report, kind)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer, "# High Risk Pattern Detection Summary")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, summary: &Summary) -> anyhow::Result<()> {
        writeln!(self.writer, "## Portfolio")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Total Claims Analyzed | {} |", summary.total_claims)?;
        writeln!(self.writer, "| Total Amount Paid | {} |", money(summary.total_paid))?;
        writeln!(self.writer, "| Average Claim Amount | {} |", money(summary.average_paid))?;
        writeln!(self.writer, "| Maximum Claim Amount | {} |", money(summary.max_paid))?;
        writeln!(self.writer, "| Unique VINs | {} |", summary.unique_vins)?;
        writeln!(self.writer, "| Unique Dealers | {} |", summary.unique_dealers)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_patterns(&mut self, summary: &Summary) -> anyhow::Result<()> {
        writeln!(self.writer, "## Risk Patterns Detected")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Pattern | Flagged | Claims | Amount |")?;
        writeln!(self.writer, "|---------|---------|--------|--------|")?;
        for pattern in &summary.patterns {
            writeln!(
                self.writer,
                "| {} | {} {} | {} | {} |",
                pattern.label,
                pattern.flagged_units,
                pattern.unit,
                pattern.claims_flagged,
                money(pattern.flagged_amount)
            )?;
        }
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "**Total risk signals:** {}",
            summary.total_risk_signals
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_analyzer(
        &mut self,
        report: &DetectionReport,
        kind: AnalyzerKind,
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "## {}", kind.label())?;
        writeln!(self.writer)?;

        let table = match StatsTable::for_display(report, kind) {
            Some(table) => table,
            None => high_dollar_table(report),
        };
        if table.rows.is_empty() {
            writeln!(self.writer, "_No {} flagged._", kind.unit())?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(self.writer, "| {} |", table.headers.join(" | "))?;
        let rule: Vec<&str> = table.headers.iter().map(|_| "---").collect();
        writeln!(self.writer, "|{}|", rule.join("|"))?;
        for row in &table.rows {
            let cells: Vec<String> = row.iter().map(|cell| escape_cell(cell)).collect();
            writeln!(self.writer, "| {} |", cells.join(" | "))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

pub(crate) fn high_dollar_table(report: &DetectionReport) -> StatsTable {
    StatsTable {
        headers: vec!["Claim #", "VIN", "Vehicle", "Selling Dealer", "Paid Amount"],
        rows: report
            .high_dollar
            .flagged_records
            .iter()
            .map(|r| {
                vec![
                    r.claim_key().to_string(),
                    r.vin.clone(),
                    r.vehicle.clone(),
                    r.selling_dealer.clone(),
                    money(r.paid_amount),
                ]
            })
            .collect(),
    }
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}
