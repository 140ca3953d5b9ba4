use super::OutputWriter;
use crate::detectors::DetectionReport;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &DetectionReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::detect;
    use crate::{ClaimRecord, DetectionSettings};

    #[test]
    fn test_json_report_round_trips() {
        let records = vec![ClaimRecord::new("V1", 10.0), ClaimRecord::new("V1", 20.0)];
        let report = detect(&records, &DetectionSettings::default());

        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_report(&report).unwrap();

        let parsed: DetectionReport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, report);
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["summary"]["total_claims"], 2);
        assert_eq!(value["summary"]["patterns"][0]["analyzer"], "multi_claim");
    }
}
