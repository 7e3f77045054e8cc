use crate::error::Result;
use crate::models::{StationMap, StationSummary};
use std::collections::BTreeMap;
use std::io::Write;

/// Renders the merged per-station aggregates. Station names are sorted
/// lexicographically; temperatures are printed with one decimal place.
pub struct ReportWriter;

impl ReportWriter {
    pub fn new() -> Self {
        Self
    }

    /// Render the classic single-line report:
    /// `{Aberdeen=-5.0/2.5/10.0, Belfast=...}\n`.
    pub fn render(&self, totals: &StationMap) -> String {
        let mut stations: Vec<&str> = totals.keys().map(String::as_str).collect();
        stations.sort_unstable();

        let mut out = String::with_capacity(totals.len() * 32 + 3);
        out.push('{');
        for (index, station) in stations.iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            let stats = &totals[*station];
            out.push_str(&format!(
                "{}={:.1}/{:.1}/{:.1}",
                station,
                stats.min,
                stats.mean(),
                stats.max
            ));
        }
        out.push_str("}\n");
        out
    }

    /// Write the single-line report to `out`. Callers pass a buffered
    /// stream; one flush covers the whole report.
    pub fn write_report<W: Write>(&self, totals: &StationMap, out: &mut W) -> Result<()> {
        out.write_all(self.render(totals).as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Render the report as pretty-printed JSON with stations in sorted
    /// order.
    pub fn render_json(&self, totals: &StationMap) -> Result<String> {
        let summaries: BTreeMap<&str, StationSummary> = totals
            .iter()
            .map(|(station, stats)| (station.as_str(), StationSummary::from(stats)))
            .collect();

        Ok(serde_json::to_string_pretty(&summaries)?)
    }

    pub fn write_json_report<W: Write>(&self, totals: &StationMap, out: &mut W) -> Result<()> {
        let rendered = self.render_json(totals)?;
        writeln!(out, "{}", rendered)?;
        out.flush()?;
        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StationStats;
    use pretty_assertions::assert_eq;

    fn sample_totals() -> StationMap {
        let mut totals = StationMap::new();
        let mut a = StationStats::new(10.0);
        a.record(-5.0);
        totals.insert("A".to_string(), a);
        totals.insert("B".to_string(), StationStats::new(20.0));
        totals
    }

    #[test]
    fn test_render_sorts_and_formats_stations() {
        let writer = ReportWriter::new();
        let rendered = writer.render(&sample_totals());

        assert_eq!(rendered, "{A=-5.0/2.5/10.0, B=20.0/20.0/20.0}\n");
    }

    #[test]
    fn test_render_is_idempotent() {
        let writer = ReportWriter::new();
        let totals = sample_totals();

        assert_eq!(writer.render(&totals), writer.render(&totals));
    }

    #[test]
    fn test_render_empty_result() {
        let writer = ReportWriter::new();
        assert_eq!(writer.render(&StationMap::new()), "{}\n");
    }

    #[test]
    fn test_write_report_to_buffer() {
        let writer = ReportWriter::new();
        let mut buffer = Vec::new();

        writer.write_report(&sample_totals(), &mut buffer).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "{A=-5.0/2.5/10.0, B=20.0/20.0/20.0}\n"
        );
    }

    #[test]
    fn test_json_report_is_sorted_and_complete() {
        let writer = ReportWriter::new();
        let rendered = writer.render_json(&sample_totals()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        let object = value.as_object().unwrap();

        let keys: Vec<&String> = object.keys().collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(object["A"]["mean"], 2.5);
        assert_eq!(object["A"]["count"], 2);
        assert_eq!(object["B"]["max"], 20.0);
    }
}
