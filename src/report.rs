use serde::Serialize;

use crate::scenario::{ScanRecord, Scenario, ScenarioOutcome};
use crate::timing::TimingRecord;

/// Results of one scenario run.
#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    pub scenario: String,
    pub rows: usize,
    pub timings: TimingRecord,
    pub scans: Vec<ScanRecord>,
}

impl ScenarioReport {
    pub fn new(
        scenario: Scenario,
        rows: usize,
        timings: TimingRecord,
        outcome: ScenarioOutcome,
    ) -> Self {
        Self {
            scenario: scenario.name().to_string(),
            rows,
            timings,
            scans: outcome.scans,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Per-phase summary table, slowest phase first.
    pub fn summary(&self) -> String {
        let mut phases: Vec<(&String, &f64)> = self.timings.iter().collect();
        phases.sort_by(|a, b| b.1.total_cmp(a.1));

        let mut out = format!("  {} ({} rows)\n", self.scenario, self.rows);
        for (label, secs) in phases {
            out.push_str(&format!("    {label:<32} {secs:>12.6}s\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScanSummary;

    fn report() -> ScenarioReport {
        let timings: TimingRecord = [
            ("createTable".to_string(), 0.25),
            ("mutateRow:Create".to_string(), 1.5),
        ]
        .into_iter()
        .collect();
        let outcome = ScenarioOutcome {
            scans: vec![ScanRecord {
                label: "scanner:rows10-".into(),
                summary: ScanSummary { rows: 10, batches: 1 },
            }],
        };
        ScenarioReport::new(Scenario::Simple, 10, timings, outcome)
    }

    #[test]
    fn json_carries_timings_and_scans() {
        let json: serde_json::Value = serde_json::from_str(&report().to_json().unwrap()).unwrap();
        assert_eq!(json["scenario"], "simple");
        assert_eq!(json["rows"], 10);
        assert_eq!(json["timings"]["mutateRow:Create"], 1.5);
        assert_eq!(json["scans"][0]["label"], "scanner:rows10-");
        assert_eq!(json["scans"][0]["rows"], 10);
        assert_eq!(json["scans"][0]["batches"], 1);
    }

    #[test]
    fn summary_lists_slowest_phase_first() {
        let summary = report().summary();
        let create = summary.find("createTable").unwrap();
        let mutate = summary.find("mutateRow:Create").unwrap();
        assert!(mutate < create);
        assert!(summary.starts_with("  simple (10 rows)"));
    }
}
