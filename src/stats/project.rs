use super::Chance;
use crate::diagnostics::{Diagnostic, DiagnosticSink, Subject};
use crate::records::ProjectRecord;

/// One row of the project report, before formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectReportEntry {
    pub city: String,
    pub lottery_id: String,
    pub sqm_price: f64,
    pub subscribers: f64,
    pub apartments: f64,
    /// apartments / subscribers * 100
    pub win_chance: Chance,
}

impl ProjectReportEntry {
    pub fn from_record(record: &ProjectRecord) -> Self {
        Self {
            city: record.city.clone(),
            lottery_id: record.lottery_id.clone(),
            sqm_price: record.sqm_price,
            subscribers: record.subscribers,
            apartments: record.total_apartments,
            win_chance: Chance::from_ratio(record.apartment_ratio()),
        }
    }
}

/// Win chance per project, in input order.
pub fn compute_project_report(
    records: &[ProjectRecord],
    sink: &dyn DiagnosticSink,
) -> Vec<ProjectReportEntry> {
    records
        .iter()
        .map(|record| {
            let entry = ProjectReportEntry::from_record(record);
            if entry.win_chance.is_undefined() {
                sink.emit(Diagnostic::UndefinedChance {
                    subject: Subject::Project,
                    name: entry.lottery_id.clone(),
                });
            }
            entry
        })
        .collect()
}
