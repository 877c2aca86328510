mod chance;
mod city;
mod project;
mod rank;

pub use chance::{Chance, UNDEFINED};
pub use city::{compute_city_report, CityReportEntry};
pub use project::{compute_project_report, ProjectReportEntry};
pub use rank::rank_by;

use crate::diagnostics::DiagnosticSink;
use crate::records::ProjectRecord;

/// Project report ranked by win chance, highest first.
pub fn ranked_projects(
    records: &[ProjectRecord],
    sink: &dyn DiagnosticSink,
) -> Vec<ProjectReportEntry> {
    let mut entries = compute_project_report(records, sink);
    rank_by(&mut entries, |e| e.win_chance);
    entries
}

/// City report ranked by city-level win chance, highest first.
pub fn ranked_cities(records: &[ProjectRecord], sink: &dyn DiagnosticSink) -> Vec<CityReportEntry> {
    let mut entries = compute_city_report(records, sink);
    rank_by(&mut entries, |e| e.city_win_chance);
    entries
}


#[cfg(test)]
mod tests {
    use super::testing::record;
    use super::*;
    use crate::diagnostics::MemorySink;

    #[test]
    fn test_ranked_projects_descending_and_stable() {
        let records = vec![
            record("a", "X", 1.0, 10.0),  // 10%
            record("b", "Y", 1.0, 2.0),   // 50%
            record("c", "Z", 2.0, 20.0),  // 10%
            record("d", "Z", 9.0, 100.0), // 9%
        ];
        let ranked = ranked_projects(&records, &MemorySink::new());

        let ids: Vec<_> = ranked.iter().map(|e| e.lottery_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c", "d"]);

        for pair in ranked.windows(2) {
            let (a, b) = (pair[0].win_chance.value(), pair[1].win_chance.value());
            assert!(a.unwrap() >= b.unwrap());
        }
    }

    #[test]
    fn test_ranked_cities_by_city_chance() {
        let records = vec![
            record("1", "Low", 1.0, 100.0),
            record("2", "High", 50.0, 100.0),
            record("3", "Mid", 10.0, 100.0),
            record("4", "High", 50.0, 100.0),
        ];
        let ranked = ranked_cities(&records, &MemorySink::new());

        let names: Vec<_> = ranked.iter().map(|e| e.city.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
        // 100 apartments over a mean of 100 subscribers
        assert_eq!(ranked[0].city_win_chance, Chance::Finite(100.0));
    }

    #[test]
    fn test_undefined_project_listed_first() {
        let records = vec![record("ok", "X", 1.0, 10.0), record("zero", "X", 1.0, 0.0)];
        let ranked = ranked_projects(&records, &MemorySink::new());
        assert_eq!(ranked[0].lottery_id, "zero");
        assert!(ranked[0].win_chance.is_undefined());
    }
}
