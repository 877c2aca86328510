use std::collections::HashMap;

use super::Chance;
use crate::diagnostics::{Diagnostic, DiagnosticSink, Subject};
use crate::records::ProjectRecord;

/// Aggregate over every project in one city, before formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct CityReportEntry {
    pub city: String,
    pub total_projects: usize,
    pub avg_sqm_price: f64,
    /// Mean of the per-project chances (not a ratio of sums)
    pub avg_win_chance: Chance,
    pub avg_subscribers: f64,
    pub total_apartments: f64,
    /// total_apartments / avg_subscribers * 100
    pub city_win_chance: Chance,
}

impl CityReportEntry {
    fn from_group(city: &str, group: &[&ProjectRecord]) -> Self {
        let k = group.len() as f64;

        let sqm_sum: f64 = group.iter().map(|r| r.sqm_price).sum();
        let ratio_sum: f64 = group.iter().map(|r| r.apartment_ratio()).sum();
        let subscriber_sum: f64 = group.iter().map(|r| r.subscribers).sum();
        let total_apartments: f64 = group.iter().map(|r| r.total_apartments).sum();

        let avg_subscribers = subscriber_sum / k;

        Self {
            city: city.to_string(),
            total_projects: group.len(),
            avg_sqm_price: sqm_sum / k,
            avg_win_chance: Chance::from_ratio(ratio_sum / k),
            avg_subscribers,
            total_apartments,
            // Mean subscribers, not the sum
            city_win_chance: Chance::percent(total_apartments, avg_subscribers),
        }
    }
}

/// Group records by exact `city` text and aggregate each group.
///
/// No normalization: "Tel Aviv" and "tel aviv" are different cities.
/// Groups come out in first-seen order.
pub fn compute_city_report(
    records: &[ProjectRecord],
    sink: &dyn DiagnosticSink,
) -> Vec<CityReportEntry> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&ProjectRecord>)> = Vec::new();

    for record in records {
        let city = record.city.as_str();
        match index.get(city) {
            Some(&i) => groups[i].1.push(record),
            None => {
                index.insert(city, groups.len());
                groups.push((city, vec![record]));
            }
        }
    }

    groups
        .iter()
        .map(|(city, group)| {
            let entry = CityReportEntry::from_group(city, group);
            if entry.avg_win_chance.is_undefined() || entry.city_win_chance.is_undefined() {
                sink.emit(Diagnostic::UndefinedChance {
                    subject: Subject::City,
                    name: entry.city.clone(),
                });
            }
            entry
        })
        .collect()
}
