use serde::Serialize;
use serde_json::Value;

use crate::stats::{CityReportEntry, ProjectReportEntry};

/// Project report row as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRow {
    #[serde(rename = "City")]
    pub city: String,

    #[serde(rename = "LotteryID")]
    pub lottery_id: String,

    #[serde(rename = "Sqm price")]
    pub sqm_price: String,

    #[serde(rename = "Subscribers")]
    pub subscribers: Value,

    #[serde(rename = "Apartments")]
    pub apartments: Value,

    #[serde(rename = "Win chance")]
    pub win_chance: String,
}

/// City report row as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityRow {
    #[serde(rename = "City")]
    pub city: String,

    #[serde(rename = "Total projects")]
    pub total_projects: usize,

    #[serde(rename = "Avg sqm price")]
    pub avg_sqm_price: String,

    #[serde(rename = "Avg chance to win a single project")]
    pub avg_win_chance: String,

    #[serde(rename = "Avg city subscribers")]
    pub avg_subscribers: String,

    #[serde(rename = "Apartments in the city")]
    pub total_apartments: String,

    #[serde(rename = "Chance to win the city")]
    pub city_win_chance: String,
}

impl From<&ProjectReportEntry> for ProjectRow {
    fn from(entry: &ProjectReportEntry) -> Self {
        Self {
            city: entry.city.clone(),
            lottery_id: entry.lottery_id.clone(),
            sqm_price: whole(entry.sqm_price),
            subscribers: count(entry.subscribers),
            apartments: count(entry.apartments),
            win_chance: entry.win_chance.display(),
        }
    }
}

impl From<&CityReportEntry> for CityRow {
    fn from(entry: &CityReportEntry) -> Self {
        Self {
            city: entry.city.clone(),
            total_projects: entry.total_projects,
            avg_sqm_price: whole(entry.avg_sqm_price),
            avg_win_chance: entry.avg_win_chance.display(),
            avg_subscribers: whole(entry.avg_subscribers),
            total_apartments: whole(entry.total_apartments),
            city_win_chance: entry.city_win_chance.display(),
        }
    }
}

/// Format already-ranked entries. Order is preserved.
pub fn project_rows(entries: &[ProjectReportEntry]) -> Vec<ProjectRow> {
    entries.iter().map(ProjectRow::from).collect()
}

pub fn city_rows(entries: &[CityReportEntry]) -> Vec<CityRow> {
    entries.iter().map(CityRow::from).collect()
}

/// Zero decimals, for prices and counts.
pub fn whole(value: f64) -> String {
    format!("{:.0}", value)
}

// Largest integer an f64 holds exactly
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

/// JSON number for a count: integral values as integers, anything else as a float.
fn count(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Chance;
    use serde_json::json;

    fn project_entry() -> ProjectReportEntry {
        ProjectReportEntry {
            city: "Netivot".to_string(),
            lottery_id: "1981".to_string(),
            sqm_price: 7412.6,
            subscribers: 1180.0,
            apartments: 100.0,
            win_chance: Chance::percent(100.0, 1180.0),
        }
    }

    #[test]
    fn test_whole() {
        assert_eq!(whole(7412.6), "7413");
        assert_eq!(whole(7412.4), "7412");
        assert_eq!(whole(0.0), "0");
        assert_eq!(whole(62.5001), "63");
    }

    #[test]
    fn test_project_row_fields() {
        let row = ProjectRow::from(&project_entry());
        assert_eq!(row.sqm_price, "7413");
        assert_eq!(row.win_chance, "8.47");
        assert_eq!(row.subscribers, json!(1180));
        assert_eq!(row.apartments, json!(100));
    }

    #[test]
    fn test_project_row_json_shape() {
        let value = serde_json::to_value(ProjectRow::from(&project_entry())).unwrap();
        assert_eq!(
            value,
            json!({
                "City": "Netivot",
                "LotteryID": "1981",
                "Sqm price": "7413",
                "Subscribers": 1180,
                "Apartments": 100,
                "Win chance": "8.47"
            })
        );
    }

    #[test]
    fn test_fractional_count_stays_a_number() {
        let mut entry = project_entry();
        entry.subscribers = 10.5;
        let row = ProjectRow::from(&entry);
        assert_eq!(row.subscribers, json!(10.5));
    }

    #[test]
    fn test_undefined_chance_in_row() {
        let mut entry = project_entry();
        entry.subscribers = 0.0;
        entry.win_chance = Chance::Undefined;
        let row = ProjectRow::from(&entry);
        assert_eq!(row.win_chance, "undefined");
        assert_eq!(row.subscribers, json!(0));
    }

    #[test]
    fn test_city_row_json_shape() {
        let entry = CityReportEntry {
            city: "Sderot".to_string(),
            total_projects: 2,
            avg_sqm_price: 11_000.0,
            avg_win_chance: Chance::Finite(15.000000000000002),
            avg_subscribers: 62.25,
            total_apartments: 15.0,
            city_win_chance: Chance::Finite(24.0),
        };
        let value = serde_json::to_value(CityRow::from(&entry)).unwrap();
        assert_eq!(
            value,
            json!({
                "City": "Sderot",
                "Total projects": 2,
                "Avg sqm price": "11000",
                "Avg chance to win a single project": "15.00",
                "Avg city subscribers": "62",
                "Apartments in the city": "15",
                "Chance to win the city": "24.00"
            })
        );
    }

    #[test]
    fn test_rows_keep_order() {
        let mut second = project_entry();
        second.lottery_id = "2".to_string();
        let rows = project_rows(&[project_entry(), second]);
        assert_eq!(rows[0].lottery_id, "1981");
        assert_eq!(rows[1].lottery_id, "2");
    }
}
