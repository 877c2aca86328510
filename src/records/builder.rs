use serde::Deserialize;
use serde_json::Value;

use super::ProjectRecord;
use crate::error::{ReportError, Result};

/// One entry of `ProjectItems`, only the fields we read.
#[derive(Debug, Deserialize)]
struct RawProject {
    #[serde(rename = "CityDescription")]
    city: String,

    #[serde(rename = "PricePerUnit")]
    sqm_price: f64,

    #[serde(rename = "LotteryNumber")]
    lottery_id: String,

    // The API spells it "Summery"
    #[serde(rename = "LotteryStageSummery")]
    stage_summary: RawStageSummary,
}

#[derive(Debug, Deserialize)]
struct RawStageSummary {
    #[serde(rename = "TotalSubscribers")]
    total_subscribers: f64,
}

/// The `MyLotteryResult` object.
#[derive(Debug, Deserialize)]
struct RawLotteryDetail {
    #[serde(rename = "LocalHousing")]
    local_housing: f64,

    #[serde(rename = "ApartmentsCount")]
    apartments_count: f64,
}

/// Read the lottery id of a raw project, needed before its detail can be fetched.
/// `index` is the project's position in the list, used when the id is unreadable.
pub fn lottery_id_of(raw_project: &Value, index: usize) -> Result<String> {
    match raw_project.get("LotteryNumber") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(_) => Err(ReportError::malformed(
            format!("project #{}", index),
            "LotteryNumber is not a string",
        )),
        None => Err(ReportError::malformed(
            format!("project #{}", index),
            "missing field `LotteryNumber`",
        )),
    }
}

/// Flatten a project and its lottery result into a [`ProjectRecord`].
///
/// Every field is a checked extraction; a missing or mistyped field is an
/// error rather than a silent zero, since zeros would corrupt the ratios.
///
/// `lottery_id` is the id already read with [`lottery_id_of`]; it names the
/// lottery in error messages.
///
/// Note that subscribers are reduced by the *apartment* count reserved for
/// locals, not by a count of local applicants. The API exposes no such count.
pub fn build_record(
    lottery_id: &str,
    raw_project: &Value,
    raw_detail: &Value,
) -> Result<ProjectRecord> {
    let project = RawProject::deserialize(raw_project)
        .map_err(|e| ReportError::malformed(format!("project for lottery {}", lottery_id), e))?;
    let detail = RawLotteryDetail::deserialize(raw_detail).map_err(|e| {
        ReportError::malformed(format!("lottery result for lottery {}", lottery_id), e)
    })?;

    let local_apartments = detail.local_housing;
    let total_apartments = detail.apartments_count - local_apartments;
    let subscribers = project.stage_summary.total_subscribers - local_apartments;

    Ok(ProjectRecord {
        city: project.city,
        lottery_id: project.lottery_id,
        sqm_price: project.sqm_price,
        total_apartments,
        local_apartments,
        subscribers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_project() -> Value {
        json!({
            "CityDescription": "Beer Sheva",
            "PricePerUnit": 8750.5,
            "LotteryNumber": "2041",
            "ProjectName": "ignored",
            "LotteryStageSummery": { "TotalSubscribers": 1200, "Winners": 90 }
        })
    }

    fn raw_detail() -> Value {
        json!({ "LocalHousing": 20, "ApartmentsCount": 120 })
    }

    #[test]
    fn test_build_record() {
        let record = build_record("2041", &raw_project(), &raw_detail()).unwrap();
        assert_eq!(
            record,
            ProjectRecord {
                city: "Beer Sheva".to_string(),
                lottery_id: "2041".to_string(),
                sqm_price: 8750.5,
                total_apartments: 100.0,
                local_apartments: 20.0,
                subscribers: 1180.0,
            }
        );
    }

    #[test]
    fn test_subscribers_reduced_by_local_apartment_count() {
        // 1200 applicants, 20 apartments for locals: the general pool is
        // taken as 1200 - 20, mixing applicant and apartment units.
        let record = build_record("2041", &raw_project(), &raw_detail()).unwrap();
        assert_eq!(record.subscribers, 1200.0 - record.local_apartments);
        assert_ne!(record.subscribers, 1200.0);
    }

    #[test]
    fn test_city_copied_verbatim() {
        let mut project = raw_project();
        project["CityDescription"] = json!("  tel aviv ");
        let record = build_record("2041", &project, &raw_detail()).unwrap();
        assert_eq!(record.city, "  tel aviv ");
    }

    #[test]
    fn test_missing_project_field() {
        let mut project = raw_project();
        project.as_object_mut().unwrap().remove("PricePerUnit");

        let err = build_record("2041", &project, &raw_detail()).unwrap_err();
        assert!(matches!(err, ReportError::MalformedInput { .. }));
        let msg = err.to_string();
        assert!(msg.contains("lottery 2041"), "{}", msg);
        assert!(msg.contains("PricePerUnit"), "{}", msg);
    }

    #[test]
    fn test_missing_nested_subscribers() {
        let mut project = raw_project();
        project["LotteryStageSummery"] = json!({});

        let err = build_record("2041", &project, &raw_detail()).unwrap_err();
        assert!(err.to_string().contains("TotalSubscribers"));
    }

    #[test]
    fn test_wrong_type_is_not_zeroed() {
        let detail = json!({ "LocalHousing": "20", "ApartmentsCount": 120 });
        let err = build_record("2041", &raw_project(), &detail).unwrap_err();
        assert!(matches!(err, ReportError::MalformedInput { .. }));
        assert!(err.to_string().contains("lottery result for lottery 2041"));

        let detail = json!({ "LocalHousing": null, "ApartmentsCount": 120 });
        assert!(build_record("2041", &raw_project(), &detail).is_err());
    }

    #[test]
    fn test_error_names_the_given_lottery_id() {
        let mut project = raw_project();
        project.as_object_mut().unwrap().remove("LotteryNumber");

        let err = build_record("77", &project, &raw_detail()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("project for lottery 77"), "{}", msg);
        assert!(msg.contains("LotteryNumber"), "{}", msg);

        let err = build_record("77", &raw_project(), &json!({})).unwrap_err();
        assert!(err.to_string().contains("lottery result for lottery 77"));
    }

    #[test]
    fn test_lottery_id_of() {
        assert_eq!(lottery_id_of(&raw_project(), 0).unwrap(), "2041");

        let err = lottery_id_of(&json!({ "LotteryNumber": 2041 }), 3).unwrap_err();
        assert!(err.to_string().contains("project #3"));

        let err = lottery_id_of(&json!({}), 5).unwrap_err();
        assert!(err.to_string().contains("LotteryNumber"));
    }
}
