mod display;
mod writer;

pub use display::{city_rows, project_rows, whole, CityRow, ProjectRow};
pub use writer::{report_path, timestamp, write_report, CITIES_PREFIX, PROJECTS_PREFIX};
