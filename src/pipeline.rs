use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::api::LotterySource;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::Result;
use crate::records::{build_record, lottery_id_of, ProjectRecord};
use crate::report::{
    city_rows, project_rows, report_path, write_report, CITIES_PREFIX, PROJECTS_PREFIX,
};
use crate::stats::{ranked_cities, ranked_projects};

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub projects_path: PathBuf,
    pub cities_path: PathBuf,
    pub projects: usize,
    pub cities: usize,
    /// Projects whose win chance is undefined
    pub undefined_projects: usize,
}

/// Fetch the project list, then each lottery in turn, and build one record
/// per project. Stops at the first error.
pub async fn collect_records<S: LotterySource>(
    source: &S,
    sink: &dyn DiagnosticSink,
) -> Result<Vec<ProjectRecord>> {
    let raw_projects = source.fetch_project_list(sink).await?;

    let mut records = Vec::with_capacity(raw_projects.len());
    for (index, raw_project) in raw_projects.iter().enumerate() {
        let lottery_id = lottery_id_of(raw_project, index)?;
        let detail = source.fetch_lottery_detail(&lottery_id, sink).await?;
        records.push(build_record(&lottery_id, raw_project, &detail)?);
    }
    Ok(records)
}

/// Rank, format and write both reports into `out_dir`.
///
/// If the city report cannot be written the project report is removed again,
/// so a failed run leaves neither file.
pub fn write_reports(
    records: &[ProjectRecord],
    sink: &dyn DiagnosticSink,
    out_dir: &Path,
    stamp: &str,
) -> Result<RunSummary> {
    let projects = ranked_projects(records, sink);
    let cities = ranked_cities(records, sink);

    let projects_path = report_path(out_dir, PROJECTS_PREFIX, stamp);
    let cities_path = report_path(out_dir, CITIES_PREFIX, stamp);

    write_report(&projects_path, &project_rows(&projects))?;
    sink.emit(Diagnostic::ReportWritten {
        path: projects_path.display().to_string(),
        entries: projects.len(),
    });

    if let Err(e) = write_report(&cities_path, &city_rows(&cities)) {
        discard_partial(&projects_path, sink);
        return Err(e);
    }
    sink.emit(Diagnostic::ReportWritten {
        path: cities_path.display().to_string(),
        entries: cities.len(),
    });

    Ok(RunSummary {
        projects_path,
        cities_path,
        projects: projects.len(),
        cities: cities.len(),
        undefined_projects: projects
            .iter()
            .filter(|p| p.win_chance.is_undefined())
            .count(),
    })
}

/// Remove a report written by a run that then failed. A file that cannot be
/// removed is reported to the sink by path.
fn discard_partial(path: &Path, sink: &dyn DiagnosticSink) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => sink.emit(Diagnostic::PartialReportLeft {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

/// One full report run.
pub async fn run<S: LotterySource>(
    source: &S,
    sink: &dyn DiagnosticSink,
    out_dir: &Path,
    stamp: &str,
) -> Result<RunSummary> {
    let records = collect_records(source, sink).await?;
    write_reports(&records, sink, out_dir, stamp)
}
