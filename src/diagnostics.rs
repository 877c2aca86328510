use std::sync::Mutex;

// Things worth telling the operator about while a run progresses.
// Components emit these; the sink decides where they go.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    // About to request the project list
    FetchingProjects { endpoint: String },

    // About to request one lottery's results
    FetchingLottery { lottery_id: String },

    // HTTP status line of the last request
    Status { endpoint: String, status: u16 },

    // Project list decoded
    ProjectsListed { count: usize },

    // A ratio divided by zero; the entry carries the undefined sentinel
    UndefinedChance { subject: Subject, name: String },

    // One report file persisted
    ReportWritten { path: String, entries: usize },

    // A report from a failed run could not be removed
    PartialReportLeft { path: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Project,
    City,
}

impl Subject {
    pub fn label(&self) -> &'static str {
        match self {
            Subject::Project => "lottery",
            Subject::City => "city",
        }
    }
}

/// Where components send their diagnostics.
pub trait DiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::FetchingProjects { endpoint } => {
                tracing::info!(%endpoint, "fetching metadata");
            }
            Diagnostic::FetchingLottery { lottery_id } => {
                tracing::info!(%lottery_id, "fetching data for lottery");
            }
            Diagnostic::Status { endpoint, status } => {
                tracing::info!(%endpoint, status, "response status");
            }
            Diagnostic::ProjectsListed { count } => {
                tracing::info!(count, "projects listed");
            }
            Diagnostic::UndefinedChance { subject, name } => {
                tracing::warn!(
                    subject = subject.label(),
                    %name,
                    "zero subscribers, win chance is undefined"
                );
            }
            Diagnostic::ReportWritten { path, entries } => {
                tracing::info!(%path, entries, "report written");
            }
            Diagnostic::PartialReportLeft { path, reason } => {
                tracing::warn!(%path, %reason, "run failed but this report could not be removed");
            }
        }
    }
}

/// Keeps every diagnostic in memory. Used by tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Names attached to `UndefinedChance` events, in emission order.
    pub fn undefined(&self, subject: Subject) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|d| match d {
                Diagnostic::UndefinedChance { subject: s, name } if s == subject => Some(name),
                _ => None,
            })
            .collect()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: Diagnostic) {
        if let Ok(mut events) = self.events.lock() {
            events.push(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.emit(Diagnostic::ProjectsListed { count: 2 });
        sink.emit(Diagnostic::UndefinedChance {
            subject: Subject::Project,
            name: "7".to_string(),
        });
        sink.emit(Diagnostic::UndefinedChance {
            subject: Subject::City,
            name: "Haifa".to_string(),
        });

        assert_eq!(sink.events().len(), 3);
        assert_eq!(sink.events()[0], Diagnostic::ProjectsListed { count: 2 });
        assert_eq!(sink.undefined(Subject::Project), vec!["7".to_string()]);
        assert_eq!(sink.undefined(Subject::City), vec!["Haifa".to_string()]);
    }
}
