pub mod api;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod stats;

pub use error::{ReportError, Result};
