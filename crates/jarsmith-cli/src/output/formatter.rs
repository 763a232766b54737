//! Output formatter trait for CLI results.

use anyhow::Result;
use jarsmith_core::CreationReport;
use jarsmith_core::Diagnostic;
use serde::Serialize;
use std::path::Path;

/// Result of a `compile` run, handed to the formatter.
pub struct CompileOutcome<'a> {
    pub success: bool,
    pub output_dir: &'a Path,
    pub diagnostics: &'a [Diagnostic],
    pub messages: String,
    /// Jar path and packing report when `--jar` was given and the build
    /// succeeded.
    pub jar: Option<(&'a Path, &'a CreationReport)>,
}

impl CompileOutcome<'_> {
    pub fn count(&self, pred: impl Fn(&Diagnostic) -> bool) -> usize {
        self.diagnostics.iter().filter(|&d| pred(d)).count()
    }
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format jar packing result
    fn format_pack_result(&self, output_path: &Path, report: &CreationReport) -> Result<()>;

    /// Format compilation result
    fn format_compile_result(&self, outcome: &CompileOutcome<'_>) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    /// Output with `data` attached but an error status.
    pub fn failure(operation: impl Into<String>, data: T, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: Some(data),
            error: Some(error.into()),
        }
    }

    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> JsonOutput<()> {
        JsonOutput {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
