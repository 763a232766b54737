//! JSON output formatter for machine-readable results.

use super::formatter::CompileOutcome;
use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use jarsmith_core::CreationReport;
use jarsmith_core::Diagnostic;
use jarsmith_core::DiagnosticKind;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

#[derive(Serialize)]
struct PackOutput {
    output_path: String,
    files_added: usize,
    directories_added: usize,
    bytes_written: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    compression_percentage: f64,
    files_skipped: usize,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl PackOutput {
    fn new(output_path: &Path, report: &CreationReport) -> Self {
        Self {
            output_path: output_path.display().to_string(),
            files_added: report.files_added,
            directories_added: report.directories_added,
            bytes_written: report.bytes_written,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            compression_percentage: report.compression_percentage(),
            files_skipped: report.files_skipped,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

#[derive(Serialize)]
struct CompileOutput<'a> {
    success: bool,
    output_dir: String,
    errors: usize,
    warnings: usize,
    diagnostics: &'a [Diagnostic],
    #[serde(skip_serializing_if = "Option::is_none")]
    jar: Option<PackOutput>,
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_pack_result(&self, output_path: &Path, report: &CreationReport) -> Result<()> {
        let output = JsonOutput::success("pack", PackOutput::new(output_path, report));
        Self::output(&output)
    }

    fn format_compile_result(&self, outcome: &CompileOutcome<'_>) -> Result<()> {
        let errors = outcome.count(|d| d.kind.is_error());
        let data = CompileOutput {
            success: outcome.success,
            output_dir: outcome.output_dir.display().to_string(),
            errors,
            warnings: outcome.count(|d| {
                matches!(
                    d.kind,
                    DiagnosticKind::Warning | DiagnosticKind::MandatoryWarning
                )
            }),
            diagnostics: outcome.diagnostics,
            jar: outcome
                .jar
                .map(|(path, report)| PackOutput::new(path, report)),
        };

        if outcome.success {
            Self::output(&JsonOutput::success("compile", data))
        } else {
            let message = format!("compilation failed with {errors} error(s)");
            Self::output(&JsonOutput::failure("compile", data, message))
        }
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("unknown", format!("{error:?}"));
        let _ = Self::output(&output);
    }

}
