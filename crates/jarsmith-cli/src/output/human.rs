//! Human-readable output formatter with colors and styling.

use super::formatter::CompileOutcome;
use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use jarsmith_core::CreationReport;
use jarsmith_core::DiagnosticKind;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (i, c) in s.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }

    fn headline(&self, ok: bool, text: &str) {
        let line = match (self.use_colors, ok) {
            (true, true) => format!("{} {text}", style("✓").green().bold()),
            (true, false) => format!("{} {text}", style("✗").red().bold()),
            (false, _) => text.to_string(),
        };
        let _ = self.term.write_line(&line);
    }

    fn write_report(&self, report: &CreationReport) {
        let _ = self.term.write_line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        let _ = self.term.write_line(&format!(
            "  Directories:      {}",
            Self::format_number(report.directories_added)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_written)
        ));

        if report.bytes_compressed > 0 {
            let _ = self.term.write_line(&format!(
                "  Compressed size:  {}",
                Self::format_size(report.bytes_compressed)
            ));
            let _ = self.term.write_line(&format!(
                "  Compression:      {:.1}%",
                report.compression_percentage()
            ));
        }

        if report.files_skipped > 0 {
            let _ = self
                .term
                .write_line(&format!("  Files skipped:    {}", report.files_skipped));
        }

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));
        }

        if report.has_warnings() {
            let _ = self.term.write_line("");
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                let _ = self.term.write_line("Warnings:");
            }
            for warning in &report.warnings {
                let _ = self.term.write_line(&format!("  - {warning}"));
            }
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_pack_result(&self, output_path: &Path, report: &CreationReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(true, &format!("Jar created: {}", output_path.display()));
        let _ = self.term.write_line("");
        self.write_report(report);

        Ok(())
    }

    fn format_compile_result(&self, outcome: &CompileOutcome<'_>) -> Result<()> {
        // Diagnostics are shown even in quiet mode when the build failed.
        if !self.quiet || !outcome.success {
            let _ = self.term.write_str(&outcome.messages);
        }
        if self.quiet {
            return Ok(());
        }

        let errors = outcome.count(|d| d.kind == DiagnosticKind::Error);
        let warnings = outcome.count(|d| {
            matches!(
                d.kind,
                DiagnosticKind::Warning | DiagnosticKind::MandatoryWarning
            )
        });

        if outcome.success {
            self.headline(
                true,
                &format!("Compiled into {}", outcome.output_dir.display()),
            );
        } else {
            self.headline(false, "Compilation failed");
        }
        let _ = self
            .term
            .write_line(&format!("  Errors:           {errors}"));
        let _ = self
            .term
            .write_line(&format!("  Warnings:         {warnings}"));

        if let Some((jar, report)) = outcome.jar {
            let _ = self.term.write_line("");
            self.headline(true, &format!("Jar created: {}", jar.display()));
            self.write_report(report);
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:?}"));
        }
    }

}
