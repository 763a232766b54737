//! Compiler diagnostics.
//!
//! javac reports problems as text on stderr. [`parse_javac_output`] turns
//! that text into [`Diagnostic`] values, and [`format_messages`] renders them
//! back into the one-line-per-diagnostic form used in reports.

pub mod parser;

use parser::Line;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Category of a compiler diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    /// Prevents compilation from succeeding.
    Error,
    /// Ordinary warning.
    Warning,
    /// Warning javac always reports, such as deprecation or unchecked use.
    MandatoryWarning,
    /// Informational note.
    Note,
    /// Output that could not be classified.
    Other,
}

impl DiagnosticKind {
    /// Returns the upper-case label used in formatted messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::MandatoryWarning => "MANDATORY_WARNING",
            Self::Note => "NOTE",
            Self::Other => "OTHER",
        }
    }

    /// Returns `true` for [`DiagnosticKind::Error`].
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message produced by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Category.
    pub kind: DiagnosticKind,
    /// Source file the diagnostic refers to, if any.
    pub source: Option<PathBuf>,
    /// 1-based line number, if any.
    pub line: Option<u32>,
    /// Message text; detail lines are joined with `\n`.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic without a position.
    #[must_use]
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            source: None,
            line: None,
            message: message.into(),
        }
    }

    /// Attaches a source file and line.
    #[must_use]
    pub fn at(mut self, source: impl Into<PathBuf>, line: u32) -> Self {
        self.source = Some(source.into());
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Diagnostic {
    /// `[KIND]:<source>:<line>: <message>`. The source is omitted when
    /// unknown and a missing line prints as `-1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]:", self.kind)?;
        if let Some(source) = &self.source {
            write!(f, "{}:", source.display())?;
        }
        match self.line {
            Some(line) => write!(f, "{line}: ")?,
            None => f.write_str("-1: ")?,
        }
        f.write_str(&self.message)
    }
}

/// Renders diagnostics one after another, each terminated by `\n`.
#[must_use]
pub fn format_messages(diagnostics: &[Diagnostic]) -> String {
    diagnostics.iter().map(|d| format!("{d}\n")).collect()
}

const MANDATORY_TAGS: &[&str] = &["[deprecation]", "[removal]", "[unchecked]", "[preview]"];

fn refine_kind(kind: DiagnosticKind, message: &str) -> DiagnosticKind {
    if kind == DiagnosticKind::Warning && MANDATORY_TAGS.iter().any(|t| message.starts_with(t)) {
        DiagnosticKind::MandatoryWarning
    } else {
        kind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between diagnostics.
    Idle,
    /// After a located header, skipping the echoed source line.
    Snippet,
    /// Collecting indented detail lines.
    Details,
}

/// Parses javac's text output into diagnostics, in output order.
///
/// Echoed source lines and caret markers are dropped. Indented lines that
/// follow a diagnostic are appended to its message. `N errors` trailers and
/// blank lines are ignored; any other unrecognized line becomes a
/// [`DiagnosticKind::Other`] diagnostic.
#[must_use]
pub fn parse_javac_output(output: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut current: Option<Diagnostic> = None;
    let mut state = State::Idle;

    for raw in output.lines() {
        match parser::classify(raw) {
            Line::Located {
                source,
                line,
                kind,
                message,
            } => {
                diagnostics.extend(current.take());
                let kind = refine_kind(kind, &message);
                current = Some(Diagnostic::new(kind, message).at(source, line));
                state = State::Snippet;
            }
            Line::Unlocated { kind, message } => {
                diagnostics.extend(current.take());
                let kind = refine_kind(kind, &message);
                current = Some(Diagnostic::new(kind, message));
                state = State::Details;
            }
            Line::Summary => {
                diagnostics.extend(current.take());
                state = State::Idle;
            }
            Line::Blank => {}
            Line::Caret if state == State::Snippet => state = State::Details,
            _ if state == State::Snippet => {}
            Line::Indented(detail) if state == State::Details => {
                if let Some(diagnostic) = current.as_mut() {
                    diagnostic.message.push('\n');
                    diagnostic.message.push_str(&detail);
                }
            }
            Line::Caret | Line::Indented(_) | Line::Text(_) => {
                diagnostics.extend(current.take());
                diagnostics.push(Diagnostic::new(DiagnosticKind::Other, raw.trim()));
                state = State::Idle;
            }
        }
    }

    diagnostics.extend(current);
    diagnostics
}
