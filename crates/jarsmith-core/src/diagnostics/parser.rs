//! Line grammar for javac's text output.

use crate::diagnostics::DiagnosticKind;

/// Classification of one line of javac output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `path:line: kind: message`
    Located {
        /// Source file as printed by javac.
        source: String,
        /// 1-based line number.
        line: u32,
        /// Diagnostic kind.
        kind: DiagnosticKind,
        /// First line of the message.
        message: String,
    },
    /// `kind: message` without a position.
    Unlocated {
        /// Diagnostic kind.
        kind: DiagnosticKind,
        /// First line of the message.
        message: String,
    },
    /// `N errors` / `N warnings` trailer.
    Summary,
    /// Caret marker under an echoed source line.
    Caret,
    /// Indented detail text, trimmed.
    Indented(String),
    /// Anything else that is not blank.
    Text(String),
    /// Blank line.
    Blank,
}

peg::parser! {
    /// Grammar for single lines of javac diagnostics output.
    pub grammar javac() for str {
        /// matches any sequence of 1 or more digits
        rule number() -> u32
            = n:$(['0'..='9']+) {? n.parse().or(Err("u32")) }

        /// matches spaces and tabs
        rule blank() = quiet!{[' ' | '\t']*}

        /// the `error:` / `warning:` / `Note:` label
        rule kind() -> DiagnosticKind
            = "error" { DiagnosticKind::Error }
            / "warning" { DiagnosticKind::Warning }
            / "Note" { DiagnosticKind::Note }
            / "note" { DiagnosticKind::Note }

        /// rest of the line
        rule message() -> String
            = m:$([_]*) { m.trim_end().to_string() }

        /// everything up to the `:<line>:` marker; allows drive letters
        rule source() -> String
            = s:$((!(":" number() ":") [_])+) { s.to_string() }

        /// parses `path:line: kind: message`
        pub rule located() -> Line
            = s:source() ":" l:number() ":" blank() k:kind() ":" blank() m:message()
            { Line::Located { source: s, line: l, kind: k, message: m } }

        /// parses `kind: message`
        pub rule unlocated() -> Line
            = k:kind() ":" blank() m:message()
            { Line::Unlocated { kind: k, message: m } }

        /// parses the `1 error` / `3 warnings` trailer
        pub rule summary() -> Line
            = number() " " ("errors" / "error" / "warnings" / "warning") blank() ![_]
            { Line::Summary }

        /// parses a caret marker line
        pub rule caret() -> Line
            = blank() "^" blank() ![_]
            { Line::Caret }

        rule indented() -> Line
            = [' ' | '\t']+ t:$([_]+)
            { Line::Indented(t.trim().to_string()) }

        rule blank_line() -> Line
            = blank() ![_]
            { Line::Blank }

        rule text() -> Line
            = t:$([_]+)
            { Line::Text(t.trim_end().to_string()) }

        /// classifies one line of output
        pub rule line() -> Line
            = blank_line() / summary() / caret() / located() / unlocated() / indented() / text()
    }
}

/// Classifies one line of javac output.
pub fn classify(line: &str) -> Line {
    let line = line.trim_end_matches('\r');
    javac::line(line).unwrap_or_else(|_| Line::Text(line.to_string()))
}
