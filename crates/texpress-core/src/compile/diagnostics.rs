//! Diagnostics reported by a failed compilation.

use std::fmt;
use std::process::ExitStatus;

/// Where the diagnostic text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSource {
    /// The engine's own `.log` file.
    LogFile,
    /// Captured stdout followed by stderr.
    ProcessOutput,
    /// Neither source had any text; the exit status was described instead.
    ExitStatus,
}

/// Coarse classification of a compiler failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Missing delimiters or undefined control sequences.
    Syntax,
    /// The engine gave up (`Emergency stop`, `Fatal error`).
    Fatal,
    /// A `\usepackage` could not be satisfied.
    MissingPackage,
    /// The document class is missing or wrong.
    DocumentClass,
    Other,
}

impl DiagnosticKind {
    /// Classify diagnostic text. Checks apply in declaration order.
    pub fn classify(text: &str) -> Self {
        if text.contains("Missing") || text.contains("Undefined") {
            Self::Syntax
        } else if text.contains("Emergency stop") || text.contains("Fatal error") {
            Self::Fatal
        } else if text.contains("Package") {
            Self::MissingPackage
        } else if text.contains("documentclass") {
            Self::DocumentClass
        } else {
            Self::Other
        }
    }

    /// One-line advice for the author of the document.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Syntax => "check the LaTeX syntax, especially math delimiters and command names",
            Self::Fatal => "the engine stopped early; fix the first reported error and retry",
            Self::MissingPackage => "a required package may not be installed on the server",
            Self::DocumentClass => "make sure the document starts with a valid \\documentclass",
            Self::Other => "compile the document locally to inspect the full log",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Syntax => "syntax",
            Self::Fatal => "fatal",
            Self::MissingPackage => "missing-package",
            Self::DocumentClass => "document-class",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Diagnostic text for a failed compilation.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Text returned verbatim to the caller
    pub text: String,

    pub source: DiagnosticSource,

    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Pick the diagnostic text for a failed run.
    ///
    /// `log` is `None` when the log file was missing or unreadable. A log with
    /// any non-blank text wins over the captured process output; a blank log
    /// falls through to the output. If both are blank the exit status is
    /// described instead.
    pub fn collect(log: Option<&[u8]>, process_output: &str, status: ExitStatus) -> Self {
        let log_text = log.map(|bytes| String::from_utf8_lossy(bytes).into_owned());

        if let Some(text) = log_text.filter(|text| !text.trim().is_empty()) {
            return Self::new(text, DiagnosticSource::LogFile);
        }
        if !process_output.trim().is_empty() {
            return Self::new(process_output.to_string(), DiagnosticSource::ProcessOutput);
        }

        Self::new(
            format!("compiler exited with {status} and produced no diagnostics"),
            DiagnosticSource::ExitStatus,
        )
    }

    pub fn new(text: String, source: DiagnosticSource) -> Self {
        let kind = DiagnosticKind::classify(&text);
        Self { text, source, kind }
    }

    /// Errors reported in the text, in order of appearance.
    pub fn errors(&self) -> Vec<LogError> {
        parse_log_errors(&self.text)
    }

    /// The text cut to at most `max_chars` characters, with `...` when cut.
    pub fn summary(&self, max_chars: usize) -> String {
        match self.text.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &self.text[..idx]),
            None => self.text.clone(),
        }
    }
}

/// One `!` error from a TeX log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogError {
    /// Message after the leading `! `
    pub message: String,

    /// Source line from the following `l.<n>` marker
    pub line: Option<usize>,
}

/// Extract `!` errors and their `l.<n>` line markers from TeX output.
pub fn parse_log_errors(text: &str) -> Vec<LogError> {
    let mut errors: Vec<LogError> = Vec::new();

    for line in text.lines() {
        if let Some(message) = line.strip_prefix("! ") {
            errors.push(LogError {
                message: message.trim().to_string(),
                line: None,
            });
            continue;
        }

        let Some(current) = errors.last_mut() else {
            continue;
        };
        if current.line.is_some() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("l.") {
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            current.line = digits.parse().ok();
        }
    }

    errors
}
