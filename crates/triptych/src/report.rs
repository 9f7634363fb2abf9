//! Diagnostics and reports
//!
//! Rules emit [`Diagnostic`]s; the engine gathers them into per-file
//! [`FileReport`]s and a whole-run [`RunReport`]. Reports render as
//! human-readable text or JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::str::FromStr;

use crate::rules::RuleId;
use crate::source::SourceLocation;

// ═══════════════════════════════════════════════════════════════════════
// SEVERITY
// ═══════════════════════════════════════════════════════════════════════

/// Diagnostic severity, ordered `Info < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory finding
    Info,

    /// Convention violation
    Warning,

    /// Broken input or configuration
    Error,
}

impl Severity {
    /// Lowercase name, as used in output and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!(
                "unsupported severity `{other}`; expected info|warning|error"
            )),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// DIAGNOSTICS
// ═══════════════════════════════════════════════════════════════════════

/// One finding from one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The rule that produced this finding
    pub rule: RuleId,

    /// Finding severity
    pub severity: Severity,

    /// Human-readable description
    pub message: String,

    /// Where the finding points, when it points anywhere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,

    /// Offending source text, for context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic with just a message.
    pub fn new(rule: RuleId, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule,
            severity,
            message: message.into(),
            location: None,
            snippet: None,
        }
    }

    /// Add location information to the diagnostic.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Add a source snippet for context.
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.rule, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " at {loc}")?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// REPORTS
// ═══════════════════════════════════════════════════════════════════════

/// All findings for one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// File name or identifier
    pub file: String,

    /// Findings, sorted by line then column
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    /// Create an empty report for a file.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            diagnostics: Vec::new(),
        }
    }

    /// Whether the file produced no findings.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Sort findings by position, unlocated findings first.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by_key(|d| {
            d.location
                .as_ref()
                .map(|l| (l.line, l.column))
                .unwrap_or((0, 0))
        });
    }

    /// Highest severity present, if any findings exist.
    pub fn max_severity(&self) -> Option<Severity> {
        self.diagnostics.iter().map(|d| d.severity).max()
    }
}

/// An input that was not linted, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct Skipped {
    /// The input path
    pub path: String,

    /// Why it was skipped
    pub reason: String,
}

/// Counts of findings by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of error findings
    pub errors: usize,

    /// Number of warning findings
    pub warnings: usize,

    /// Number of info findings
    pub infos: usize,
}

impl Summary {
    /// Total findings counted.
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.infos
    }
}

/// Results of a whole lint run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Per-file results, sorted by file name
    pub files: Vec<FileReport>,

    /// Inputs that were not linted
    pub skipped: Vec<Skipped>,
}

impl RunReport {
    /// Count findings by severity.
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for diag in self.files.iter().flat_map(|f| &f.diagnostics) {
            match diag.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.infos += 1,
            }
        }
        summary
    }

    /// Whether the run passes: no finding reaches `fail_on`.
    pub fn is_pass(&self, fail_on: Severity) -> bool {
        !self
            .files
            .iter()
            .flat_map(|f| &f.diagnostics)
            .any(|d| d.severity >= fail_on)
    }

    /// Number of files that produced findings.
    pub fn files_with_findings(&self) -> usize {
        self.files.iter().filter(|f| !f.is_clean()).count()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RENDERING
// ═══════════════════════════════════════════════════════════════════════

/// Render a run report as human-readable text.
pub fn render_text(report: &RunReport, out: &mut impl io::Write) -> io::Result<()> {
    for file in &report.files {
        if file.is_clean() {
            continue;
        }
        writeln!(out, "{}:", file.file)?;
        for diag in &file.diagnostics {
            writeln!(out, "  {diag}")?;
            if let Some(snippet) = &diag.snippet {
                writeln!(out, "    | {snippet}")?;
            }
        }
    }

    for skipped in &report.skipped {
        writeln!(out, "skipped {}: {}", skipped.path, skipped.reason)?;
    }

    let summary = report.summary();
    writeln!(
        out,
        "checked {} file(s), {} with findings: {} error(s), {} warning(s), {} info",
        report.files.len(),
        report.files_with_findings(),
        summary.errors,
        summary.warnings,
        summary.infos,
    )
}

/// Render a run report as JSON.
pub fn render_json(report: &RunReport, out: &mut impl io::Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}
