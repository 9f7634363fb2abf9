//! The lint engine
//!
//! [`Linter`] ties the pieces together: syntax lookup, scanning, rule
//! checking, and report assembly, over single sources, files, or whole
//! directory trees.

use dashmap::DashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::context::LintContext;
use crate::error::{LintError, Result};
use crate::report::{Diagnostic, FileReport, RunReport, Severity, Skipped};
use crate::rules::{RuleSet, SCAN};
use crate::scan::Scanner;
use crate::source::{SourceLocation, Unterminated};
use crate::syntax::{CommentSyntax, SyntaxRegistry};

/// The lint engine.
///
/// # Example
///
/// ```
/// use triptych::{Config, Linter};
/// use triptych::syntax::NixSyntax;
///
/// let linter = Linter::new(Config::default());
/// let report = linter.check_source("snippet.nix", "port = 8080;\n", &NixSyntax);
/// assert!(!report.is_clean());
/// ```
pub struct Linter {
    registry: SyntaxRegistry,
    rules: RuleSet,
    config: Config,
    ctx: LintContext,
}

impl Linter {
    /// Create a linter with the default syntaxes, rules, and context.
    pub fn new(config: Config) -> Self {
        Self {
            registry: SyntaxRegistry::default(),
            rules: RuleSet::default(),
            config,
            ctx: LintContext::default(),
        }
    }

    /// Replace the rule set.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Replace the syntax registry.
    pub fn with_registry(mut self, registry: SyntaxRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the lint context.
    pub fn with_context(mut self, ctx: LintContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The active rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The active syntax registry.
    pub fn registry(&self) -> &SyntaxRegistry {
        &self.registry
    }

    /// The active lint context.
    pub fn context(&self) -> &LintContext {
        &self.ctx
    }

    // ═══════════════════════════════════════════════════════════════════
    // Single Sources
    // ═══════════════════════════════════════════════════════════════════

    /// Lint one piece of source text under the given syntax.
    pub fn check_source(
        &self,
        name: &str,
        source: &str,
        syntax: &dyn CommentSyntax,
    ) -> FileReport {
        let file = Scanner::new(syntax).scan(name, source);
        let mut report = FileReport::new(name);

        if let Some(unterminated) = &file.unterminated {
            let (what, line) = match unterminated {
                Unterminated::BlockComment { line } => ("block comment", *line),
                Unterminated::String { line } => ("string", *line),
            };
            report.diagnostics.push(
                Diagnostic::new(
                    SCAN,
                    Severity::Error,
                    format!("unterminated {what} opened here"),
                )
                .with_location(SourceLocation::new(name, line, 1)),
            );
        }

        for rule in self.rules.iter() {
            if !self.config.is_enabled(rule.id()) {
                continue;
            }
            let severity = self.config.severity_for(rule.id(), rule.default_severity());
            for mut diag in rule.check(&file, &self.config) {
                diag.severity = severity;
                report.diagnostics.push(diag);
            }
        }

        report.sort();
        if report.diagnostics.len() > self.ctx.max_diagnostics {
            let dropped = report.diagnostics.len() - self.ctx.max_diagnostics;
            report.diagnostics.truncate(self.ctx.max_diagnostics);
            warn!(file = name, dropped, "diagnostic cap reached");
        }

        trace!(file = name, findings = report.diagnostics.len(), "checked");
        report
    }

    /// Lint one file from disk.
    ///
    /// Returns `Ok(None)` when no registered syntax claims the file's
    /// extension.
    pub fn check_file(&self, path: &Path) -> Result<Option<FileReport>> {
        let syntax = match self.registry.for_path(path) {
            Some(syntax) => syntax,
            None => return Ok(None),
        };
        let source = fs::read_to_string(path).map_err(|source| LintError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path.display().to_string();
        Ok(Some(self.check_source(&name, &source, syntax.as_ref())))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Files and Directory Trees
    // ═══════════════════════════════════════════════════════════════════

    /// Lint a set of paths: files directly, directories recursively.
    ///
    /// Directory walks skip hidden entries and files no syntax claims.
    /// Unreadable inputs become skip entries rather than failing the run.
    /// Returns [`LintError::Interrupted`] when the context's interrupt
    /// flag trips mid-run.
    pub fn check_paths(&self, paths: &[PathBuf]) -> Result<RunReport> {
        let (files, mut skipped) = self.collect_inputs(paths);
        debug!(files = files.len(), skipped = skipped.len(), "collected inputs");

        let mut reports = if self.ctx.parallel && files.len() > 1 {
            self.check_files_parallel(&files, &mut skipped)?
        } else {
            self.check_files_serial(&files, &mut skipped)?
        };

        reports.sort_by(|a, b| a.file.cmp(&b.file));
        skipped.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(RunReport {
            files: reports,
            skipped,
        })
    }

    fn collect_inputs(&self, paths: &[PathBuf]) -> (Vec<PathBuf>, Vec<Skipped>) {
        let mut files = Vec::new();
        let mut skipped = Vec::new();

        for path in paths {
            if path.is_file() {
                if self.registry.supports(path) {
                    files.push(path.clone());
                } else {
                    skipped.push(Skipped {
                        path: path.display().to_string(),
                        reason: "unrecognized extension".to_string(),
                    });
                }
                continue;
            }

            if !path.is_dir() {
                skipped.push(Skipped {
                    path: path.display().to_string(),
                    reason: "no such file or directory".to_string(),
                });
                continue;
            }

            let walk = WalkDir::new(path)
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));
            for entry in walk {
                match entry {
                    Ok(entry) => {
                        let p = entry.path();
                        if entry.file_type().is_file() && self.registry.supports(p) {
                            files.push(p.to_path_buf());
                        }
                    }
                    Err(err) => skipped.push(Skipped {
                        path: err
                            .path()
                            .map(|p| p.display().to_string())
                            .unwrap_or_else(|| path.display().to_string()),
                        reason: err.to_string(),
                    }),
                }
            }
        }

        files.sort();
        files.dedup();
        (files, skipped)
    }

    fn check_files_serial(
        &self,
        files: &[PathBuf],
        skipped: &mut Vec<Skipped>,
    ) -> Result<Vec<FileReport>> {
        let mut reports = Vec::with_capacity(files.len());
        for path in files {
            if self.ctx.is_interrupted() {
                return Err(LintError::Interrupted);
            }
            match self.check_file(path) {
                Ok(Some(report)) => reports.push(report),
                Ok(None) => {}
                Err(err) => skipped.push(Skipped {
                    path: path.display().to_string(),
                    reason: err.to_string(),
                }),
            }
        }
        Ok(reports)
    }

    fn check_files_parallel(
        &self,
        files: &[PathBuf],
        skipped: &mut Vec<Skipped>,
    ) -> Result<Vec<FileReport>> {
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(files.len());
        let cursor = AtomicUsize::new(0);
        let reports: DashMap<usize, FileReport> = DashMap::new();
        let failures: DashMap<usize, Skipped> = DashMap::new();
        debug!(workers, "linting in parallel");

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    if self.ctx.is_interrupted() {
                        break;
                    }
                    let i = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(path) = files.get(i) else {
                        break;
                    };
                    match self.check_file(path) {
                        Ok(Some(report)) => {
                            reports.insert(i, report);
                        }
                        Ok(None) => {}
                        Err(err) => {
                            failures.insert(
                                i,
                                Skipped {
                                    path: path.display().to_string(),
                                    reason: err.to_string(),
                                },
                            );
                        }
                    }
                });
            }
        });

        if self.ctx.is_interrupted() {
            return Err(LintError::Interrupted);
        }

        let mut out = Vec::with_capacity(reports.len());
        for i in 0..files.len() {
            if let Some((_, report)) = reports.remove(&i) {
                out.push(report);
            }
            if let Some((_, skip)) = failures.remove(&i) {
                skipped.push(skip);
            }
        }
        Ok(out)
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().map(|s| s.starts_with('.')).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::NixSyntax;

    #[test]
    fn test_check_source_applies_severity_override() {
        let config = Config::from_json(
            r#"{ "rules": { "inline-comment": { "severity": "info" } } }"#,
        )
        .unwrap();
        let linter = Linter::new(config);
        let report = linter.check_source("t.nix", "port = 8080;\n", &NixSyntax);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].severity, Severity::Info);
    }

    #[test]
    fn test_check_source_skips_disabled_rules() {
        let config =
            Config::from_json(r#"{ "rules": { "inline-comment": { "enabled": false } } }"#)
                .unwrap();
        let linter = Linter::new(config);
        let report = linter.check_source("t.nix", "port = 8080;\n", &NixSyntax);
        assert!(report.is_clean());
    }

    #[test]
    fn test_unterminated_construct_is_a_scan_error() {
        let linter = Linter::new(Config::default());
        let report = linter.check_source("t.nix", "/* never closed\n", &NixSyntax);
        assert_eq!(report.diagnostics[0].rule, SCAN);
        assert_eq!(report.diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn test_diagnostic_cap() {
        let source = "a = 1;\nb = 2;\nc = 3;\nd = 4;\n";
        let linter =
            Linter::new(Config::default()).with_context(LintContext::with_max_diagnostics(2));
        let report = linter.check_source("t.nix", source, &NixSyntax);
        assert_eq!(report.diagnostics.len(), 2);
    }
}
