use std::fs;
use std::path::PathBuf;

use triptych::{Config, LintContext, LintError, Linter, RunReport, Severity};

const CLEAN_NIX: &str = "\
# What: the worker toggle
# Does: switches the daemon on
# Why: this box only runs the queue worker
services.worker.enable = true; # always on here
";

const DIRTY_NIX: &str = "\
port = 8080;
host = \"0.0.0.0\";
";

// Helper building a small source tree to lint
fn sample_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();

    fs::write(root.join("clean.nix"), CLEAN_NIX).unwrap();
    fs::create_dir(root.join("nested")).unwrap();
    fs::write(root.join("nested/dirty.nix"), DIRTY_NIX).unwrap();
    fs::write(root.join("notes.txt"), "not a source file\n").unwrap();
    fs::create_dir(root.join(".git")).unwrap();
    fs::write(root.join(".git/ignored.nix"), DIRTY_NIX).unwrap();

    dir
}

fn file_names(report: &RunReport) -> Vec<String> {
    report
        .files
        .iter()
        .map(|f| {
            PathBuf::from(&f.file)
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Directory Walking
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_walk_finds_nested_sources_and_skips_hidden() {
    let dir = sample_tree();
    let linter = Linter::new(Config::default());
    let report = linter.check_paths(&[dir.path().to_path_buf()]).unwrap();

    assert_eq!(file_names(&report), vec!["clean.nix", "dirty.nix"]);
    // Unknown extensions inside a directory walk are ignored silently.
    assert!(report.skipped.is_empty());
}

#[test]
fn test_explicit_unknown_extension_is_reported() {
    let dir = sample_tree();
    let linter = Linter::new(Config::default());
    let report = linter
        .check_paths(&[dir.path().join("notes.txt")])
        .unwrap();

    assert!(report.files.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].reason, "unrecognized extension");
}

#[test]
fn test_missing_path_is_reported() {
    let linter = Linter::new(Config::default());
    let report = linter
        .check_paths(&[PathBuf::from("/no/such/path/anywhere")])
        .unwrap();

    assert!(report.files.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].reason.contains("no such file"));
}

// ═══════════════════════════════════════════════════════════════════════
// Findings and Pass/Fail
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_clean_file_passes_dirty_file_fails() {
    let dir = sample_tree();
    let linter = Linter::new(Config::default());
    let report = linter.check_paths(&[dir.path().to_path_buf()]).unwrap();

    let clean = &report.files[0];
    assert!(clean.is_clean(), "findings: {:?}", clean.diagnostics);

    let dirty = &report.files[1];
    // One missing header, two bare scalars.
    assert_eq!(dirty.diagnostics.len(), 3);

    assert!(!report.is_pass(Severity::Warning));
    assert!(report.is_pass(Severity::Error));
}

#[test]
fn test_fail_on_error_passes_warning_only_runs() {
    let dir = sample_tree();
    let config = Config::from_json(r#"{ "fail_on": "error" }"#).unwrap();
    let fail_on = config.fail_on;
    let linter = Linter::new(config);
    let report = linter.check_paths(&[dir.path().to_path_buf()]).unwrap();
    assert!(report.is_pass(fail_on));
}

// ═══════════════════════════════════════════════════════════════════════
// Parallelism and Interruption
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_parallel_and_serial_runs_agree() {
    let dir = sample_tree();
    // Enough files to actually exercise the thread pool.
    for i in 0..20 {
        fs::write(dir.path().join(format!("gen-{i:02}.nix")), DIRTY_NIX).unwrap();
    }
    let paths = vec![dir.path().to_path_buf()];

    let parallel = Linter::new(Config::default())
        .check_paths(&paths)
        .unwrap();
    let serial = Linter::new(Config::default())
        .with_context(LintContext::serial())
        .check_paths(&paths)
        .unwrap();

    assert_eq!(file_names(&parallel), file_names(&serial));
    for (a, b) in parallel.files.iter().zip(&serial.files) {
        assert_eq!(a.diagnostics, b.diagnostics, "mismatch in {}", a.file);
    }
}

#[test]
fn test_interrupted_run_aborts() {
    let dir = sample_tree();
    let ctx = LintContext::serial();
    ctx.interrupt();
    let linter = Linter::new(Config::default()).with_context(ctx);
    let err = linter
        .check_paths(&[dir.path().to_path_buf()])
        .unwrap_err();
    assert!(matches!(err, LintError::Interrupted));
}

// ═══════════════════════════════════════════════════════════════════════
// Shell Sources
// ═══════════════════════════════════════════════════════════════════════

#[cfg(feature = "shell")]
#[test]
fn test_shell_files_are_picked_up() {
    let dir = sample_tree();
    fs::write(
        dir.path().join("deploy.sh"),
        "#!/usr/bin/env bash\nset -euo pipefail\n\nRETRIES=3\n",
    )
    .unwrap();

    let linter = Linter::new(Config::default());
    let report = linter.check_paths(&[dir.path().to_path_buf()]).unwrap();
    assert!(file_names(&report).contains(&"deploy.sh".to_string()));

    let shell = report
        .files
        .iter()
        .find(|f| f.file.ends_with("deploy.sh"))
        .unwrap();
    // The bare RETRIES scalar has no inline comment.
    assert!(shell
        .diagnostics
        .iter()
        .any(|d| d.message.contains("`RETRIES`")));
}
