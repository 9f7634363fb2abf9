//! Lint run configuration
//!
//! Not the conventions themselves (see [`crate::config`]) but the
//! mechanics of a run: interruption, output caps, parallelism.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Configuration and state for a lint run.
///
/// This is passed through the engine and controls behavior like
/// diagnostic caps and interruption.
#[derive(Debug, Clone)]
pub struct LintContext {
    /// Maximum diagnostics kept per file (the rest are dropped)
    pub max_diagnostics: usize,

    /// Interrupt flag - set to true to abort a run between files
    pub interrupt: Arc<AtomicBool>,

    /// Whether to lint files on multiple threads
    pub parallel: bool,
}

impl Default for LintContext {
    fn default() -> Self {
        Self {
            max_diagnostics: 500,
            interrupt: Arc::new(AtomicBool::new(false)),
            parallel: true,
        }
    }
}

impl LintContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom per-file diagnostic cap.
    pub fn with_max_diagnostics(max: usize) -> Self {
        Self {
            max_diagnostics: max,
            ..Default::default()
        }
    }

    /// Create a context that lints files one at a time.
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }

    /// Check if the run has been interrupted.
    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }

    /// Request interruption of the run.
    pub fn interrupt(&self) {
        self.interrupt.store(true, Ordering::Relaxed);
    }

    /// Reset the interrupt flag.
    pub fn reset_interrupt(&self) {
        self.interrupt.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupt_round_trip() {
        let ctx = LintContext::new();
        assert!(!ctx.is_interrupted());
        ctx.interrupt();
        assert!(ctx.is_interrupted());
        ctx.reset_interrupt();
        assert!(!ctx.is_interrupted());
    }

    #[test]
    fn test_clone_shares_interrupt_flag() {
        let ctx = LintContext::new();
        let clone = ctx.clone();
        clone.interrupt();
        assert!(ctx.is_interrupted());
    }
}
