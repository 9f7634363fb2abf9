//! Linter configuration
//!
//! Configuration is loaded from a JSON file (conventionally
//! `triptych.json`) and layered over built-in defaults. Rules can be
//! disabled or re-leveled per id; everything else is a handful of knobs.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::report::Severity;
use crate::rules::{RuleId, RuleSet};

/// Per-rule override: disable it or change its severity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuleOverride {
    /// Whether the rule runs at all
    pub enabled: Option<bool>,

    /// Severity applied instead of the rule's default
    pub severity: Option<Severity>,
}

/// Linter configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum line width in characters
    pub max_line_length: usize,

    /// Code blocks with at least this many code lines need a block comment
    pub block_comment_min_lines: usize,

    /// Whether scalar assignments must carry inline comments
    pub require_inline_for_scalars: bool,

    /// Lowest severity that fails a run
    pub fail_on: Severity,

    /// Per-rule overrides, keyed by rule id
    pub rules: BTreeMap<String, RuleOverride>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_line_length: 100,
            block_comment_min_lines: 2,
            require_inline_for_scalars: true,
            fail_on: Severity::Warning,
            rules: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reject overrides naming rules the given set does not know.
    pub fn validate(&self, rules: &RuleSet) -> Result<(), ConfigError> {
        for name in self.rules.keys() {
            if !rules.knows(name) {
                return Err(ConfigError::UnknownRule { name: name.clone() });
            }
        }
        Ok(())
    }

    /// Whether a rule is enabled under this configuration.
    pub fn is_enabled(&self, id: RuleId) -> bool {
        self.rules
            .get(id.as_str())
            .and_then(|o| o.enabled)
            .unwrap_or(true)
    }

    /// The severity a rule's findings carry under this configuration.
    pub fn severity_for(&self, id: RuleId, default: Severity) -> Severity {
        self.rules
            .get(id.as_str())
            .and_then(|o| o.severity)
            .unwrap_or(default)
    }
}
