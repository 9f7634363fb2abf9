//! Convention rules
//!
//! Each commenting convention is one [`Rule`] implementation walking a
//! scanned [`SourceFile`] and emitting diagnostics. Rules are registered
//! in a [`RuleSet`] in a fixed order, which is also the order their
//! findings appear in within a line.

pub mod alternative;
pub mod block_comment;
pub mod inline_comment;
pub mod line_length;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::report::{Diagnostic, Severity};
use crate::source::SourceFile;

pub use alternative::Alternative;
pub use block_comment::BlockComment;
pub use inline_comment::InlineComment;
pub use line_length::LineLength;

/// Identifier of a rule, as shown in diagnostics and used in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId(pub &'static str);

impl RuleId {
    /// The identifier as a string slice.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for RuleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

/// Reserved id for scanner findings (unterminated constructs).
pub const SCAN: RuleId = RuleId("scan");

/// Trait for convention checks over a scanned file.
///
/// This is the core abstraction of the checker. Each convention from the
/// commenting guide implements this trait.
pub trait Rule: Send + Sync {
    /// Stable identifier, used in output and configuration.
    fn id(&self) -> RuleId;

    /// One-line description of the convention.
    fn description(&self) -> &'static str;

    /// Severity applied when configuration does not override it.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Walk the file and report violations.
    ///
    /// Diagnostics are emitted at the rule's default severity; the engine
    /// applies configured overrides afterwards.
    fn check(&self, file: &SourceFile, config: &Config) -> Vec<Diagnostic>;
}

/// Insertion-ordered registry of rules.
pub struct RuleSet {
    rules: IndexMap<RuleId, Arc<dyn Rule>>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn empty() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// Register a rule. Re-registering an id replaces the earlier rule.
    pub fn register(&mut self, rule: Arc<dyn Rule>) {
        self.rules.insert(rule.id(), rule);
    }

    /// Look up a rule by id string.
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Rule>> {
        self.rules.values().find(|r| r.id().as_str() == id)
    }

    /// Whether a rule id is registered (the reserved `scan` id counts).
    pub fn knows(&self, id: &str) -> bool {
        id == SCAN.as_str() || self.get(id).is_some()
    }

    /// Iterate rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Rule>> {
        self.rules.values()
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        let mut set = Self::empty();
        set.register(Arc::new(BlockComment));
        set.register(Arc::new(InlineComment));
        set.register(Arc::new(Alternative));
        set.register(Arc::new(LineLength));
        set
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}
