//! Rule Data - Pure DOP
//!
//! Parsed passable rules. No behaviour beyond formatting.

use crate::world::core::BlockIdentity;
use std::fmt;

/// What a rule string points at, resolved once while parsing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleTarget {
    /// A single block type
    Block(BlockIdentity),
    /// Every member of a block group (`#` prefix)
    Group(BlockIdentity),
}

impl RuleTarget {
    pub fn identity(&self) -> &BlockIdentity {
        match self {
            RuleTarget::Block(id) | RuleTarget::Group(id) => id,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, RuleTarget::Group(_))
    }

    /// Processing order: blocks before groups
    pub(crate) fn precedence_rank(&self) -> u8 {
        match self {
            RuleTarget::Block(_) => 0,
            RuleTarget::Group(_) => 1,
        }
    }
}

impl fmt::Display for RuleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleTarget::Block(id) => write!(f, "{}", id),
            RuleTarget::Group(id) => write!(f, "#{}", id),
        }
    }
}

/// A syntactically valid rule. Multipliers are not range-checked yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PassableRule {
    pub target: RuleTarget,
    pub speed_multiplier: f64,
    pub damage_multiplier: f64,
    pub allow_native: bool,
}

/// Why a rule string was discarded
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Erroneous passable rule '{rule}': {reason}")]
pub struct RuleDiagnostic {
    pub rule: String,
    pub reason: String,
}

impl RuleDiagnostic {
    pub fn new(rule: &str, reason: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }
}
