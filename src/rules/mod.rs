//! Passable rules: grammar, parsing and compilation into block configs

pub mod compiler_operations;
pub mod rule_data;
pub mod rule_operations;

pub use compiler_operations::{compile_rule, compile_rules, CompileContext};
pub use rule_data::{PassableRule, RuleDiagnostic, RuleTarget};
pub use rule_operations::{format_rule, parse_rule, parse_target, validate_rule};
