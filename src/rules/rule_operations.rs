//! Rule grammar and validator
//!
//! ```text
//! [#]<namespace>:<path>[<speed>, <damage>[, <allow-native>]]
//! ```
//!
//! `speed` and `damage` are non-negative decimals, `allow-native` is `true` or
//! `false` in any case. Whitespace around brackets and commas is ignored.

use super::rule_data::{PassableRule, RuleDiagnostic, RuleTarget};
use crate::error::PassableResult;
use crate::world::core::BlockIdentity;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RULE_PATTERN: Regex = Regex::new(
        r"^\s*(?P<group>#)?(?P<id>[A-Za-z0-9_]+:[A-Za-z0-9_]+)\s*\[\s*(?P<speed>[0-9]+(?:\.[0-9]+)?)\s*,\s*(?P<damage>[0-9]+(?:\.[0-9]+)?)(?:\s*,\s*(?P<native>(?i:true|false)))?\s*\]\s*$"
    )
    .expect("[RuleGrammar] rule pattern must compile");
}

/// Check a rule string against the grammar
pub fn validate_rule(rule: &str) -> Result<(), RuleDiagnostic> {
    if RULE_PATTERN.is_match(rule) {
        Ok(())
    } else {
        Err(RuleDiagnostic::new(rule, diagnose(rule)))
    }
}

/// Validate and split a rule string into its parts
pub fn parse_rule(rule: &str) -> Result<PassableRule, RuleDiagnostic> {
    let captures = RULE_PATTERN
        .captures(rule)
        .ok_or_else(|| RuleDiagnostic::new(rule, diagnose(rule)))?;

    let id = BlockIdentity::parse(&captures["id"]).map_err(|e| RuleDiagnostic::new(rule, e.to_string()))?;
    let target = if captures.name("group").is_some() {
        RuleTarget::Group(id)
    } else {
        RuleTarget::Block(id)
    };

    let speed_multiplier = parse_decimal(rule, &captures["speed"])?;
    let damage_multiplier = parse_decimal(rule, &captures["damage"])?;
    // omitted means the host's own handling is suppressed
    let allow_native = captures
        .name("native")
        .map(|m| m.as_str().eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    Ok(PassableRule {
        target,
        speed_multiplier,
        damage_multiplier,
        allow_native,
    })
}

/// Parse a bare target, `namespace:path` or `#namespace:path`
pub fn parse_target(target: &str) -> PassableResult<RuleTarget> {
    let target = target.trim();
    Ok(match target.strip_prefix('#') {
        Some(group) => RuleTarget::Group(BlockIdentity::parse(group)?),
        None => RuleTarget::Block(BlockIdentity::parse(target)?),
    })
}

/// Canonical text form of a rule, accepted by `parse_rule`
pub fn format_rule(rule: &PassableRule) -> String {
    format!(
        "{}[{}, {}, {}]",
        rule.target, rule.speed_multiplier, rule.damage_multiplier, rule.allow_native
    )
}

fn parse_decimal(rule: &str, literal: &str) -> Result<f64, RuleDiagnostic> {
    literal
        .parse::<f64>()
        .map_err(|_| RuleDiagnostic::new(rule, format!("'{}' is not a decimal", literal)))
}

/// Best effort explanation of which part of a rule is malformed
fn diagnose(rule: &str) -> String {
    let trimmed = rule.trim();
    if trimmed.is_empty() {
        return "rule is empty".to_string();
    }

    let Some(open) = trimmed.find('[') else {
        return "missing value list, expected [speed, damage] or [speed, damage, allow-native]".to_string();
    };
    if !trimmed.ends_with(']') {
        return "value list is not closed with ']'".to_string();
    }

    let head = trimmed[..open].trim_end();
    let id = head.strip_prefix('#').unwrap_or(head);
    let mut parts = id.splitn(2, ':');
    let namespace = parts.next().unwrap_or_default();
    let path = parts.next().unwrap_or_default();
    let is_word = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !is_word(namespace) || !is_word(path) {
        return format!("'{}' is not a namespaced identifier (namespace:path)", head);
    }

    let values: Vec<&str> = trimmed[open + 1..trimmed.len() - 1].split(',').map(str::trim).collect();
    if values.len() < 2 || values.len() > 3 {
        return format!("expected 2 or 3 values, found {}", values.len());
    }
    for value in &values[..2] {
        let mut halves = value.splitn(2, '.');
        let whole = halves.next().unwrap_or_default();
        let fraction = halves.next();
        let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if !digits(whole) || fraction.map_or(false, |f| !digits(f)) {
            return format!("'{}' is not a non-negative decimal", value);
        }
    }
    if let Some(flag) = values.get(2) {
        if !flag.eq_ignore_ascii_case("true") && !flag.eq_ignore_ascii_case("false") {
            return format!("'{}' is not true or false", flag);
        }
    }

    "rule does not match [#]namespace:path[speed, damage(, allow-native)]".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_rules() {
        for rule in [
            "minecraft:oak_leaves[0.75, 0.6, true]",
            "#minecraft:leaves[0.8, 0.6]",
            "  #minecraft:leaves [ 0.8 ,0.6 , FALSE ]  ",
            "mod_2:block_3[1, 0]",
            "minecraft:snow[0.5,0.5,True]",
        ] {
            assert_eq!(validate_rule(rule), Ok(()), "{}", rule);
        }
    }

    #[test]
    fn test_invalid_rules_carry_diagnostic() {
        for rule in [
            "",
            "minecraft:oak_leaves",
            "oak_leaves[0.5, 0.5]",
            "minecraft:oak_leaves[0.5]",
            "minecraft:oak_leaves[0.5, 0.5, maybe]",
            "minecraft:oak_leaves[-0.5, 0.5]",
            "minecraft:oak_leaves[0.5, 0.5, true, 1]",
            "minecraft:oak_leaves[0.5, 0.5",
            "# minecraft:oak_leaves[0.5, 0.5]",
            "minecraft:oak/leaves[0.5, 0.5]",
            "minecraft:oak_leaves[.5, 0.5]",
            "##minecraft:leaves[0.5, 0.5]",
        ] {
            let diagnostic = validate_rule(rule).expect_err(rule);
            assert_eq!(diagnostic.rule, rule);
            assert!(!diagnostic.reason.is_empty());
            assert!(diagnostic.to_string().contains("Erroneous passable rule"));
        }
    }

    #[test]
    fn test_diagnostic_names_the_problem() {
        let d = validate_rule("minecraft:oak_leaves").expect_err("no values");
        assert!(d.reason.contains("missing value list"));

        let d = validate_rule("minecraft:oak_leaves[0.5, 0.5, maybe]").expect_err("bad flag");
        assert!(d.reason.contains("maybe"));

        let d = validate_rule("leaves[0.5, 0.5]").expect_err("no namespace");
        assert!(d.reason.contains("namespaced"));
    }

    #[test]
    fn test_parse_block_and_group() {
        let block = parse_rule("minecraft:oak_leaves[0.75, 0.6, TRUE]").expect("valid");
        assert_eq!(
            block.target,
            RuleTarget::Block(BlockIdentity::parse("minecraft:oak_leaves").expect("valid"))
        );
        assert_eq!(block.speed_multiplier, 0.75);
        assert_eq!(block.damage_multiplier, 0.6);
        assert!(block.allow_native);

        let group = parse_rule("#minecraft:leaves[0.8, 0.6]").expect("valid");
        assert!(group.target.is_group());
        assert_eq!(group.target.identity().as_str(), "minecraft:leaves");
        assert!(!group.allow_native);
    }

    #[test]
    fn test_parse_target() {
        assert!(parse_target(" #minecraft:leaves ").expect("valid").is_group());
        assert_eq!(
            parse_target("minecraft:snow").expect("valid").identity().as_str(),
            "minecraft:snow"
        );
        assert!(parse_target("snow").is_err());
    }

    #[test]
    fn test_format_round_trips_through_parse() {
        let rule = parse_rule(" #minecraft:leaves [0.8,0.25] ").expect("valid");
        let text = format_rule(&rule);
        assert_eq!(text, "#minecraft:leaves[0.8, 0.25, false]");
        assert_eq!(parse_rule(&text), Ok(rule));
    }
}
