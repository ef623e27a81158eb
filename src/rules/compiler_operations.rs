//! Rule compiler
//!
//! Turns operator rule strings into one `BlockConfig` per affected block type.
//! Precedence: block-form rules are applied before group-form rules and a
//! block already configured by a block-form rule is never overwritten by a
//! group. Among rules of the same form the last occurrence wins.

use super::rule_data::{PassableRule, RuleTarget};
use super::rule_operations::parse_rule;
use crate::error::{OptionExt, PassableError, PassableResult};
use crate::store::{check_multiplier, BlockConfig, Blacklist};
use crate::world::core::BlockIdentity;
use crate::world::interfaces::{FlagMutator, GroupLookup, RegistryLookup};
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;

/// Everything the compiler resolves rules against
pub struct CompileContext<'a> {
    pub blacklist: &'a Blacklist,
    pub registry: &'a dyn RegistryLookup,
    pub groups: &'a dyn GroupLookup,
    /// Source of the flags captured as each config's originals
    pub flags: &'a dyn FlagMutator,
}

/// Compile every rule string. Invalid or unresolvable rules are logged and skipped.
///
/// The result holds at most one config per block identity, sorted by identity.
pub fn compile_rules(rules: &[String], ctx: &CompileContext<'_>) -> Vec<BlockConfig> {
    let mut parsed: Vec<PassableRule> = Vec::with_capacity(rules.len());
    for rule in rules {
        match parse_rule(rule) {
            Ok(rule) => parsed.push(rule),
            Err(diagnostic) => log::error!("[RuleCompiler] {}", diagnostic),
        }
    }

    // stable: keeps the operator's order within each form
    parsed.sort_by_key(|rule| rule.target.precedence_rank());

    let mut compiled: BTreeMap<BlockIdentity, BlockConfig> = BTreeMap::new();
    let mut from_block_rule: FxHashSet<BlockIdentity> = FxHashSet::default();

    for rule in &parsed {
        let configs = match compile_rule(rule, ctx) {
            Ok(configs) => configs,
            Err(PassableError::NothingToApply { target }) => {
                log::warn!("[RuleCompiler] Rule for {} matches no configurable blocks", target);
                continue;
            }
            Err(e) => {
                log::error!("[RuleCompiler] Skipping rule {}: {}", rule.target, e);
                continue;
            }
        };

        for config in configs {
            let id = config.block_identity().clone();
            if rule.target.is_group() && from_block_rule.contains(&id) {
                log::debug!(
                    "[RuleCompiler] {} keeps its block rule over group {}",
                    id,
                    rule.target
                );
                continue;
            }
            if !rule.target.is_group() {
                from_block_rule.insert(id.clone());
            }
            compiled.insert(id, config);
        }
    }

    log::info!(
        "[RuleCompiler] Compiled {} rules into {} block configs",
        rules.len(),
        compiled.len()
    );
    compiled.into_values().collect()
}

/// Compile one parsed rule.
///
/// Fails when the target cannot produce any config: an unknown or blacklisted
/// block, an unknown group, a group with no eligible member, or a multiplier
/// outside (0.05, 1.0]. Ineligible group members are logged and skipped.
pub fn compile_rule(rule: &PassableRule, ctx: &CompileContext<'_>) -> PassableResult<Vec<BlockConfig>> {
    check_multiplier("speed_multiplier", rule.speed_multiplier)?;
    check_multiplier("damage_multiplier", rule.damage_multiplier)?;

    match &rule.target {
        RuleTarget::Block(id) => {
            if !ctx.registry.contains_block(id) {
                return Err(PassableError::UnknownBlock { id: id.to_string() });
            }
            if ctx.blacklist.contains(id) {
                return Err(PassableError::Blacklisted { id: id.to_string() });
            }
            let flags = ctx.flags.get_flags(id).ok_or_passable(|| PassableError::FlagMutationRejected {
                id: id.to_string(),
                reason: "host has no flags for this block".to_string(),
            })?;
            Ok(vec![BlockConfig::from_rule(id.clone(), rule, flags)?])
        }
        RuleTarget::Group(group) => {
            let members = ctx
                .groups
                .group_members(group)
                .ok_or_passable(|| PassableError::UnknownGroup { id: group.to_string() })?;

            let mut configs = Vec::with_capacity(members.len());
            for member in members {
                if ctx.blacklist.contains(&member) {
                    log::error!(
                        "[RuleCompiler] {} from group {} is blacklisted and stays solid",
                        member,
                        group
                    );
                    continue;
                }
                let Some(flags) = ctx.flags.get_flags(&member) else {
                    log::warn!("[RuleCompiler] No flags known for {}, skipping", member);
                    continue;
                };
                configs.push(BlockConfig::from_rule(member, rule, flags)?);
            }

            if configs.is_empty() {
                return Err(PassableError::NothingToApply {
                    target: rule.target.to_string(),
                });
            }
            Ok(configs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::compute_blacklist;
    use crate::test_support::sample_registry;
    use crate::world::core::registry_operations::create_flag_table;
    use crate::world::core::BlockFlags;

    fn id(value: &str) -> BlockIdentity {
        BlockIdentity::parse(value).expect("valid identity")
    }

    fn compile(rules: &[&str]) -> Vec<BlockConfig> {
        let registry = sample_registry();
        let flags = create_flag_table(&registry);
        let blacklist = compute_blacklist(&registry, &[]);
        let ctx = CompileContext {
            blacklist: &blacklist,
            registry: &registry,
            groups: &registry,
            flags: &flags,
        };
        let rules: Vec<String> = rules.iter().map(|r| r.to_string()).collect();
        compile_rules(&rules, &ctx)
    }

    fn find<'a>(configs: &'a [BlockConfig], value: &str) -> &'a BlockConfig {
        configs
            .iter()
            .find(|c| c.block_identity().as_str() == value)
            .expect("config present")
    }

    #[test]
    fn test_empty_input() {
        assert!(compile(&[]).is_empty());
    }

    #[test]
    fn test_group_expands_to_members() {
        let configs = compile(&["#minecraft:leaves[0.8, 0.6]"]);
        let ids: Vec<&str> = configs.iter().map(|c| c.block_identity().as_str()).collect();
        assert_eq!(
            ids,
            vec!["minecraft:birch_leaves", "minecraft:oak_leaves", "minecraft:spruce_leaves"]
        );
        assert!(configs.iter().all(|c| c.speed_multiplier() == 0.8 && !c.allow_native_handling()));
    }

    #[test]
    fn test_block_rule_beats_group_in_any_order() {
        for rules in [
            ["#minecraft:leaves[0.8, 0.6]", "minecraft:oak_leaves[0.75, 0.5, true]"],
            ["minecraft:oak_leaves[0.75, 0.5, true]", "#minecraft:leaves[0.8, 0.6]"],
        ] {
            let configs = compile(&rules);
            let oak = find(&configs, "minecraft:oak_leaves");
            assert_eq!(oak.speed_multiplier(), 0.75);
            assert_eq!(oak.damage_multiplier(), 0.5);
            assert!(oak.allow_native_handling());
            assert_eq!(find(&configs, "minecraft:birch_leaves").speed_multiplier(), 0.8);
        }
    }

    #[test]
    fn test_last_duplicate_wins() {
        let configs = compile(&["minecraft:snow[0.5, 0.5]", "minecraft:snow[0.9, 0.9]"]);
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].speed_multiplier(), 0.9);

        let configs = compile(&["#minecraft:leaves[0.5, 0.5]", "#minecraft:leaves[0.7, 0.7]"]);
        assert_eq!(find(&configs, "minecraft:spruce_leaves").speed_multiplier(), 0.7);
    }

    #[test]
    fn test_block_rules_hold_across_overlapping_groups() {
        let configs = compile(&[
            "#minecraft:leaves[0.8, 0.8]",
            "minecraft:oak_leaves[0.3, 0.3]",
            "#minecraft:mixed[0.6, 0.6]",
            "minecraft:birch_leaves[0.4, 0.4]",
            "minecraft:oak_leaves[0.2, 0.2]",
            "#minecraft:leaves[0.7, 0.7]",
        ]);
        assert_eq!(configs.len(), 3);
        assert_eq!(find(&configs, "minecraft:oak_leaves").speed_multiplier(), 0.2);
        assert_eq!(find(&configs, "minecraft:birch_leaves").speed_multiplier(), 0.4);
        assert_eq!(find(&configs, "minecraft:spruce_leaves").speed_multiplier(), 0.7);
    }

    #[test]
    fn test_blacklisted_never_compiled() {
        let configs = compile(&[
            "minecraft:bedrock[0.5, 0.5]",
            "#minecraft:beds[0.5, 0.5]",
            "minecraft:air[0.5, 0.5]",
        ]);
        assert!(configs.is_empty());

        // mixed group keeps its eligible members
        let configs = compile(&["#minecraft:mixed[0.5, 0.5]"]);
        let ids: Vec<&str> = configs.iter().map(|c| c.block_identity().as_str()).collect();
        assert_eq!(ids, vec!["minecraft:oak_leaves"]);
    }

    #[test]
    fn test_invalid_and_unknown_rules_skipped() {
        let configs = compile(&[
            "minecraft:oak_leaves",
            "minecraft:unknown_block[0.5, 0.5]",
            "#minecraft:unknown_group[0.5, 0.5]",
            "#minecraft:empty[0.5, 0.5]",
            "minecraft:snow[0.5, 0.5]",
        ]);
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].block_identity(), &id("minecraft:snow"));
    }

    #[test]
    fn test_out_of_range_multipliers_skipped() {
        let configs = compile(&[
            "minecraft:snow[0, 0.5]",
            "minecraft:oak_leaves[0.5, 1.5]",
            "minecraft:birch_leaves[0.05, 0.5]",
            "minecraft:spruce_leaves[1, 1]",
        ]);
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].block_identity(), &id("minecraft:spruce_leaves"));
    }

    #[test]
    fn test_originals_captured_from_flags() {
        let configs = compile(&["minecraft:snow[0.5, 0.5]", "minecraft:stone[0.5, 0.5]"]);
        assert_eq!(
            find(&configs, "minecraft:snow").original_flags(),
            BlockFlags {
                has_collision: true,
                can_occlude: false
            }
        );
        assert_eq!(find(&configs, "minecraft:stone").original_flags(), BlockFlags::SOLID);
    }

    #[test]
    fn test_compile_rule_errors() {
        let registry = sample_registry();
        let flags = create_flag_table(&registry);
        let blacklist = compute_blacklist(&registry, &[]);
        let ctx = CompileContext {
            blacklist: &blacklist,
            registry: &registry,
            groups: &registry,
            flags: &flags,
        };

        let rule = parse_rule("minecraft:bedrock[0.5, 0.5]").expect("valid");
        assert!(matches!(compile_rule(&rule, &ctx), Err(PassableError::Blacklisted { .. })));

        let rule = parse_rule("#minecraft:nope[0.5, 0.5]").expect("valid");
        assert!(matches!(compile_rule(&rule, &ctx), Err(PassableError::UnknownGroup { .. })));

        let rule = parse_rule("#minecraft:empty[0.5, 0.5]").expect("valid");
        assert!(matches!(compile_rule(&rule, &ctx), Err(PassableError::NothingToApply { .. })));

        let rule = parse_rule("minecraft:snow[2, 0.5]").expect("valid");
        assert!(matches!(
            compile_rule(&rule, &ctx),
            Err(PassableError::MultiplierOutOfRange { .. })
        ));
    }
}
