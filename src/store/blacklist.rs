//! Blocks that may never become passable

use crate::world::core::BlockIdentity;
use crate::world::interfaces::RegistryLookup;
use rustc_hash::FxHashSet;

/// Always excluded, whatever the operator configures
pub const HARDCODED_BLACKLIST: &[&str] = &[
    "minecraft:bedrock",
    "minecraft:end_portal_frame",
    "minecraft:hay_block",
    "minecraft:slime_block",
    "minecraft:honey_block",
    "minecraft:white_bed",
    "minecraft:orange_bed",
    "minecraft:magenta_bed",
    "minecraft:light_blue_bed",
    "minecraft:yellow_bed",
    "minecraft:lime_bed",
    "minecraft:pink_bed",
    "minecraft:gray_bed",
    "minecraft:light_gray_bed",
    "minecraft:cyan_bed",
    "minecraft:purple_bed",
    "minecraft:blue_bed",
    "minecraft:brown_bed",
    "minecraft:green_bed",
    "minecraft:red_bed",
    "minecraft:black_bed",
];

/// Set of excluded block identities
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blacklist {
    pub ids: FxHashSet<BlockIdentity>,
}

impl Blacklist {
    pub fn contains(&self, id: &BlockIdentity) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Hardcoded list, every registered block of a structurally excluded material,
/// and the operator's extra entries that resolve to registered blocks.
pub fn compute_blacklist<R>(registry: &R, operator_entries: &[String]) -> Blacklist
where
    R: RegistryLookup + ?Sized,
{
    let mut ids: FxHashSet<BlockIdentity> = HARDCODED_BLACKLIST
        .iter()
        .filter_map(|entry| BlockIdentity::parse(entry).ok())
        .collect();

    for id in registry.block_identities() {
        if registry
            .material(&id)
            .map_or(false, |material| material.is_structurally_blacklisted())
        {
            ids.insert(id);
        }
    }

    for entry in operator_entries {
        match BlockIdentity::parse(entry.trim()) {
            Ok(id) if registry.contains_block(&id) => {
                ids.insert(id);
            }
            _ => {
                log::error!(
                    "[Blacklist] Unable to blacklist block {}: this block does not exist",
                    entry
                );
            }
        }
    }

    log::debug!("[Blacklist] {} blocks excluded", ids.len());
    Blacklist { ids }
}
