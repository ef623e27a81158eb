//! Passable Store Operations - Pure DOP Functions
//!
//! Every insert patches the block type's flags to passable, every removal puts
//! back the flags captured when the block was first configured.

use super::blacklist::compute_blacklist;
use super::store_data::{PassableStoreData, SyncLocalReport};
use super::BlockConfig;
use crate::error::{OptionExt, PassableError, PassableResult};
use crate::network::{config_from_record, decode_message, encode_message, message_kind, record_from_config};
use crate::network::{BlockConfigRecord, SyncMessage};
use crate::rules::{compile_rule, compile_rules, CompileContext, PassableRule, RuleTarget};
use crate::world::core::{BlockFlags, BlockIdentity};
use crate::world::interfaces::{FlagMutator, GroupLookup, PassableLookup, RegistryLookup};
use rustc_hash::FxHashMap;

/// Create an empty store around the host's flag table
pub fn create_store<F: FlagMutator>(flags: F) -> PassableStoreData<F> {
    PassableStoreData {
        entries: FxHashMap::default(),
        blacklist: Default::default(),
        flags,
    }
}

/// Insert or replace a config and mark the block passable.
///
/// When the block is already configured the earlier captured flags are kept,
/// since the live flags are the overridden ones by now.
pub fn add<F: FlagMutator>(store: &mut PassableStoreData<F>, config: BlockConfig) -> Option<BlockConfig> {
    let id = config.block_identity().clone();
    let config = match store.entries.get(&id) {
        Some(previous) => config.with_original_flags(previous.original_flags()),
        None => config,
    };

    if let Err(e) = store.flags.set_flags(&id, BlockFlags::PASSABLE) {
        log::warn!("[PassableStore] Could not make {} passable: {}", id, e);
    }

    log::debug!("[PassableStore] Added {}", config);
    store.entries.insert(id, config)
}

/// Insert several configs, returning how many were new
pub fn add_all<F, I>(store: &mut PassableStoreData<F>, configs: I) -> usize
where
    F: FlagMutator,
    I: IntoIterator<Item = BlockConfig>,
{
    configs
        .into_iter()
        .map(|config| add(store, config))
        .filter(Option::is_none)
        .count()
}

/// Remove a block's config and restore its original flags
pub fn remove<F: FlagMutator>(store: &mut PassableStoreData<F>, id: &BlockIdentity) -> Option<BlockConfig> {
    let config = store.entries.remove(id)?;
    restore_flags(&mut store.flags, &config);
    log::debug!("[PassableStore] Removed {}", config);
    Some(config)
}

pub fn contains<F>(store: &PassableStoreData<F>, id: &BlockIdentity) -> bool {
    store.entries.contains_key(id)
}

pub fn get<'a, F>(store: &'a PassableStoreData<F>, id: &BlockIdentity) -> Option<&'a BlockConfig> {
    store.entries.get(id)
}

/// Remove every entry, restoring each block's flags. Returns how many were removed.
pub fn clear<F: FlagMutator>(store: &mut PassableStoreData<F>) -> usize {
    let mut drained: Vec<BlockConfig> = store.entries.drain().map(|(_, config)| config).collect();
    drained.sort();
    for config in &drained {
        restore_flags(&mut store.flags, config);
    }
    drained.len()
}

/// Recompute the blacklist from the registry and the operator's extra entries
pub fn refresh_blacklist<F>(
    store: &mut PassableStoreData<F>,
    registry: &dyn RegistryLookup,
    operator_blacklist: &[String],
) {
    store.blacklist = compute_blacklist(registry, operator_blacklist);
}

/// Rebuild the store from the operator's rules: refresh the blacklist, clear,
/// compile against the restored flags, then add every result.
pub fn sync_local<F: FlagMutator>(
    store: &mut PassableStoreData<F>,
    rules: &[String],
    operator_blacklist: &[String],
    registry: &dyn RegistryLookup,
    groups: &dyn GroupLookup,
) -> SyncLocalReport {
    refresh_blacklist(store, registry, operator_blacklist);
    let removed = clear(store);

    let configs = {
        let ctx = CompileContext {
            blacklist: &store.blacklist,
            registry,
            groups,
            flags: &store.flags,
        };
        compile_rules(rules, &ctx)
    };
    let added = add_all(store, configs);

    log::info!(
        "[PassableStore] Local sync: {} removed, {} passable blocks",
        removed,
        added
    );
    SyncLocalReport { removed, added }
}

/// Replace the store's contents with records received from the authority.
///
/// Records naming blocks this side does not know, or carrying out-of-range
/// multipliers, are dropped with an error. Returns how many were applied.
pub fn sync_from_records<F: FlagMutator>(
    store: &mut PassableStoreData<F>,
    records: &[BlockConfigRecord],
    registry: &dyn RegistryLookup,
) -> usize {
    clear(store);

    let mut applied = 0;
    for record in records {
        match config_from_record(record, registry) {
            Ok(config) => {
                add(store, config);
                applied += 1;
            }
            Err(e) => log::error!("[PassableStore] Dropping received entry {}: {}", record.block_identity, e),
        }
    }

    log::info!("[PassableStore] Applied {} of {} received entries", applied, records.len());
    applied
}

/// Snapshot of the store as wire records, sorted by identity
pub fn to_records<F>(store: &PassableStoreData<F>) -> Vec<BlockConfigRecord> {
    let mut configs: Vec<&BlockConfig> = store.entries.values().collect();
    configs.sort();
    configs.into_iter().map(record_from_config).collect()
}

/// Serialize the whole store as a versioned snapshot payload
pub fn to_bytes<F>(store: &PassableStoreData<F>) -> PassableResult<Vec<u8>> {
    encode_message(&SyncMessage::Snapshot {
        entries: to_records(store),
    })
}

/// Replace the store's contents with a snapshot payload
pub fn load_bytes<F: FlagMutator>(
    store: &mut PassableStoreData<F>,
    bytes: &[u8],
    registry: &dyn RegistryLookup,
) -> PassableResult<usize> {
    match decode_message(bytes)? {
        SyncMessage::Snapshot { entries } => Ok(sync_from_records(store, &entries, registry)),
        other => Err(PassableError::ProtocolError {
            message: format!("expected a snapshot, got {}", message_kind(&other)),
        }),
    }
}

/// Build a new store from a snapshot payload
pub fn from_bytes<F: FlagMutator>(
    bytes: &[u8],
    flags: F,
    registry: &dyn RegistryLookup,
) -> PassableResult<PassableStoreData<F>> {
    let mut store = create_store(flags);
    load_bytes(&mut store, bytes, registry)?;
    Ok(store)
}

/// Human readable entries, sorted by identity
pub fn list<F>(store: &PassableStoreData<F>) -> Vec<String> {
    let mut configs: Vec<&BlockConfig> = store.entries.values().collect();
    configs.sort();
    configs.into_iter().map(ToString::to_string).collect()
}

/// Configure a single rule's target on top of the current entries
pub fn add_target<F: FlagMutator>(
    store: &mut PassableStoreData<F>,
    rule: &PassableRule,
    registry: &dyn RegistryLookup,
    groups: &dyn GroupLookup,
) -> PassableResult<Vec<BlockConfig>> {
    let configs = {
        let ctx = CompileContext {
            blacklist: &store.blacklist,
            registry,
            groups,
            flags: &store.flags,
        };
        compile_rule(rule, &ctx)?
    };

    for config in &configs {
        add(store, config.clone());
    }
    log::info!("[PassableStore] {} now configures {} blocks", rule.target, configs.len());
    Ok(configs)
}

/// Remove a block, or every configured member of a group
pub fn remove_target<F: FlagMutator>(
    store: &mut PassableStoreData<F>,
    target: &RuleTarget,
    groups: &dyn GroupLookup,
) -> PassableResult<Vec<BlockConfig>> {
    let candidates = match target {
        RuleTarget::Block(id) => vec![id.clone()],
        RuleTarget::Group(group) => groups
            .group_members(group)
            .ok_or_passable(|| PassableError::UnknownGroup { id: group.to_string() })?,
    };

    let removed: Vec<BlockConfig> = candidates.iter().filter_map(|id| remove(store, id)).collect();
    if removed.is_empty() {
        return Err(PassableError::NothingToApply {
            target: target.to_string(),
        });
    }

    log::info!("[PassableStore] Removed {} blocks for {}", removed.len(), target);
    Ok(removed)
}

/// Targets an operator could remove: configured blocks, then groups with a configured member
pub fn removal_suggestions<F>(store: &PassableStoreData<F>, groups: &dyn GroupLookup) -> Vec<String> {
    let mut blocks: Vec<&BlockIdentity> = store.entries.keys().collect();
    blocks.sort();

    let mut suggestions: Vec<String> = blocks.into_iter().map(ToString::to_string).collect();
    for group in groups.group_identities() {
        let has_configured_member = groups
            .group_members(&group)
            .map_or(false, |members| members.iter().any(|m| store.entries.contains_key(m)));
        if has_configured_member {
            suggestions.push(format!("#{}", group));
        }
    }
    suggestions
}

fn restore_flags<F: FlagMutator>(flags: &mut F, config: &BlockConfig) {
    if let Err(e) = flags.set_flags(config.block_identity(), config.original_flags()) {
        log::warn!(
            "[PassableStore] Could not restore flags of {}: {}",
            config.block_identity(),
            e
        );
    }
}

impl<F> PassableLookup for PassableStoreData<F> {
    fn passable_config(&self, id: &BlockIdentity) -> Option<&BlockConfig> {
        self.entries.get(id)
    }
}
