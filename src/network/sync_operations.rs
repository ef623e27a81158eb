//! Sync Session Operations - Pure DOP Functions
//!
//! The authority pushes full snapshots after every local compile and to each
//! newly connected peer, plus incremental changes for operator edits.
//! Followers apply whatever arrives, in arrival order, on the simulation thread.

use super::protocol_data::{PeerId, SyncMessage};
use super::protocol_operations::{add_message, decode_message, encode_message, message_kind, remove_message};
use super::protocol_operations::{rule_from_add, rule_target_from_sync_target};
use super::sync_data::{SyncRole, SyncSessionData, SyncState, SyncStats, SyncTransport};
use crate::error::PassableResult;
use crate::rules::{PassableRule, RuleTarget};
use crate::store::{self, PassableStoreData};
use crate::world::interfaces::{FlagMutator, GroupLookup, RegistryLookup};

/// Create a new sync session
pub fn create_sync_session(role: SyncRole, transport: Box<dyn SyncTransport>) -> SyncSessionData {
    SyncSessionData {
        role,
        state: SyncState::Uninitialized,
        transport,
        stats: SyncStats::default(),
    }
}

/// Record that the store now reflects a local compile
pub fn mark_synced(session: &mut SyncSessionData) {
    session.state = SyncState::Synced;
}

fn is_authority(session: &SyncSessionData) -> bool {
    session.role == SyncRole::Authority
}

/// Broadcast the full store. No-op on a follower.
pub fn push_snapshot<F>(session: &mut SyncSessionData, store: &PassableStoreData<F>) -> PassableResult<()> {
    if !is_authority(session) {
        return Ok(());
    }

    let payload = store::to_bytes(store)?;
    session.transport.send_to_all(&payload)?;
    session.stats.snapshots_sent += 1;

    log::info!(
        "[PassableSync] Sent snapshot with {} entries to all peers",
        store.entries.len()
    );
    Ok(())
}

/// Send the full store to a peer that just connected. No-op on a follower.
pub fn on_peer_connected<F>(
    session: &mut SyncSessionData,
    store: &PassableStoreData<F>,
    peer: PeerId,
) -> PassableResult<()> {
    if !is_authority(session) {
        return Ok(());
    }

    let payload = store::to_bytes(store)?;
    session.transport.send_to_peer(peer, &payload)?;
    session.stats.snapshots_sent += 1;

    log::info!("[PassableSync] Sent snapshot to peer {}", peer.0);
    Ok(())
}

/// Broadcast an incremental add. No-op on a follower.
pub fn push_add(session: &mut SyncSessionData, rule: &PassableRule) -> PassableResult<()> {
    push_change(session, &add_message(rule))
}

/// Broadcast an incremental removal. No-op on a follower.
pub fn push_remove(session: &mut SyncSessionData, target: &RuleTarget) -> PassableResult<()> {
    push_change(session, &remove_message(target))
}

fn push_change(session: &mut SyncSessionData, message: &SyncMessage) -> PassableResult<()> {
    if !is_authority(session) {
        return Ok(());
    }

    let payload = encode_message(message)?;
    session.transport.send_to_all(&payload)?;
    session.stats.changes_sent += 1;
    log::debug!("[PassableSync] Sent {} to all peers", message_kind(message));
    Ok(())
}

/// Apply a message received from the authority. Returns how many entries changed.
///
/// The authority ignores incoming messages; its store only follows its own settings.
pub fn apply_message<F: FlagMutator>(
    session: &mut SyncSessionData,
    store: &mut PassableStoreData<F>,
    message: SyncMessage,
    registry: &dyn RegistryLookup,
    groups: &dyn GroupLookup,
) -> PassableResult<usize> {
    if is_authority(session) {
        log::warn!(
            "[PassableSync] Authority ignoring received {}",
            message_kind(&message)
        );
        session.stats.messages_rejected += 1;
        return Ok(0);
    }

    let result = match &message {
        SyncMessage::Snapshot { entries } => {
            let applied = store::sync_from_records(store, entries, registry);
            session.state = SyncState::Synced;
            Ok(applied)
        }
        SyncMessage::Add {
            target,
            speed_multiplier,
            damage_multiplier,
            allow_native,
        } => rule_from_add(target, *speed_multiplier, *damage_multiplier, *allow_native)
            .and_then(|rule| store::add_target(store, &rule, registry, groups))
            .map(|configs| configs.len()),
        SyncMessage::Remove { target } => rule_target_from_sync_target(target)
            .and_then(|target| store::remove_target(store, &target, groups))
            .map(|configs| configs.len()),
    };

    match &result {
        Ok(changed) => {
            session.stats.messages_applied += 1;
            log::debug!(
                "[PassableSync] Applied {} ({} entries)",
                message_kind(&message),
                changed
            );
        }
        Err(e) => {
            session.stats.messages_rejected += 1;
            log::error!("[PassableSync] Could not apply {}: {}", message_kind(&message), e);
        }
    }
    result
}

/// Decode and apply a raw payload
pub fn apply_payload<F: FlagMutator>(
    session: &mut SyncSessionData,
    store: &mut PassableStoreData<F>,
    payload: &[u8],
    registry: &dyn RegistryLookup,
    groups: &dyn GroupLookup,
) -> PassableResult<usize> {
    let message = decode_message(payload).map_err(|e| {
        session.stats.messages_rejected += 1;
        log::error!("[PassableSync] Rejected payload: {}", e);
        e
    })?;
    apply_message(session, store, message, registry, groups)
}
