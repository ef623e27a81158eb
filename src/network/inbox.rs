//! Hand-off from the network thread to the simulation thread
//!
//! The host's network callback decodes payloads into the inbox; the simulation
//! thread drains it once per tick. Messages are applied in arrival order.

use super::protocol_data::SyncMessage;
use super::protocol_operations::decode_message;
use super::sync_data::SyncSessionData;
use super::sync_operations::apply_message;
use crate::error::PassableResult;
use crate::store::PassableStoreData;
use crate::world::interfaces::{FlagMutator, GroupLookup, RegistryLookup};
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Receiving end, owned by the simulation thread
pub struct SyncInbox {
    sender: Sender<SyncMessage>,
    receiver: Receiver<SyncMessage>,
}

/// Sending end, cloned into network callbacks
#[derive(Clone)]
pub struct SyncInboxSender {
    sender: Sender<SyncMessage>,
}

pub fn create_sync_inbox() -> SyncInbox {
    let (sender, receiver) = unbounded::<SyncMessage>();
    SyncInbox { sender, receiver }
}

pub fn inbox_sender(inbox: &SyncInbox) -> SyncInboxSender {
    SyncInboxSender {
        sender: inbox.sender.clone(),
    }
}

/// Decode a payload and queue it. Decoding errors are returned to the network thread.
pub fn submit_payload(sender: &SyncInboxSender, payload: &[u8]) -> PassableResult<()> {
    let message = decode_message(payload)?;
    submit_message(sender, message)
}

pub fn submit_message(sender: &SyncInboxSender, message: SyncMessage) -> PassableResult<()> {
    sender.sender.send(message)?;
    Ok(())
}

pub fn pending(inbox: &SyncInbox) -> usize {
    inbox.receiver.len()
}

/// Apply every queued message. Returns how many were applied successfully.
pub fn drain_into<F: FlagMutator>(
    inbox: &SyncInbox,
    session: &mut SyncSessionData,
    store: &mut PassableStoreData<F>,
    registry: &dyn RegistryLookup,
    groups: &dyn GroupLookup,
) -> usize {
    let mut applied = 0;
    // the inbox keeps its own sender, so the channel never disconnects
    while let Ok(message) = inbox.receiver.try_recv() {
        if apply_message(session, store, message, registry, groups).is_ok() {
            applied += 1;
        }
    }
    applied
}
