//! Passable sync protocol
//!
//! Keeps every follower's store identical to the authority's.

pub mod inbox;
pub mod protocol_data;
pub mod protocol_operations;
pub mod sync_data;
pub mod sync_operations;

pub use inbox::{create_sync_inbox, drain_into, inbox_sender, pending, submit_message, submit_payload};
pub use inbox::{SyncInbox, SyncInboxSender};
pub use protocol_data::{BlockConfigRecord, PeerId, SyncEnvelope, SyncMessage, SyncTarget};
pub use protocol_operations::{
    add_message, config_from_record, decode_message, encode_message, message_kind, record_from_config,
    remove_message, rule_from_add, rule_target_from_sync_target, sync_target_from_rule_target,
};
pub use sync_data::{NullTransport, SyncRole, SyncSessionData, SyncState, SyncStats, SyncTransport};
pub use sync_operations::{
    apply_message, apply_payload, create_sync_session, mark_synced, on_peer_connected, push_add,
    push_remove, push_snapshot,
};
