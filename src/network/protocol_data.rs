//! Sync Protocol Data - Pure DOP
//!
//! NO METHODS. Just data.
//! Wire shapes exchanged between the authority and its followers.

use serde::{Deserialize, Serialize};

/// One store entry on the wire. Identities travel as text and are resolved on arrival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockConfigRecord {
    pub block_identity: String,
    pub speed_multiplier: f64,
    pub damage_multiplier: f64,
    pub allow_native: bool,
    pub original_has_collision: bool,
    pub original_can_occlude: bool,
}

/// Target of an incremental change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncTarget {
    Block(String),
    Group(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SyncMessage {
    /// Full replacement of the receiver's store
    Snapshot { entries: Vec<BlockConfigRecord> },
    /// Configure a block or group on top of the receiver's store
    Add {
        target: SyncTarget,
        speed_multiplier: f64,
        damage_multiplier: f64,
        allow_native: bool,
    },
    /// Remove a block or every configured member of a group
    Remove { target: SyncTarget },
}

/// What actually goes over the wire. `version` is serialized first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncEnvelope {
    pub version: String,
    pub message: SyncMessage,
}

/// Transport-level peer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerId(pub u64);
