//! Sync Session Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in sync_operations.rs

use super::protocol_data::PeerId;
use crate::error::PassableResult;

/// Which side of the connection this session runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncRole {
    /// Compiles rules from its own settings and pushes the result
    Authority,
    /// Mirrors whatever the authority sends
    Follower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// Nothing compiled or received yet
    #[default]
    Uninitialized,
    /// Store reflects a local compile or a received snapshot
    Synced,
}

/// Outbound half of the host's networking
pub trait SyncTransport: Send {
    /// Broadcast to every connected follower
    fn send_to_all(&mut self, payload: &[u8]) -> PassableResult<()>;

    /// Send to one peer
    fn send_to_peer(&mut self, peer: PeerId, payload: &[u8]) -> PassableResult<()>;
}

/// Transport for sessions that never send (single player, followers)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTransport;

impl SyncTransport for NullTransport {
    fn send_to_all(&mut self, _payload: &[u8]) -> PassableResult<()> {
        Ok(())
    }

    fn send_to_peer(&mut self, _peer: PeerId, _payload: &[u8]) -> PassableResult<()> {
        Ok(())
    }
}

/// Statistics for sync handling
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub snapshots_sent: u64,
    pub changes_sent: u64,
    pub messages_applied: u64,
    pub messages_rejected: u64,
}

/// One side of the sync protocol
pub struct SyncSessionData {
    pub role: SyncRole,
    pub state: SyncState,
    pub transport: Box<dyn SyncTransport>,
    pub stats: SyncStats,
}
