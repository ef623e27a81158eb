//! Passable Store Data - Pure DOP
//!
//! NO METHODS. Just data.

use super::{BlockConfig, Blacklist};
use crate::world::core::BlockIdentity;
use rustc_hash::FxHashMap;

/// Live set of passable block configs.
///
/// Owns the host's flag capability so every entry change and the matching
/// flag patch happen together. One store per side (authority or follower).
pub struct PassableStoreData<F> {
    /// At most one config per block identity
    pub entries: FxHashMap<BlockIdentity, BlockConfig>,

    /// Blocks that may never be configured
    pub blacklist: Blacklist,

    /// Host flag table
    pub flags: F,
}

/// Result of a local recompilation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncLocalReport {
    pub removed: usize,
    pub added: usize,
}
