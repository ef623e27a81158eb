//! Block Registry Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in registry_operations.rs

use super::{BlockFlags, BlockIdentity, BlockMaterial, BlockSoundType};
use rustc_hash::FxHashMap;

/// Static description of a block type
#[derive(Debug, Clone, PartialEq)]
pub struct BlockProperties {
    pub material: BlockMaterial,
    pub sound: BlockSoundType,
    /// Flags the block type starts with before any passable rule touches it
    pub default_flags: BlockFlags,
}

/// Block registration data
#[derive(Debug, Clone)]
pub struct BlockRegistration {
    pub id: BlockIdentity,
    pub properties: BlockProperties,
}

/// In-memory mirror of a host block registry and its groups
#[derive(Debug, Clone, Default)]
pub struct BlockRegistryData {
    /// Map from identity to registration
    pub blocks: FxHashMap<BlockIdentity, BlockRegistration>,
    /// Map from group identity to member identities
    pub groups: FxHashMap<BlockIdentity, Vec<BlockIdentity>>,
    /// Identities in registration order
    pub registration_order: Vec<BlockIdentity>,
}

/// Live per-block-type flags, the state a passable rule patches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockFlagTable {
    pub flags: FxHashMap<BlockIdentity, BlockFlags>,
}
