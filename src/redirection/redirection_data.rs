//! Redirection Data - Pure DOP
//!
//! NO METHODS. Just data.

use crate::world::core::{BlockIdentity, BlockMaterial, BlockSoundType};

/// Attributed cause of damage taken inside a passable block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DamageCause {
    /// The host's own fall damage
    Fall,
    FellIntoLeaves,
    PackedIntoSnow,
}

/// The block an entity overlaps, as the host resolved it
#[derive(Debug, Clone, PartialEq)]
pub struct CollidedBlock {
    pub identity: BlockIdentity,
    pub material: BlockMaterial,
    pub sound: BlockSoundType,
}

/// What the host should do after the redirection ran
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionOutcome {
    /// Skip the host's default collision routine
    pub cancel_native: bool,
    /// The shrunk entity box touched the block
    pub overlapped: bool,
    /// Damage dealt to the entity itself, 0 when none
    pub damage: f64,
    pub blocks_broken: usize,
}
