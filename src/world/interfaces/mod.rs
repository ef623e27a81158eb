//! Host interfaces for the passable terrain system
//!
//! The host engine owns the block registry, the per-block-type flags, the world
//! and its entities. This crate only ever talks to them through the traits below,
//! so a host plugs in by implementing them on thin adapters around its own types.
//!
//! All of these are called from the simulation thread only.

use crate::error::PassableResult;
use crate::physics::AABB;
use crate::redirection::DamageCause;
use crate::store::BlockConfig;
use crate::world::core::{BlockFlags, BlockIdentity, BlockMaterial, BlockPos, SoundEvent};
use cgmath::Vector3;

/// Read access to the host's block registry
pub trait RegistryLookup {
    /// Whether a block type with this identity is registered
    fn contains_block(&self, id: &BlockIdentity) -> bool;

    /// Material class of a registered block type
    fn material(&self, id: &BlockIdentity) -> Option<BlockMaterial>;

    /// Every registered block type
    fn block_identities(&self) -> Vec<BlockIdentity>;
}

/// Read access to the host's block groups (tags)
pub trait GroupLookup {
    /// Members of a group, `None` if the group does not exist
    fn group_members(&self, group: &BlockIdentity) -> Option<Vec<BlockIdentity>>;

    /// Every known group
    fn group_identities(&self) -> Vec<BlockIdentity>;
}

/// Capability to read and patch the engine-owned per-block-type flags
pub trait FlagMutator {
    /// Current flags of a block type, `None` if the host does not know it
    fn get_flags(&self, id: &BlockIdentity) -> Option<BlockFlags>;

    /// Overwrite the flags of a block type. The host may refuse.
    fn set_flags(&mut self, id: &BlockIdentity, flags: BlockFlags) -> PassableResult<()>;
}

/// Query side of the configuration store, as seen by the collision and pathfinding hooks
pub trait PassableLookup {
    fn passable_config(&self, id: &BlockIdentity) -> Option<&BlockConfig>;

    fn is_configured(&self, id: &BlockIdentity) -> bool {
        self.passable_config(id).is_some()
    }
}

/// Status effects the redirection consults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusEffect {
    JumpBoost,
    Levitation,
    SlowFalling,
}

/// The world an overlap happens in
pub trait CollisionWorld {
    /// Monotonic tick counter
    fn game_time(&self) -> u64;

    /// Whether this side owns world mutation (server side)
    fn is_authority(&self) -> bool;

    /// Outline of the block at `pos` in block-local coordinates, `None` when the shape is empty
    fn block_shape(&self, pos: BlockPos) -> Option<AABB>;

    /// Identity and material of the block at `pos`, `None` when the position is not loaded
    fn block_at(&self, pos: BlockPos) -> Option<(BlockIdentity, BlockMaterial)>;

    /// Destroy the block at `pos`, optionally dropping its harvest
    fn destroy_block(&mut self, pos: BlockPos, drop_items: bool) -> bool;
}

/// A living, physically simulated agent overlapping a block
pub trait CollidingEntity {
    fn bounding_box(&self) -> AABB;

    fn fall_distance(&self) -> f64;
    fn set_fall_distance(&mut self, distance: f64);

    fn motion(&self) -> Vector3<f64>;
    fn set_motion(&mut self, motion: Vector3<f64>);

    fn is_jumping(&self) -> bool;

    /// Amplifier of an active effect (0 for level I), `None` when inactive
    fn effect_amplifier(&self, effect: StatusEffect) -> Option<u32>;

    /// Creative mode or equivalent
    fn is_damage_immune(&self) -> bool;

    fn hurt(&mut self, cause: &DamageCause, amount: f32) -> bool;

    /// Apply damage to every carried passenger (direct and indirect), not to the entity itself
    fn hurt_passengers(&mut self, cause: &DamageCause, amount: f32);

    fn play_sound(&mut self, sound: &SoundEvent, volume: f32, pitch: f32);
}
