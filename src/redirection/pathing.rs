//! Navigation and visibility overrides for configured blocks

use crate::constants::pathing::PENALTY_FACTOR;
use crate::store::BlockConfig;
use crate::world::core::BlockIdentity;
use crate::world::interfaces::PassableLookup;

/// Land navigation treats configured blocks as open
pub fn is_walkable<L: PassableLookup + ?Sized>(lookup: &L, id: &BlockIdentity) -> bool {
    lookup.is_configured(id)
}

/// Extra path cost of moving through a configured block: `max(0, (1 / speed) * 2)`
pub fn path_penalty(config: &BlockConfig) -> f64 {
    ((1.0 / config.speed_multiplier()) * PENALTY_FACTOR).max(0.0)
}

/// Penalty for a block, `None` when it is not configured
pub fn path_penalty_for<L: PassableLookup + ?Sized>(lookup: &L, id: &BlockIdentity) -> Option<f64> {
    lookup.passable_config(id).map(path_penalty)
}

/// Configured blocks never suffocate an entity inside them
pub fn suppresses_suffocation<L: PassableLookup + ?Sized>(lookup: &L, id: &BlockIdentity) -> bool {
    lookup.is_configured(id)
}

/// Configured blocks never obstruct the camera
pub fn suppresses_view_blocking<L: PassableLookup + ?Sized>(lookup: &L, id: &BlockIdentity) -> bool {
    lookup.is_configured(id)
}

/// The host's answer, overridden to `false` for configured blocks
pub fn has_opaque_collision_shape<L: PassableLookup + ?Sized>(lookup: &L, id: &BlockIdentity, native: bool) -> bool {
    native && !lookup.is_configured(id)
}
