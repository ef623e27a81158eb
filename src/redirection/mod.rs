//! Collision redirection for passable blocks

pub mod pathing;
pub mod redirection_data;
pub mod redirection_operations;

pub use pathing::{
    has_opaque_collision_shape, is_walkable, path_penalty, path_penalty_for, suppresses_suffocation,
    suppresses_view_blocking,
};
pub use redirection_data::{CollidedBlock, CollisionOutcome, DamageCause};
pub use redirection_operations::{
    break_blocks_in, damped_motion, decayed_fall_distance, fall_damage, handle_collision, is_moving,
    jump_bonus, on_entity_inside,
};
