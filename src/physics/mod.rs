//! Physics Module - overlap geometry for the collision redirection

pub mod aabb;

pub use aabb::{
    aabb_block_positions, aabb_inflated, aabb_intersects, aabb_translated, create_aabb,
    full_block, AABB,
};
