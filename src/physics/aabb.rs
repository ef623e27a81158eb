/// Data-Oriented Axis-Aligned Bounding Box System
///
/// Pure functions for overlap tests - no methods, just data transformations.
use crate::world::core::BlockPos;
use cgmath::{Point3, Vector3};

/// Axis-Aligned Bounding Box - pure data structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

/// Create new AABB from min/max points
pub fn create_aabb(min: Point3<f64>, max: Point3<f64>) -> AABB {
    AABB { min, max }
}

/// Unit cube in block-local coordinates
pub fn full_block() -> AABB {
    AABB {
        min: Point3::new(0.0, 0.0, 0.0),
        max: Point3::new(1.0, 1.0, 1.0),
    }
}

/// Test if two AABBs overlap. Boxes that only share a face do not.
pub fn aabb_intersects(aabb1: &AABB, aabb2: &AABB) -> bool {
    aabb1.min.x < aabb2.max.x && aabb1.max.x > aabb2.min.x &&
    aabb1.min.y < aabb2.max.y && aabb1.max.y > aabb2.min.y &&
    aabb1.min.z < aabb2.max.z && aabb1.max.z > aabb2.min.z
}

/// Grow (or with negative amounts, shrink) an AABB on each axis, on both sides
pub fn aabb_inflated(aabb: &AABB, x: f64, y: f64, z: f64) -> AABB {
    AABB {
        min: Point3::new(aabb.min.x - x, aabb.min.y - y, aabb.min.z - z),
        max: Point3::new(aabb.max.x + x, aabb.max.y + y, aabb.max.z + z),
    }
}

/// Create translated copy of AABB
pub fn aabb_translated(aabb: &AABB, offset: Vector3<f64>) -> AABB {
    AABB {
        min: aabb.min + offset,
        max: aabb.max + offset,
    }
}

/// Every block position touched by the AABB, corners included
pub fn aabb_block_positions(aabb: &AABB) -> Vec<BlockPos> {
    let lo = BlockPos::containing(aabb.min);
    let hi = BlockPos::containing(aabb.max);

    let mut positions = Vec::new();
    for x in lo.x..=hi.x {
        for y in lo.y..=hi.y {
            for z in lo.z..=hi.z {
                positions.push(BlockPos::new(x, y, z));
            }
        }
    }
    positions
}
