//! World Module
//!
//! - **Core**: block identities, flags, materials, positions and the in-memory registry
//! - **Interfaces**: the traits a host implements to plug its own world in

pub mod core;
pub mod interfaces;

pub use core::{BlockFlags, BlockIdentity, BlockMaterial, BlockPos, BlockSoundType, SoundEvent};
pub use interfaces::{
    CollidingEntity, CollisionWorld, FlagMutator, GroupLookup, PassableLookup, RegistryLookup,
    StatusEffect,
};
