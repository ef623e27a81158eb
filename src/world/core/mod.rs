//! Core world data types
//!
//! Block identities, positions, flags and the in-memory registry mirror
//! that implements the host lookup traits.

mod block;
mod position;
mod registry;
pub mod registry_data;
pub mod registry_operations;

pub use block::{BlockFlags, BlockIdentity, BlockMaterial, BlockSoundType, SoundEvent};
pub use position::BlockPos;
pub use registry_data::{BlockFlagTable, BlockProperties, BlockRegistration, BlockRegistryData};
