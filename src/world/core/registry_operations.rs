//! Block Registry Operations - Pure DOP Functions
//!
//! No methods, no self, just transformations.

use super::registry_data::{BlockFlagTable, BlockProperties, BlockRegistration, BlockRegistryData};
use super::{BlockFlags, BlockIdentity, BlockMaterial, BlockSoundType};
use crate::error::PassableResult;

/// Create new block registry data
pub fn create_block_registry() -> BlockRegistryData {
    BlockRegistryData::default()
}

/// Default properties for a material: flags follow what the material usually implies
pub fn properties_for_material(material: BlockMaterial) -> BlockProperties {
    let default_flags = match material {
        BlockMaterial::Air
        | BlockMaterial::StructuralAir
        | BlockMaterial::BubbleColumn
        | BlockMaterial::Fire
        | BlockMaterial::Portal
        | BlockMaterial::Plant => BlockFlags::PASSABLE,
        // leaves and top snow collide but never hide their neighbours
        BlockMaterial::Leaves | BlockMaterial::TopSnow => BlockFlags {
            has_collision: true,
            can_occlude: false,
        },
        BlockMaterial::Snow | BlockMaterial::Piston | BlockMaterial::Solid => BlockFlags::SOLID,
    };

    BlockProperties {
        material,
        sound: BlockSoundType::default(),
        default_flags,
    }
}

/// Register a new block type with properties, replacing any earlier registration of the same identity
pub fn register_block(
    data: &mut BlockRegistryData,
    name: &str,
    properties: BlockProperties,
) -> PassableResult<BlockIdentity> {
    let id = BlockIdentity::parse(name)?;

    let registration = BlockRegistration {
        id: id.clone(),
        properties,
    };
    if data.blocks.insert(id.clone(), registration).is_some() {
        log::warn!("[BlockRegistry] Block '{}' registered twice, keeping the latest", id);
    } else {
        data.registration_order.push(id.clone());
    }

    log::debug!("[BlockRegistry] Registered block '{}'", id);
    Ok(id)
}

/// Register (or replace) a block group. Members that are not registered are skipped.
pub fn register_group(
    data: &mut BlockRegistryData,
    name: &str,
    members: &[&str],
) -> PassableResult<BlockIdentity> {
    let group = BlockIdentity::parse(name)?;

    let mut resolved = Vec::with_capacity(members.len());
    for member in members {
        match BlockIdentity::parse(member) {
            Ok(id) if data.blocks.contains_key(&id) => {
                if !resolved.contains(&id) {
                    resolved.push(id);
                }
            }
            Ok(id) => log::warn!(
                "[BlockRegistry] Group '{}' references unregistered block '{}'; skipping",
                group,
                id
            ),
            Err(e) => log::warn!("[BlockRegistry] Group '{}': {}; skipping", group, e),
        }
    }

    log::debug!(
        "[BlockRegistry] Registered group '{}' with {} members",
        group,
        resolved.len()
    );
    data.groups.insert(group.clone(), resolved);
    Ok(group)
}

/// Get a registration by identity
pub fn get_registration<'a>(
    data: &'a BlockRegistryData,
    id: &BlockIdentity,
) -> Option<&'a BlockRegistration> {
    data.blocks.get(id)
}

/// Check if a block identity is registered
pub fn is_registered(data: &BlockRegistryData, id: &BlockIdentity) -> bool {
    data.blocks.contains_key(id)
}

/// Build a live flag table seeded with every block's default flags
pub fn create_flag_table(data: &BlockRegistryData) -> BlockFlagTable {
    BlockFlagTable {
        flags: data
            .blocks
            .values()
            .map(|registration| (registration.id.clone(), registration.properties.default_flags))
            .collect(),
    }
}
