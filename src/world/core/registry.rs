//! Host lookup trait implementations for the in-memory registry mirror

use super::registry_data::{BlockFlagTable, BlockRegistryData};
use super::registry_operations::{get_registration, is_registered};
use super::{BlockFlags, BlockIdentity, BlockMaterial};
use crate::error::{PassableError, PassableResult};
use crate::world::interfaces::{FlagMutator, GroupLookup, RegistryLookup};

impl RegistryLookup for BlockRegistryData {
    fn contains_block(&self, id: &BlockIdentity) -> bool {
        is_registered(self, id)
    }

    fn material(&self, id: &BlockIdentity) -> Option<BlockMaterial> {
        get_registration(self, id).map(|r| r.properties.material)
    }

    fn block_identities(&self) -> Vec<BlockIdentity> {
        self.registration_order.clone()
    }
}

impl GroupLookup for BlockRegistryData {
    fn group_members(&self, group: &BlockIdentity) -> Option<Vec<BlockIdentity>> {
        self.groups.get(group).cloned()
    }

    fn group_identities(&self) -> Vec<BlockIdentity> {
        let mut groups: Vec<_> = self.groups.keys().cloned().collect();
        groups.sort();
        groups
    }
}

impl FlagMutator for BlockFlagTable {
    fn get_flags(&self, id: &BlockIdentity) -> Option<BlockFlags> {
        self.flags.get(id).copied()
    }

    fn set_flags(&mut self, id: &BlockIdentity, flags: BlockFlags) -> PassableResult<()> {
        match self.flags.get_mut(id) {
            Some(slot) => {
                *slot = flags;
                Ok(())
            }
            None => Err(PassableError::FlagMutationRejected {
                id: id.to_string(),
                reason: "block has no flag entry".to_string(),
            }),
        }
    }
}
