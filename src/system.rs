//! Passable system
//!
//! What a host holds on to: operator settings, the store with the host's flag
//! table, the sync session and the inbox fed by the network thread. Every method
//! runs on the simulation thread.

use crate::config::{sanitize_settings, validate_settings, PassableSettings};
use crate::error::PassableResult;
use crate::network::{
    create_sync_inbox, create_sync_session, drain_into, inbox_sender, mark_synced, on_peer_connected,
    push_add, push_remove, push_snapshot, PeerId, SyncInbox, SyncInboxSender, SyncRole, SyncSessionData,
    SyncState, SyncStats, SyncTransport,
};
use crate::redirection::{on_entity_inside, CollidedBlock, CollisionOutcome};
use crate::rules::{format_rule, parse_rule, parse_target};
use crate::store::{self, PassableStoreData, SyncLocalReport};
use crate::world::core::BlockPos;
use crate::world::interfaces::{CollidingEntity, CollisionWorld, FlagMutator, GroupLookup, RegistryLookup};
use rand::Rng;

pub struct PassableSystem<F> {
    settings: PassableSettings,
    store: PassableStoreData<F>,
    session: SyncSessionData,
    inbox: SyncInbox,
}

impl<F: FlagMutator> PassableSystem<F> {
    /// Create a system with an empty store. Call [`PassableSystem::reload`] to compile the settings.
    pub fn new(
        settings: PassableSettings,
        flags: F,
        role: SyncRole,
        transport: Box<dyn SyncTransport>,
        registry: &dyn RegistryLookup,
    ) -> Self {
        let settings = sanitize_settings(settings);
        let mut store = store::create_store(flags);
        store::refresh_blacklist(&mut store, registry, &settings.blacklist_blocks);

        log::info!("[PassableSystem] Created as {:?}", role);
        Self {
            settings,
            store,
            session: create_sync_session(role, transport),
            inbox: create_sync_inbox(),
        }
    }

    /// Recompile the store from the current settings and push it to every peer when authoritative.
    ///
    /// A follower that already holds the authority's state keeps it; the settings only
    /// take effect once it is back to compiling locally.
    pub fn reload(
        &mut self,
        registry: &dyn RegistryLookup,
        groups: &dyn GroupLookup,
    ) -> PassableResult<SyncLocalReport> {
        if self.session.role == SyncRole::Follower && self.session.state == SyncState::Synced {
            log::debug!("[PassableSystem] Follower keeps the authority's configuration, local reload skipped");
            return Ok(SyncLocalReport::default());
        }

        let report = store::sync_local(
            &mut self.store,
            &self.settings.passable_blocks,
            &self.settings.blacklist_blocks,
            registry,
            groups,
        );
        mark_synced(&mut self.session);
        push_snapshot(&mut self.session, &self.store)?;
        Ok(report)
    }

    /// Replace the settings and reload
    pub fn apply_settings(
        &mut self,
        settings: PassableSettings,
        registry: &dyn RegistryLookup,
        groups: &dyn GroupLookup,
    ) -> PassableResult<SyncLocalReport> {
        validate_settings(&settings)?;
        self.settings = sanitize_settings(settings);
        self.reload(registry, groups)
    }

    /// Handshake for a newly connected peer
    pub fn peer_connected(&mut self, peer: PeerId) -> PassableResult<()> {
        on_peer_connected(&mut self.session, &self.store, peer)
    }

    /// Configure one rule on top of the store. Returns how many blocks it now covers.
    pub fn admin_add(
        &mut self,
        rule: &str,
        registry: &dyn RegistryLookup,
        groups: &dyn GroupLookup,
    ) -> PassableResult<usize> {
        let rule = parse_rule(rule)?;
        let configs = store::add_target(&mut self.store, &rule, registry, groups)?;
        push_add(&mut self.session, &rule)?;

        log::info!("[PassableSystem] Added {} ({} blocks)", format_rule(&rule), configs.len());
        Ok(configs.len())
    }

    /// Remove a block or group target. Returns how many blocks were restored.
    pub fn admin_remove(&mut self, target: &str, groups: &dyn GroupLookup) -> PassableResult<usize> {
        let target = parse_target(target)?;
        let removed = store::remove_target(&mut self.store, &target, groups)?;
        push_remove(&mut self.session, &target)?;

        log::info!("[PassableSystem] Removed {} ({} blocks)", target, removed.len());
        Ok(removed.len())
    }

    pub fn admin_list(&self) -> Vec<String> {
        store::list(&self.store)
    }

    pub fn admin_removal_suggestions(&self, groups: &dyn GroupLookup) -> Vec<String> {
        store::removal_suggestions(&self.store, groups)
    }

    /// Handle for the network thread
    pub fn inbox_sender(&self) -> SyncInboxSender {
        inbox_sender(&self.inbox)
    }

    /// Apply everything the network thread queued since the last call
    pub fn drain_remote(&mut self, registry: &dyn RegistryLookup, groups: &dyn GroupLookup) -> usize {
        drain_into(&self.inbox, &mut self.session, &mut self.store, registry, groups)
    }

    /// Forward an entity/block overlap from the host's collision hook
    pub fn entity_inside<W, E, R>(
        &self,
        world: &mut W,
        pos: BlockPos,
        entity: &mut E,
        block: &CollidedBlock,
        rng: &mut R,
    ) -> CollisionOutcome
    where
        W: CollisionWorld + ?Sized,
        E: CollidingEntity + ?Sized,
        R: Rng + ?Sized,
    {
        on_entity_inside(world, pos, entity, block, &self.store, &self.settings, rng)
    }

    pub fn store(&self) -> &PassableStoreData<F> {
        &self.store
    }

    pub fn settings(&self) -> &PassableSettings {
        &self.settings
    }

    pub fn role(&self) -> SyncRole {
        self.session.role
    }

    pub fn sync_state(&self) -> SyncState {
        self.session.state
    }

    pub fn sync_stats(&self) -> &SyncStats {
        &self.session.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PassableError;
    use crate::network::{submit_payload, NullTransport};
    use crate::physics::create_aabb;
    use crate::test_support::{sample_registry, MockEntity, MockWorld, RecordingTransport};
    use crate::world::core::registry_operations::create_flag_table;
    use crate::world::core::{BlockFlagTable, BlockIdentity, BlockMaterial, BlockRegistryData, BlockSoundType};
    use cgmath::{Point3, Vector3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn authority(
        registry: &BlockRegistryData,
        transport: RecordingTransport,
    ) -> PassableSystem<BlockFlagTable> {
        PassableSystem::new(
            PassableSettings::default(),
            create_flag_table(registry),
            SyncRole::Authority,
            Box::new(transport),
            registry,
        )
    }

    fn follower(registry: &BlockRegistryData) -> PassableSystem<BlockFlagTable> {
        PassableSystem::new(
            PassableSettings {
                passable_blocks: Vec::new(),
                ..PassableSettings::default()
            },
            create_flag_table(registry),
            SyncRole::Follower,
            Box::new(NullTransport),
            registry,
        )
    }

    #[test]
    fn test_reload_compiles_and_pushes() {
        let registry = sample_registry();
        let transport = RecordingTransport::default();
        let mut system = authority(&registry, transport.clone());
        assert_eq!(system.sync_state(), SyncState::Uninitialized);

        let report = system.reload(&registry, &registry).expect("reloads");
        assert_eq!(report.added, 3);
        assert_eq!(system.sync_state(), SyncState::Synced);
        assert_eq!(transport.take().len(), 1);
        assert_eq!(system.sync_stats().snapshots_sent, 1);
    }

    #[test]
    fn test_apply_settings_rejects_bad_threshold() {
        let registry = sample_registry();
        let mut system = authority(&registry, RecordingTransport::default());
        let settings = PassableSettings {
            damage_threshold: 100,
            ..PassableSettings::default()
        };
        assert!(system.apply_settings(settings, &registry, &registry).is_err());
        assert_eq!(system.settings().damage_threshold, 7);
    }

    #[test]
    fn test_follower_converges_through_inbox() {
        let registry = sample_registry();
        let transport = RecordingTransport::default();
        let mut server = authority(&registry, transport.clone());
        let mut client = follower(&registry);

        server.reload(&registry, &registry).expect("reloads");
        server.peer_connected(PeerId(1)).expect("handshake");
        server.admin_add("minecraft:snow[0.5, 0.5, true]", &registry, &registry).expect("added");
        server.admin_remove("minecraft:birch_leaves", &registry).expect("removed");

        let sender = client.inbox_sender();
        for sent in transport.take() {
            submit_payload(&sender, sent.payload()).expect("queued");
        }
        assert_eq!(client.drain_remote(&registry, &registry), 4);

        assert_eq!(client.admin_list(), server.admin_list());
        assert_eq!(client.store().flags, server.store().flags);
        assert_eq!(client.sync_state(), SyncState::Synced);
    }

    #[test]
    fn test_synced_follower_reload_keeps_authority_state() {
        let registry = sample_registry();
        let transport = RecordingTransport::default();
        let mut server = authority(&registry, transport.clone());
        let mut client = PassableSystem::new(
            PassableSettings {
                passable_blocks: vec!["minecraft:snow[0.5, 0.5]".to_string()],
                ..PassableSettings::default()
            },
            create_flag_table(&registry),
            SyncRole::Follower,
            Box::new(NullTransport),
            &registry,
        );

        server.reload(&registry, &registry).expect("reloads");
        let sender = client.inbox_sender();
        for sent in transport.take() {
            submit_payload(&sender, sent.payload()).expect("queued");
        }
        client.drain_remote(&registry, &registry);
        assert_eq!(client.admin_list(), server.admin_list());

        let report = client.reload(&registry, &registry).expect("reloads");
        assert_eq!(report, SyncLocalReport::default());
        assert_eq!(client.admin_list(), server.admin_list());
        assert_eq!(client.store().flags, server.store().flags);

        let settings = PassableSettings {
            passable_blocks: vec!["minecraft:stone[0.5, 0.5]".to_string()],
            ..PassableSettings::default()
        };
        client.apply_settings(settings, &registry, &registry).expect("applied");
        assert_eq!(client.settings().passable_blocks, vec!["minecraft:stone[0.5, 0.5]".to_string()]);
        assert_eq!(client.admin_list(), server.admin_list());
        assert_eq!(client.sync_state(), SyncState::Synced);
    }

    #[test]
    fn test_unsynced_follower_reload_compiles_locally() {
        let registry = sample_registry();
        let mut client = PassableSystem::new(
            PassableSettings {
                passable_blocks: vec!["minecraft:snow[0.5, 0.5]".to_string()],
                ..PassableSettings::default()
            },
            create_flag_table(&registry),
            SyncRole::Follower,
            Box::new(NullTransport),
            &registry,
        );

        let report = client.reload(&registry, &registry).expect("reloads");
        assert_eq!(report.added, 1);
        assert_eq!(client.admin_list(), vec!["BlockConfig{minecraft:snow[0.5, 0.5, false]}".to_string()]);
    }

    #[test]
    fn test_admin_errors() {
        let registry = sample_registry();
        let mut system = authority(&registry, RecordingTransport::default());
        system.reload(&registry, &registry).expect("reloads");

        assert!(matches!(
            system.admin_add("minecraft:snow", &registry, &registry),
            Err(PassableError::InvalidRule { .. })
        ));
        assert!(system.admin_add("minecraft:bedrock[0.5, 0.5]", &registry, &registry).is_err());
        assert!(system.admin_remove("minecraft:stone", &registry).is_err());
        assert!(system
            .admin_removal_suggestions(&registry)
            .contains(&"#minecraft:leaves".to_string()));
    }

    #[test]
    fn test_entity_inside_uses_store_and_settings() {
        let registry = sample_registry();
        let mut system = authority(&registry, RecordingTransport::default());
        system.reload(&registry, &registry).expect("reloads");

        let mut world = MockWorld::authority();
        let mut entity = MockEntity::at(create_aabb(Point3::new(0.2, 0.5, 0.2), Point3::new(0.8, 2.3, 0.8)));
        entity.motion = Vector3::new(0.4, 0.0, 0.0);
        let block = CollidedBlock {
            identity: BlockIdentity::parse("minecraft:oak_leaves").expect("valid"),
            material: BlockMaterial::Leaves,
            sound: BlockSoundType::default(),
        };
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = system.entity_inside(&mut world, BlockPos::new(0, 0, 0), &mut entity, &block, &mut rng);
        assert!(outcome.cancel_native);
        assert!(outcome.overlapped);
        assert!((entity.motion.x - 0.32).abs() < 1e-12);
    }
}
