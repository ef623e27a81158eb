//! Shared fixtures for unit tests: a small registry, a scripted world and entity,
//! and a transport that records what it was asked to send.

use crate::network::{PeerId, SyncTransport};
use crate::error::PassableResult;
use crate::physics::{full_block, AABB};
use crate::redirection::DamageCause;
use crate::world::core::registry_operations::{
    create_block_registry, properties_for_material, register_block, register_group,
};
use crate::world::core::{BlockIdentity, BlockMaterial, BlockPos, BlockRegistryData, SoundEvent};
use crate::world::interfaces::{CollidingEntity, CollisionWorld, StatusEffect};
use cgmath::Vector3;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::{Arc, Mutex};

/// Registry with leaves, snow, a few solids and every structurally excluded material.
///
/// Groups: `minecraft:leaves` (oak, birch, spruce), `minecraft:beds` (red bed),
/// `minecraft:mixed` (bedrock, oak leaves, air) and the empty `minecraft:empty`.
pub fn sample_registry() -> BlockRegistryData {
    let mut registry = create_block_registry();
    let blocks = [
        ("minecraft:stone", BlockMaterial::Solid),
        ("minecraft:dirt", BlockMaterial::Solid),
        ("minecraft:oak_leaves", BlockMaterial::Leaves),
        ("minecraft:birch_leaves", BlockMaterial::Leaves),
        ("minecraft:spruce_leaves", BlockMaterial::Leaves),
        ("minecraft:snow_block", BlockMaterial::Snow),
        ("minecraft:snow", BlockMaterial::TopSnow),
        ("minecraft:grass", BlockMaterial::Plant),
        ("minecraft:air", BlockMaterial::Air),
        ("minecraft:fire", BlockMaterial::Fire),
        ("minecraft:piston", BlockMaterial::Piston),
        ("minecraft:bedrock", BlockMaterial::Solid),
        ("minecraft:red_bed", BlockMaterial::Solid),
    ];
    for (name, material) in blocks {
        register_block(&mut registry, name, properties_for_material(material)).expect("valid identity");
    }

    register_group(
        &mut registry,
        "minecraft:leaves",
        &["minecraft:oak_leaves", "minecraft:birch_leaves", "minecraft:spruce_leaves"],
    )
    .expect("valid identity");
    register_group(&mut registry, "minecraft:beds", &["minecraft:red_bed"]).expect("valid identity");
    register_group(
        &mut registry,
        "minecraft:mixed",
        &["minecraft:bedrock", "minecraft:oak_leaves", "minecraft:air"],
    )
    .expect("valid identity");
    register_group(&mut registry, "minecraft:empty", &[]).expect("valid identity");
    registry
}

/// World with full-cube shapes everywhere unless told otherwise
#[derive(Debug, Default)]
pub struct MockWorld {
    pub game_time: u64,
    pub authority: bool,
    pub empty_shapes: FxHashSet<BlockPos>,
    pub blocks: FxHashMap<BlockPos, (BlockIdentity, BlockMaterial)>,
    pub destroyed: Vec<(BlockPos, bool)>,
}

impl MockWorld {
    pub fn authority() -> Self {
        Self {
            authority: true,
            ..Default::default()
        }
    }

    pub fn follower() -> Self {
        Self::default()
    }

    pub fn set_block(&mut self, pos: BlockPos, id: BlockIdentity, material: BlockMaterial) {
        self.blocks.insert(pos, (id, material));
    }
}

impl CollisionWorld for MockWorld {
    fn game_time(&self) -> u64 {
        self.game_time
    }

    fn is_authority(&self) -> bool {
        self.authority
    }

    fn block_shape(&self, pos: BlockPos) -> Option<AABB> {
        if self.empty_shapes.contains(&pos) {
            None
        } else {
            Some(full_block())
        }
    }

    fn block_at(&self, pos: BlockPos) -> Option<(BlockIdentity, BlockMaterial)> {
        self.blocks.get(&pos).cloned()
    }

    fn destroy_block(&mut self, pos: BlockPos, drop_items: bool) -> bool {
        if self.blocks.remove(&pos).is_some() {
            self.destroyed.push((pos, drop_items));
            true
        } else {
            false
        }
    }
}

/// Entity that records every side effect applied to it
#[derive(Debug)]
pub struct MockEntity {
    pub bounds: AABB,
    pub fall_distance: f64,
    pub motion: Vector3<f64>,
    pub jumping: bool,
    pub effects: FxHashMap<StatusEffect, u32>,
    pub damage_immune: bool,
    pub passengers: usize,
    pub hurts: Vec<(DamageCause, f32)>,
    pub passenger_hurts: Vec<(DamageCause, f32)>,
    pub sounds: Vec<(SoundEvent, f32, f32)>,
}

impl MockEntity {
    pub fn at(bounds: AABB) -> Self {
        Self {
            bounds,
            fall_distance: 0.0,
            motion: Vector3::new(0.0, 0.0, 0.0),
            jumping: false,
            effects: FxHashMap::default(),
            damage_immune: false,
            passengers: 0,
            hurts: Vec::new(),
            passenger_hurts: Vec::new(),
            sounds: Vec::new(),
        }
    }
}

impl CollidingEntity for MockEntity {
    fn bounding_box(&self) -> AABB {
        self.bounds
    }

    fn fall_distance(&self) -> f64 {
        self.fall_distance
    }

    fn set_fall_distance(&mut self, distance: f64) {
        self.fall_distance = distance;
    }

    fn motion(&self) -> Vector3<f64> {
        self.motion
    }

    fn set_motion(&mut self, motion: Vector3<f64>) {
        self.motion = motion;
    }

    fn is_jumping(&self) -> bool {
        self.jumping
    }

    fn effect_amplifier(&self, effect: StatusEffect) -> Option<u32> {
        self.effects.get(&effect).copied()
    }

    fn is_damage_immune(&self) -> bool {
        self.damage_immune
    }

    fn hurt(&mut self, cause: &DamageCause, amount: f32) -> bool {
        self.hurts.push((*cause, amount));
        true
    }

    fn hurt_passengers(&mut self, cause: &DamageCause, amount: f32) {
        if self.passengers > 0 {
            self.passenger_hurts.push((*cause, amount));
        }
    }

    fn play_sound(&mut self, sound: &SoundEvent, volume: f32, pitch: f32) {
        self.sounds.push((sound.clone(), volume, pitch));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    All(Vec<u8>),
    Peer(PeerId, Vec<u8>),
}

impl Sent {
    pub fn payload(&self) -> &[u8] {
        match self {
            Sent::All(payload) | Sent::Peer(_, payload) => payload,
        }
    }
}

/// Clones share the same log, so a test can keep one after boxing another
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<Sent>>>,
}

impl RecordingTransport {
    pub fn take(&self) -> Vec<Sent> {
        self.sent.lock().map(|mut sent| std::mem::take(&mut *sent)).unwrap_or_default()
    }
}

impl SyncTransport for RecordingTransport {
    fn send_to_all(&mut self, payload: &[u8]) -> PassableResult<()> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(Sent::All(payload.to_vec()));
        }
        Ok(())
    }

    fn send_to_peer(&mut self, peer: PeerId, payload: &[u8]) -> PassableResult<()> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(Sent::Peer(peer, payload.to_vec()));
        }
        Ok(())
    }
}
