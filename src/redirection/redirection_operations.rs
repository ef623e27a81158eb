//! Collision redirection
//!
//! Runs once per entity/block overlap for blocks that have a passable config.
//! Applies fall damage, breaks configured blocks beneath a hard landing, decays
//! the fall distance, plays step sounds and damps motion. Never blocks.

use super::redirection_data::{CollidedBlock, CollisionOutcome, DamageCause};
use crate::config::PassableSettings;
use crate::constants::breaking::BREAK_CHANCE;
use crate::constants::fall::{BREAK_PROBE_OFFSET, PASSENGER_DAMAGE_FACTOR, VANILLA_THRESHOLD};
use crate::constants::motion::{
    BREAK_SOUND_PITCH, ENTITY_SHRINK, STEP_SOUND_INTERVAL, STEP_SOUND_PITCH, VERTICAL_DEAD_ZONE,
};
use crate::constants::settings::MOD_NAMESPACE;
use crate::physics::{aabb_block_positions, aabb_inflated, aabb_intersects, aabb_translated, full_block};
use crate::store::BlockConfig;
use crate::world::core::{BlockMaterial, BlockPos};
use crate::world::interfaces::{CollidingEntity, CollisionWorld, PassableLookup, StatusEffect};
use cgmath::Vector3;
use rand::Rng;

impl DamageCause {
    /// Leaves impale, snow packs, everything else is a plain fall
    pub fn for_material(material: BlockMaterial) -> Self {
        match material {
            BlockMaterial::Leaves => DamageCause::FellIntoLeaves,
            m if m.is_snow() => DamageCause::PackedIntoSnow,
            _ => DamageCause::Fall,
        }
    }

    pub fn message_id(&self) -> &'static str {
        match self {
            DamageCause::Fall => "fall",
            DamageCause::FellIntoLeaves => "fallintoleaves",
            DamageCause::PackedIntoSnow => "fallintosnow",
        }
    }

    /// Translation key of the death message, `None` for the host's own fall cause
    pub fn death_message_key(&self) -> Option<String> {
        match self {
            DamageCause::Fall => None,
            _ => Some(format!("{}.death.{}", MOD_NAMESPACE, self.message_id())),
        }
    }

    /// English death message suffix following the victim's name
    pub fn default_message(&self) -> &'static str {
        match self {
            DamageCause::Fall => "hit the ground too hard",
            DamageCause::FellIntoLeaves => "fell into leaves and was impaled by branches",
            DamageCause::PackedIntoSnow => "got packed into a snowball",
        }
    }
}

/// Fall damage inside a passable block, may be zero or negative.
///
/// With a positive threshold: `(fall - (3 + threshold) * ((3 + jump) / 3)) * multiplier`.
/// A threshold of 0 or below falls back to the host's formula `fall - (3 + jump)`.
pub fn fall_damage(fall_distance: f64, damage_threshold: i32, jump_bonus: f64, damage_multiplier: f64) -> f64 {
    if damage_threshold <= 0 {
        return fall_distance - (VANILLA_THRESHOLD + jump_bonus);
    }
    (fall_distance - (VANILLA_THRESHOLD + damage_threshold as f64) * ((VANILLA_THRESHOLD + jump_bonus) / VANILLA_THRESHOLD))
        * damage_multiplier
}

/// Any horizontal motion, or vertical motion outside the dead zone
pub fn is_moving(motion: Vector3<f64>) -> bool {
    motion.x != 0.0 || motion.z != 0.0 || motion.y > VERTICAL_DEAD_ZONE || motion.y < -VERTICAL_DEAD_ZONE
}

/// Jumping keeps vertical motion and damps horizontal by `sqrt(speed)`
pub fn damped_motion(motion: Vector3<f64>, speed_multiplier: f64, jumping: bool) -> Vector3<f64> {
    if jumping {
        let horizontal = speed_multiplier.sqrt();
        Vector3::new(motion.x * horizontal, motion.y, motion.z * horizontal)
    } else {
        motion * speed_multiplier
    }
}

pub fn decayed_fall_distance(fall_distance: f64, speed_multiplier: f64) -> f64 {
    if fall_distance > VANILLA_THRESHOLD {
        fall_distance * speed_multiplier
    } else {
        0.0
    }
}

/// Jump boost level, 0 without the effect
pub fn jump_bonus<E: CollidingEntity + ?Sized>(entity: &E) -> f64 {
    entity
        .effect_amplifier(StatusEffect::JumpBoost)
        .map_or(0.0, |amplifier| f64::from(amplifier) + 1.0)
}

/// Redirect one overlap of `entity` with the configured block at `pos`
#[allow(clippy::too_many_arguments)]
pub fn handle_collision<W, E, L, R>(
    world: &mut W,
    pos: BlockPos,
    entity: &mut E,
    block: &CollidedBlock,
    config: &BlockConfig,
    lookup: &L,
    settings: &PassableSettings,
    rng: &mut R,
) -> CollisionOutcome
where
    W: CollisionWorld + ?Sized,
    E: CollidingEntity + ?Sized,
    L: PassableLookup + ?Sized,
    R: Rng + ?Sized,
{
    let mut outcome = CollisionOutcome {
        cancel_native: !config.allow_native_handling(),
        ..Default::default()
    };

    let entity_box = entity.bounding_box();
    let block_box = aabb_translated(&world.block_shape(pos).unwrap_or_else(full_block), pos.as_offset());
    if !aabb_intersects(&aabb_inflated(&entity_box, -ENTITY_SHRINK, 0.0, -ENTITY_SHRINK), &block_box) {
        return outcome;
    }
    outcome.overlapped = true;

    let sound = &block.sound;
    let fall_distance = entity.fall_distance();
    if fall_distance > VANILLA_THRESHOLD {
        entity.play_sound(&sound.break_sound, sound.volume, sound.pitch * BREAK_SOUND_PITCH);

        if fall_distance > VANILLA_THRESHOLD + f64::from(settings.damage_threshold) {
            let damage = fall_damage(
                fall_distance,
                settings.damage_threshold,
                jump_bonus(&*entity),
                config.damage_multiplier(),
            );
            if damage > 0.0 {
                let cause = DamageCause::for_material(block.material);
                entity.hurt(&cause, damage as f32);
                entity.hurt_passengers(&cause, (damage * PASSENGER_DAMAGE_FACTOR) as f32);
                outcome.damage = damage;
            }

            if may_break_blocks(&*world, &*entity, settings) {
                let probe = aabb_translated(&entity_box, Vector3::new(0.0, -BREAK_PROBE_OFFSET, 0.0));
                outcome.blocks_broken = break_blocks_in(world, &aabb_block_positions(&probe), lookup, rng);
            }
        }
    }

    let speed = config.speed_multiplier();
    entity.set_fall_distance(decayed_fall_distance(fall_distance, speed));

    let motion = entity.motion();
    if is_moving(motion) && world.game_time() % STEP_SOUND_INTERVAL == 0 {
        entity.play_sound(&sound.step_sound, sound.volume, sound.pitch * STEP_SOUND_PITCH);
    }
    entity.set_motion(damped_motion(motion, speed, entity.is_jumping()));

    log::trace!(
        "[Redirection] {} at {:?}: damage {:.2}, {} broken",
        block.identity,
        pos,
        outcome.damage,
        outcome.blocks_broken
    );
    outcome
}

/// Entry point for the host's "entity inside block" hook.
///
/// Blocks without a config leave the host's handling alone.
pub fn on_entity_inside<W, E, L, R>(
    world: &mut W,
    pos: BlockPos,
    entity: &mut E,
    block: &CollidedBlock,
    lookup: &L,
    settings: &PassableSettings,
    rng: &mut R,
) -> CollisionOutcome
where
    W: CollisionWorld + ?Sized,
    E: CollidingEntity + ?Sized,
    L: PassableLookup + ?Sized,
    R: Rng + ?Sized,
{
    match lookup.passable_config(&block.identity) {
        Some(config) => handle_collision(world, pos, entity, block, config, lookup, settings, rng),
        None => CollisionOutcome::default(),
    }
}

fn may_break_blocks<W, E>(world: &W, entity: &E, settings: &PassableSettings) -> bool
where
    W: CollisionWorld + ?Sized,
    E: CollidingEntity + ?Sized,
{
    world.is_authority()
        && settings.do_block_breaking
        && !entity.is_damage_immune()
        && entity.effect_amplifier(StatusEffect::Levitation).is_none()
        && entity.effect_amplifier(StatusEffect::SlowFalling).is_none()
}

/// Destroy each configured, non-air block in `positions` with chance 1 in `BREAK_CHANCE`
pub fn break_blocks_in<W, L, R>(world: &mut W, positions: &[BlockPos], lookup: &L, rng: &mut R) -> usize
where
    W: CollisionWorld + ?Sized,
    L: PassableLookup + ?Sized,
    R: Rng + ?Sized,
{
    let mut broken = 0;
    for &pos in positions {
        let Some((identity, material)) = world.block_at(pos) else {
            continue;
        };
        if material.is_air() || !lookup.is_configured(&identity) {
            continue;
        }
        if rng.gen_range(0..BREAK_CHANCE) == 0 && world.destroy_block(pos, true) {
            broken += 1;
        }
    }
    broken
}
