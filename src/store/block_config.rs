use crate::constants::multipliers::{CLAMP_FLOOR, MAX, MIN_EXCLUSIVE};
use crate::error::{PassableError, PassableResult};
use crate::rules::PassableRule;
use crate::world::core::{BlockFlags, BlockIdentity};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Compiled passable configuration of one block type.
///
/// Immutable once built. Equality, hashing and ordering look at the block
/// identity only, so a set or map of configs holds at most one per block.
/// Use [`BlockConfig::is_identical`] to compare every field.
#[derive(Debug, Clone)]
pub struct BlockConfig {
    block_identity: BlockIdentity,
    speed_multiplier: f64,
    damage_multiplier: f64,
    allow_native_handling: bool,
    original_has_collision: bool,
    original_can_occlude: bool,
}

impl BlockConfig {
    /// Build a config, clamping out-of-range multipliers.
    ///
    /// Debug builds assert that both multipliers are inside (0.05, 1.0].
    pub fn new(
        block_identity: BlockIdentity,
        speed_multiplier: f64,
        damage_multiplier: f64,
        allow_native_handling: bool,
        original_flags: BlockFlags,
    ) -> Self {
        debug_assert!(
            in_range(speed_multiplier),
            "speed multiplier {} out of range for {}",
            speed_multiplier,
            block_identity
        );
        debug_assert!(
            in_range(damage_multiplier),
            "damage multiplier {} out of range for {}",
            damage_multiplier,
            block_identity
        );

        Self {
            block_identity,
            speed_multiplier: clamp_multiplier(speed_multiplier),
            damage_multiplier: clamp_multiplier(damage_multiplier),
            allow_native_handling,
            original_has_collision: original_flags.has_collision,
            original_can_occlude: original_flags.can_occlude,
        }
    }

    /// Build a config, rejecting out-of-range multipliers
    pub fn try_new(
        block_identity: BlockIdentity,
        speed_multiplier: f64,
        damage_multiplier: f64,
        allow_native_handling: bool,
        original_flags: BlockFlags,
    ) -> PassableResult<Self> {
        check_multiplier("speed_multiplier", speed_multiplier)?;
        check_multiplier("damage_multiplier", damage_multiplier)?;

        Ok(Self {
            block_identity,
            speed_multiplier,
            damage_multiplier,
            allow_native_handling,
            original_has_collision: original_flags.has_collision,
            original_can_occlude: original_flags.can_occlude,
        })
    }

    /// Config for one block matched by a parsed rule
    pub fn from_rule(
        block_identity: BlockIdentity,
        rule: &PassableRule,
        original_flags: BlockFlags,
    ) -> PassableResult<Self> {
        Self::try_new(
            block_identity,
            rule.speed_multiplier,
            rule.damage_multiplier,
            rule.allow_native,
            original_flags,
        )
    }

    /// Same config with other captured flags
    pub fn with_original_flags(mut self, flags: BlockFlags) -> Self {
        self.original_has_collision = flags.has_collision;
        self.original_can_occlude = flags.can_occlude;
        self
    }

    pub fn block_identity(&self) -> &BlockIdentity {
        &self.block_identity
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn damage_multiplier(&self) -> f64 {
        self.damage_multiplier
    }

    pub fn allow_native_handling(&self) -> bool {
        self.allow_native_handling
    }

    pub fn original_has_collision(&self) -> bool {
        self.original_has_collision
    }

    pub fn original_can_occlude(&self) -> bool {
        self.original_can_occlude
    }

    /// Flags to put back when this config is removed
    pub fn original_flags(&self) -> BlockFlags {
        BlockFlags {
            has_collision: self.original_has_collision,
            can_occlude: self.original_can_occlude,
        }
    }

    /// Field-for-field comparison
    pub fn is_identical(&self, other: &BlockConfig) -> bool {
        self.block_identity == other.block_identity
            && self.speed_multiplier.to_bits() == other.speed_multiplier.to_bits()
            && self.damage_multiplier.to_bits() == other.damage_multiplier.to_bits()
            && self.allow_native_handling == other.allow_native_handling
            && self.original_has_collision == other.original_has_collision
            && self.original_can_occlude == other.original_can_occlude
    }
}

impl PartialEq for BlockConfig {
    fn eq(&self, other: &Self) -> bool {
        self.block_identity == other.block_identity
    }
}

impl Eq for BlockConfig {}

impl Hash for BlockConfig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.block_identity.hash(state);
    }
}

impl PartialOrd for BlockConfig {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BlockConfig {
    fn cmp(&self, other: &Self) -> Ordering {
        self.block_identity.cmp(&other.block_identity)
    }
}

impl fmt::Display for BlockConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BlockConfig{{{}[{}, {}, {}]}}",
            self.block_identity,
            self.speed_multiplier,
            self.damage_multiplier,
            self.allow_native_handling
        )
    }
}

fn in_range(value: f64) -> bool {
    value > MIN_EXCLUSIVE && value <= MAX
}

fn clamp_multiplier(value: f64) -> f64 {
    if value.is_nan() {
        MAX
    } else {
        value.clamp(CLAMP_FLOOR, MAX)
    }
}

/// Range check shared with the rule compiler
pub(crate) fn check_multiplier(field: &str, value: f64) -> PassableResult<f64> {
    if in_range(value) {
        Ok(value)
    } else {
        Err(PassableError::MultiplierOutOfRange {
            field: field.to_string(),
            value,
        })
    }
}
