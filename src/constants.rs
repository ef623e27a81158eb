//! Passable terrain constants
//!
//! Every tunable number used by the rule compiler, the collision redirection
//! and the sync protocol lives here, grouped by the subsystem that reads it.

/// Fall handling
pub mod fall {
    /// Fall distance the host already tolerates without damage
    pub const VANILLA_THRESHOLD: f64 = 3.0;

    /// Share of the rider's damage applied to each passenger
    pub const PASSENGER_DAMAGE_FACTOR: f64 = 0.8;

    /// How far below the entity the breaking probe box is moved
    pub const BREAK_PROBE_OFFSET: f64 = 0.2;
}

/// Motion and sound cadence while inside a passable block
pub mod motion {
    /// Horizontal inward shrink of the entity box before the overlap test
    pub const ENTITY_SHRINK: f64 = 0.1;

    /// Vertical motion inside this band counts as standing still (mouse-look drift)
    pub const VERTICAL_DEAD_ZONE: f64 = 0.07;

    /// Step sounds play on ticks divisible by this
    pub const STEP_SOUND_INTERVAL: u64 = 5;

    /// Pitch scale for the break sound played on a hard landing
    pub const BREAK_SOUND_PITCH: f32 = 0.65;

    /// Pitch scale for the step sound played while moving through
    pub const STEP_SOUND_PITCH: f32 = 0.75;
}

/// Multiplier bounds for compiled rules
pub mod multipliers {
    /// Exclusive lower bound
    pub const MIN_EXCLUSIVE: f64 = 0.05;

    /// Inclusive upper bound
    pub const MAX: f64 = 1.0;

    /// Smallest value a release build clamps an out-of-range multiplier to
    pub const CLAMP_FLOOR: f64 = MIN_EXCLUSIVE + f64::EPSILON;
}

/// Destructive decay
pub mod breaking {
    /// One in `BREAK_CHANCE` eligible blocks is destroyed per hard landing
    pub const BREAK_CHANCE: u32 = 3;
}

/// Operator settings
pub mod settings {
    pub const DEFAULT_DAMAGE_THRESHOLD: i32 = 7;
    pub const MIN_DAMAGE_THRESHOLD: i32 = 0;
    pub const MAX_DAMAGE_THRESHOLD: i32 = 27;
    pub const DEFAULT_PASSABLE_RULE: &str = "#minecraft:leaves[0.8, 0.8]";

    /// Namespace used for translation keys
    pub const MOD_NAMESPACE: &str = "hearth_passable";
}

/// Sync protocol
pub mod protocol {
    /// Carried in every payload; peers with a different string refuse the payload
    pub const VERSION: &str = "hps-1";

    /// Largest payload accepted from or handed to the transport
    pub const MAX_PAYLOAD_BYTES: usize = 1024 * 1024;
}

/// Pathfinding
pub mod pathing {
    /// Cost malus is this factor times the inverse speed multiplier
    pub const PENALTY_FACTOR: f64 = 2.0;
}
