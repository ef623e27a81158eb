// Hearth Passable - passable terrain for the Hearth engine
//
// Operators declare blocks that entities sink through instead of standing on,
// with reduced speed, softened fall damage, step sounds and random breakage.
// Data-Oriented layout throughout:
// - *_data modules hold plain data
// - *_operations modules hold the free functions that transform it
// - the host plugs in through the traits in world::interfaces

// Constants module
pub mod constants;

// Core modules
pub mod error;
pub mod physics;
pub mod world;

// Passable terrain
pub mod config;
pub mod redirection;
pub mod rules;
pub mod store;

// Sync
pub mod network;
pub mod system;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{load_settings_file, parse_settings, PassableSettings};
pub use error::{OptionExt, PassableError, PassableResult};
pub use network::{PeerId, SyncMessage, SyncRole, SyncState, SyncTransport};
pub use physics::AABB;
pub use redirection::{handle_collision, on_entity_inside, CollidedBlock, CollisionOutcome, DamageCause};
pub use rules::{compile_rules, parse_rule, validate_rule, PassableRule, RuleDiagnostic, RuleTarget};
pub use store::{BlockConfig, Blacklist, PassableStoreData};
pub use system::PassableSystem;
pub use world::{
    BlockFlags, BlockIdentity, BlockMaterial, BlockPos, CollidingEntity, CollisionWorld, FlagMutator,
    GroupLookup, PassableLookup, RegistryLookup,
};

/// Install `env_logger` as the log backend, honouring `RUST_LOG` and defaulting to `info`.
///
/// Safe to call more than once; hosts that bring their own logger can skip it.
pub fn init_logging() {
    let installed = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()
        .is_ok();
    if installed {
        log::debug!("[HearthPassable] Logging initialized");
    }
}
