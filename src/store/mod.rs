//! Passable configuration store
//!
//! Holds the compiled configs and keeps the host's block flags in step with them.

mod blacklist;
mod block_config;
pub mod store_data;
pub mod store_operations;

pub use blacklist::{compute_blacklist, Blacklist, HARDCODED_BLACKLIST};
pub(crate) use block_config::check_multiplier;
pub use block_config::BlockConfig;
pub use store_data::{PassableStoreData, SyncLocalReport};
pub use store_operations::{
    add, add_all, add_target, clear, contains, create_store, from_bytes, get, list, load_bytes,
    refresh_blacklist, remove, remove_target, removal_suggestions, sync_from_records, sync_local,
    to_bytes, to_records,
};
