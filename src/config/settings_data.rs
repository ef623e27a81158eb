//! Operator settings - Pure DOP
//!
//! NO METHODS. Just data.

use crate::constants::settings::{DEFAULT_DAMAGE_THRESHOLD, DEFAULT_PASSABLE_RULE};
use serde::{Deserialize, Serialize};

/// Operator tunables, stored under `[passable]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassableSettings {
    /// Extra fall distance on top of the host's own threshold before passable blocks hurt.
    /// 0 falls back to the host's damage formula.
    pub damage_threshold: i32,

    /// Hard landings may break configured blocks beneath the entity
    pub do_block_breaking: bool,

    /// Passable rules, `[#]namespace:path[speed, damage(, allow-native)]`
    pub passable_blocks: Vec<String>,

    /// Extra block identities that may never become passable
    pub blacklist_blocks: Vec<String>,
}

impl Default for PassableSettings {
    fn default() -> Self {
        Self {
            damage_threshold: DEFAULT_DAMAGE_THRESHOLD,
            do_block_breaking: true,
            passable_blocks: vec![DEFAULT_PASSABLE_RULE.to_string()],
            blacklist_blocks: Vec::new(),
        }
    }
}

/// Root of a settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    pub passable: PassableSettings,
}
