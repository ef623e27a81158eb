//! Operator settings loading and validation

use super::settings_data::{PassableSettings, SettingsFile};
use crate::constants::settings::{MAX_DAMAGE_THRESHOLD, MIN_DAMAGE_THRESHOLD};
use crate::error::{PassableError, PassableResult};
use crate::rules::validate_rule;
use crate::world::core::BlockIdentity;
use anyhow::Context;
use std::path::Path;

/// Parse a settings document. Missing keys take their defaults.
pub fn parse_settings(text: &str) -> PassableResult<PassableSettings> {
    let file: SettingsFile = toml::from_str(text)?;
    Ok(file.passable)
}

pub fn settings_to_toml(settings: &PassableSettings) -> PassableResult<String> {
    let file = SettingsFile {
        passable: settings.clone(),
    };
    Ok(toml::to_string_pretty(&file)?)
}

/// Read, validate and sanitize a settings file
pub fn load_settings_file(path: &Path) -> anyhow::Result<PassableSettings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("[PassableSettings] reading {}", path.display()))?;
    let settings =
        parse_settings(&text).with_context(|| format!("[PassableSettings] parsing {}", path.display()))?;
    validate_settings(&settings).with_context(|| format!("[PassableSettings] validating {}", path.display()))?;

    log::info!("[PassableSettings] Loaded settings from {}", path.display());
    Ok(sanitize_settings(settings))
}

/// Write settings to a file
pub fn save_settings_file(path: &Path, settings: &PassableSettings) -> anyhow::Result<()> {
    let text = settings_to_toml(settings)?;
    std::fs::write(path, text).with_context(|| format!("[PassableSettings] writing {}", path.display()))?;
    Ok(())
}

pub fn validate_settings(settings: &PassableSettings) -> PassableResult<()> {
    if !(MIN_DAMAGE_THRESHOLD..=MAX_DAMAGE_THRESHOLD).contains(&settings.damage_threshold) {
        return Err(PassableError::InvalidConfig {
            field: "damage_threshold".to_string(),
            value: settings.damage_threshold.to_string(),
            reason: format!("must be within {}..={}", MIN_DAMAGE_THRESHOLD, MAX_DAMAGE_THRESHOLD),
        });
    }
    Ok(())
}

/// Trim every entry, drop malformed rules and identities, clamp the threshold
pub fn sanitize_settings(settings: PassableSettings) -> PassableSettings {
    let passable_blocks = settings
        .passable_blocks
        .iter()
        .map(|rule| rule.trim())
        .filter(|rule| match validate_rule(rule) {
            Ok(()) => true,
            Err(diagnostic) => {
                log::error!("[PassableSettings] {}", diagnostic);
                false
            }
        })
        .map(str::to_string)
        .collect();

    let blacklist_blocks = settings
        .blacklist_blocks
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| match BlockIdentity::parse(entry) {
            Ok(_) => true,
            Err(e) => {
                log::error!("[PassableSettings] Dropping blacklist entry: {}", e);
                false
            }
        })
        .map(str::to_string)
        .collect();

    let damage_threshold = settings
        .damage_threshold
        .clamp(MIN_DAMAGE_THRESHOLD, MAX_DAMAGE_THRESHOLD);
    if damage_threshold != settings.damage_threshold {
        log::warn!(
            "[PassableSettings] damage_threshold {} clamped to {}",
            settings.damage_threshold,
            damage_threshold
        );
    }

    PassableSettings {
        damage_threshold,
        do_block_breaking: settings.do_block_breaking,
        passable_blocks,
        blacklist_blocks,
    }
}
