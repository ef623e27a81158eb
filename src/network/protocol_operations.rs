//! Sync Protocol Operations - Pure DOP Functions
//!
//! Payloads are bincode-encoded `SyncEnvelope`s. The version string is checked
//! before the message body is decoded, so a peer on another protocol revision
//! gets a version error instead of a decode error.

use super::protocol_data::{BlockConfigRecord, SyncEnvelope, SyncMessage, SyncTarget};
use crate::constants::protocol::{MAX_PAYLOAD_BYTES, VERSION};
use crate::error::{PassableError, PassableResult};
use crate::rules::{PassableRule, RuleTarget};
use crate::store::BlockConfig;
use crate::world::core::{BlockFlags, BlockIdentity};
use crate::world::interfaces::RegistryLookup;
use bincode::Options;

fn wire_options() -> impl Options {
    bincode::DefaultOptions::new().with_limit(MAX_PAYLOAD_BYTES as u64)
}

/// Encode a message into a versioned payload
pub fn encode_message(message: &SyncMessage) -> PassableResult<Vec<u8>> {
    let envelope = SyncEnvelope {
        version: VERSION.to_string(),
        message: message.clone(),
    };

    let size = bincode::DefaultOptions::new()
        .serialized_size(&envelope)
        .map_err(|e| PassableError::SerializationError {
            context: "sync payload".to_string(),
            error: e.to_string(),
        })? as usize;
    if size > MAX_PAYLOAD_BYTES {
        return Err(PassableError::PacketTooLarge {
            size,
            max_size: MAX_PAYLOAD_BYTES,
        });
    }

    wire_options()
        .serialize(&envelope)
        .map_err(|e| PassableError::SerializationError {
            context: "sync payload".to_string(),
            error: e.to_string(),
        })
}

/// Decode a payload, rejecting oversize input and foreign protocol versions
pub fn decode_message(bytes: &[u8]) -> PassableResult<SyncMessage> {
    if bytes.len() > MAX_PAYLOAD_BYTES {
        return Err(PassableError::PacketTooLarge {
            size: bytes.len(),
            max_size: MAX_PAYLOAD_BYTES,
        });
    }

    let version: String = wire_options().allow_trailing_bytes().deserialize(bytes)?;
    if version != VERSION {
        return Err(PassableError::VersionMismatch {
            expected: VERSION.to_string(),
            found: version,
        });
    }

    let envelope: SyncEnvelope = wire_options().deserialize(bytes)?;
    Ok(envelope.message)
}

/// Short name of a message for logs
pub fn message_kind(message: &SyncMessage) -> &'static str {
    match message {
        SyncMessage::Snapshot { .. } => "snapshot",
        SyncMessage::Add { .. } => "add",
        SyncMessage::Remove { .. } => "remove",
    }
}

pub fn record_from_config(config: &BlockConfig) -> BlockConfigRecord {
    BlockConfigRecord {
        block_identity: config.block_identity().to_string(),
        speed_multiplier: config.speed_multiplier(),
        damage_multiplier: config.damage_multiplier(),
        allow_native: config.allow_native_handling(),
        original_has_collision: config.original_has_collision(),
        original_can_occlude: config.original_can_occlude(),
    }
}

/// Resolve a received record against the local registry
pub fn config_from_record(record: &BlockConfigRecord, registry: &dyn RegistryLookup) -> PassableResult<BlockConfig> {
    let id = BlockIdentity::parse(&record.block_identity)?;
    if !registry.contains_block(&id) {
        return Err(PassableError::UnknownBlock { id: id.to_string() });
    }

    BlockConfig::try_new(
        id,
        record.speed_multiplier,
        record.damage_multiplier,
        record.allow_native,
        BlockFlags {
            has_collision: record.original_has_collision,
            can_occlude: record.original_can_occlude,
        },
    )
}

pub fn sync_target_from_rule_target(target: &RuleTarget) -> SyncTarget {
    match target {
        RuleTarget::Block(id) => SyncTarget::Block(id.to_string()),
        RuleTarget::Group(id) => SyncTarget::Group(id.to_string()),
    }
}

pub fn rule_target_from_sync_target(target: &SyncTarget) -> PassableResult<RuleTarget> {
    Ok(match target {
        SyncTarget::Block(id) => RuleTarget::Block(BlockIdentity::parse(id)?),
        SyncTarget::Group(id) => RuleTarget::Group(BlockIdentity::parse(id)?),
    })
}

/// Incremental add for a rule applied on the authority
pub fn add_message(rule: &PassableRule) -> SyncMessage {
    SyncMessage::Add {
        target: sync_target_from_rule_target(&rule.target),
        speed_multiplier: rule.speed_multiplier,
        damage_multiplier: rule.damage_multiplier,
        allow_native: rule.allow_native,
    }
}

/// Rule carried by a received incremental add
pub fn rule_from_add(
    target: &SyncTarget,
    speed_multiplier: f64,
    damage_multiplier: f64,
    allow_native: bool,
) -> PassableResult<PassableRule> {
    Ok(PassableRule {
        target: rule_target_from_sync_target(target)?,
        speed_multiplier,
        damage_multiplier,
        allow_native,
    })
}

pub fn remove_message(target: &RuleTarget) -> SyncMessage {
    SyncMessage::Remove {
        target: sync_target_from_rule_target(target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_registry;

    fn record(id: &str) -> BlockConfigRecord {
        BlockConfigRecord {
            block_identity: id.to_string(),
            speed_multiplier: 0.8,
            damage_multiplier: 0.6,
            allow_native: false,
            original_has_collision: true,
            original_can_occlude: false,
        }
    }

    #[test]
    fn test_encode_decode() {
        let message = SyncMessage::Snapshot {
            entries: vec![record("minecraft:oak_leaves"), record("minecraft:snow")],
        };
        let bytes = encode_message(&message).expect("encodes");
        assert_eq!(decode_message(&bytes), Ok(message));

        let message = SyncMessage::Remove {
            target: SyncTarget::Group("minecraft:leaves".to_string()),
        };
        let bytes = encode_message(&message).expect("encodes");
        assert_eq!(decode_message(&bytes), Ok(message));
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let envelope = SyncEnvelope {
            version: "hps-0".to_string(),
            message: SyncMessage::Snapshot { entries: vec![] },
        };
        let bytes = bincode::DefaultOptions::new().serialize(&envelope).expect("encodes");

        assert_eq!(
            decode_message(&bytes),
            Err(PassableError::VersionMismatch {
                expected: VERSION.to_string(),
                found: "hps-0".to_string()
            })
        );
    }

    #[test]
    fn test_oversize_payload_rejected() {
        let bytes = vec![0u8; MAX_PAYLOAD_BYTES + 1];
        assert!(matches!(decode_message(&bytes), Err(PassableError::PacketTooLarge { .. })));

        let entries = (0..40_000).map(|i| record(&format!("minecraft:block_{}", i))).collect();
        assert!(matches!(
            encode_message(&SyncMessage::Snapshot { entries }),
            Err(PassableError::PacketTooLarge { .. })
        ));
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let bytes = encode_message(&SyncMessage::Snapshot {
            entries: vec![record("minecraft:snow")],
        })
        .expect("encodes");
        match decode_message(&bytes[..bytes.len() - 3]) {
            Err(PassableError::DeserializationError { context, .. }) => assert_eq!(context, "sync payload"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_record_resolution() {
        let registry = sample_registry();
        let config = config_from_record(&record("minecraft:snow"), &registry).expect("known block");
        assert_eq!(record_from_config(&config), record("minecraft:snow"));

        assert!(matches!(
            config_from_record(&record("othermod:thing"), &registry),
            Err(PassableError::UnknownBlock { .. })
        ));

        let mut out_of_range = record("minecraft:snow");
        out_of_range.speed_multiplier = 3.0;
        assert!(config_from_record(&out_of_range, &registry).is_err());
    }

    #[test]
    fn test_targets_round_trip() {
        let target = RuleTarget::Group(BlockIdentity::parse("minecraft:leaves").expect("valid"));
        let wire = sync_target_from_rule_target(&target);
        assert_eq!(wire, SyncTarget::Group("minecraft:leaves".to_string()));
        assert_eq!(rule_target_from_sync_target(&wire), Ok(target));
        assert!(rule_target_from_sync_target(&SyncTarget::Block("bad id".to_string())).is_err());
    }
}
