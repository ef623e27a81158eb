//! Error handling for Hearth Passable
//!
//! Nothing in this crate is fatal to the host. Every error below is either
//! recovered locally (the offending rule or payload entry is dropped and logged)
//! or handed back to the caller of a file/transport boundary.

use std::error::Error as StdError;
use std::fmt;

/// Main error type for Hearth Passable
#[derive(Debug, Clone, PartialEq)]
pub enum PassableError {
    // Rule Errors
    InvalidRule {
        rule: String,
        reason: String,
    },
    InvalidIdentity {
        value: String,
    },
    MultiplierOutOfRange {
        field: String,
        value: f64,
    },

    // Resolution Errors
    UnknownBlock {
        id: String,
    },
    UnknownGroup {
        id: String,
    },
    Blacklisted {
        id: String,
    },
    NothingToApply {
        target: String,
    },

    // Host Errors
    FlagMutationRejected {
        id: String,
        reason: String,
    },

    // Configuration Errors
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    // Serialization Errors
    SerializationError {
        context: String,
        error: String,
    },
    DeserializationError {
        context: String,
        error: String,
    },

    // Network Errors
    VersionMismatch {
        expected: String,
        found: String,
    },
    PacketTooLarge {
        size: usize,
        max_size: usize,
    },
    ProtocolError {
        message: String,
    },
    ChannelClosed {
        name: String,
    },
}

impl fmt::Display for PassableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassableError::InvalidRule { rule, reason } => {
                write!(f, "Invalid passable rule '{}': {}", rule, reason)
            }
            PassableError::InvalidIdentity { value } => {
                write!(f, "Invalid block identity: '{}'", value)
            }
            PassableError::MultiplierOutOfRange { field, value } => write!(
                f,
                "Multiplier {} = {} is outside of (0.05, 1.0]",
                field, value
            ),

            PassableError::UnknownBlock { id } => write!(f, "Block not found in registry: {}", id),
            PassableError::UnknownGroup { id } => {
                write!(f, "Block group not found or empty: {}", id)
            }
            PassableError::Blacklisted { id } => write!(f, "Block is blacklisted: {}", id),
            PassableError::NothingToApply { target } => {
                write!(f, "No configurable blocks for target: {}", target)
            }

            PassableError::FlagMutationRejected { id, reason } => {
                write!(f, "Host refused flag update for {}: {}", id, reason)
            }

            PassableError::InvalidConfig {
                field,
                value,
                reason,
            } => write!(f, "Invalid config: {} = {} ({})", field, value, reason),

            PassableError::SerializationError { context, error } => {
                write!(f, "Serialization error in {}: {}", context, error)
            }
            PassableError::DeserializationError { context, error } => {
                write!(f, "Deserialization error in {}: {}", context, error)
            }

            PassableError::VersionMismatch { expected, found } => write!(
                f,
                "Protocol version mismatch: expected {}, found {}",
                expected, found
            ),
            PassableError::PacketTooLarge { size, max_size } => {
                write!(f, "Packet too large: {} bytes (max: {})", size, max_size)
            }
            PassableError::ProtocolError { message } => write!(f, "Protocol error: {}", message),
            PassableError::ChannelClosed { name } => write!(f, "Channel closed: {}", name),
        }
    }
}

impl StdError for PassableError {}

/// Type alias for Results in Hearth Passable
pub type PassableResult<T> = Result<T, PassableError>;

// Conversion traits for common error types

impl From<bincode::Error> for PassableError {
    fn from(error: bincode::Error) -> Self {
        PassableError::DeserializationError {
            context: "sync payload".to_string(),
            error: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for PassableError {
    fn from(error: toml::de::Error) -> Self {
        PassableError::DeserializationError {
            context: "toml".to_string(),
            error: error.message().to_string(),
        }
    }
}

impl From<toml::ser::Error> for PassableError {
    fn from(error: toml::ser::Error) -> Self {
        PassableError::SerializationError {
            context: "toml".to_string(),
            error: error.to_string(),
        }
    }
}

impl From<crate::rules::RuleDiagnostic> for PassableError {
    fn from(diagnostic: crate::rules::RuleDiagnostic) -> Self {
        PassableError::InvalidRule {
            rule: diagnostic.rule,
            reason: diagnostic.reason,
        }
    }
}

impl<T> From<crossbeam_channel::SendError<T>> for PassableError {
    fn from(_: crossbeam_channel::SendError<T>) -> Self {
        PassableError::ChannelClosed {
            name: "sync_inbox".to_string(),
        }
    }
}

// Helper functions for common error patterns

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_passable<F>(self, f: F) -> PassableResult<T>
    where
        F: FnOnce() -> PassableError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_passable<F>(self, f: F) -> PassableResult<T>
    where
        F: FnOnce() -> PassableError,
    {
        self.ok_or_else(f)
    }
}
