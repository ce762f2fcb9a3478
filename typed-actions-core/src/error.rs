//! Errors raised while defining actions

use thiserror::Error;

/// Result alias for registry and definition operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Definition-time errors.
///
/// All of these are programmer errors: they surface when an action family is
/// defined, before any message is built.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The canonical name was already registered by another definition
    #[error("action type \"{name}\" is already registered; action names must be unique")]
    DuplicateName {
        /// Canonical name that collided
        name: String,
    },

    /// A phase was referenced by a name that does not exist
    #[error("unknown action phase \"{phase}\"")]
    UnknownPhase {
        /// The unrecognised phase name
        phase: String,
    },

    /// Suffix configuration could not be parsed
    #[error("invalid suffix configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
