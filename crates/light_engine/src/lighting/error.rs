//! Light descriptor integrity errors

use thiserror::Error;

use super::LightKind;

/// Errors raised when a light descriptor is malformed or inconsistent
///
/// Capacity exhaustion is not an error: a full registry or light set simply
/// yields `None` and the light goes unbound for that frame.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightError {
    /// A raw kind tag that names no known light kind
    #[error("Unknown light kind tag: {0}")]
    UnknownLightKind(u8),

    /// Parameters accessed under a tag that does not carry them
    #[error("Light kind mismatch: expected {expected} light, found {found:?}")]
    WrongLightKind {
        /// Parameter family the caller asked for
        expected: &'static str,
        /// Kind actually stored in the descriptor
        found: LightKind,
    },

    /// An active registry node refers to a descriptor that no longer exists
    #[error("Registry slot {slot} refers to a descriptor that was freed without being removed")]
    DanglingDescriptor {
        /// Pool index of the offending node
        slot: usize,
    },
}

/// Convenience alias for light descriptor results
pub type LightResult<T> = Result<T, LightError>;
