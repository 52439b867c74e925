//! Error taxonomy for the OPRF / threshold-OPRF / DKG core.
//!
//! Every public operation either succeeds with its declared output or fails
//! with exactly one of these variants. None are retriable by the core
//! itself; callers own retry and exclusion policy (e.g. dropping a
//! misbehaving DKG peer and restarting the ceremony). No variant carries
//! information derived from secret material.

/// Errors returned by the core OPRF, threshold OPRF and DKG operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A byte string was not the required fixed size, or a length prefix
    /// would overflow its 16-bit wire field.
    #[error("invalid length: expected {expected}, got {got}")]
    InvalidLength {
        /// The required length, in bytes.
        expected: usize,
        /// The length actually supplied.
        got: usize,
    },
    /// A scalar or point was not the canonical encoding of a field or group
    /// element.
    #[error("invalid canonical encoding")]
    InvalidEncoding,
    /// `n`/`t` violated `2 <= t <= n <= 255`.
    #[error("invalid parameters: threshold {t} and parties {n} must satisfy 2 <= t <= n <= 255")]
    InvalidParameters {
        /// The supplied party count.
        n: usize,
        /// The supplied threshold.
        t: usize,
    },
    /// Peer indices were duplicated, zero, or otherwise inconsistent.
    #[error("invalid peer set")]
    InvalidPeers,
    /// Zero parts or shares were supplied where at least one is required.
    #[error("insufficient parts")]
    InsufficientParts,
    /// `Finish` received a share not addressed to `self`.
    #[error("inconsistent share index")]
    InconsistentIndex,
    /// A peer's share failed its commitment check.
    #[error("commitment mismatch")]
    CommitmentMismatch,
    /// The supplied CSPRNG failed to produce randomness.
    #[error("randomness source failed")]
    RandomnessFailure,
}
