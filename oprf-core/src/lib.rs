#![deny(missing_docs, clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Cryptographic core for oblivious pseudorandom functions over
//! ristretto255: a two-party OPRF (RFC 9497, mode 0,
//! `ristretto255-SHA512`), an `n`-of-`t` threshold OPRF built on Shamir
//! sharing (with an optional session-bound 3HashTDH construction), and a
//! Feldman-style verifiable DKG that produces key shares for either.
//!
//! The crate is organized bottom-up:
//!
//! - [`scalar`] / [`element`]: the typed ristretto255 scalar and group
//!   element wrappers every other module builds on.
//! - [`hash`]: `expand_message_xmd`, hash-to-group, and the `Finalize`
//!   framing.
//! - [`oprf`]: the two-party `KeyGen`/`Blind`/`Evaluate`/`Unblind`/`Finalize`
//!   flow.
//! - [`shamir`]: Shamir share generation and Lagrange interpolation.
//! - [`threshold`]: per-server threshold evaluation, combination, and
//!   3HashTDH.
//! - [`dkg`]: the verifiable distributed key generation ceremony.
//!
//! [`share`] holds the wire types (`Share`, `Part`) shared across the
//! threshold and DKG layers; [`error`] and [`consts`] hold the error
//! taxonomy and wire-format constants used throughout.
//!
//! This crate is synchronous and performs no I/O: callers own transport,
//! persistence, and retry policy. All secret-bearing arithmetic is
//! implemented in terms of `curve25519-dalek`'s constant-time operations.

pub mod consts;
pub mod dkg;
pub mod element;
pub mod error;
pub mod hash;
pub mod oprf;
pub mod scalar;
pub mod shamir;
pub mod share;
pub mod threshold;

pub use element::Element;
pub use error::Error;
pub use scalar::Scalar;
pub use share::{Part, Share};
