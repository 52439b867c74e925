//! Wire types for Shamir shares and threshold OPRF parts.
//!
//! Both types are `index || payload`, 33 bytes total, with the index in
//! `1..=255` (index `0` is reserved for the secret/result itself and is
//! never a valid share address).

use zeroize::ZeroizeOnDrop;

use crate::consts::{ELEMENT_BYTES, PART_BYTES, SCALAR_BYTES, SHARE_BYTES};
use crate::element::Element;
use crate::error::Error;
use crate::scalar::Scalar;

/// A single party's Shamir share of a secret scalar: `index:1 || value:32`.
///
/// Zeroized on drop since `value` is key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Share {
    #[zeroize(skip)]
    index: u8,
    value: Scalar,
}

impl Share {
    /// Builds a share, rejecting index `0`.
    pub fn new(index: u8, value: Scalar) -> Result<Self, Error> {
        if index == 0 {
            return Err(Error::InvalidPeers);
        }
        Ok(Share::new_unchecked(index, value))
    }

    /// Builds a share without validating the index. Callers must uphold
    /// `index != 0` themselves; used internally once an index has already
    /// been validated by the caller (e.g. [`crate::shamir::create_shares`]).
    pub fn new_unchecked(index: u8, value: Scalar) -> Self {
        Share { index, value }
    }

    /// The peer index this share is addressed to.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// The secret-shared scalar value.
    pub fn value(&self) -> Scalar {
        self.value
    }

    /// Encodes as `index:1 || value:32`.
    pub fn to_bytes(&self) -> [u8; SHARE_BYTES] {
        let mut out = [0u8; SHARE_BYTES];
        out[0] = self.index;
        out[1..].copy_from_slice(&self.value.to_bytes());
        out
    }

    /// Decodes `index:1 || value:32`, rejecting index `0`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != SHARE_BYTES {
            return Err(Error::InvalidLength {
                expected: SHARE_BYTES,
                got: bytes.len(),
            });
        }
        let index = bytes[0];
        if index == 0 {
            return Err(Error::InvalidPeers);
        }
        let value = Scalar::from_canonical_bytes(&bytes[1..])?;
        Ok(Share { index, value })
    }
}

/// A threshold OPRF evaluation part: `index:1 || element:32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Part {
    index: u8,
    element: Element,
}

impl Part {
    /// Builds a part, rejecting index `0`.
    pub fn new(index: u8, element: Element) -> Result<Self, Error> {
        if index == 0 {
            return Err(Error::InvalidPeers);
        }
        Ok(Part { index, element })
    }

    /// The peer index this part came from.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// The partial evaluation element.
    pub fn element(&self) -> Element {
        self.element
    }

    /// Encodes as `index:1 || element:32`.
    pub fn to_bytes(&self) -> [u8; PART_BYTES] {
        let mut out = [0u8; PART_BYTES];
        out[0] = self.index;
        out[1..].copy_from_slice(&self.element.to_bytes());
        out
    }

    /// Decodes `index:1 || element:32`, rejecting index `0`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != PART_BYTES {
            return Err(Error::InvalidLength {
                expected: PART_BYTES,
                got: bytes.len(),
            });
        }
        let index = bytes[0];
        if index == 0 {
            return Err(Error::InvalidPeers);
        }
        let element = Element::from_canonical_bytes(&bytes[1..])?;
        Ok(Part { index, element })
    }
}

const _: () = assert!(SHARE_BYTES == 1 + SCALAR_BYTES);
const _: () = assert!(PART_BYTES == 1 + ELEMENT_BYTES);
