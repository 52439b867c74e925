//! ristretto255 group element, wrapping `curve25519_dalek::ristretto::RistrettoPoint`.

use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::traits::Identity;

use crate::consts::ELEMENT_BYTES;
use crate::error::Error;
use crate::scalar::Scalar;

/// A ristretto255 group element, in canonical encoded form.
///
/// With the `serde` feature enabled, serializes as the 32-byte canonical
/// compressed encoding, via `curve25519-dalek`'s own `RistrettoPoint`
/// (de)serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Element(pub(crate) RistrettoPoint);

impl Element {
    /// The group identity element.
    pub fn identity() -> Self {
        Element(RistrettoPoint::identity())
    }

    /// The ristretto255 base point, used as the DKG generator `g`.
    pub fn generator() -> Self {
        Element(RISTRETTO_BASEPOINT_POINT)
    }

    /// Maps a uniformly random 64-byte string to a group element via the
    /// ristretto255 map-from-uniform-bytes construction. Used by
    /// [`crate::hash::hash_to_group`] and by 3HashTDH's session hash.
    pub fn from_uniform_bytes(bytes: &[u8; 64]) -> Self {
        Element(RistrettoPoint::from_uniform_bytes(bytes))
    }

    /// Decodes a canonical 32-byte compressed ristretto255 encoding.
    ///
    /// Fails with [`Error::InvalidEncoding`] if the bytes are not the
    /// canonical encoding of a valid element, and with
    /// [`Error::InvalidLength`] if `bytes` is not exactly 32 bytes.
    pub fn from_canonical_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let array: [u8; ELEMENT_BYTES] =
            bytes
                .try_into()
                .map_err(|_| Error::InvalidLength {
                    expected: ELEMENT_BYTES,
                    got: bytes.len(),
                })?;
        CompressedRistretto(array)
            .decompress()
            .map(Element)
            .ok_or(Error::InvalidEncoding)
    }

    /// Returns the canonical 32-byte compressed encoding.
    pub fn to_bytes(self) -> [u8; ELEMENT_BYTES] {
        self.0.compress().to_bytes()
    }

    /// Scalar multiplication.
    pub fn mul(self, scalar: Scalar) -> Element {
        Element(self.0 * scalar.0)
    }

    /// Group addition.
    pub fn add(self, rhs: Element) -> Element {
        Element(self.0 + rhs.0)
    }
}

impl std::ops::Add for Element {
    type Output = Element;
    fn add(self, rhs: Element) -> Element {
        Element::add(self, rhs)
    }
}

impl std::ops::Mul<Scalar> for Element {
    type Output = Element;
    fn mul(self, rhs: Scalar) -> Element {
        Element::mul(self, rhs)
    }
}

impl std::iter::Sum for Element {
    fn sum<I: Iterator<Item = Element>>(iter: I) -> Self {
        iter.fold(Element::identity(), Element::add)
    }
}
