//! ristretto255 scalar field element, wrapping `curve25519_dalek::scalar::Scalar`.
//!
//! This is the only place the crate touches the scalar field directly;
//! every other module goes through [`Scalar`]'s typed API so a canonical
//! encoding check is never forgotten at a deserialization boundary.

use curve25519_dalek::scalar::Scalar as DalekScalar;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::consts::SCALAR_BYTES;
use crate::error::Error;

/// An element of the ristretto255 scalar field, in canonical form.
///
/// All arithmetic on `Scalar` is constant-time: it is implemented entirely
/// in terms of `curve25519-dalek`'s scalar operations, which do not branch
/// on the value of their operands.
///
/// With the `serde` feature enabled, serializes as the 32-byte canonical
/// encoding, via `curve25519-dalek`'s own `Scalar` (de)serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Zeroize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Scalar(pub(crate) DalekScalar);

impl Scalar {
    /// The additive identity.
    pub const ZERO: Scalar = Scalar(DalekScalar::ZERO);

    /// Draws a uniformly random, non-zero scalar using the given CSPRNG.
    ///
    /// Implements the `KeyGen`/blinding-factor sampling procedure of
    /// 64 uniform bytes reduced modulo the scalar field order, resampled
    /// in the (cryptographically negligible) case the result is zero.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        loop {
            let mut bytes = [0u8; 64];
            rng.fill_bytes(&mut bytes);
            let scalar = Scalar(DalekScalar::from_bytes_mod_order_wide(&bytes));
            if !scalar.is_zero() {
                return scalar;
            }
        }
    }

    /// Maps a peer index `1..=255` to its field representation: the byte is
    /// placed at position 0 of the canonical little-endian encoding and the
    /// remaining bytes are zero. This is the integer value of the byte as a
    /// field element, and is the mapping the Lagrange math in
    /// [`crate::shamir`] assumes. Implementers must not substitute a
    /// hash-based map.
    pub fn from_index(index: u8) -> Self {
        let mut bytes = [0u8; SCALAR_BYTES];
        bytes[0] = index;
        // Any single byte is trivially canonical modulo the (much larger)
        // scalar field order.
        Scalar(DalekScalar::from_bytes_mod_order(bytes))
    }

    /// Decodes a canonical 32-byte little-endian scalar encoding.
    ///
    /// Returns [`Error::InvalidEncoding`] if the bytes are not the
    /// canonical encoding of a scalar field element, and
    /// [`Error::InvalidLength`] if `bytes` is not exactly 32 bytes.
    pub fn from_canonical_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let array: [u8; SCALAR_BYTES] =
            bytes
                .try_into()
                .map_err(|_| Error::InvalidLength {
                    expected: SCALAR_BYTES,
                    got: bytes.len(),
                })?;
        Option::<DalekScalar>::from(DalekScalar::from_canonical_bytes(array))
            .map(Scalar)
            .ok_or(Error::InvalidEncoding)
    }

    /// Returns the canonical 32-byte little-endian encoding.
    pub fn to_bytes(self) -> [u8; SCALAR_BYTES] {
        self.0.to_bytes()
    }

    /// Returns `true` iff this is the zero scalar.
    pub fn is_zero(&self) -> bool {
        self.0 == DalekScalar::ZERO
    }

    /// Scalar addition.
    pub fn add(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 + rhs.0)
    }

    /// Scalar subtraction.
    pub fn sub(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 - rhs.0)
    }

    /// Scalar multiplication.
    pub fn mul(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 * rhs.0)
    }

    /// Scalar negation.
    pub fn neg(self) -> Scalar {
        Scalar(-self.0)
    }

    /// Constant-time multiplicative inverse.
    ///
    /// # Panics
    /// Panics if `self` is zero. Call sites in this crate only invert
    /// differences of distinct peer indices, which are guaranteed non-zero
    /// by the peer-distinctness check performed before reaching this call.
    pub fn invert(self) -> Scalar {
        assert!(!self.is_zero(), "cannot invert the zero scalar");
        Scalar(self.0.invert())
    }
}

impl std::ops::Add for Scalar {
    type Output = Scalar;
    fn add(self, rhs: Scalar) -> Scalar {
        Scalar::add(self, rhs)
    }
}

impl std::ops::Sub for Scalar {
    type Output = Scalar;
    fn sub(self, rhs: Scalar) -> Scalar {
        Scalar::sub(self, rhs)
    }
}

impl std::ops::Mul for Scalar {
    type Output = Scalar;
    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar::mul(self, rhs)
    }
}

impl std::ops::Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        Scalar::neg(self)
    }
}

impl std::iter::Sum for Scalar {
    fn sum<I: Iterator<Item = Scalar>>(iter: I) -> Self {
        iter.fold(Scalar::ZERO, Scalar::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_index_matches_integer_value() {
        assert_eq!(Scalar::from_index(0), Scalar::ZERO);
        assert_eq!(Scalar::from_index(1).to_bytes()[0], 1);
        assert_eq!(Scalar::from_index(5), Scalar::from_index(1) * Scalar::from_index(5));
    }

    #[test]
    fn round_trip_canonical_encoding() {
        let mut rng = rand::thread_rng();
        let s = Scalar::random(&mut rng);
        let bytes = s.to_bytes();
        let decoded = Scalar::from_canonical_bytes(&bytes).unwrap();
        assert_eq!(s, decoded);
        assert_eq!(decoded.to_bytes(), bytes);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = Scalar::from_canonical_bytes(&[0u8; 31]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidLength {
                expected: 32,
                got: 31
            }
        );
    }

    #[test]
    fn rejects_non_canonical_encoding() {
        // l = 2^252 + 27742317777372353535851937790883648493, encoded little-endian.
        // Adding the order itself yields a non-canonical (but in-range-looking) encoding.
        let l_bytes: [u8; 32] = [
            0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
            0xde, 0x14, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x10,
        ];
        assert!(Scalar::from_canonical_bytes(&l_bytes).is_err());
    }

    #[test]
    fn random_is_never_zero() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            assert!(!Scalar::random(&mut rng).is_zero());
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trips_through_canonical_bytes() {
        let mut rng = rand::thread_rng();
        let s = Scalar::random(&mut rng);
        let json = serde_json::to_string(&s).unwrap();
        let decoded: Scalar = serde_json::from_str(&json).unwrap();
        assert_eq!(s, decoded);
    }
}
