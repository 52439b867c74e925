//! Hash framings shared by every layer above it: `expand_message_xmd` (RFC
//! 9380 §5.3.1), hash-to-group, and the OPRF `Finalize` hash.
//!
//! Every length prefix here is fixed-width big-endian network byte order,
//! and every domain separation literal must match the reference byte for
//! byte: this is the one place wire compatibility with the reference
//! implementation is won or lost.

use sha2::{Digest, Sha512};

use crate::consts::{DST_HASH_TO_GROUP, FINALIZE_LABEL, MAX_DST_LEN, MAX_EXPAND_LEN};
use crate::element::Element;
use crate::error::Error;

const SHA512_B_IN_BYTES: usize = 64;
const SHA512_R_IN_BYTES: usize = 128;

/// RFC 9380 §5.3.1 `expand_message_xmd`, instantiated with SHA-512.
///
/// `dst` must be at most 255 bytes and `len` at most `255 * 64` bytes;
/// violating either bound fails with [`Error::InvalidLength`] rather than
/// silently truncating.
pub fn expand_message_xmd(msg: &[u8], dst: &[u8], len: usize) -> Result<Vec<u8>, Error> {
    if dst.len() > MAX_DST_LEN {
        return Err(Error::InvalidLength {
            expected: MAX_DST_LEN,
            got: dst.len(),
        });
    }
    if len > MAX_EXPAND_LEN || len > u16::MAX as usize {
        return Err(Error::InvalidLength {
            expected: MAX_EXPAND_LEN,
            got: len,
        });
    }

    let ell = len.div_ceil(SHA512_B_IN_BYTES);

    let mut dst_prime = Vec::with_capacity(dst.len() + 1);
    dst_prime.extend_from_slice(dst);
    dst_prime.push(dst.len() as u8);

    let z_pad = [0u8; SHA512_R_IN_BYTES];
    let l_i2osp = (len as u16).to_be_bytes();

    let mut hasher = Sha512::new();
    hasher.update(z_pad);
    hasher.update(msg);
    hasher.update(l_i2osp);
    hasher.update([0u8]);
    hasher.update(&dst_prime);
    let b_0: [u8; SHA512_B_IN_BYTES] = hasher.finalize().into();

    let mut hasher = Sha512::new();
    hasher.update(b_0);
    hasher.update([1u8]);
    hasher.update(&dst_prime);
    let mut b_prev: [u8; SHA512_B_IN_BYTES] = hasher.finalize().into();

    let mut uniform_bytes = Vec::with_capacity(ell * SHA512_B_IN_BYTES);
    uniform_bytes.extend_from_slice(&b_prev);

    for i in 2..=ell {
        let mut xored = [0u8; SHA512_B_IN_BYTES];
        for (x, (a, b)) in xored.iter_mut().zip(b_0.iter().zip(b_prev.iter())) {
            *x = a ^ b;
        }
        let mut hasher = Sha512::new();
        hasher.update(xored);
        hasher.update([i as u8]);
        hasher.update(&dst_prime);
        b_prev = hasher.finalize().into();
        uniform_bytes.extend_from_slice(&b_prev);
    }

    uniform_bytes.truncate(len);
    Ok(uniform_bytes)
}

/// Hashes `msg` to a ristretto255 group element using
/// `expand_message_xmd` with the `ristretto255-SHA512` hash-to-group DST
/// and a 64-byte output, then the ristretto255 map-from-uniform-bytes.
pub fn hash_to_group(msg: &[u8]) -> Element {
    let uniform = expand_message_xmd(msg, DST_HASH_TO_GROUP, 64)
        .expect("DST and length are fixed and within bounds");
    let bytes: [u8; 64] = uniform
        .try_into()
        .expect("expand_message_xmd(.., 64) always returns 64 bytes");
    Element::from_uniform_bytes(&bytes)
}

/// The OPRF `Finalize` framing: `SHA512(len(x):2 || x || len(N):2 || N || "Finalize")`.
///
/// Fails with [`Error::InvalidLength`] if either `x` or `n` exceeds 65535
/// bytes, since the length prefix is a 16-bit field.
pub fn finalize_hash(x: &[u8], n: &[u8]) -> Result<[u8; 64], Error> {
    if x.len() > u16::MAX as usize {
        return Err(Error::InvalidLength {
            expected: u16::MAX as usize,
            got: x.len(),
        });
    }
    if n.len() > u16::MAX as usize {
        return Err(Error::InvalidLength {
            expected: u16::MAX as usize,
            got: n.len(),
        });
    }

    let mut hasher = Sha512::new();
    hasher.update((x.len() as u16).to_be_bytes());
    hasher.update(x);
    hasher.update((n.len() as u16).to_be_bytes());
    hasher.update(n);
    hasher.update(FINALIZE_LABEL);
    Ok(hasher.finalize().into())
}
