//! Threshold OPRF evaluation: the pre-baked-coefficient server path, part
//! combination, and the session-bound 3HashTDH variant (Gu et al. 2024).

use blake2::Blake2b512;
use blake2::Digest;
use tracing::instrument;

use crate::element::Element;
use crate::error::Error;
use crate::oprf::raw_evaluate;
use crate::shamir::{self, validate_peers};
use crate::share::{Part, Share};

/// Server-side threshold evaluation with the Lagrange coefficient baked
/// into the output, so [`threshold_combine`] only needs to sum parts.
///
/// `peers` is the full set of indices contributing to this evaluation and
/// must include `share.index()`.
#[instrument(level = "debug", skip_all, fields(index = share.index(), peers = peers.len()))]
pub fn evaluate(share: &Share, alpha: Element, peers: &[u8]) -> Result<Part, Error> {
    let coeff = shamir::lagrange_coefficient(share.index(), peers)?;
    let k_prime = share.value() * coeff;
    let beta_i = raw_evaluate(k_prime, alpha);
    Part::new(share.index(), beta_i)
}

/// Combines pre-baked threshold parts into the full evaluation `β`.
///
/// Requires between 1 and 255 parts with distinct, non-zero indices; sums
/// their elements after sorting by index (sorting is only for
/// deterministic output, since group addition is commutative).
#[instrument(level = "debug", skip_all, fields(parts = parts.len()))]
pub fn threshold_combine(parts: &[Part]) -> Result<Element, Error> {
    if parts.is_empty() {
        return Err(Error::InsufficientParts);
    }
    let indices: Vec<u8> = parts.iter().map(Part::index).collect();
    validate_peers(&indices)?;

    let mut sorted = parts.to_vec();
    sorted.sort_by_key(Part::index);

    Ok(sorted.into_iter().map(|p| p.element()).sum())
}

/// The session-bound 3HashTDH construction.
///
/// `k` is this server's key share, `z` its share of the independently
/// generated zero-polynomial, `alpha` the client's blinded input element,
/// and `ssid` the session identifier all cooperating servers must agree
/// on out of band. Does **not** bake in a Lagrange coefficient: per
/// correctness of [`threshold_combine`] over its output requires the
/// combining peer subset to match the subset implicit in how `k` and `z`
/// were jointly generated.
#[instrument(level = "debug", skip_all, fields(index = k.index()))]
pub fn three_hash_tdh(k: &Share, z: &Share, alpha: Element, ssid: &[u8]) -> Result<Part, Error> {
    if ssid.len() > u16::MAX as usize {
        return Err(Error::InvalidLength {
            expected: u16::MAX as usize,
            got: ssid.len(),
        });
    }
    if k.index() != z.index() {
        return Err(Error::InconsistentIndex);
    }

    let alpha_bytes = alpha.to_bytes();
    let beta_1 = raw_evaluate(k.value(), alpha);

    let mut hasher = Blake2b512::new();
    hasher.update((ssid.len() as u16).to_be_bytes());
    hasher.update(ssid);
    hasher.update(alpha_bytes);
    let h: [u8; 64] = hasher.finalize().into();
    let h_point = Element::from_uniform_bytes(&h);

    let beta_2 = raw_evaluate(z.value(), h_point);

    Part::new(k.index(), beta_1 + beta_2)
}
