//! The basic two-party OPRF (RFC 9497, mode 0, `ristretto255-SHA512`):
//! `KeyGen`, `Blind`, `Evaluate`, `Unblind`, `Finalize`.

use rand_core::{CryptoRng, RngCore};
use tracing::instrument;

use crate::element::Element;
use crate::error::Error;
use crate::hash::{finalize_hash, hash_to_group};
use crate::scalar::Scalar;

/// Draws a uniformly random, non-zero private key.
pub fn key_gen<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    Scalar::random(rng)
}

/// Blinds `x`, returning the blinding factor `r` and the blinded element
/// `α = r · hash_to_group(x)`.
///
/// If `r` is supplied the caller controls the blinding factor (for
/// deterministic test vectors or client-chosen entropy); otherwise one is
/// drawn via the same procedure as [`key_gen`].
#[instrument(level = "debug", skip_all)]
pub fn blind<R: RngCore + CryptoRng>(
    x: &[u8],
    r: Option<Scalar>,
    rng: &mut R,
) -> Result<(Scalar, Element), Error> {
    let h0 = hash_to_group(x);
    let r = r.unwrap_or_else(|| Scalar::random(rng));
    let alpha = raw_evaluate(r, h0);
    Ok((r, alpha))
}

/// The shared `k · α` step underlying both the basic and threshold
/// `Evaluate` surfaces.
pub(crate) fn raw_evaluate(k: Scalar, alpha: Element) -> Element {
    alpha.mul(k)
}

/// Server-side evaluation with the raw private key: `β = k · α`.
pub fn evaluate(k: Scalar, alpha: Element) -> Element {
    raw_evaluate(k, alpha)
}

/// Removes the blinding factor: `N = r⁻¹ · β`.
pub fn unblind(r: Scalar, beta: Element) -> Element {
    beta.mul(r.invert())
}

/// Finalizes the unblinded result into the 64-byte pseudorandom output.
#[instrument(level = "debug", skip_all)]
pub fn finalize(x: &[u8], n: Element) -> Result<[u8; 64], Error> {
    finalize_hash(x, &n.to_bytes())
}
