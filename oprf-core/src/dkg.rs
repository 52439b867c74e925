//! Verifiable Distributed Key Generation: a Feldman-style VSS over
//! ristretto255 with the base point `g`, producing additive shares of a
//! jointly-random secret suitable as t-OPRF key shares.
//!
//! Each participant contributes one random polynomial whose constant term
//! is their share of the secret; recipients verify the share they
//! received against the contributor's broadcast commitment vector before
//! accumulating. Despite the "Pedersen" name in the surrounding
//! documentation this core uses a single generator, not a hiding
//! commitment with a second independent generator.

use rand_core::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use tracing::instrument;
use zeroize::ZeroizeOnDrop;

use crate::element::Element;
use crate::error::Error;
use crate::scalar::Scalar;
use crate::shamir::{self, validate_peers};
use crate::share::Share;

/// The ephemeral polynomial sampled by a DKG participant during [`start`].
///
/// Holds `t` random coefficients, the constant term being this
/// participant's contributed secret. Must not outlive the call to
/// `start`; its coefficients are zeroized on drop.
#[derive(ZeroizeOnDrop)]
struct Polynomial(Vec<Scalar>);

impl Polynomial {
    fn sample<R: RngCore + CryptoRng>(t: u8, rng: &mut R) -> Self {
        Polynomial((0..t).map(|_| Scalar::random(rng)).collect())
    }

    fn evaluate(&self, x: Scalar) -> Scalar {
        let mut acc = Scalar::ZERO;
        for &c in self.0.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    fn commitments(&self) -> Vec<Element> {
        self.0.iter().map(|&a| Element::generator().mul(a)).collect()
    }
}

/// Runs this participant's contribution to the DKG ceremony: samples a
/// random degree-`(t-1)` polynomial and returns its commitment vector
/// alongside the `n` shares to distribute, one per recipient index
/// `1..=n`.
///
/// Requires `2 <= t <= n <= 255`.
#[instrument(level = "debug", skip(rng))]
pub fn start<R: RngCore + CryptoRng>(
    n: u8,
    t: u8,
    rng: &mut R,
) -> Result<(Vec<Element>, Vec<Share>), Error> {
    if t < 2 || t > n {
        return Err(Error::InvalidParameters {
            n: n as usize,
            t: t as usize,
        });
    }

    let poly = Polynomial::sample(t, rng);
    let commitments = poly.commitments();
    let shares = (1..=n)
        .map(|index| Share::new_unchecked(index, poly.evaluate(Scalar::from_index(index))))
        .collect();

    Ok((commitments, shares))
}

/// Verifies a single contributor's share against its commitment vector:
///
/// `g · share_from_i.value == Σ_k (self^k) · commitments_i[k]`
///
/// computed entirely in the group, with the final comparison performed
/// as a constant-time byte comparison of canonical encodings rather than
/// an algebraic equality, since the recipient's own share is secret
/// material and a short-circuiting comparison would leak timing
/// information about it.
///
/// Returns `Ok(())` when `i == self` trivially (no self-verification is
/// meaningful) or when the check passes, and
/// [`Error::CommitmentMismatch`] otherwise.
pub fn verify_commitment(
    this: u8,
    i: u8,
    commitments_i: &[Element],
    share_from_i: &Share,
) -> Result<(), Error> {
    if i == this {
        return Ok(());
    }
    if share_from_i.index() != this {
        return Err(Error::InconsistentIndex);
    }

    let lhs = Element::generator().mul(share_from_i.value());

    let x = Scalar::from_index(this);
    let mut x_pow = Scalar::from_index(1);
    let mut rhs = Element::identity();
    for &c_k in commitments_i {
        rhs = rhs.add(c_k.mul(x_pow));
        x_pow = x_pow * x;
    }

    if lhs.to_bytes().ct_eq(&rhs.to_bytes()).into() {
        Ok(())
    } else {
        Err(Error::CommitmentMismatch)
    }
}

/// Verifies every contributor's share in one pass, returning the indices
/// of peers whose shares failed verification. Not raised as a single
/// fatal error: an empty list means every share checked out.
///
/// `all_commitments` and `received_shares` must be indexed in the same
/// peer order `1..=n`; `this` is excluded from both (no self-check).
#[instrument(level = "debug", skip_all, fields(this, peers = peers.len()))]
pub fn verify_commitments(
    this: u8,
    peers: &[u8],
    all_commitments: &[Vec<Element>],
    received_shares: &[Share],
) -> Result<Vec<u8>, Error> {
    validate_peers(peers)?;
    if all_commitments.len() != peers.len() || received_shares.len() != peers.len() {
        return Err(Error::InvalidPeers);
    }

    let mut failures = Vec::new();
    for ((&i, commitments_i), share_from_i) in
        peers.iter().zip(all_commitments.iter()).zip(received_shares.iter())
    {
        if i == this {
            continue;
        }
        if verify_commitment(this, i, commitments_i, share_from_i).is_err() {
            failures.push(i);
        }
    }
    Ok(failures)
}

/// Materializes this participant's final long-term share by summing the
/// received per-contributor shares.
///
/// Every entry in `received_shares` must be addressed to `this`;
/// otherwise fails with [`Error::InconsistentIndex`]. This is the only
/// point at which the long-term share comes into existence.
#[instrument(level = "debug", skip_all, fields(this))]
pub fn finish(received_shares: &[Share], this: u8) -> Result<Share, Error> {
    if received_shares.iter().any(|s| s.index() != this) {
        return Err(Error::InconsistentIndex);
    }
    let sum = received_shares.iter().map(Share::value).sum();
    Share::new(this, sum)
}

/// Reconstructs the group secret from a set of final shares. A thin
/// wrapper around [`crate::shamir::interpolate`] used by tests and
/// authorized reconstruction ceremonies; never called during normal
/// threshold-OPRF operation.
pub fn reconstruct(shares: &[Share]) -> Result<Scalar, Error> {
    shamir::interpolate(shares)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs a full `n`-of-`t` ceremony: every participant contributes a
    /// polynomial, every recipient verifies every contributor's share
    /// against that contributor's commitment vector, then calls `finish`.
    /// Returns each participant's final long-term share.
    fn run_ceremony(n: u8, t: u8) -> Vec<Share> {
        let mut rng = rand::thread_rng();

        // commitments[c] / shares_by_contributor[c] are contributor c+1's
        // broadcast commitment vector and the n shares it handed out.
        let mut commitments = Vec::with_capacity(n as usize);
        let mut shares_by_contributor = Vec::with_capacity(n as usize);
        for _ in 0..n {
            let (c, s) = start(n, t, &mut rng).unwrap();
            commitments.push(c);
            shares_by_contributor.push(s);
        }

        (1..=n)
            .map(|recipient| {
                for (contributor_idx, contributor_shares) in
                    shares_by_contributor.iter().enumerate()
                {
                    let contributor = (contributor_idx + 1) as u8;
                    let share = contributor_shares[(recipient - 1) as usize];
                    assert!(verify_commitment(
                        recipient,
                        contributor,
                        &commitments[contributor_idx],
                        &share
                    )
                    .is_ok());
                }

                let received: Vec<Share> = shares_by_contributor
                    .iter()
                    .map(|shares| shares[(recipient - 1) as usize])
                    .collect();
                finish(&received, recipient).unwrap()
            })
            .collect()
    }

    #[test]
    fn start_rejects_invalid_parameters() {
        let mut rng = rand::thread_rng();
        assert!(start(3, 1, &mut rng).is_err());
        assert!(start(2, 3, &mut rng).is_err());
    }

    #[test]
    fn single_contributor_commitment_round_trips() {
        let mut rng = rand::thread_rng();
        let (commitments, shares) = start(5, 3, &mut rng).unwrap();
        for &recipient in &[1u8, 2, 3, 4, 5] {
            let share = shares[(recipient - 1) as usize];
            assert!(verify_commitment(recipient, 9, &commitments, &share).is_ok());
        }
    }

    #[test]
    fn tampered_share_fails_verification() {
        let mut rng = rand::thread_rng();
        let (commitments, shares) = start(5, 3, &mut rng).unwrap();
        let mut tampered = shares[0];
        tampered = Share::new_unchecked(tampered.index(), tampered.value() + Scalar::from_index(1));
        assert!(verify_commitment(tampered.index(), 9, &commitments, &tampered).is_err());
    }

    #[test]
    fn finish_rejects_inconsistent_index() {
        let mut rng = rand::thread_rng();
        let (_, shares) = start(3, 2, &mut rng).unwrap();
        assert!(finish(&shares, 1).is_err());
    }

    #[test]
    fn verify_commitments_reports_the_single_failing_peer() {
        let mut rng = rand::thread_rng();
        let peers = [1u8, 2, 3];
        let this = 1u8;

        let (c1, s1) = start(3, 2, &mut rng).unwrap();
        let (c2, s2) = start(3, 2, &mut rng).unwrap();
        let (c3, s3) = start(3, 2, &mut rng).unwrap();

        let mut tampered_from_3 = s3[(this - 1) as usize];
        tampered_from_3 =
            Share::new_unchecked(tampered_from_3.index(), tampered_from_3.value() + Scalar::from_index(1));

        let all_commitments = vec![c1, c2, c3];
        let received = vec![
            s1[(this - 1) as usize],
            s2[(this - 1) as usize],
            tampered_from_3,
        ];

        let failures = verify_commitments(this, &peers, &all_commitments, &received).unwrap();
        assert_eq!(failures, vec![3]);
    }

    #[test]
    fn full_ceremony_reconstructs_consistently_across_subsets() {
        let final_shares = run_ceremony(5, 3);

        let subset_a: Vec<Share> = final_shares.iter().filter(|s| [1, 2, 3].contains(&s.index())).copied().collect();
        let subset_b: Vec<Share> = final_shares.iter().filter(|s| [2, 4, 5].contains(&s.index())).copied().collect();

        assert_eq!(reconstruct(&subset_a).unwrap(), reconstruct(&subset_b).unwrap());
    }
}
