//! Shamir secret sharing over the ristretto255 scalar field: share
//! generation, Lagrange coefficients, and interpolation.
//!
//! Peer indices are mapped to field elements via [`Scalar::from_index`]
//! (the raw integer value, not a hash) everywhere in this module, matching
//! the convention the Lagrange math below assumes.

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::Error;
use crate::scalar::Scalar;
use crate::share::Share;

/// Validates a peer index set: no duplicates, no zero index.
pub fn validate_peers(peers: &[u8]) -> Result<(), Error> {
    if peers.is_empty() || peers.contains(&0) {
        return Err(Error::InvalidPeers);
    }
    for (i, a) in peers.iter().enumerate() {
        if peers[..i].contains(a) {
            return Err(Error::InvalidPeers);
        }
    }
    Ok(())
}

/// The Lagrange coefficient for peer `index` evaluating the interpolating
/// polynomial at `x = 0`, given the full set of contributing `peers`.
///
/// `coeff(i, peers) = prod_{j in peers, j != i} (-x_j) / (x_i - x_j)`.
///
/// This is the coefficient a threshold-OPRF server pre-bakes into its
/// `Evaluate` output so that [`crate::threshold::threshold_combine`] need
/// only sum the parts it receives.
pub fn lagrange_coefficient(index: u8, peers: &[u8]) -> Result<Scalar, Error> {
    validate_peers(peers)?;
    if !peers.contains(&index) {
        return Err(Error::InvalidPeers);
    }
    lagrange_coefficient_at(Scalar::ZERO, index, peers)
}

/// The Lagrange coefficient for peer `index` evaluating the interpolating
/// polynomial at an arbitrary point `x`, given the contributing `peers`.
fn lagrange_coefficient_at(x: Scalar, index: u8, peers: &[u8]) -> Result<Scalar, Error> {
    let x_i = Scalar::from_index(index);
    let mut numerator = Scalar::from_index(1);
    let mut denominator = Scalar::from_index(1);
    for &j in peers {
        if j == index {
            continue;
        }
        let x_j = Scalar::from_index(j);
        numerator = numerator * (x - x_j);
        denominator = denominator * (x_i - x_j);
    }
    Ok(numerator * denominator.invert())
}

/// Interpolates the secret-sharing polynomial at `x`, given a set of
/// shares on that polynomial. At least two distinct shares are required;
/// the caller is responsible for having collected the threshold's worth.
pub fn interpolate_at(x: Scalar, shares: &[Share]) -> Result<Scalar, Error> {
    if shares.is_empty() {
        return Err(Error::InsufficientParts);
    }
    let peers: Vec<u8> = shares.iter().map(Share::index).collect();
    validate_peers(&peers)?;

    let mut acc = Scalar::ZERO;
    for share in shares {
        let coeff = lagrange_coefficient_at(x, share.index(), &peers)?;
        acc = acc + coeff * share.value();
    }
    Ok(acc)
}

/// Reconstructs the shared secret: `interpolate_at(0, shares)`.
pub fn interpolate(shares: &[Share]) -> Result<Scalar, Error> {
    interpolate_at(Scalar::ZERO, shares)
}

/// Splits `secret` into `n` Shamir shares with reconstruction threshold
/// `t`, using a degree-`(t-1)` random polynomial with `secret` as the
/// constant term.
///
/// Requires `2 <= t <= n <= 255`; returns [`Error::InvalidParameters`]
/// otherwise.
pub fn create_shares<R: RngCore + CryptoRng>(
    secret: Scalar,
    n: u8,
    t: u8,
    rng: &mut R,
) -> Result<Vec<Share>, Error> {
    let (n_usize, t_usize) = (n as usize, t as usize);
    if t < 2 || t > n {
        return Err(Error::InvalidParameters {
            n: n_usize,
            t: t_usize,
        });
    }

    let mut coefficients: Vec<Scalar> = Vec::with_capacity(t_usize);
    coefficients.push(secret);
    for _ in 1..t_usize {
        coefficients.push(Scalar::random(rng));
    }

    let shares = (1..=n)
        .map(|index| {
            let x = Scalar::from_index(index);
            let value = horner(&coefficients, x);
            Share::new_unchecked(index, value)
        })
        .collect();

    coefficients.zeroize_scalars();
    Ok(shares)
}

/// Evaluates a polynomial given by its coefficients (constant term first)
/// at `x`, via Horner's method.
fn horner(coefficients: &[Scalar], x: Scalar) -> Scalar {
    let mut acc = Scalar::ZERO;
    for &c in coefficients.iter().rev() {
        acc = acc * x + c;
    }
    acc
}

trait ZeroizeScalars {
    fn zeroize_scalars(&mut self);
}

impl ZeroizeScalars for Vec<Scalar> {
    fn zeroize_scalars(&mut self) {
        for s in self.iter_mut() {
            *s = Scalar::ZERO;
        }
        self.clear();
    }
}

/// Test-only helpers for exercising sharing/reconstruction end to end.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils {
    use super::*;

    /// Splits a freshly-random secret into `n`-of-`t` shares, reconstructs
    /// it from a given subset of indices, and returns `(secret, shares,
    /// reconstructed)` for assertion by the caller.
    pub fn reconstruct_random_shares<R: RngCore + CryptoRng>(
        n: u8,
        t: u8,
        subset: &[u8],
        rng: &mut R,
    ) -> Result<(Scalar, Vec<Share>, Scalar), Error> {
        let secret = Scalar::random(rng);
        let shares = create_shares(secret, n, t, rng)?;
        let chosen: Vec<Share> = shares
            .iter()
            .filter(|s| subset.contains(&s.index()))
            .copied()
            .collect();
        let reconstructed = interpolate(&chosen)?;
        Ok((secret, shares, reconstructed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_peers_rejects_zero_and_duplicates() {
        assert!(validate_peers(&[]).is_err());
        assert!(validate_peers(&[0, 1]).is_err());
        assert!(validate_peers(&[1, 1]).is_err());
        assert!(validate_peers(&[1, 2, 3]).is_ok());
    }

    #[test]
    fn create_shares_rejects_invalid_parameters() {
        let mut rng = rand::thread_rng();
        let secret = Scalar::random(&mut rng);
        assert!(create_shares(secret, 3, 1, &mut rng).is_err());
        assert!(create_shares(secret, 2, 3, &mut rng).is_err());
        assert!(create_shares(secret, 0, 0, &mut rng).is_err());
    }

    #[test]
    fn threshold_subset_reconstructs_secret() {
        let mut rng = rand::thread_rng();
        let (secret, shares, reconstructed) =
            test_utils::reconstruct_random_shares(5, 3, &[1, 3, 5], &mut rng).unwrap();
        assert_eq!(shares.len(), 5);
        assert_eq!(secret, reconstructed);
    }

    #[test]
    fn any_threshold_subset_agrees() {
        let mut rng = rand::thread_rng();
        let secret = Scalar::random(&mut rng);
        let shares = create_shares(secret, 5, 3, &mut rng).unwrap();

        let subset_a: Vec<Share> = shares.iter().filter(|s| [1, 2, 3].contains(&s.index())).copied().collect();
        let subset_b: Vec<Share> = shares.iter().filter(|s| [2, 4, 5].contains(&s.index())).copied().collect();

        assert_eq!(interpolate(&subset_a).unwrap(), secret);
        assert_eq!(interpolate(&subset_b).unwrap(), secret);
    }

    #[test]
    fn below_threshold_does_not_generally_reconstruct() {
        let mut rng = rand::thread_rng();
        let secret = Scalar::random(&mut rng);
        let shares = create_shares(secret, 5, 3, &mut rng).unwrap();
        let subset: Vec<Share> = shares.iter().filter(|s| [1, 2].contains(&s.index())).copied().collect();
        assert_ne!(interpolate(&subset).unwrap(), secret);
    }

    #[test]
    fn lagrange_coefficient_sanity() {
        // coeff(1, {1,2,3}) for x=0:
        // num = (0-2)*(0-3) = 6, den = (1-2)*(1-3) = 2, coeff = 3
        assert_eq!(lagrange_coefficient(1, &[1, 2, 3]).unwrap(), Scalar::from_index(3));
        // coeff(2, {1,2,3}): num = (0-1)*(0-3) = 3, den = (2-1)*(2-3) = -1, coeff = -3 mod L
        assert_eq!(
            lagrange_coefficient(2, &[1, 2, 3]).unwrap(),
            Scalar::from_index(3).neg()
        );
        // coeff(3, {1,2,3}): num = (0-1)*(0-2) = 2, den = (3-1)*(3-2) = 2, coeff = 1
        assert_eq!(lagrange_coefficient(3, &[1, 2, 3]).unwrap(), Scalar::from_index(1));
    }

    #[test]
    fn interpolate_rejects_empty_or_invalid_peers() {
        assert!(interpolate(&[]).is_err());
    }
}
