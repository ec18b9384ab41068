//! Measurement probabilities and shot sampling in the *z*-basis.
//!
//! Sampling is done by inverting the cumulative distribution over basis
//! states: a uniform draw `u ∈ [0, 1)` selects the first configuration whose
//! cumulative probability exceeds `u`. Randomness is always supplied by the
//! caller.

use std::collections::BTreeMap;
use rand::Rng;
use rustc_hash::FxHashMap;
use tracing::debug;
use crate::{
    codec::bits_unchecked,
    error::{ SamplingFault, SimError, SimResult },
    register::QuantumRegister,
};

/// Maximum accepted deviation of the final cumulative probability from 1.
pub const CDF_TOL: f64 = 1e-9;

/// Get the probability `|amp|^2` of each bitstring.
///
/// Keys are ordered by basis-state index.
pub fn measure_probs<Q>(qreg: &Q) -> BTreeMap<String, f64>
where Q: QuantumRegister + ?Sized
{
    let n = qreg.n();
    qreg.state().iter()
        .enumerate()
        .map(|(k, amp)| (bits_unchecked(k, n), amp.norm_sqr()))
        .collect()
}

/// Get the running sum of basis-state probabilities in index order.
pub fn cumulative_probs<Q>(qreg: &Q) -> Vec<f64>
where Q: QuantumRegister + ?Sized
{
    qreg.state().iter()
        .scan(0.0, |acc, amp| { *acc += amp.norm_sqr(); Some(*acc) })
        .collect()
}

fn check_cumulative(cprobs: &[f64], n: usize) -> SimResult<()> {
    let expected: usize = 1 << n;
    if cprobs.len() != expected {
        return Err(SamplingFault::WrongLength { expected, found: cprobs.len() }.into());
    }
    if cprobs[0] < 0.0 || cprobs[0].is_nan() {
        return Err(SamplingFault::Decreasing(0).into());
    }
    if let Some(k) = cprobs.windows(2).position(|w| !(w[1] >= w[0])) {
        return Err(SamplingFault::Decreasing(k + 1).into());
    }
    let total = cprobs[expected - 1];
    if (total - 1.0).abs() > CDF_TOL {
        return Err(SamplingFault::BadTotal(total).into());
    }
    Ok(())
}

fn check_draw(u: f64) -> SimResult<()> {
    if !(0.0..1.0).contains(&u) {
        return Err(SamplingFault::DrawOutOfRange(u).into());
    }
    Ok(())
}

// assumes `cprobs` and `u` have been checked
fn locate(cprobs: &[f64], u: f64) -> usize {
    let k = cprobs.partition_point(|p| *p <= u);
    if k < cprobs.len() { return k; }
    // u landed in the rounding gap below 1; take the last reachable state
    cprobs.windows(2)
        .rposition(|w| w[1] > w[0])
        .map(|k| k + 1)
        .unwrap_or(0)
}

/// Given an array of cumulative probabilities over all `2^n` configurations
/// and a random number `u ∈ [0, 1)`, return the bitstring of the first
/// configuration whose cumulative probability exceeds `u`.
///
/// Fails if `u` is out of range or `cprobs` is not a valid cumulative
/// distribution of length `2^n` ending within [`CDF_TOL`] of 1. `n` must be
/// at least 1.
pub fn get_conf(cprobs: &[f64], u: f64, n: usize) -> SimResult<String> {
    if n == 0 || n >= usize::BITS as usize {
        return Err(SimError::OutOfRange { index: n, n });
    }
    check_draw(u)?;
    check_cumulative(cprobs, n)?;
    Ok(bits_unchecked(locate(cprobs, u), n))
}

/// Sample `shots` measurements of all qubits in the *z*-basis, returned as
/// bitstrings in draw order.
///
/// The register is not collapsed. Fails if the register is not normalized to
/// within [`CDF_TOL`].
pub fn measure<Q, R>(qreg: &Q, shots: usize, rng: &mut R)
    -> SimResult<Vec<String>>
where
    Q: QuantumRegister + ?Sized,
    R: Rng + ?Sized,
{
    let n = qreg.n();
    let cprobs = cumulative_probs(qreg);
    check_cumulative(&cprobs, n)?;
    debug!(n, shots, "sampling measurements");
    let outcomes: Vec<String>
        = (0..shots)
        .map(|_| bits_unchecked(locate(&cprobs, rng.gen::<f64>()), n))
        .collect();
    Ok(outcomes)
}

/// Count the occurrences of each distinct bitstring in `results`.
pub fn get_counts<S>(results: &[S]) -> FxHashMap<String, usize>
where S: AsRef<str>
{
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    results.iter()
        .for_each(|res| { *counts.entry(res.as_ref().to_string()).or_insert(0) += 1; });
    counts
}

/// Compute the expected counts for `shots` shots, for comparison with
/// [`get_counts`].
pub fn expected_counts<Q>(qreg: &Q, shots: usize) -> BTreeMap<String, f64>
where Q: QuantumRegister + ?Sized
{
    measure_probs(qreg).into_iter()
        .map(|(bits, p)| (bits, p * shots as f64))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{ rngs::StdRng, SeedableRng };
    use num_complex::Complex64 as C64;
    use crate::register::FullStateQuantumRegister;

    fn uniform2() -> FullStateQuantumRegister {
        FullStateQuantumRegister::from_amps(&[0.5.into(); 4]).unwrap()
    }

    #[test]
    fn equal_superposition_probs() {
        let probs = measure_probs(&uniform2());
        let expected: BTreeMap<String, f64>
            = ["00", "01", "10", "11"].into_iter()
            .map(|b| (b.to_string(), 0.25))
            .collect();
        assert_eq!(probs, expected);
        assert_eq!(cumulative_probs(&uniform2()), vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn get_conf_inverts_cdf() {
        let cprobs = [0.25, 0.5, 0.75, 1.0];
        assert_eq!(get_conf(&cprobs, 0.0, 2).unwrap(), "00");
        assert_eq!(get_conf(&cprobs, 0.2499, 2).unwrap(), "00");
        assert_eq!(get_conf(&cprobs, 0.25, 2).unwrap(), "01");
        assert_eq!(get_conf(&cprobs, 0.6, 2).unwrap(), "10");
        assert_eq!(get_conf(&cprobs, 0.9999, 2).unwrap(), "11");
    }

    #[test]
    fn get_conf_skips_zero_probability() {
        // only "01" and "11" are possible
        let cprobs = [0.0, 0.5, 0.5, 1.0];
        assert_eq!(get_conf(&cprobs, 0.0, 2).unwrap(), "01");
        assert_eq!(get_conf(&cprobs, 0.5, 2).unwrap(), "11");
    }

    #[test]
    fn get_conf_rounding_gap() {
        // total is a hair below 1 and the last state is impossible
        let cprobs = [0.5, 1.0 - 1e-12, 1.0 - 1e-12, 1.0 - 1e-12];
        assert_eq!(get_conf(&cprobs, 1.0 - 1e-13, 2).unwrap(), "01");
    }

    #[test]
    fn get_conf_rejects_bad_input() {
        let cprobs = [0.25, 0.5, 0.75, 1.0];
        assert_eq!(
            get_conf(&cprobs, 1.0, 2),
            Err(SimError::Sampling(SamplingFault::DrawOutOfRange(1.0))),
        );
        assert!(get_conf(&cprobs, -0.1, 2).is_err());
        assert_eq!(
            get_conf(&cprobs, 0.5, 3),
            Err(SimError::Sampling(SamplingFault::WrongLength { expected: 8, found: 4 })),
        );
        assert_eq!(
            get_conf(&[0.25, 0.75, 0.5, 1.0], 0.5, 2),
            Err(SimError::Sampling(SamplingFault::Decreasing(2))),
        );
        assert_eq!(
            get_conf(&[0.25, 0.5, 0.75, 0.9], 0.5, 2),
            Err(SimError::Sampling(SamplingFault::BadTotal(0.9))),
        );
        assert!(get_conf(&[-0.1, 0.5, 0.75, 1.0], 0.5, 2).is_err());
        assert_eq!(get_conf(&[1.0], 0.5, 0), Err(SimError::OutOfRange { index: 0, n: 0 }));
    }

    #[test]
    fn measure_basis_state_is_deterministic() {
        let psi = FullStateQuantumRegister::from_bits("101").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let shots = measure(&psi, 100, &mut rng).unwrap();
        assert_eq!(shots.len(), 100);
        assert!(shots.iter().all(|s| s == "101"));
    }

    #[test]
    fn measure_is_reproducible_with_seed() {
        let a = measure(&uniform2(), 50, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = measure(&uniform2(), 50, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn measure_frequencies_follow_probs() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        // P(00) = 0.5, P(01) = 0, P(10) = P(11) = 0.25
        let psi = FullStateQuantumRegister::from_amps(
            &[h.into(), 0.0.into(), 0.5.into(), C64::new(0.0, -0.5)]).unwrap();
        let shots = 40_000;
        let results = measure(&psi, shots, &mut StdRng::seed_from_u64(12345)).unwrap();
        let counts = get_counts(&results);
        assert!(!counts.contains_key("01"));
        for (bits, expected) in expected_counts(&psi, shots) {
            let found = counts.get(&bits).copied().unwrap_or(0) as f64;
            assert!(
                (found - expected).abs() < 0.02 * shots as f64,
                "{}: found {}, expected {}", bits, found, expected,
            );
        }
    }

    #[test]
    fn measure_rejects_unnormalized() {
        let psi = FullStateQuantumRegister::from_amps(&[1.0.into(); 2]).unwrap();
        assert!(matches!(
            measure(&psi, 1, &mut StdRng::seed_from_u64(1)),
            Err(SimError::Sampling(SamplingFault::BadTotal(_))),
        ));
    }

    #[test]
    fn counts_sum_to_shots() {
        let results = ["00", "11", "00", "10", "00"];
        let counts = get_counts(&results);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts["00"], 3);
        assert_eq!(counts["11"], 1);
        assert_eq!(counts["10"], 1);
        assert_eq!(counts.values().sum::<usize>(), results.len());
        assert!(get_counts::<String>(&[]).is_empty());
    }
}
