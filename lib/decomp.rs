//! Decomposition of two-qubit gates into sums of single-qubit tensor products.
//!
//! The 16 products σ<sub>*a*</sub> ⊗ σ<sub>*b*</sub> of the Pauli operators
//! (including the identity) form an orthogonal basis for 4×4 complex matrices
//! under the trace inner product, with each element having norm² 4. Any
//! two-qubit gate *G* can therefore be written as
//!
//! *G* = Σ<sub>*ab*</sub> *c*<sub>*ab*</sub> σ<sub>*a*</sub> ⊗ σ<sub>*b*</sub>,
//!   *c*<sub>*ab*</sub> = Tr[(σ<sub>*a*</sub> ⊗ σ<sub>*b*</sub>)<sup>†</sup> *G*] / 4
//!
//! and applied to a register as a weighted sum of pairs of single-qubit gates.
//! Typical gates have only a handful of non-zero coefficients (CNOT has four,
//! SWAP has four, any product gate `A ⊗ B` at most 16 but usually fewer), so
//! near-zero terms are dropped.

use std::fmt;
use nalgebra as na;
use num_complex::Complex64 as C64;
use once_cell::sync::Lazy;
use itertools::Itertools;
use tracing::debug;
use crate::{
    error::SimResult,
    gate::{ check_2qubit_shape, kron2, Pauli },
};

/// Coefficients with magnitude at or below this value are dropped by default.
pub const DEFAULT_THRESHOLD: f64 = 1e-15;

static PAULI_PRODUCTS: Lazy<Vec<((Pauli, Pauli), na::DMatrix<C64>)>>
    = Lazy::new(|| {
        Pauli::ALL.into_iter()
            .cartesian_product(Pauli::ALL)
            .map(|(a, b)| ((a, b), kron2(&a.matrix(), &b.matrix())))
            .collect()
    });

/// A single weighted term `coeff · (a ⊗ b)` of a [`Decomposition`].
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    pub coeff: C64,
    /// Operator on the first qubit.
    pub a: na::Matrix2<C64>,
    /// Operator on the second qubit.
    pub b: na::Matrix2<C64>,
    /// Basis labels of `a` and `b`.
    pub paulis: (Pauli, Pauli),
}

/// Prints as `(coeff) AB`, with identities shown as `.`.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {:#}{:#}", self.coeff, self.paulis.0, self.paulis.1)
    }
}

/// A two-qubit gate written as a sum of weighted tensor products of
/// single-qubit operators.
#[derive(Clone, Debug, PartialEq)]
pub struct Decomposition(Vec<Term>);

impl IntoIterator for Decomposition {
    type Item = Term;
    type IntoIter = <Vec<Term> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl<'a> IntoIterator for &'a Decomposition {
    type Item = &'a Term;
    type IntoIter = <&'a Vec<Term> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl Decomposition {
    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn terms(&self) -> &[Term] { &self.0 }

    /// Sum the terms back into a 4×4 matrix.
    pub fn reconstruct(&self) -> na::DMatrix<C64> {
        self.0.iter()
            .fold(na::DMatrix::zeros(4, 4), |acc, term| {
                acc + kron2(&term.a, &term.b) * term.coeff
            })
    }
}

/// Decompose a two-qubit gate into a sum of single-qubit operator products.
///
/// Terms whose coefficient magnitude does not exceed `threshold` (default
/// [`DEFAULT_THRESHOLD`]) are dropped. Fails if `gate` is not 4×4.
pub fn decompose_2_qubit_gate(gate: &na::DMatrix<C64>, threshold: Option<f64>)
    -> SimResult<Decomposition>
{
    check_2qubit_shape(gate)?;
    let threshold = threshold.unwrap_or(DEFAULT_THRESHOLD);
    let terms: Vec<Term>
        = PAULI_PRODUCTS.iter()
        .filter_map(|((pa, pb), basis)| {
            let coeff: C64
                = basis.iter().zip(gate.iter())
                .map(|(s, g)| s.conj() * g)
                .sum::<C64>() / 4.0;
            (coeff.norm() > threshold)
                .then(|| Term { coeff, a: pa.matrix(), b: pb.matrix(), paulis: (*pa, *pb) })
        })
        .collect();
    debug!(terms = terms.len(), threshold, "decomposed two-qubit gate");
    Ok(Decomposition(terms))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ error::SimError, gate::sample_unitary };
    use rand::{ rngs::StdRng, SeedableRng };

    fn max_dev(a: &na::DMatrix<C64>, b: &na::DMatrix<C64>) -> f64 {
        (a - b).iter().map(|d| d.norm()).fold(0.0, f64::max)
    }

    fn cnot() -> na::DMatrix<C64> {
        let mut g = na::DMatrix::zeros(4, 4);
        g[(0, 0)] = C64::from(1.0);
        g[(1, 1)] = C64::from(1.0);
        g[(2, 3)] = C64::from(1.0);
        g[(3, 2)] = C64::from(1.0);
        g
    }

    #[test]
    fn cnot_has_four_terms() {
        // CNOT = (II + IX + ZI - ZX) / 2
        let dec = decompose_2_qubit_gate(&cnot(), None).unwrap();
        let labels: Vec<(Pauli, Pauli)> = dec.terms().iter().map(|t| t.paulis).collect();
        assert_eq!(
            labels,
            vec![
                (Pauli::I, Pauli::I),
                (Pauli::I, Pauli::X),
                (Pauli::Z, Pauli::I),
                (Pauli::Z, Pauli::X),
            ],
        );
        let coeffs: Vec<f64> = dec.terms().iter().map(|t| t.coeff.re).collect();
        assert_eq!(coeffs, vec![0.5, 0.5, 0.5, -0.5]);
        assert!(max_dev(&dec.reconstruct(), &cnot()) < 1e-15);
    }

    #[test]
    fn product_gate_is_single_term() {
        let g = kron2(&Pauli::X.matrix(), &Pauli::Z.matrix());
        let dec = decompose_2_qubit_gate(&g, None).unwrap();
        assert_eq!(dec.len(), 1);
        let term = &dec.terms()[0];
        assert_eq!(term.paulis, (Pauli::X, Pauli::Z));
        assert!((term.coeff - C64::from(1.0)).norm() < 1e-15);
    }

    #[test]
    fn random_unitaries_round_trip() {
        let mut rng = StdRng::seed_from_u64(90210);
        for _ in 0..50 {
            let g = sample_unitary(4, &mut rng);
            let dec = decompose_2_qubit_gate(&g, None).unwrap();
            assert!(max_dev(&dec.reconstruct(), &g) < 1e-10);
        }
    }

    #[test]
    fn threshold_drops_small_terms() {
        let mut g = na::DMatrix::<C64>::identity(4, 4);
        g[(0, 0)] += C64::from(4e-6);
        let all = decompose_2_qubit_gate(&g, None).unwrap();
        let coarse = decompose_2_qubit_gate(&g, Some(1e-5)).unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(coarse.len(), 1);
        assert_eq!(coarse.terms()[0].paulis, (Pauli::I, Pauli::I));
    }

    #[test]
    fn term_labels() {
        let term = Term {
            coeff: C64::new(-0.5, 0.0),
            a: Pauli::Z.matrix(),
            b: Pauli::I.matrix(),
            paulis: (Pauli::Z, Pauli::I),
        };
        assert_eq!(term.to_string(), "(-0.5+0i) Z.");
        let dec = decompose_2_qubit_gate(&kron2(&Pauli::I.matrix(), &Pauli::Y.matrix()), None)
            .unwrap();
        assert!(dec.terms()[0].to_string().ends_with(" .Y"));
    }

    #[test]
    fn rejects_non_4x4() {
        assert_eq!(
            decompose_2_qubit_gate(&na::DMatrix::identity(2, 2), None),
            Err(SimError::Decomposition { nrows: 2, ncols: 2 }),
        );
        assert!(decompose_2_qubit_gate(&na::DMatrix::zeros(4, 3), None).is_err());
    }
}
