//! Gate matrices and the single-qubit operator basis.
//!
//! Single-qubit gates are plain `Matrix2<Complex64>`s. Two-qubit gates are
//! dynamically sized `DMatrix<Complex64>`s so that malformed input can be
//! reported instead of rejected at compile time; all two-qubit operations
//! check for a 4×4 shape. In both cases the row/column ordering follows the
//! register convention, so for a two-qubit gate acting on `(i, j)` the
//! basis order is ∣0_i 0_j⟩, ∣0_i 1_j⟩, ∣1_i 0_j⟩, ∣1_i 1_j⟩.
//!
//! Unitarity is never enforced; see [`is_unitary`].

use std::fmt;
use nalgebra as na;
use num_complex::Complex64 as C64;
use rand::Rng;
use crate::error::{ SimError, SimResult };

/// Maximum entry-wise deviation of `G†G` from the identity accepted by
/// [`is_unitary`].
pub const UNITARY_TOL: f64 = 1e-10;

/// A single-qubit Pauli operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pauli {
    /// Identity
    I,
    /// σ<sub>*x*</sub>
    X,
    /// σ<sub>*y*</sub>
    Y,
    /// σ<sub>*z*</sub>
    Z,
}

/// Prints the operator's letter; the alternate form prints the identity as
/// `.` so that runs of operators stay readable.
impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::I => write!(f, "{}", if f.alternate() { "." } else { "I" }),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl Pauli {
    /// All four operators in basis order.
    pub const ALL: [Self; 4] = [Self::I, Self::X, Self::Y, Self::Z];

    /// Return the operator as a 2×2 matrix in the *z*-basis.
    pub fn matrix(self) -> na::Matrix2<C64> {
        const ZERO: C64 = C64 { re: 0.0, im: 0.0 };
        const ONE: C64 = C64 { re: 1.0, im: 0.0 };
        const I: C64 = C64 { re: 0.0, im: 1.0 };
        match self {
            Self::I => na::Matrix2::new(ONE,  ZERO, ZERO,  ONE),
            Self::X => na::Matrix2::new(ZERO, ONE,  ONE,   ZERO),
            Self::Y => na::Matrix2::new(ZERO, -I,   I,     ZERO),
            Self::Z => na::Matrix2::new(ONE,  ZERO, ZERO, -ONE),
        }
    }
}

/// Kronecker product `a ⊗ b` of two single-qubit operators, as a 4×4 matrix.
pub fn kron2(a: &na::Matrix2<C64>, b: &na::Matrix2<C64>) -> na::DMatrix<C64> {
    na::DMatrix::from_fn(4, 4, |r, c| a[(r >> 1, c >> 1)] * b[(r & 1, c & 1)])
}

/// Convert a single-qubit gate to a dynamically sized matrix.
pub fn to_dynamic(gate: &na::Matrix2<C64>) -> na::DMatrix<C64> {
    na::DMatrix::from_fn(2, 2, |r, c| gate[(r, c)])
}

pub(crate) fn check_2qubit_shape(gate: &na::DMatrix<C64>) -> SimResult<()> {
    if gate.shape() != (4, 4) {
        return Err(SimError::Decomposition {
            nrows: gate.nrows(),
            ncols: gate.ncols(),
        });
    }
    Ok(())
}

// ∣ab⟩ -> ∣ba⟩ on a two-qubit basis index
fn swap_idx(k: usize) -> usize { ((k & 1) << 1) | (k >> 1) }

/// Given a two-qubit gate, switch the order of the qubits it acts on.
///
/// The result is `SWAP · gate · SWAP`, so applying it to qubits `(j, i)` is
/// the same as applying `gate` to `(i, j)`. This is an involution.
pub fn swap_2qubits(gate: &na::DMatrix<C64>) -> SimResult<na::DMatrix<C64>> {
    check_2qubit_shape(gate)?;
    Ok(na::DMatrix::from_fn(4, 4, |r, c| gate[(swap_idx(r), swap_idx(c))]))
}

/// Return `true` if `gate` is square and `G†G` is the identity to within
/// [`UNITARY_TOL`].
pub fn is_unitary(gate: &na::DMatrix<C64>) -> bool {
    if !gate.is_square() { return false; }
    let eye = na::DMatrix::<C64>::identity(gate.nrows(), gate.ncols());
    (gate.adjoint() * gate - eye).iter().all(|d| d.norm() < UNITARY_TOL)
}

/// Sample a random `dim × dim` unitary as the unitary factor of the QR
/// decomposition of a matrix with uniformly random entries.
///
/// The distribution is not Haar, but every gate produced is unitary.
pub fn sample_unitary<R>(dim: usize, rng: &mut R) -> na::DMatrix<C64>
where R: Rng + ?Sized
{
    let m: na::DMatrix<C64>
        = na::DMatrix::from_fn(dim, dim, |_, _| {
            C64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
        });
    m.qr().q()
}

/// Like [`sample_unitary`], but for a single qubit.
pub fn sample_unitary_1q<R>(rng: &mut R) -> na::Matrix2<C64>
where R: Rng + ?Sized
{
    let m: na::Matrix2<C64>
        = na::Matrix2::from_fn(|_, _| {
            C64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
        });
    m.qr().q()
}
