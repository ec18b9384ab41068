//! Application of one- and two-qubit gates to a register.
//!
//! Every operation comes in two strategies:
//! - *full*: expand the gate to the full 2<sup>*N*</sup> × 2<sup>*N*</sup>
//!   operator and multiply the state vector by it. This is *O*(4<sup>*N*</sup>)
//!   in time and memory and is meant as a readable reference for small
//!   registers.
//! - *optimized*: act on the amplitude vector directly in
//!   *O*(2<sup>*N*</sup>). Two-qubit gates are first decomposed (see
//!   [`decomp`][crate::decomp]) and applied term by term with the single-qubit
//!   routine.
//!
//! and two forms: a pure form returning a new register, and a `_mut` form
//! that overwrites the amplitudes of the register it is given.
//!
//! Gates are assumed to be unitary, which is not checked.

use nalgebra as na;
use num_complex::Complex64 as C64;
use rayon::prelude::*;
use tracing::{ debug, trace };
use crate::{
    decomp::decompose_2_qubit_gate,
    error::{ SimError, SimResult },
    gate::{ check_2qubit_shape, swap_2qubits, to_dynamic, Pauli },
    register::QuantumRegister,
};

/// Registers of at least this many qubits have the optimized single-qubit
/// loop split across threads.
pub const PAR_MIN_QUBITS: usize = 14;

const PAR_MIN_STRIDE: usize = 1 << 10;

fn check_qubit(n: usize, i: usize) -> SimResult<()> {
    if i >= n { return Err(SimError::OutOfRange { index: i, n }); }
    Ok(())
}

fn check_pair(n: usize, i: usize, j: usize) -> SimResult<()> {
    if i == j || i >= n || j >= n {
        return Err(SimError::InvalidQubitIndex { i, j, n });
    }
    Ok(())
}

/* Single-qubit ***************************************************************/

#[inline]
fn rotate_pair(a0: &mut C64, a1: &mut C64, g: &na::Matrix2<C64>) {
    let (b0, b1) = (*a0, *a1);
    *a0 = g[(0, 0)] * b0 + g[(0, 1)] * b1;
    *a1 = g[(1, 0)] * b0 + g[(1, 1)] * b1;
}

// Indices differing only in the bit for qubit `k` sit `stride = 2^(n-1-k)`
// apart, so the vector splits into blocks of `2 * stride` whose lower and
// upper halves pair up element-wise. Blocks are disjoint.
pub(crate) fn apply_1qubit_amps(
    amps: &mut [C64],
    n: usize,
    gate: &na::Matrix2<C64>,
    k: usize,
) {
    let stride: usize = 1 << (n - 1 - k);
    let g = *gate;
    if n >= PAR_MIN_QUBITS {
        // split within a block only when the halves are worth a task each
        amps.par_chunks_mut(2 * stride)
            .for_each(|block| {
                let (lo, hi) = block.split_at_mut(stride);
                if stride >= PAR_MIN_STRIDE {
                    lo.par_iter_mut().zip(hi.par_iter_mut())
                        .for_each(|(a0, a1)| { rotate_pair(a0, a1, &g); });
                } else {
                    lo.iter_mut().zip(hi.iter_mut())
                        .for_each(|(a0, a1)| { rotate_pair(a0, a1, &g); });
                }
            });
    } else {
        amps.chunks_mut(2 * stride)
            .for_each(|block| {
                let (lo, hi) = block.split_at_mut(stride);
                lo.iter_mut().zip(hi.iter_mut())
                    .for_each(|(a0, a1)| { rotate_pair(a0, a1, &g); });
            });
    }
}

// I ⊗ ... ⊗ G ⊗ ... ⊗ I, qubit 0 leftmost
fn expand_1qubit(n: usize, gate: &na::Matrix2<C64>, i: usize)
    -> na::DMatrix<C64>
{
    let g = to_dynamic(gate);
    let eye = na::DMatrix::<C64>::identity(2, 2);
    (0..n).fold(
        na::DMatrix::<C64>::identity(1, 1),
        |acc, q| acc.kronecker(if q == i { &g } else { &eye }),
    )
}

/// Apply a single-qubit gate to qubit `i` by expanding the full operator,
/// returning a new register.
pub fn apply_1qubit_full<Q>(qreg: &Q, gate: &na::Matrix2<C64>, i: usize)
    -> SimResult<Q>
where Q: QuantumRegister + Clone
{
    let mut out = qreg.clone();
    apply_1qubit_full_mut(&mut out, gate, i)?;
    Ok(out)
}

/// Apply a single-qubit gate to qubit `i` by expanding the full operator,
/// in place.
pub fn apply_1qubit_full_mut<Q>(qreg: &mut Q, gate: &na::Matrix2<C64>, i: usize)
    -> SimResult<()>
where Q: QuantumRegister + ?Sized
{
    let n = qreg.n();
    check_qubit(n, i)?;
    trace!(qubit = i, n, "full single-qubit application");
    let op = expand_1qubit(n, gate, i);
    let new = &op * qreg.state();
    qreg.set_state(new)
}

/// Apply a single-qubit gate to qubit `i`, returning a new register.
pub fn apply_1qubit<Q>(qreg: &Q, gate: &na::Matrix2<C64>, i: usize)
    -> SimResult<Q>
where Q: QuantumRegister + Clone
{
    let mut out = qreg.clone();
    apply_1qubit_mut(&mut out, gate, i)?;
    Ok(out)
}

/// Apply a single-qubit gate to qubit `i` in place.
pub fn apply_1qubit_mut<Q>(qreg: &mut Q, gate: &na::Matrix2<C64>, i: usize)
    -> SimResult<()>
where Q: QuantumRegister + ?Sized
{
    let n = qreg.n();
    check_qubit(n, i)?;
    trace!(qubit = i, n, "single-qubit application");
    apply_1qubit_amps(qreg.state_mut(), n, gate, i);
    Ok(())
}

/* Two-qubit ******************************************************************/

// Embed `gate` at qubits (i, j) by matching basis indices: entry (r, c) is
// nonzero only if r and c agree on every other qubit.
fn expand_2qubit(n: usize, gate: &na::DMatrix<C64>, i: usize, j: usize)
    -> na::DMatrix<C64>
{
    let si = n - 1 - i;
    let sj = n - 1 - j;
    let rest: usize = !((1 << si) | (1 << sj));
    let sub = |k: usize| (((k >> si) & 1) << 1) | ((k >> sj) & 1);
    let dim: usize = 1 << n;
    na::DMatrix::from_fn(dim, dim, |r, c| {
        if r & rest == c & rest { gate[(sub(r), sub(c))] } else { C64::from(0.0) }
    })
}

/// Apply a two-qubit gate to qubits `i` and `j` by expanding the full
/// operator, returning a new register.
///
/// `gate` acts with qubit `i` as its first tensor factor.
pub fn apply_2qubit_full<Q>(
    qreg: &Q,
    gate: &na::DMatrix<C64>,
    i: usize,
    j: usize,
) -> SimResult<Q>
where Q: QuantumRegister + Clone
{
    let mut out = qreg.clone();
    apply_2qubit_full_mut(&mut out, gate, i, j)?;
    Ok(out)
}

/// Apply a two-qubit gate to qubits `i` and `j` by expanding the full
/// operator, in place.
pub fn apply_2qubit_full_mut<Q>(
    qreg: &mut Q,
    gate: &na::DMatrix<C64>,
    i: usize,
    j: usize,
) -> SimResult<()>
where Q: QuantumRegister + ?Sized
{
    let n = qreg.n();
    check_pair(n, i, j)?;
    check_2qubit_shape(gate)?;
    trace!(i, j, n, "full two-qubit application");
    let op = expand_2qubit(n, gate, i, j);
    let new = &op * qreg.state();
    qreg.set_state(new)
}

/// Apply a two-qubit gate to qubits `i` and `j`, returning a new register.
///
/// `gate` acts with qubit `i` as its first tensor factor.
pub fn apply_2qubit<Q>(
    qreg: &Q,
    gate: &na::DMatrix<C64>,
    i: usize,
    j: usize,
) -> SimResult<Q>
where Q: QuantumRegister + Clone
{
    let mut out = qreg.clone();
    apply_2qubit_mut(&mut out, gate, i, j)?;
    Ok(out)
}

/// Apply a two-qubit gate to qubits `i` and `j` in place.
///
/// The gate is decomposed into weighted products `c (A ⊗ B)`; each product is
/// applied to a copy of the input with the single-qubit routine and the
/// results are summed.
pub fn apply_2qubit_mut<Q>(
    qreg: &mut Q,
    gate: &na::DMatrix<C64>,
    i: usize,
    j: usize,
) -> SimResult<()>
where Q: QuantumRegister + ?Sized
{
    let n = qreg.n();
    check_pair(n, i, j)?;
    // terms are always applied with the first factor on the lower qubit
    let (lo, hi, dec)
        = if i < j {
            (i, j, decompose_2_qubit_gate(gate, None)?)
        } else {
            (j, i, decompose_2_qubit_gate(&swap_2qubits(gate)?, None)?)
        };
    debug!(i, j, n, terms = dec.len(), "two-qubit application");

    let input: na::DVector<C64> = qreg.state().clone();
    let mut scratch: na::DVector<C64> = input.clone();
    let mut acc: na::DVector<C64> = na::DVector::zeros(input.len());
    for term in dec.terms() {
        trace!(%term, lo, hi, "applying term");
        scratch.copy_from(&input);
        if term.paulis.0 != Pauli::I {
            apply_1qubit_amps(scratch.as_mut_slice(), n, &term.a, lo);
        }
        if term.paulis.1 != Pauli::I {
            apply_1qubit_amps(scratch.as_mut_slice(), n, &term.b, hi);
        }
        acc.axpy(term.coeff, &scratch, C64::from(1.0));
    }
    qreg.set_state(acc)
}
