//! *N*-qubit registers in the full state-vector representation.
//!
//! A register of *N* qubits is stored as its 2<sup>*N*</sup> complex
//! amplitudes in the *z*-basis. Index `k` of the amplitude vector corresponds
//! to the *N*-bit binary representation of `k`, with qubit 0 as the
//! most-significant (leftmost) bit and qubit *N* – 1 as the least-significant.
//! Hence for qubit `q`, the relevant bit of an index is bit `N - 1 - q`.
//!
//! # Example
//! ```
//! use fullstate_sim::register::{ FullStateQuantumRegister, QuantumRegister };
//!
//! let mut psi = FullStateQuantumRegister::from_bits("000").unwrap();
//! psi.state_mut()[7] = 1.0.into();
//! assert_eq!(psi.to_string(), "(1|000>) + (1|111>)");
//! ```

use std::fmt;
use nalgebra as na;
use num_complex::Complex64 as C64;
use crate::{
    codec::{ parse_bitstring, to_str },
    error::{ SimError, SimResult },
};

/// Tolerance on the total probability used by
/// [`QuantumRegister::is_normalized`].
pub const NORM_TOL: f64 = 1e-10;

/// Capabilities shared by all representations of an *N*-qubit register.
///
/// Gate application and measurement are written against this trait only.
pub trait QuantumRegister {
    /// Number of qubits.
    fn n(&self) -> usize;

    /// Full amplitude vector, of length `2^n`.
    fn state(&self) -> &na::DVector<C64>;

    /// Mutable access to the amplitudes. The length is fixed; use
    /// [`Self::set_state`] to replace the vector wholesale.
    fn state_mut(&mut self) -> &mut [C64];

    /// Replace the amplitude vector, failing if its length is not `2^n`.
    ///
    /// The register is left unchanged on failure.
    fn set_state(&mut self, state: na::DVector<C64>) -> SimResult<()>;

    /// Total probability, `sum |amp|^2`.
    fn norm_sqr(&self) -> f64 {
        self.state().iter().map(|a| a.norm_sqr()).sum()
    }

    /// Return `true` if the total probability is within [`NORM_TOL`] of 1.
    fn is_normalized(&self) -> bool {
        (self.norm_sqr() - 1.0).abs() < NORM_TOL
    }
}

/// A register holding all 2<sup>*N*</sup> amplitudes.
#[derive(Clone, Debug, PartialEq)]
pub struct FullStateQuantumRegister {
    n: usize,
    state: na::DVector<C64>,
}

impl QuantumRegister for FullStateQuantumRegister {
    fn n(&self) -> usize { self.n }

    fn state(&self) -> &na::DVector<C64> { &self.state }

    fn state_mut(&mut self) -> &mut [C64] { self.state.as_mut_slice() }

    fn set_state(&mut self, state: na::DVector<C64>) -> SimResult<()> {
        if state.len() != self.state.len() {
            return Err(SimError::InvalidLength(state.len()));
        }
        self.state = state;
        Ok(())
    }
}

impl fmt::Display for FullStateQuantumRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_str(self))
    }
}

impl FullStateQuantumRegister {
    /// Create a new `n`-qubit register initialized to ∣0...0⟩.
    ///
    /// *Panics if `n` is zero or `2^n` does not fit in a `usize`.*
    pub fn new(n: usize) -> Self {
        if n == 0 || n >= usize::BITS as usize {
            panic!("FullStateQuantumRegister: invalid qubit count {}", n);
        }
        let mut state = na::DVector::zeros(1_usize << n);
        state[0] = C64::from(1.0);
        Self { n, state }
    }

    /// Create a register in the single basis state named by `bits`, e.g.
    /// `"010"` for ∣010⟩.
    pub fn from_bits(bits: &str) -> SimResult<Self> {
        let index = parse_bitstring(bits)?;
        let n = bits.len();
        let mut state = na::DVector::zeros(1_usize << n);
        state[index] = C64::from(1.0);
        Ok(Self { n, state })
    }

    /// Create a register from an explicit amplitude vector.
    ///
    /// The length must be a power of two greater than 1. Normalization is not
    /// checked.
    pub fn from_state(state: na::DVector<C64>) -> SimResult<Self> {
        let len = state.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(SimError::InvalidLength(len));
        }
        let n = len.trailing_zeros() as usize;
        Ok(Self { n, state })
    }

    /// Create a register from a slice of amplitudes; see [`Self::from_state`].
    pub fn from_amps(amps: &[C64]) -> SimResult<Self> {
        Self::from_state(na::DVector::from_column_slice(amps))
    }

    /// Consume `self`, returning the amplitude vector.
    pub fn into_state(self) -> na::DVector<C64> { self.state }
}
