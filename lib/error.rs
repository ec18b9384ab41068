//! Error types for register construction, gate application, and sampling.

use thiserror::Error;

/// Errors returned by fallible operations in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// An index or bit position outside `[0, 2^n)` / `[0, n)`.
    #[error("index {index} out of range for {n}-qubit register")]
    OutOfRange { index: usize, n: usize },

    /// Equal or out-of-range qubit indices for a two-qubit operation.
    #[error("invalid qubit pair ({i}, {j}) for {n}-qubit register")]
    InvalidQubitIndex { i: usize, j: usize, n: usize },

    /// A two-qubit gate with the wrong shape.
    #[error("expected a 4×4 two-qubit gate, got {nrows}×{ncols}")]
    Decomposition { nrows: usize, ncols: usize },

    /// Malformed probability input or a draw outside its domain.
    #[error("sampling failed: {0}")]
    Sampling(#[from] SamplingFault),

    /// A bitstring that is empty or contains characters other than `0`/`1`.
    #[error("invalid bitstring {0:?}")]
    InvalidBitstring(String),

    /// An amplitude vector whose length is not `2^n` for some `n > 0`.
    #[error("invalid state vector length {0}")]
    InvalidLength(usize),
}

/// Specific reasons a cumulative distribution or draw was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplingFault {
    #[error("draw {0} is not in [0, 1)")]
    DrawOutOfRange(f64),

    #[error("expected {expected} cumulative probabilities, got {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("cumulative probabilities decrease at index {0}")]
    Decreasing(usize),

    #[error("cumulative probabilities end at {0}, not 1")]
    BadTotal(f64),
}

pub type SimResult<T> = Result<T, SimError>;
