//! A small state-vector simulator for quantum circuits.
//!
//! The full state of an *N*-qubit register is kept as 2<sup>*N*</sup> complex
//! amplitudes. Gates can be applied either by expanding them to the full
//! operator on the register (slow, but easy to check) or by acting on the
//! amplitudes directly; two-qubit gates in the latter case are decomposed into
//! sums of products of single-qubit operators. Measurement outcomes are sampled
//! from the resulting probability distribution with a caller-supplied random
//! number generator.
//!
//! # Example
//! ```
//! use fullstate_sim::prelude::*;
//! use nalgebra as na;
//! use num_complex::Complex64 as C64;
//! use rand::{ rngs::StdRng, SeedableRng };
//!
//! let r = std::f64::consts::FRAC_1_SQRT_2;
//! let h: na::Matrix2<C64> = na::Matrix2::new(r.into(), r.into(), r.into(), (-r).into());
//! let mut cnot = na::DMatrix::<C64>::zeros(4, 4);
//! cnot[(0, 0)] = 1.0.into();
//! cnot[(1, 1)] = 1.0.into();
//! cnot[(2, 3)] = 1.0.into();
//! cnot[(3, 2)] = 1.0.into();
//!
//! // prepare a Bell state on qubits 0, 1
//! let mut psi = FullStateQuantumRegister::new(2);
//! apply_1qubit_mut(&mut psi, &h, 0).unwrap();
//! apply_2qubit_mut(&mut psi, &cnot, 0, 1).unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(10546);
//! let counts = get_counts(&measure(&psi, 1000, &mut rng).unwrap());
//! assert_eq!(counts.values().sum::<usize>(), 1000);
//! assert!(!counts.contains_key("01") && !counts.contains_key("10"));
//! ```

pub mod error;
pub mod register;
pub mod codec;
pub mod gate;
pub mod decomp;
pub mod apply;
pub mod measure;

/// Re-exports of the main types and operations.
pub mod prelude {
    pub use crate::{
        apply::{
            apply_1qubit,
            apply_1qubit_full,
            apply_1qubit_full_mut,
            apply_1qubit_mut,
            apply_2qubit,
            apply_2qubit_full,
            apply_2qubit_full_mut,
            apply_2qubit_mut,
        },
        codec::{ binary_repr, parse_bitstring, to_str },
        decomp::{ decompose_2_qubit_gate, Decomposition, Term },
        error::{ SamplingFault, SimError, SimResult },
        gate::{ swap_2qubits, Pauli },
        measure::{ cumulative_probs, get_conf, get_counts, measure, measure_probs },
        register::{ FullStateQuantumRegister, QuantumRegister },
    };
}
