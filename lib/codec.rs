//! Conversions between basis-state indices and bitstrings.
//!
//! All conversions follow the register convention: qubit 0 is the leftmost
//! character (most-significant bit).

use itertools::Itertools;
use num_complex::Complex64 as C64;
use crate::{
    error::{ SimError, SimResult },
    register::QuantumRegister,
};

/// Get the `n`-character binary string representation of `index`.
///
/// Fails with [`SimError::OutOfRange`] if `n` is zero or `index` is not in
/// `[0, 2^n)`.
pub fn binary_repr(index: usize, n: usize) -> SimResult<String> {
    if n == 0 || n >= usize::BITS as usize || index >= 1_usize << n {
        return Err(SimError::OutOfRange { index, n });
    }
    Ok(bits_unchecked(index, n))
}

// caller guarantees `n > 0` and `index < 2^n`
pub(crate) fn bits_unchecked(index: usize, n: usize) -> String {
    format!("{:0width$b}", index, width = n)
}

/// Inverse of [`binary_repr`]: get the basis-state index named by `bits`.
pub fn parse_bitstring(bits: &str) -> SimResult<usize> {
    if bits.is_empty()
        || bits.len() >= usize::BITS as usize
        || !bits.chars().all(|c| c == '0' || c == '1')
    {
        return Err(SimError::InvalidBitstring(bits.to_string()));
    }
    usize::from_str_radix(bits, 2)
        .map_err(|_| SimError::InvalidBitstring(bits.to_string()))
}

fn fmt_amp(amp: C64) -> String {
    if amp.im == 0.0 { format!("{}", amp.re) } else { format!("{}", amp) }
}

/// Express a register as a sum of kets, e.g. `"(1|000>) + (1|111>)"`.
///
/// Only exactly-zero amplitudes are omitted; terms appear in ascending index
/// order.
pub fn to_str<Q>(qreg: &Q) -> String
where Q: QuantumRegister + ?Sized
{
    let n = qreg.n();
    qreg.state().iter()
        .enumerate()
        .filter(|(_, amp)| **amp != C64::from(0.0))
        .map(|(k, amp)| format!("({}|{}>)", fmt_amp(*amp), bits_unchecked(k, n)))
        .join(" + ")
}
