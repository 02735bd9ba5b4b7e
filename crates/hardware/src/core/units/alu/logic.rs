//! Bitwise logical operations.

/// Computes `b & a`.
#[inline]
pub fn and(a: u64, b: u64) -> u64 {
    b & a
}

/// Computes `b ^ a`.
#[inline]
pub fn xor(a: u64, b: u64) -> u64 {
    b ^ a
}
