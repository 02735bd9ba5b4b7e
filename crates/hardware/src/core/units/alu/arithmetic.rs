//! Integer arithmetic operations.
//!
//! Both functions return the wrapped 64-bit result and whether signed overflow occurred.

/// Computes `b + a`.
#[inline]
pub fn add(a: u64, b: u64) -> (u64, bool) {
    let (_, of) = (b as i64).overflowing_add(a as i64);
    (b.wrapping_add(a), of)
}

/// Computes `b - a`.
#[inline]
pub fn sub(a: u64, b: u64) -> (u64, bool) {
    let (_, of) = (b as i64).overflowing_sub(a as i64);
    (b.wrapping_sub(a), of)
}
