//! Static Branch Predictor.
//!
//! Implements an "Always Taken" policy: `jXX` and `call` predict their constant target,
//! every other instruction predicts the next sequential address. `ret` is not predicted;
//! Fetch stalls until the return address is read from memory.

use crate::isa::instruction::Icode;

/// Predicts the address of the instruction after the one just fetched.
///
/// # Arguments
///
/// * `icode` - Instruction code of the fetched instruction.
/// * `valc` - Its constant word.
/// * `valp` - Its next sequential address.
///
/// # Returns
///
/// `valc` for `jXX`/`call`, otherwise `valp`.
#[inline]
pub fn predict_pc(icode: Icode, valc: u64, valp: u64) -> u64 {
    match icode {
        Icode::Jxx | Icode::Call => valc,
        _ => valp,
    }
}
