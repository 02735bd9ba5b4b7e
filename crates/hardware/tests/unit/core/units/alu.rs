//! ALU Tests.
//!
//! Verifies `valB OP valA` results and the condition codes each operation produces.

use rstest::rstest;
use y86sim_core::core::units::alu::{Alu, arithmetic};
use y86sim_core::isa::instruction::AluFn;

const MIN: u64 = i64::MIN as u64;
const MAX: u64 = i64::MAX as u64;

// ══════════════════════════════════════════════════════════
// 1. Results
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::add(AluFn::Add, 3, 4, 7)]
#[case::sub_is_b_minus_a(AluFn::Sub, 3, 10, 7)]
#[case::sub_negative(AluFn::Sub, 10, 3, (-7i64) as u64)]
#[case::and(AluFn::And, 0b1100, 0b1010, 0b1000)]
#[case::xor(AluFn::Xor, 0b1100, 0b1010, 0b0110)]
#[case::add_wraps(AluFn::Add, 1, u64::MAX, 0)]
fn alu_result(#[case] op: AluFn, #[case] a: u64, #[case] b: u64, #[case] expected: u64) {
    assert_eq!(Alu::execute(op, a, b).value, expected);
}

// ══════════════════════════════════════════════════════════
// 2. Condition codes
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::zero(AluFn::Xor, 5, 5, true, false, false)]
#[case::negative(AluFn::Sub, 1, 0, false, true, false)]
#[case::positive(AluFn::Add, 1, 1, false, false, false)]
#[case::add_positive_overflow(AluFn::Add, 1, MAX, false, true, true)]
#[case::add_negative_overflow(AluFn::Add, MIN, MIN, true, false, true)]
#[case::sub_overflow(AluFn::Sub, 1, MIN, false, false, true)]
#[case::sub_no_overflow_same_signs(AluFn::Sub, MIN, MIN, true, false, false)]
#[case::logic_never_overflows(AluFn::And, MIN, MIN, false, true, false)]
fn alu_flags(
    #[case] op: AluFn,
    #[case] a: u64,
    #[case] b: u64,
    #[case] zf: bool,
    #[case] sf: bool,
    #[case] of: bool,
) {
    let cc = Alu::execute(op, a, b).cc;
    assert_eq!((cc.zf, cc.sf, cc.of), (zf, sf, of), "{op:?}({b:#x}, {a:#x})");
}

#[test]
fn arithmetic_helpers_report_overflow() {
    assert_eq!(arithmetic::add(MAX, 1), (MIN, true));
    assert_eq!(arithmetic::add(2, 3), (5, false));
    assert_eq!(arithmetic::sub(1, MIN), (MAX, true));
    assert_eq!(arithmetic::sub(1, 0), (u64::MAX, false));
}
