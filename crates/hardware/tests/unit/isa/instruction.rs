//! Encoding Table Tests.

use rstest::rstest;
use y86sim_core::isa::instruction::{AluFn, Cond, Icode};

#[rstest]
#[case(Icode::Halt, 1)]
#[case(Icode::Nop, 1)]
#[case(Icode::Rrmovq, 2)]
#[case(Icode::Irmovq, 10)]
#[case(Icode::Rmmovq, 10)]
#[case(Icode::Mrmovq, 10)]
#[case(Icode::Opq, 2)]
#[case(Icode::Jxx, 9)]
#[case(Icode::Call, 9)]
#[case(Icode::Ret, 1)]
#[case(Icode::Pushq, 2)]
#[case(Icode::Popq, 2)]
fn instruction_lengths(#[case] icode: Icode, #[case] len: u64) {
    assert_eq!(icode.length(), len);
}

#[test]
fn unassigned_icodes_do_not_decode() {
    assert_eq!(Icode::from_nibble(0xB), Some(Icode::Popq));
    for nibble in 0xC..=0xF {
        assert_eq!(Icode::from_nibble(nibble), None);
    }
}

#[test]
fn function_code_validity() {
    assert!(Icode::Opq.valid_ifun(3));
    assert!(!Icode::Opq.valid_ifun(4));
    assert!(Icode::Jxx.valid_ifun(6));
    assert!(!Icode::Jxx.valid_ifun(7));
    assert!(Icode::Rrmovq.valid_ifun(0));
    assert!(Icode::Halt.valid_ifun(0));
    assert!(!Icode::Halt.valid_ifun(1));
    assert!(!Icode::Ret.valid_ifun(0xF));
}

#[test]
fn mnemonics_follow_function_codes() {
    assert_eq!(Icode::Rrmovq.mnemonic(u8::from(Cond::Always)), "rrmovq");
    assert_eq!(Icode::Rrmovq.mnemonic(u8::from(Cond::Ge)), "cmovge");
    assert_eq!(Icode::Opq.mnemonic(u8::from(AluFn::Xor)), "xorq");
    assert_eq!(Icode::Jxx.mnemonic(u8::from(Cond::Always)), "jmp");
    assert_eq!(Icode::Jxx.mnemonic(u8::from(Cond::Le)), "jle");
    assert_eq!(Icode::Pushq.to_string(), "pushq");
}

#[test]
fn bubble_icode_is_nop() {
    assert_eq!(Icode::default(), Icode::Nop);
    // The default variant is not a fallback for unassigned codes.
    assert!(Icode::try_from(0xCu8).is_err());
    assert_eq!(Icode::from_nibble(0xF), None);
}
