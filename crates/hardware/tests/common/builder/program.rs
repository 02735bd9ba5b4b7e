//! Y86-64 program builder.
//!
//! Assembles instructions into `.yo` object text so tests exercise the real loader. Jump
//! and call targets may name labels defined before or after the reference.

use std::collections::HashMap;
use std::fmt::Write as _;

use y86sim_core::common::RegId;
use y86sim_core::isa::instruction::{AluFn, Cond, Icode};

#[derive(Clone, Debug)]
struct Item {
    addr: u64,
    bytes: Vec<u8>,
    text: String,
    /// Byte offset of an 8-byte target to patch, and the label it names.
    fixup: Option<(usize, String)>,
}

/// Builds a program one instruction at a time, starting at address 0.
#[derive(Clone, Debug, Default)]
pub struct ProgramBuilder {
    items: Vec<Item>,
    pc: u64,
    labels: HashMap<String, u64>,
}

fn op(icode: Icode, ifun: u8) -> u8 {
    (u8::from(icode) << 4) | (ifun & 0xF)
}

fn regs(ra: RegId, rb: RegId) -> u8 {
    (u8::from(ra) << 4) | u8::from(rb)
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Address the next instruction will be placed at.
    pub fn pc(&self) -> u64 {
        self.pc
    }

    /// Moves the location counter forward (`.pos`).
    pub fn pos(mut self, addr: u64) -> Self {
        assert!(addr >= self.pc, ".pos {addr:#x} would move backwards");
        self.pc = addr;
        self
    }

    /// Defines `name` at the current address.
    pub fn label(mut self, name: &str) -> Self {
        let _ = self.labels.insert(name.to_string(), self.pc);
        self
    }

    fn emit(mut self, bytes: Vec<u8>, text: String, fixup: Option<(usize, String)>) -> Self {
        let len = bytes.len() as u64;
        self.items.push(Item {
            addr: self.pc,
            bytes,
            text,
            fixup,
        });
        self.pc += len;
        self
    }

    fn with_word(mut head: Vec<u8>, word: u64) -> Vec<u8> {
        head.extend_from_slice(&word.to_le_bytes());
        head
    }

    pub fn halt(self) -> Self {
        self.emit(vec![op(Icode::Halt, 0)], "halt".into(), None)
    }

    pub fn nop(self) -> Self {
        self.emit(vec![op(Icode::Nop, 0)], "nop".into(), None)
    }

    pub fn rrmovq(self, ra: RegId, rb: RegId) -> Self {
        self.cmov(Cond::Always, ra, rb)
    }

    pub fn cmov(self, cond: Cond, ra: RegId, rb: RegId) -> Self {
        let ifun = u8::from(cond);
        self.emit(
            vec![op(Icode::Rrmovq, ifun), regs(ra, rb)],
            format!("{} {ra}, {rb}", Icode::Rrmovq.mnemonic(ifun)),
            None,
        )
    }

    pub fn irmovq(self, val: u64, rb: RegId) -> Self {
        self.emit(
            Self::with_word(vec![op(Icode::Irmovq, 0), regs(RegId::Rnone, rb)], val),
            format!("irmovq ${val:#x}, {rb}"),
            None,
        )
    }

    pub fn rmmovq(self, ra: RegId, disp: u64, rb: RegId) -> Self {
        self.emit(
            Self::with_word(vec![op(Icode::Rmmovq, 0), regs(ra, rb)], disp),
            format!("rmmovq {ra}, {disp:#x}({rb})"),
            None,
        )
    }

    pub fn mrmovq(self, disp: u64, rb: RegId, ra: RegId) -> Self {
        self.emit(
            Self::with_word(vec![op(Icode::Mrmovq, 0), regs(ra, rb)], disp),
            format!("mrmovq {disp:#x}({rb}), {ra}"),
            None,
        )
    }

    pub fn opq(self, fun: AluFn, ra: RegId, rb: RegId) -> Self {
        let ifun = u8::from(fun);
        self.emit(
            vec![op(Icode::Opq, ifun), regs(ra, rb)],
            format!("{} {ra}, {rb}", Icode::Opq.mnemonic(ifun)),
            None,
        )
    }

    pub fn addq(self, ra: RegId, rb: RegId) -> Self {
        self.opq(AluFn::Add, ra, rb)
    }

    pub fn subq(self, ra: RegId, rb: RegId) -> Self {
        self.opq(AluFn::Sub, ra, rb)
    }

    pub fn andq(self, ra: RegId, rb: RegId) -> Self {
        self.opq(AluFn::And, ra, rb)
    }

    pub fn xorq(self, ra: RegId, rb: RegId) -> Self {
        self.opq(AluFn::Xor, ra, rb)
    }

    /// Conditional (or unconditional) jump to a label.
    pub fn jxx(self, cond: Cond, target: &str) -> Self {
        let ifun = u8::from(cond);
        self.emit(
            Self::with_word(vec![op(Icode::Jxx, ifun)], 0),
            format!("{} {target}", Icode::Jxx.mnemonic(ifun)),
            Some((1, target.to_string())),
        )
    }

    /// Jump to an absolute address.
    pub fn jxx_addr(self, cond: Cond, target: u64) -> Self {
        let ifun = u8::from(cond);
        self.emit(
            Self::with_word(vec![op(Icode::Jxx, ifun)], target),
            format!("{} {target:#x}", Icode::Jxx.mnemonic(ifun)),
            None,
        )
    }

    pub fn jmp(self, target: &str) -> Self {
        self.jxx(Cond::Always, target)
    }

    pub fn call(self, target: &str) -> Self {
        self.emit(
            Self::with_word(vec![op(Icode::Call, 0)], 0),
            format!("call {target}"),
            Some((1, target.to_string())),
        )
    }

    pub fn ret(self) -> Self {
        self.emit(vec![op(Icode::Ret, 0)], "ret".into(), None)
    }

    pub fn pushq(self, ra: RegId) -> Self {
        self.emit(
            vec![op(Icode::Pushq, 0), regs(ra, RegId::Rnone)],
            format!("pushq {ra}"),
            None,
        )
    }

    pub fn popq(self, ra: RegId) -> Self {
        self.emit(
            vec![op(Icode::Popq, 0), regs(ra, RegId::Rnone)],
            format!("popq {ra}"),
            None,
        )
    }

    /// An 8-byte data word (`.quad`).
    pub fn quad(self, val: u64) -> Self {
        self.emit(val.to_le_bytes().to_vec(), format!(".quad {val:#x}"), None)
    }

    /// Arbitrary bytes, e.g. an invalid encoding.
    pub fn raw(self, bytes: &[u8]) -> Self {
        self.emit(bytes.to_vec(), ".byte ...".into(), None)
    }

    /// Resolved `(address, bytes)` records in address order.
    pub fn image(&self) -> Vec<(u64, Vec<u8>)> {
        self.items
            .iter()
            .map(|item| {
                let mut bytes = item.bytes.clone();
                if let Some((offset, name)) = &item.fixup {
                    let target = *self
                        .labels
                        .get(name)
                        .unwrap_or_else(|| panic!("undefined label {name}"));
                    bytes[*offset..*offset + 8].copy_from_slice(&target.to_le_bytes());
                }
                (item.addr, bytes)
            })
            .collect()
    }

    /// Object-file text in the `0xADDR: HEX | source` layout.
    pub fn to_yo(&self) -> String {
        let mut out = String::new();
        for ((addr, bytes), item) in self.image().into_iter().zip(&self.items) {
            let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
            let _ = writeln!(out, "0x{addr:03x}: {hex:<20} | {}", item.text);
        }
        out
    }
}
