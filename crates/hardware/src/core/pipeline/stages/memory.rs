//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the pipeline. It performs the following:
//! 1. **Address Selection:** `valE` for stores, `mrmovq`, and `call`; `valA` for `popq`/`ret`.
//! 2. **Loads:** Reads an 8-byte word for `mrmovq`, `popq`, and `ret`.
//! 3. **Stores:** Computes the word `rmmovq`, `pushq`, and `call` write, deferred to commit.
//! 4. **Status:** An out-of-range access turns the instruction's status into `ADR` and
//!    performs no access.

use tracing::trace;

use crate::common::constants::WORD_SIZE;
use crate::core::arch::stat::Stat;
use crate::core::pipeline::latches::{MEntry, WEntry};
use crate::core::pipeline::signals::{MemorySignals, PendingStore};
use crate::isa::instruction::Icode;
use crate::memory::Memory;

/// Data address used by `icode`, if it accesses memory.
pub fn mem_addr(m: &MEntry) -> Option<u64> {
    match m.icode {
        Icode::Rmmovq | Icode::Pushq | Icode::Call | Icode::Mrmovq => Some(m.vale),
        Icode::Popq | Icode::Ret => Some(m.vala),
        _ => None,
    }
}

/// Returns `true` if `icode` reads data memory.
pub fn mem_read(icode: Icode) -> bool {
    matches!(icode, Icode::Mrmovq | Icode::Popq | Icode::Ret)
}

/// Returns `true` if `icode` writes data memory.
pub fn mem_write(icode: Icode) -> bool {
    matches!(icode, Icode::Rmmovq | Icode::Pushq | Icode::Call)
}

/// Executes the memory access stage.
///
/// # Arguments
///
/// * `m` - Committed Memory register.
/// * `mem` - Data memory as of the end of the previous cycle.
pub fn mem_stage(m: &MEntry, mem: &Memory) -> MemorySignals {
    let mut stat = m.stat;
    let mut valm = 0;
    let mut store = None;

    if let Some(addr) = mem_addr(m) {
        if mem_read(m.icode) {
            match mem.get_long(addr) {
                Ok(word) => {
                    valm = word;
                    trace!("MEM pc={:#x} LOAD [{:#x}] -> {:#x}", m.pc, addr, word);
                }
                Err(e) => {
                    stat = Stat::Adr;
                    trace!("MEM pc={:#x} # {}", m.pc, e);
                }
            }
        } else if mem_write(m.icode) {
            match mem.check_range(addr, WORD_SIZE) {
                Ok(_) => {
                    store = Some(PendingStore { addr, val: m.vala });
                    trace!("MEM pc={:#x} STORE [{:#x}] <- {:#x}", m.pc, addr, m.vala);
                }
                Err(e) => {
                    stat = Stat::Adr;
                    trace!("MEM pc={:#x} # {}", m.pc, e);
                }
            }
        }
    }

    MemorySignals {
        stat,
        valm,
        store,
        next: WEntry {
            stat,
            pc: m.pc,
            icode: m.icode,
            vale: m.vale,
            valm,
            dste: m.dste,
            dstm: m.dstm,
        },
    }
}
