//! Pipeline Control Tests.
//!
//! Verifies the Normal/Stall/Bubble decision for each latch under every hazard class and
//! their combinations.

use pretty_assertions::assert_eq;
use y86sim_core::common::RegId;
use y86sim_core::core::arch::stat::Stat;
use y86sim_core::core::pipeline::hazards::{
    HazardInputs, PipelineControl, exception_in_flight, pipeline_control,
};
use y86sim_core::core::pipeline::latches::{Control, DEntry, EEntry, MEntry, WEntry};
use y86sim_core::isa::instruction::Icode;
use Control::{Bubble, Normal, Stall};

use crate::common::builder::pipeline_state::{
    DEntryBuilder, EEntryBuilder, MEntryBuilder, WEntryBuilder,
};

struct Latches {
    d: DEntry,
    e: EEntry,
    m: MEntry,
    w: WEntry,
}

impl Latches {
    fn idle() -> Self {
        Self {
            d: DEntryBuilder::new().build(),
            e: EEntryBuilder::new().build(),
            m: MEntryBuilder::new().build(),
            w: WEntryBuilder::new().build(),
        }
    }

    fn control(
        &self,
        d_srca: RegId,
        e_cnd: bool,
        f_stat: Stat,
        m_stat: Stat,
    ) -> PipelineControl {
        pipeline_control(&HazardInputs {
            d: &self.d,
            e: &self.e,
            m: &self.m,
            w: &self.w,
            f_stat,
            d_srca,
            d_srcb: RegId::Rnone,
            e_cnd,
            m_stat,
        })
    }
}

fn controls(c: &PipelineControl) -> [Control; 5] {
    [c.f, c.d, c.e, c.m, c.w]
}

#[test]
fn no_hazard_is_all_normal() {
    let c = Latches::idle().control(RegId::Rnone, true, Stat::Aok, Stat::Aok);
    assert_eq!(controls(&c), [Normal; 5]);
    assert!(!(c.load_use || c.mispredict || c.ret || c.exception));
}

#[test]
fn load_use_stalls_fetch_and_decode() {
    let mut l = Latches::idle();
    l.e = EEntryBuilder::new().inst(Icode::Mrmovq, 0).dst_m(RegId::Rax).build();
    let c = l.control(RegId::Rax, true, Stat::Aok, Stat::Aok);
    assert!(c.load_use);
    assert_eq!(controls(&c), [Stall, Stall, Bubble, Normal, Normal]);
}

#[test]
fn mispredict_bubbles_decode_and_execute() {
    let mut l = Latches::idle();
    l.e = EEntryBuilder::new().inst(Icode::Jxx, 4).build();
    let c = l.control(RegId::Rnone, false, Stat::Aok, Stat::Aok);
    assert!(c.mispredict);
    assert_eq!(controls(&c), [Normal, Bubble, Bubble, Normal, Normal]);
}

#[test]
fn ret_stalls_fetch_and_bubbles_decode() {
    let mut l = Latches::idle();
    l.d = DEntryBuilder::new().inst(Icode::Ret, 0).build();
    let c = l.control(RegId::Rsp, true, Stat::Aok, Stat::Aok);
    assert!(c.ret);
    assert_eq!(controls(&c), [Stall, Bubble, Normal, Normal, Normal]);
}

#[test]
fn load_use_takes_priority_over_ret_in_decode() {
    // popq %rsp in E feeding ret in D: the ret must stay put, not vanish into a bubble.
    let mut l = Latches::idle();
    l.d = DEntryBuilder::new().inst(Icode::Ret, 0).build();
    l.e = EEntryBuilder::new().inst(Icode::Mrmovq, 0).dst_m(RegId::Rsp).build();
    let c = l.control(RegId::Rsp, true, Stat::Aok, Stat::Aok);
    assert!(c.load_use && c.ret);
    assert_eq!(controls(&c), [Stall, Stall, Bubble, Normal, Normal]);
}

#[test]
fn mispredict_takes_priority_over_ret_in_decode() {
    let mut l = Latches::idle();
    l.d = DEntryBuilder::new().inst(Icode::Ret, 0).build();
    l.e = EEntryBuilder::new().inst(Icode::Jxx, 4).build();
    let c = l.control(RegId::Rsp, false, Stat::Aok, Stat::Aok);
    assert!(c.mispredict && c.ret);
    assert_eq!(controls(&c), [Stall, Bubble, Bubble, Normal, Normal]);
}

#[test]
fn fetch_fault_stalls_fetch_only() {
    let c = Latches::idle().control(RegId::Rnone, true, Stat::Adr, Stat::Aok);
    assert_eq!(controls(&c), [Stall, Normal, Normal, Normal, Normal]);
}

#[test]
fn exception_in_decode_freezes_fetch() {
    let mut l = Latches::idle();
    l.d = DEntryBuilder::new().stat(Stat::Hlt).inst(Icode::Halt, 0).build();
    let c = l.control(RegId::Rnone, true, Stat::Aok, Stat::Aok);
    assert!(c.exception);
    assert_eq!(controls(&c), [Stall, Bubble, Normal, Normal, Normal]);
}

#[test]
fn memory_fault_bubbles_memory_register() {
    let mut l = Latches::idle();
    l.m = MEntryBuilder::new().icode(Icode::Rmmovq).build();
    let c = l.control(RegId::Rnone, true, Stat::Aok, Stat::Adr);
    assert_eq!(c.m, Bubble);
    assert_eq!(c.w, Normal);
}

#[test]
fn writeback_exception_stalls_writeback() {
    let mut l = Latches::idle();
    l.w = WEntryBuilder::new().stat(Stat::Hlt).icode(Icode::Halt).build();
    let c = l.control(RegId::Rnone, true, Stat::Aok, Stat::Aok);
    assert_eq!(c.m, Bubble);
    assert_eq!(c.w, Stall);
}

#[test]
fn exception_detection_ignores_writeback() {
    let d = DEntryBuilder::new().build();
    let e = EEntryBuilder::new().build();
    let m = MEntryBuilder::new().stat(Stat::Ins).build();
    assert!(exception_in_flight(&d, &e, &m));
    let m = MEntryBuilder::new().build();
    assert!(!exception_in_flight(&d, &e, &m));
}
