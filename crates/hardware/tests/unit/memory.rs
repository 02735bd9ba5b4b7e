//! Main Memory Tests.
//!
//! Verifies bounds checking, little-endian word access, bulk loads, and word diffs.

use pretty_assertions::assert_eq;
use y86sim_core::Memory;
use y86sim_core::common::MemoryError;

// ══════════════════════════════════════════════════════════
// 1. Byte and word access
// ══════════════════════════════════════════════════════════

#[test]
fn new_memory_is_zeroed() {
    let mem = Memory::new(0x40);
    assert_eq!(mem.capacity(), 0x40);
    assert!(mem.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn default_memory_is_4k() {
    assert_eq!(Memory::default().capacity(), 0x1000);
}

#[test]
fn words_are_little_endian() {
    let mut mem = Memory::new(0x40);
    mem.put_long(0x8, 0x0102_0304_0506_0708).unwrap();
    assert_eq!(mem.get_byte(0x8).unwrap(), 0x08);
    assert_eq!(mem.get_byte(0xF).unwrap(), 0x01);
    assert_eq!(mem.get_long(0x8).unwrap(), 0x0102_0304_0506_0708);
}

#[test]
fn unaligned_word_access_is_allowed() {
    let mut mem = Memory::new(0x40);
    mem.put_long(0x3, u64::MAX).unwrap();
    assert_eq!(mem.get_long(0x3).unwrap(), u64::MAX);
    assert_eq!(mem.get_byte(0x2).unwrap(), 0);
    assert_eq!(mem.get_byte(0xB).unwrap(), 0);
}

// ══════════════════════════════════════════════════════════
// 2. Bounds
// ══════════════════════════════════════════════════════════

#[test]
fn last_full_word_is_in_range() {
    let mut mem = Memory::new(0x1000);
    assert!(mem.put_long(0xff8, 7).is_ok());
    assert_eq!(mem.get_long(0xff8).unwrap(), 7);
}

#[test]
fn word_straddling_the_end_faults_without_writing() {
    let mut mem = Memory::new(0x1000);
    let err = mem.put_long(0xffc, u64::MAX).unwrap_err();
    assert_eq!(
        err,
        MemoryError::OutOfRange {
            addr: 0xffc,
            len: 8,
            capacity: 0x1000,
        }
    );
    assert!(mem.as_bytes().iter().all(|&b| b == 0));
    assert!(mem.get_long(0xffc).is_err());
}

#[test]
fn byte_access_at_capacity_faults() {
    let mut mem = Memory::new(0x10);
    assert!(mem.get_byte(0xF).is_ok());
    assert!(mem.get_byte(0x10).is_err());
    assert!(mem.put_byte(0x10, 1).is_err());
}

#[test]
fn huge_addresses_do_not_wrap() {
    let mem = Memory::new(0x1000);
    assert!(mem.get_long(u64::MAX - 3).is_err());
    assert!(mem.get_byte(u64::MAX).is_err());
    assert!(mem.check_range(u64::MAX, 8).is_err());
}

#[test]
fn check_range_returns_byte_range() {
    let mem = Memory::new(0x100);
    assert_eq!(mem.check_range(0x10, 8).unwrap(), 0x10..0x18);
}

// ══════════════════════════════════════════════════════════
// 3. Bulk load and diff
// ══════════════════════════════════════════════════════════

#[test]
fn load_places_bytes() {
    let mut mem = Memory::new(0x20);
    mem.load(0x4, &[0xAA, 0xBB, 0xCC]).unwrap();
    assert_eq!(&mem.as_bytes()[0x3..0x8], &[0, 0xAA, 0xBB, 0xCC, 0]);
}

#[test]
fn load_past_end_is_rejected_and_leaves_memory_untouched() {
    let mut mem = Memory::new(0x8);
    assert!(mem.load(0x6, &[1, 2, 3]).is_err());
    assert_eq!(mem.as_bytes(), &[0u8; 8]);
}

#[test]
fn changed_words_reports_old_and_new_values() {
    let before = Memory::new(0x40);
    let mut after = before.clone();
    after.put_long(0x10, 5).unwrap();
    after.put_byte(0x39, 0x01).unwrap();

    assert_eq!(
        after.changed_words(&before),
        vec![(0x10, 0, 5), (0x38, 0, 0x100)]
    );
    assert!(before.changed_words(&before).is_empty());
}
