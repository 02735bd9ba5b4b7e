use y86sim_core::core::arch::stat::Stat;

#[test]
fn only_aok_is_not_an_exception() {
    assert!(!Stat::Aok.is_exception());
    assert!(Stat::Hlt.is_exception());
    assert!(Stat::Adr.is_exception());
    assert!(Stat::Ins.is_exception());
    assert_eq!(Stat::default(), Stat::Aok);
}

#[test]
fn numeric_codes_and_names() {
    assert_eq!(u8::from(Stat::Aok), 1);
    assert_eq!(u8::from(Stat::Hlt), 2);
    assert_eq!(u8::from(Stat::Adr), 3);
    assert_eq!(u8::from(Stat::Ins), 4);
    assert_eq!(Stat::try_from(3u8).ok(), Some(Stat::Adr));
    assert!(Stat::try_from(0u8).is_err());
    assert_eq!(Stat::Ins.to_string(), "INS");
    assert_eq!(Stat::Hlt.name(), "HLT");
}
