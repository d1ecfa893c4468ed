use pretty_assertions::assert_eq;

use super::*;

#[test]
fn empty_decoration() {
    let dec = DecorationRecord::default();
    assert!(!dec.has(Dec::Location));
    assert_eq!(dec.argument(Dec::Location), 0);
    assert_eq!(dec.string(Dec::UserSemantic), "");
    assert!(dec.flags.is_empty());
}

#[test]
fn last_write_wins() {
    let mut dec = DecorationRecord::default();
    dec.set(Dec::Location, 1);
    dec.set(Dec::Location, 4);
    assert!(dec.has(Dec::Location));
    assert_eq!(dec.argument(Dec::Location), 4);
    assert_eq!(dec.flags.len(), 1);
}

#[test]
fn identical_writes_are_idempotent() {
    let mut once = DecorationRecord::default();
    once.set(Dec::Binding, 2);
    let mut twice = DecorationRecord::default();
    twice.set(Dec::Binding, 2);
    twice.set(Dec::Binding, 2);
    assert_eq!(once, twice);
}

#[test]
fn string_payload() {
    let mut dec = DecorationRecord::default();
    dec.set_string(Dec::UserSemantic, "TEXCOORD0");
    dec.set_string(Dec::UserSemantic, "TEXCOORD1");
    assert!(dec.has(Dec::UserSemantic));
    assert_eq!(dec.string(Dec::UserSemantic), "TEXCOORD1");
    assert_eq!(dec.argument(Dec::UserSemantic), 0);
}

#[test]
fn unset_removes_flag_and_operands() {
    let mut dec = DecorationRecord::default();
    dec.set(Dec::Offset, 16);
    dec.unset(Dec::Offset);
    assert!(!dec.has(Dec::Offset));
    assert_eq!(dec.argument(Dec::Offset), 0);
    assert_eq!(dec, DecorationRecord::default());
}

#[test]
fn member_growth_fills_defaults() {
    let mut meta = Meta::default();
    meta.member_mut(3).name = "w".to_string();
    assert_eq!(meta.members.len(), 4);
    for index in 0..3 {
        assert_eq!(meta.member(index), Some(&MemberMeta::default()));
    }
    assert_eq!(meta.member(3).map(|m| m.name.as_str()), Some("w"));
    assert!(meta.member(4).is_none());
}

#[test]
fn member_growth_preserves_existing() {
    let mut meta = Meta::default();
    meta.member_mut(0).decoration.set(Dec::Offset, 0);
    meta.member_mut(1).decoration.set(Dec::Offset, 16);
    meta.member_mut(5).decoration.set(Dec::Offset, 80);
    assert_eq!(meta.members.len(), 6);
    assert_eq!(meta.members[0].decoration.argument(Dec::Offset), 0);
    assert_eq!(meta.members[1].decoration.argument(Dec::Offset), 16);
    assert_eq!(meta.members[5].decoration.argument(Dec::Offset), 80);

    // Addressing a lower index never shrinks.
    meta.member_mut(2);
    assert_eq!(meta.members.len(), 6);
}
