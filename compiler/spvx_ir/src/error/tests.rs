use pretty_assertions::assert_eq;

use super::*;

#[test]
fn out_of_bounds_message() {
    let err = IrError::IdOutOfBounds {
        id: Id::new(12),
        bound: 10,
    };
    assert_eq!(err.to_string(), "id %12 is out of bounds (bound is 10)");
}

#[test]
fn kind_mismatch_message() {
    let err = IrError::KindMismatch {
        id: Id::new(3),
        expected: VariantKind::Type,
        found: VariantKind::Variable,
    };
    assert_eq!(err.to_string(), "id %3 holds variable, but was accessed as type");
}

#[test]
fn bad_magic_is_hex() {
    let err = IrError::BadMagic { found: 0xdead_beef };
    assert_eq!(err.to_string(), "bad magic number 0xdeadbeef");
    assert!(err.is_header_error());
}

#[test]
fn container_errors_are_not_header_errors() {
    let err = IrError::MergeCategoryOverlap { block: Id::new(4) };
    assert!(!err.is_header_error());
}
