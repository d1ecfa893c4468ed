use pretty_assertions::assert_eq;
use smallvec::smallvec;

use super::*;

#[test]
fn default_type_is_unknown_scalar() {
    let ty = SpvType::default();
    assert_eq!(ty.base, BaseType::Unknown);
    assert_eq!(ty.vecsize, 1);
    assert_eq!(ty.columns, 1);
    assert!(!ty.pointer);
    assert!(!ty.is_array());
}

#[test]
fn pointer_keeps_pointee_category() {
    let ptr = SpvType::pointer_to(Id::new(4), BaseType::Struct, StorageClass::Uniform);
    assert!(ptr.pointer);
    assert_eq!(ptr.base, BaseType::Struct);
    assert_eq!(ptr.parent_type, Id::new(4));
    assert_eq!(ptr.storage, StorageClass::Uniform);
}

#[test]
fn runtime_array_detection() {
    let mut ty = SpvType::scalar(BaseType::Float, 32);
    ty.array = vec![0];
    ty.array_size_literal = vec![true];
    assert!(ty.is_runtime_array());

    ty.array = vec![4];
    assert!(!ty.is_runtime_array());

    // Size taken from a constant id is never a runtime array.
    ty.array = vec![0];
    ty.array_size_literal = vec![false];
    assert!(!ty.is_runtime_array());
}

#[test]
fn scalar_constant() {
    let c = SpvConstant::scalar(Id::new(2), 16);
    assert_eq!(c.scalar_u32(), 16);
    assert!(!c.is_used_as_array_length);
    assert_eq!(SpvConstant::default().scalar_u32(), 0);
}

#[test]
fn first_block_is_entry() {
    let mut func = SpvFunction::new(Id::new(1), Id::new(2));
    func.add_block(Id::new(10));
    func.add_block(Id::new(11));
    assert_eq!(func.entry_block, Id::new(10));
    assert_eq!(func.blocks, vec![Id::new(10), Id::new(11)]);
}

#[test]
fn terminator_successors() {
    let select = Terminator::Select {
        condition: Id::new(5),
        true_block: Id::new(6),
        false_block: Id::new(7),
    };
    assert_eq!(select.successors().as_slice(), &[Id::new(6), Id::new(7)]);

    let switch = Terminator::MultiSelect {
        selector: Id::new(5),
        default: Id::new(9),
        cases: smallvec![(0, Id::new(10)), (1, Id::new(11))],
    };
    assert_eq!(
        switch.successors().as_slice(),
        &[Id::new(9), Id::new(10), Id::new(11)]
    );

    assert!(Terminator::Return { value: Id::NONE }.successors().is_empty());
    assert!(Terminator::Kill.successors().is_empty());
}
