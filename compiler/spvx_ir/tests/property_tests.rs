//! Property-based tests for `ParsedIr` bookkeeping.
//!
//! These use proptest to drive random growth and decoration sequences and
//! check the invariants every consumer relies on:
//! 1. The bound never decreases and growth preserves existing records
//! 2. The last decoration write wins
//! 3. Member growth never disturbs lower member indices

#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use spirv::Decoration;
use spvx_ir::{Bitset, Id, ParsedIr, VariantKind};

/// Decorations with an integer operand, covering both bitset ranges.
fn decoration_strategy() -> impl Strategy<Value = Decoration> {
    prop_oneof![
        Just(Decoration::Location),
        Just(Decoration::Binding),
        Just(Decoration::DescriptorSet),
        Just(Decoration::Offset),
        Just(Decoration::ArrayStride),
        Just(Decoration::SpecId),
        Just(Decoration::RestrictPointer),
    ]
}

/// A growth step: either an absolute bound request or a relative increase.
#[derive(Clone, Debug)]
enum Growth {
    SetBound(u32),
    IncreaseBy(u32),
}

fn growth_strategy() -> impl Strategy<Value = Growth> {
    prop_oneof![
        (0u32..200).prop_map(Growth::SetBound),
        (0u32..50).prop_map(Growth::IncreaseBy),
    ]
}

proptest! {
    #[test]
    fn bound_is_monotonic(steps in proptest::collection::vec(growth_strategy(), 1..32)) {
        let mut ir = ParsedIr::new(Vec::new());
        let mut expected = 0u32;
        for step in steps {
            let before = ir.bound();
            match step {
                Growth::SetBound(n) => {
                    ir.set_id_bounds(n);
                    expected = expected.max(n);
                }
                Growth::IncreaseBy(k) => {
                    let first = ir.increase_bound_by(k);
                    prop_assert_eq!(first, Id::new(before));
                    expected = before + k;
                }
            }
            prop_assert!(ir.bound() >= before);
            prop_assert_eq!(ir.bound(), expected);
        }
        prop_assert_eq!(ir.verify(), Ok(()));
    }

    #[test]
    fn growth_preserves_records(
        bound in 1u32..64,
        extra in 0u32..64,
        names in proptest::collection::vec("[a-z]{1,8}", 1..16),
    ) {
        let mut ir = ParsedIr::new(Vec::new());
        ir.set_id_bounds(bound);
        let named: Vec<(Id, String)> = (0u32..)
            .zip(names)
            .map(|(i, name)| (Id::new(i % bound), name))
            .collect();
        for (id, name) in &named {
            ir.set_name(*id, name.as_str());
        }
        let snapshot: Vec<String> = (0..bound).map(|i| ir.get_name(Id::new(i)).to_string()).collect();

        ir.increase_bound_by(extra);

        for i in 0..bound {
            prop_assert_eq!(ir.get_name(Id::new(i)), snapshot[i as usize].as_str());
        }
        for i in bound..bound + extra {
            prop_assert_eq!(ir.get_name(Id::new(i)), "");
            prop_assert_eq!(ir.kind(Id::new(i)), VariantKind::None);
            prop_assert_eq!(ir.get_decoration_bitset(Id::new(i)), &Bitset::new());
        }
    }

    #[test]
    fn last_decoration_write_wins(
        target in 0u32..16,
        decoration in decoration_strategy(),
        writes in proptest::collection::vec(any::<u32>(), 1..10),
    ) {
        let mut ir = ParsedIr::new(Vec::new());
        ir.set_id_bounds(16);
        prop_assert!(!ir.has_decoration(Id::new(target), decoration));
        for &argument in &writes {
            ir.set_decoration(Id::new(target), decoration, argument);
            prop_assert!(ir.has_decoration(Id::new(target), decoration));
        }
        let last = writes[writes.len() - 1];
        prop_assert_eq!(ir.get_decoration(Id::new(target), decoration), last);
        prop_assert_eq!(ir.get_decoration_bitset(Id::new(target)).len(), 1);
    }

    #[test]
    fn member_growth_keeps_lower_indices(
        indices in proptest::collection::vec(0u32..32, 1..12),
    ) {
        let mut ir = ParsedIr::new(Vec::new());
        ir.set_id_bounds(2);
        let target = Id::new(1);
        for &index in &indices {
            ir.set_member_decoration(target, index, Decoration::Offset, index * 4);
        }
        let highest = indices.iter().copied().max().unwrap_or(0);
        let members = ir.meta(target).map_or(0, |meta| meta.members.len());
        prop_assert_eq!(members, highest as usize + 1);
        for index in 0..=highest {
            let written = indices.contains(&index);
            prop_assert_eq!(ir.has_member_decoration(target, index, Decoration::Offset), written);
            if written {
                prop_assert_eq!(ir.get_member_decoration(target, index, Decoration::Offset), index * 4);
            } else {
                prop_assert!(ir.get_member_decoration_bitset(target, index).is_empty());
            }
        }
    }
}
