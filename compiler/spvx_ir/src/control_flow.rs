//! Structural control-flow registry.
//!
//! SPIR-V expresses structured control flow as a block graph annotated
//! with merge instructions. The decoder records what each annotation says
//! about the blocks involved; the reconstruction pass reads these sets to
//! decide how to emit a block without re-deriving its role from the graph.
//!
//! # Invariants
//!
//! - Every key of `continue_block_to_loop_header` is in `continue_blocks`,
//!   and every value is in `loop_blocks`.
//! - The three merge-target sets are disjoint.

use bitflags::bitflags;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{Id, IrError};

bitflags! {
    /// Every structural role one block id plays.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct BlockRoles: u8 {
        const LOOP_HEADER = 1 << 0;
        const CONTINUE = 1 << 1;
        const LOOP_MERGE = 1 << 2;
        const SELECTION_MERGE = 1 << 3;
        const MULTISELECT_MERGE = 1 << 4;
    }
}

impl BlockRoles {
    /// Roles that mark a block as the merge target of some construct.
    pub const ANY_MERGE: Self = Self::from_bits_truncate(
        Self::LOOP_MERGE.bits() | Self::SELECTION_MERGE.bits() | Self::MULTISELECT_MERGE.bits(),
    );
}

/// Block-role bookkeeping for one module.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlFlowRegistry {
    loop_blocks: FxHashSet<Id>,
    continue_blocks: FxHashSet<Id>,
    loop_merge_targets: FxHashSet<Id>,
    selection_merge_targets: FxHashSet<Id>,
    multiselect_merge_targets: FxHashSet<Id>,
    continue_block_to_loop_header: FxHashMap<Id, Id>,
}

impl ControlFlowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Raw inserts ─────────────────────────────────────────────────

    pub fn insert_loop_header(&mut self, block: Id) {
        self.loop_blocks.insert(block);
    }

    pub fn insert_continue_block(&mut self, block: Id) {
        self.continue_blocks.insert(block);
    }

    pub fn insert_loop_merge(&mut self, block: Id) {
        self.loop_merge_targets.insert(block);
    }

    pub fn insert_selection_merge(&mut self, block: Id) {
        self.selection_merge_targets.insert(block);
    }

    pub fn insert_multiselect_merge(&mut self, block: Id) {
        self.multiselect_merge_targets.insert(block);
    }

    /// Associate a continue block with the loop header it belongs to.
    ///
    /// Both blocks must already be registered in their roles; anything
    /// else would leave a malformed association for readers to trip over.
    pub fn link_continue_to_header(&mut self, continue_block: Id, header: Id) {
        assert!(
            self.continue_blocks.contains(&continue_block),
            "{}",
            IrError::ContinueWithoutBlock {
                block: continue_block
            }
        );
        assert!(
            self.loop_blocks.contains(&header),
            "{}",
            IrError::HeaderNotLoop {
                block: continue_block,
                header
            }
        );
        self.continue_block_to_loop_header
            .insert(continue_block, header);
    }

    // ── Merge-instruction helpers ───────────────────────────────────

    /// Record an `OpLoopMerge` in `header`.
    ///
    /// A header that is its own continue target gets no continue-block
    /// entry: branching back to it must stay a branch into the loop, not a
    /// `continue`.
    pub fn register_loop(&mut self, header: Id, merge: Id, continue_block: Id) {
        tracing::debug!(%header, %merge, %continue_block, "registering loop");
        self.loop_blocks.insert(header);
        self.loop_merge_targets.insert(merge);
        if continue_block != header {
            self.continue_blocks.insert(continue_block);
            self.continue_block_to_loop_header
                .insert(continue_block, header);
        }
    }

    /// Record the merge target of a two-way `OpSelectionMerge`.
    pub fn register_selection(&mut self, merge: Id) {
        tracing::debug!(%merge, "registering selection merge");
        self.selection_merge_targets.insert(merge);
    }

    /// Record the merge target of an `OpSwitch` construct.
    ///
    /// The switch's `OpSelectionMerge` is decoded before the `OpSwitch`
    /// itself, so the target is promoted out of the two-way set.
    pub fn register_multiselect(&mut self, merge: Id) {
        tracing::debug!(%merge, "registering multiselect merge");
        self.selection_merge_targets.remove(&merge);
        self.multiselect_merge_targets.insert(merge);
    }

    // ── Queries ─────────────────────────────────────────────────────

    #[inline]
    pub fn is_loop_header(&self, block: Id) -> bool {
        self.loop_blocks.contains(&block)
    }

    #[inline]
    pub fn is_continue_block(&self, block: Id) -> bool {
        self.continue_blocks.contains(&block)
    }

    #[inline]
    pub fn is_loop_merge(&self, block: Id) -> bool {
        self.loop_merge_targets.contains(&block)
    }

    #[inline]
    pub fn is_selection_merge(&self, block: Id) -> bool {
        self.selection_merge_targets.contains(&block)
    }

    #[inline]
    pub fn is_multiselect_merge(&self, block: Id) -> bool {
        self.multiselect_merge_targets.contains(&block)
    }

    /// The loop header a continue block belongs to.
    pub fn loop_header_for(&self, continue_block: Id) -> Option<Id> {
        let header = self.continue_block_to_loop_header.get(&continue_block).copied();
        debug_assert!(header.is_none_or(|h| self.loop_blocks.contains(&h)));
        header
    }

    /// Every role `block` plays, as one flag set.
    pub fn roles(&self, block: Id) -> BlockRoles {
        let mut roles = BlockRoles::empty();
        roles.set(BlockRoles::LOOP_HEADER, self.is_loop_header(block));
        roles.set(BlockRoles::CONTINUE, self.is_continue_block(block));
        roles.set(BlockRoles::LOOP_MERGE, self.is_loop_merge(block));
        roles.set(BlockRoles::SELECTION_MERGE, self.is_selection_merge(block));
        roles.set(BlockRoles::MULTISELECT_MERGE, self.is_multiselect_merge(block));
        roles
    }

    pub fn loop_blocks(&self) -> &FxHashSet<Id> {
        &self.loop_blocks
    }

    pub fn continue_blocks(&self) -> &FxHashSet<Id> {
        &self.continue_blocks
    }

    pub fn loop_merge_targets(&self) -> &FxHashSet<Id> {
        &self.loop_merge_targets
    }

    pub fn selection_merge_targets(&self) -> &FxHashSet<Id> {
        &self.selection_merge_targets
    }

    pub fn multiselect_merge_targets(&self) -> &FxHashSet<Id> {
        &self.multiselect_merge_targets
    }

    pub fn continue_block_to_loop_header(&self) -> &FxHashMap<Id, Id> {
        &self.continue_block_to_loop_header
    }

    /// Every id mentioned anywhere in the registry.
    pub fn all_ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.loop_blocks
            .iter()
            .chain(&self.continue_blocks)
            .chain(&self.loop_merge_targets)
            .chain(&self.selection_merge_targets)
            .chain(&self.multiselect_merge_targets)
            .copied()
    }

    /// Check the registry invariants.
    ///
    /// Ids are visited in ascending order so the reported block is stable.
    pub fn verify(&self) -> Result<(), IrError> {
        let mut links: Vec<(Id, Id)> = self
            .continue_block_to_loop_header
            .iter()
            .map(|(&block, &header)| (block, header))
            .collect();
        links.sort_unstable();
        for (block, header) in links {
            if !self.continue_blocks.contains(&block) {
                return Err(IrError::ContinueWithoutBlock { block });
            }
            if !self.loop_blocks.contains(&header) {
                return Err(IrError::HeaderNotLoop { block, header });
            }
        }

        let mut merges: Vec<Id> = self
            .loop_merge_targets
            .iter()
            .chain(&self.selection_merge_targets)
            .copied()
            .collect();
        merges.sort_unstable();
        for block in merges {
            let categories = (self.roles(block) & BlockRoles::ANY_MERGE).bits().count_ones();
            if categories > 1 {
                return Err(IrError::MergeCategoryOverlap { block });
            }
        }
        Ok(())
    }
}
