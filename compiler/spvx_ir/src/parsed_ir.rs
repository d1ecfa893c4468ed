//! The parsed module container.
//!
//! [`ParsedIr`] owns everything the decoder learned about one module: the
//! raw words, a Variant Store and a Meta Store indexed by [`Id`], the
//! structural control-flow registry, entry points and the source dialect.
//!
//! # Id space
//!
//! Both stores always have exactly `bound` slots. The bound only grows
//! (`set_id_bounds`, `increase_bound_by`); growth may reallocate, so
//! references taken before it must be re-resolved by id afterwards, but no
//! id or recorded data is ever invalidated.
//!
//! # Contract violations
//!
//! Reading an id as the wrong kind, touching an id at or past the bound
//! with a mutating call, or linking malformed structural records panics.
//! These are decoder bugs, not data problems. Queries for things that were
//! simply never recorded (names, decorations, members) return defaults.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use spirv::{Capability, Decoration as Dec};

use crate::bitset::{Bitset, EMPTY_BITSET};
use crate::control_flow::ControlFlowRegistry;
use crate::entity::{BaseType, SpvType, SpvVariable};
use crate::entry_point::{EntryPoint, Source};
use crate::header::ModuleHeader;
use crate::meta::Meta;
use crate::variant::{Entity, Variant, VariantKind};
use crate::{Id, IrError};

/// In-memory IR of one decoded SPIR-V module.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedIr {
    spirv: Vec<u32>,
    ids: Vec<Variant>,
    meta: Vec<Meta>,
    declared_capabilities: Vec<Capability>,
    declared_extensions: Vec<String>,
    global_variables: Vec<Id>,
    aliased_variables: Vec<Id>,
    control_flow: ControlFlowRegistry,
    entry_points: FxHashMap<Id, EntryPoint>,
    default_entry_point: Id,
    source: Source,
}

impl ParsedIr {
    /// Create an empty container retaining `words` verbatim.
    pub fn new(words: Vec<u32>) -> Self {
        ParsedIr {
            spirv: words,
            ..ParsedIr::default()
        }
    }

    /// Create a container sized to the bound declared in the module header.
    pub fn from_spirv(words: Vec<u32>) -> Result<Self, IrError> {
        let header = ModuleHeader::parse(&words)?;
        let mut ir = ParsedIr::new(words);
        ir.set_id_bounds(header.bound);
        Ok(ir)
    }

    // ── Bound management ────────────────────────────────────────────

    /// One past the highest valid id.
    #[inline]
    pub fn bound(&self) -> u32 {
        // Both stores are only ever resized to a u32 bound.
        u32::try_from(self.ids.len()).unwrap_or(u32::MAX)
    }

    /// Grow both stores to `bound` slots.
    ///
    /// Requests at or below the current bound change nothing; shrinking
    /// would invalidate live ids.
    pub fn set_id_bounds(&mut self, bound: u32) {
        let current = self.bound();
        if bound < current {
            tracing::warn!(requested = bound, current, "ignoring request to shrink id bound");
            return;
        }
        if bound == current {
            return;
        }
        tracing::debug!(from = current, to = bound, "growing id bound");
        self.ids.resize_with(bound as usize, Variant::default);
        self.meta.resize_with(bound as usize, Meta::default);
        debug_assert_eq!(self.ids.len(), self.meta.len());
    }

    /// Mint `count` fresh ids, returning the first of them.
    ///
    /// The caller owns the contiguous run `[returned, returned + count)`.
    pub fn increase_bound_by(&mut self, count: u32) -> Id {
        let previous = self.bound();
        let Some(bound) = previous.checked_add(count) else {
            panic!("id bound overflow: {previous} + {count} exceeds u32");
        };
        self.set_id_bounds(bound);
        Id::new(previous)
    }

    fn out_of_bounds(&self, id: Id) -> IrError {
        IrError::IdOutOfBounds {
            id,
            bound: self.bound(),
        }
    }

    fn slot_mut(&mut self, id: Id) -> &mut Variant {
        let bound = self.bound();
        match self.ids.get_mut(id.index()) {
            Some(slot) => slot,
            None => panic!("{}", IrError::IdOutOfBounds { id, bound }),
        }
    }

    fn meta_mut(&mut self, id: Id) -> &mut Meta {
        let bound = self.bound();
        match self.meta.get_mut(id.index()) {
            Some(meta) => meta,
            None => panic!("{}", IrError::IdOutOfBounds { id, bound }),
        }
    }

    // ── Variant Store ───────────────────────────────────────────────

    /// The payload of `id` as kind `T`.
    ///
    /// Panics if `id` is out of bounds or holds another kind: the decoder
    /// established every id's kind before anyone reads it.
    #[inline]
    pub fn get<T: Entity>(&self, id: Id) -> &T {
        match self.try_get(id) {
            Ok(payload) => payload,
            Err(err) => panic!("{err}"),
        }
    }

    /// Mutable payload of `id` as kind `T`. Panics like [`get`](Self::get).
    pub fn get_mut<T: Entity>(&mut self, id: Id) -> &mut T {
        let slot = self.slot_mut(id);
        let found = slot.kind();
        match T::from_variant_mut(slot) {
            Some(payload) => payload,
            None => panic!(
                "{}",
                IrError::KindMismatch {
                    id,
                    expected: T::KIND,
                    found,
                }
            ),
        }
    }

    /// Checked variant of [`get`](Self::get).
    pub fn try_get<T: Entity>(&self, id: Id) -> Result<&T, IrError> {
        let slot = self
            .ids
            .get(id.index())
            .ok_or_else(|| self.out_of_bounds(id))?;
        T::from_variant(slot).ok_or_else(|| IrError::KindMismatch {
            id,
            expected: T::KIND,
            found: slot.kind(),
        })
    }

    /// The payload of `id` if it exists and is of kind `T`.
    #[inline]
    pub fn maybe_get<T: Entity>(&self, id: Id) -> Option<&T> {
        self.ids.get(id.index()).and_then(T::from_variant)
    }

    /// Store `payload` at `id`.
    ///
    /// An empty slot takes any kind; a filled slot only accepts a new
    /// payload of the same kind.
    pub fn set<T: Entity>(&mut self, id: Id, payload: T) -> &mut T {
        let slot = self.slot_mut(id);
        let found = slot.kind();
        assert!(
            found == VariantKind::None || found == T::KIND,
            "{}",
            IrError::KindReassigned {
                id,
                found,
                requested: T::KIND,
            }
        );
        *slot = payload.into_variant();
        match T::from_variant_mut(slot) {
            Some(payload) => payload,
            None => unreachable!("slot {id} was just assigned"),
        }
    }

    /// The kind stored at `id`; `None` for empty or out-of-bound ids.
    pub fn kind(&self, id: Id) -> VariantKind {
        self.ids.get(id.index()).map_or(VariantKind::None, Variant::kind)
    }

    /// Every id holding kind `T`, in ascending order.
    pub fn typed_ids<T: Entity>(&self) -> impl Iterator<Item = (Id, &T)> + '_ {
        (0u32..)
            .zip(&self.ids)
            .filter_map(|(raw, slot)| T::from_variant(slot).map(|payload| (Id::new(raw), payload)))
    }

    /// Call `f` for every id holding kind `T`, in ascending order.
    pub fn for_each_typed_id<T: Entity>(&self, mut f: impl FnMut(Id, &T)) {
        for (id, payload) in self.typed_ids::<T>() {
            f(id, payload);
        }
    }

    /// Record that `id` supplies the length of some array type.
    ///
    /// Constants are flagged directly; specialization constant ops flag
    /// every constant they are computed from; undefs carry nothing to
    /// flag. Any other kind is a contract violation.
    pub fn mark_used_as_array_length(&mut self, id: Id) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            match self.slot_mut(id) {
                Variant::Constant(constant) => constant.is_used_as_array_length = true,
                Variant::ConstantOp(op) => pending.extend(op.arguments.iter().copied()),
                Variant::Undef(_) => {}
                other => panic!(
                    "{}",
                    IrError::KindMismatch {
                        id,
                        expected: VariantKind::Constant,
                        found: other.kind(),
                    }
                ),
            }
        }
    }

    // ── Meta Store: names ───────────────────────────────────────────

    /// The meta record of `id`, if `id` is in bounds.
    #[inline]
    pub fn meta(&self, id: Id) -> Option<&Meta> {
        self.meta.get(id.index())
    }

    pub fn set_name(&mut self, id: Id, name: impl Into<String>) {
        let name = name.into();
        tracing::trace!(%id, name = name.as_str(), "set name");
        self.meta_mut(id).name = name;
    }

    /// The name of `id`, or `""` if it has none.
    pub fn get_name(&self, id: Id) -> &str {
        self.meta(id).map_or("", |meta| meta.name.as_str())
    }

    pub fn set_member_name(&mut self, id: Id, index: u32, name: impl Into<String>) {
        let name = name.into();
        tracing::trace!(%id, index, name = name.as_str(), "set member name");
        self.meta_mut(id).member_mut(index).name = name;
    }

    /// The name of member `index` of `id`, or `""` if it has none.
    pub fn get_member_name(&self, id: Id, index: u32) -> &str {
        self.meta(id)
            .and_then(|meta| meta.member(index))
            .map_or("", |member| member.name.as_str())
    }

    // ── Meta Store: decorations ─────────────────────────────────────

    /// Set `decoration` on `id` with an integer operand (0 if the
    /// decoration takes none). Rewriting replaces the operand.
    pub fn set_decoration(&mut self, id: Id, decoration: Dec, argument: u32) {
        tracing::trace!(%id, ?decoration, argument, "set decoration");
        self.meta_mut(id).decoration.set(decoration, argument);
    }

    pub fn set_decoration_string(&mut self, id: Id, decoration: Dec, argument: impl Into<String>) {
        let argument = argument.into();
        tracing::trace!(%id, ?decoration, argument = argument.as_str(), "set decoration string");
        self.meta_mut(id).decoration.set_string(decoration, argument);
    }

    pub fn unset_decoration(&mut self, id: Id, decoration: Dec) {
        self.meta_mut(id).decoration.unset(decoration);
    }

    /// Returns `false` for ids without the decoration, including ids at or
    /// past the bound.
    #[inline]
    pub fn has_decoration(&self, id: Id, decoration: Dec) -> bool {
        self.meta(id)
            .is_some_and(|meta| meta.decoration.has(decoration))
    }

    /// The integer operand of `decoration` on `id`, or 0.
    pub fn get_decoration(&self, id: Id, decoration: Dec) -> u32 {
        self.meta(id)
            .map_or(0, |meta| meta.decoration.argument(decoration))
    }

    /// The string operand of `decoration` on `id`, or `""`.
    pub fn get_decoration_string(&self, id: Id, decoration: Dec) -> &str {
        self.meta(id)
            .map_or("", |meta| meta.decoration.string(decoration))
    }

    /// All decorations set on `id`.
    #[inline]
    pub fn get_decoration_bitset(&self, id: Id) -> &Bitset {
        self.meta(id)
            .map_or(&EMPTY_BITSET, |meta| &meta.decoration.flags)
    }

    // ── Meta Store: member decorations ──────────────────────────────

    pub fn set_member_decoration(&mut self, id: Id, index: u32, decoration: Dec, argument: u32) {
        tracing::trace!(%id, index, ?decoration, argument, "set member decoration");
        self.meta_mut(id)
            .member_mut(index)
            .decoration
            .set(decoration, argument);
    }

    pub fn set_member_decoration_string(
        &mut self,
        id: Id,
        index: u32,
        decoration: Dec,
        argument: impl Into<String>,
    ) {
        let argument = argument.into();
        tracing::trace!(%id, index, ?decoration, argument = argument.as_str(), "set member decoration string");
        self.meta_mut(id)
            .member_mut(index)
            .decoration
            .set_string(decoration, argument);
    }

    pub fn unset_member_decoration(&mut self, id: Id, index: u32, decoration: Dec) {
        self.meta_mut(id)
            .member_mut(index)
            .decoration
            .unset(decoration);
    }

    pub fn has_member_decoration(&self, id: Id, index: u32, decoration: Dec) -> bool {
        self.meta(id)
            .and_then(|meta| meta.member(index))
            .is_some_and(|member| member.decoration.has(decoration))
    }

    pub fn get_member_decoration(&self, id: Id, index: u32, decoration: Dec) -> u32 {
        self.meta(id)
            .and_then(|meta| meta.member(index))
            .map_or(0, |member| member.decoration.argument(decoration))
    }

    pub fn get_member_decoration_string(&self, id: Id, index: u32, decoration: Dec) -> &str {
        self.meta(id)
            .and_then(|meta| meta.member(index))
            .map_or("", |member| member.decoration.string(decoration))
    }

    /// All decorations set on member `index` of `id`.
    pub fn get_member_decoration_bitset(&self, id: Id, index: u32) -> &Bitset {
        self.meta(id)
            .and_then(|meta| meta.member(index))
            .map_or(&EMPTY_BITSET, |member| &member.decoration.flags)
    }

    // ── Derived views ───────────────────────────────────────────────

    /// The struct type behind a buffer block variable, through pointers
    /// and arrays of blocks.
    pub fn buffer_block_type(&self, var: &SpvVariable) -> Id {
        let mut type_id = var.basetype;
        loop {
            let ty = self.get::<SpvType>(type_id);
            if !ty.pointer && !ty.is_array() {
                return type_id;
            }
            type_id = ty.parent_type;
        }
    }

    /// Decorations that classify `var` as a buffer block.
    ///
    /// These live on the variable's struct type, not on the variable:
    /// the result is the type's decoration set plus every decoration that
    /// all of its members share (`NonWritable` is usually declared per
    /// member). Decorations on `var`'s own id are not consulted. Computed
    /// on every call, so later writes to the type are always reflected.
    pub fn get_buffer_block_flags(&self, var: &SpvVariable) -> Bitset {
        let type_id = self.buffer_block_type(var);
        let ty = self.get::<SpvType>(type_id);
        assert!(
            ty.base == BaseType::Struct,
            "{}",
            IrError::NotBufferBlock { id: type_id }
        );

        let mut flags = self.get_decoration_bitset(type_id).clone();
        let mut members = (0u32..).zip(&ty.member_types);
        if let Some((first, _)) = members.next() {
            let mut shared = self.get_member_decoration_bitset(type_id, first).clone();
            for (index, _) in members {
                shared.merge_and(self.get_member_decoration_bitset(type_id, index));
            }
            flags.merge_or(&shared);
        }
        flags
    }

    // ── Structural control flow ─────────────────────────────────────

    #[inline]
    pub fn control_flow(&self) -> &ControlFlowRegistry {
        &self.control_flow
    }

    #[inline]
    pub fn control_flow_mut(&mut self) -> &mut ControlFlowRegistry {
        &mut self.control_flow
    }

    // ── Entry points and source ─────────────────────────────────────

    /// Register an entry point, replacing any previous record for its id.
    ///
    /// The first entry point registered becomes the default.
    pub fn add_entry_point(&mut self, entry_point: EntryPoint) -> &mut EntryPoint {
        let id = entry_point.id;
        assert!(id.index() < self.ids.len(), "{}", self.out_of_bounds(id));
        tracing::debug!(%id, name = entry_point.name.as_str(), model = ?entry_point.model, "registering entry point");
        if self.default_entry_point.is_none() {
            self.default_entry_point = id;
        }
        match self.entry_points.entry(id) {
            Entry::Occupied(mut slot) => {
                slot.insert(entry_point);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(entry_point),
        }
    }

    #[inline]
    pub fn entry_point(&self, id: Id) -> Option<&EntryPoint> {
        self.entry_points.get(&id)
    }

    #[inline]
    pub fn entry_point_mut(&mut self, id: Id) -> Option<&mut EntryPoint> {
        self.entry_points.get_mut(&id)
    }

    pub fn entry_points(&self) -> &FxHashMap<Id, EntryPoint> {
        &self.entry_points
    }

    /// The default entry point, or `Id::NONE` if none was registered.
    #[inline]
    pub fn default_entry_point(&self) -> Id {
        self.default_entry_point
    }

    pub fn set_default_entry_point(&mut self, id: Id) {
        assert!(
            self.entry_points.contains_key(&id),
            "{}",
            IrError::UnregisteredDefaultEntryPoint { id }
        );
        self.default_entry_point = id;
    }

    #[inline]
    pub fn source(&self) -> Source {
        self.source
    }

    pub fn set_source(&mut self, source: Source) {
        if self.source.known {
            tracing::debug!(previous = ?self.source, ?source, "overwriting module source");
        }
        self.source = source;
    }

    // ── Module-level sequences ──────────────────────────────────────

    /// The decoded word stream, verbatim.
    #[inline]
    pub fn spirv(&self) -> &[u32] {
        &self.spirv
    }

    /// Append a capability; duplicates are kept in declaration order.
    pub fn declare_capability(&mut self, capability: Capability) {
        self.declared_capabilities.push(capability);
    }

    pub fn declared_capabilities(&self) -> &[Capability] {
        &self.declared_capabilities
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.declared_capabilities.contains(&capability)
    }

    pub fn declare_extension(&mut self, extension: impl Into<String>) {
        self.declared_extensions.push(extension.into());
    }

    pub fn declared_extensions(&self) -> &[String] {
        &self.declared_extensions
    }

    pub fn add_global_variable(&mut self, id: Id) {
        self.global_variables.push(id);
    }

    pub fn global_variables(&self) -> &[Id] {
        &self.global_variables
    }

    /// Record a variable that aliases another storage object.
    pub fn add_aliased_variable(&mut self, id: Id) {
        self.aliased_variables.push(id);
    }

    pub fn aliased_variables(&self) -> &[Id] {
        &self.aliased_variables
    }

    // ── Verification ────────────────────────────────────────────────

    /// Check the container's structural invariants.
    pub fn verify(&self) -> Result<(), IrError> {
        if self.ids.len() != self.meta.len() {
            return Err(IrError::StoreLengthMismatch {
                ids: self.ids.len(),
                meta: self.meta.len(),
            });
        }
        self.control_flow.verify()?;

        let bound = self.bound();
        if let Some(id) = self
            .control_flow
            .all_ids()
            .filter(|id| id.raw() >= bound)
            .min()
        {
            return Err(IrError::IdOutOfBounds { id, bound });
        }

        let default = self.default_entry_point;
        if default.is_some() && !self.entry_points.contains_key(&default) {
            return Err(IrError::UnregisteredDefaultEntryPoint { id: default });
        }
        Ok(())
    }
}
