//! Insertion-ordered, deduplicating sets: `Set` and `MutableSet`.

use crate::error::{CollectionError, Result};
use crate::list::{List, MutableList};
use crate::value::{Value, write_items};
use crate::variant::{TypedContainer, TypedVariant, container_name, retag};
use indexmap::IndexSet;
use kotc_solver::{ContainerKind, ElementType, SlotOwner, TypeConstraint, TypeSlot, VariantId};
use rustc_hash::{FxBuildHasher, FxHashSet};
use std::fmt;
use std::ops::Deref;

pub(crate) type ValueSet = IndexSet<Value, FxBuildHasher>;

const SET: SlotOwner = SlotOwner::element(ContainerKind::Set);
const MUTABLE_SET: SlotOwner = SlotOwner::element(ContainerKind::MutableSet);

/// A read-only, type-managed set.
#[derive(Clone, Debug)]
pub struct Set {
    items: ValueSet,
    slot: TypeSlot,
    variant: Option<VariantId>,
}

impl Set {
    pub fn new(items: impl IntoIterator<Item = Value>) -> Result<Self> {
        Self::with_slot(TypeSlot::unset(), None, items, SET)
    }

    pub fn empty() -> Self {
        Self::from_parts(ValueSet::default(), TypeSlot::unset(), None)
    }

    pub fn variant(element: impl Into<ElementType>) -> TypedVariant<Set> {
        TypedVariant::declare(&[element.into()])
    }

    pub fn of_type(
        element: impl Into<ElementType>,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Self> {
        Self::variant(element).create(items)
    }

    /// Duplicates are validated like any other element before they collapse.
    fn with_slot(
        mut slot: TypeSlot,
        variant: Option<VariantId>,
        items: impl IntoIterator<Item = Value>,
        owner: SlotOwner,
    ) -> Result<Self> {
        let items: Vec<Value> = items.into_iter().collect();
        slot.admit_all(&items, owner)?;
        Ok(Self::from_parts(items.into_iter().collect(), slot, variant))
    }

    pub(crate) fn from_parts(items: ValueSet, slot: TypeSlot, variant: Option<VariantId>) -> Self {
        Set {
            items,
            slot,
            variant,
        }
    }

    fn derive(&self, items: ValueSet) -> Set {
        Set::from_parts(items, self.slot, retag(self.variant, ContainerKind::Set))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.contains(value)
    }

    pub fn element_type(&self) -> Option<ElementType> {
        self.slot.element_type()
    }

    pub fn constraint(&self) -> &TypeConstraint {
        self.slot.constraint()
    }

    #[inline]
    pub fn variant_id(&self) -> Option<VariantId> {
        self.variant
    }

    pub fn type_name(&self) -> String {
        container_name(ContainerKind::Set, self.variant)
    }

    pub fn first(&self) -> Result<&Value> {
        self.items.first().ok_or(CollectionError::EmptyCollection {
            operation: "first",
            container: "Set",
        })
    }

    pub fn first_or_none(&self) -> Option<&Value> {
        self.items.first()
    }

    pub fn filter(&self, mut predicate: impl FnMut(&Value) -> bool) -> Set {
        self.derive(
            self.items
                .iter()
                .filter(|item| predicate(*item))
                .cloned()
                .collect(),
        )
    }

    pub fn map(&self, transform: impl FnMut(&Value) -> Value) -> Result<Set> {
        Set::new(self.items.iter().map(transform))
    }

    pub fn union<'a>(&self, other: impl IntoIterator<Item = &'a Value>) -> Result<Set> {
        Set::new(self.items.iter().cloned().chain(other.into_iter().cloned()))
    }

    pub fn intersect<'a>(&self, other: impl IntoIterator<Item = &'a Value>) -> Result<Set> {
        let other: FxHashSet<&Value> = other.into_iter().collect();
        Set::new(self.items.iter().filter(|item| other.contains(*item)).cloned())
    }

    pub fn subtract<'a>(&self, other: impl IntoIterator<Item = &'a Value>) -> Result<Set> {
        let other: FxHashSet<&Value> = other.into_iter().collect();
        Set::new(self.items.iter().filter(|item| !other.contains(*item)).cloned())
    }

    /// A copy with `value` added, validated against this set's type.
    pub fn plus(&self, value: Value) -> Result<Set> {
        self.plus_all([value])
    }

    pub fn plus_all(&self, values: impl IntoIterator<Item = Value>) -> Result<Set> {
        self.added(values, SET)
    }

    fn added(
        &self,
        values: impl IntoIterator<Item = Value>,
        owner: SlotOwner,
    ) -> Result<Set> {
        let mut slot = self.slot;
        let added: Vec<Value> = values.into_iter().collect();
        slot.admit_all(&added, owner)?;

        let mut items = self.items.clone();
        items.extend(added);
        Ok(Set::from_parts(items, slot, retag(self.variant, ContainerKind::Set)))
    }

    pub fn to_set(&self) -> Set {
        self.derive(self.items.clone())
    }

    pub fn to_list(&self) -> List {
        List::from_parts(
            self.items.iter().cloned().collect(),
            self.slot,
            retag(self.variant, ContainerKind::List),
        )
    }

    pub fn to_mutable_list(&self) -> MutableList {
        List::from_parts(
            self.items.iter().cloned().collect(),
            self.slot,
            retag(self.variant, ContainerKind::MutableList),
        )
        .into_mutable()
    }

    pub fn to_mutable_set(&self) -> MutableSet {
        MutableSet {
            inner: Set::from_parts(
                self.items.clone(),
                self.slot,
                retag(self.variant, ContainerKind::MutableSet),
            ),
        }
    }
}

impl TypedContainer for Set {
    const KIND: ContainerKind = ContainerKind::Set;
    type Item = Value;

    fn declared(variant: &TypedVariant<Self>) -> Self {
        Set::from_parts(ValueSet::default(), variant.slot(0), Some(variant.id()))
    }

    fn declared_from(
        variant: &TypedVariant<Self>,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Self> {
        Set::with_slot(variant.slot(0), Some(variant.id()), items, SET)
    }
}

impl PartialEq for Set {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for Set {}

impl<'a> IntoIterator for &'a Set {
    type Item = &'a Value;
    type IntoIter = indexmap::set::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_items(f, "[", "]", self.items.iter(), |f, item| write!(f, "{item}"))
    }
}

/// A growable, type-managed set. Emptying it resets the element type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutableSet {
    inner: Set,
}

impl Deref for MutableSet {
    type Target = Set;

    fn deref(&self) -> &Set {
        &self.inner
    }
}

impl MutableSet {
    pub fn new(items: impl IntoIterator<Item = Value>) -> Result<Self> {
        Ok(MutableSet {
            inner: Set::with_slot(TypeSlot::unset(), None, items, MUTABLE_SET)?,
        })
    }

    pub fn empty() -> Self {
        MutableSet {
            inner: Set::empty(),
        }
    }

    pub fn variant(element: impl Into<ElementType>) -> TypedVariant<MutableSet> {
        TypedVariant::declare(&[element.into()])
    }

    pub fn of_type(
        element: impl Into<ElementType>,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Self> {
        Self::variant(element).create(items)
    }

    pub(crate) fn from_set(inner: Set) -> Self {
        MutableSet { inner }
    }

    pub fn as_set(&self) -> &Set {
        &self.inner
    }

    pub fn type_name(&self) -> String {
        container_name(ContainerKind::MutableSet, self.inner.variant)
    }

    /// A read-only snapshot with the same slot.
    pub fn to_set(&self) -> Set {
        self.inner.to_set()
    }

    /// A read-only copy with `value` added. Violations name `MutableSet`.
    pub fn plus(&self, value: Value) -> Result<Set> {
        self.plus_all([value])
    }

    pub fn plus_all(&self, values: impl IntoIterator<Item = Value>) -> Result<Set> {
        self.inner.added(values, MUTABLE_SET)
    }

    fn after_removal(&mut self) {
        self.inner
            .slot
            .reset_if_empty(self.inner.items.len(), MUTABLE_SET);
    }

    /// Add `value`; returns `false` if it was already present.
    pub fn add(&mut self, value: Value) -> Result<bool> {
        self.inner.slot.admit(&value, MUTABLE_SET)?;
        Ok(self.inner.items.insert(value))
    }

    /// Add every value or none of them. Returns whether the set changed.
    pub fn add_all(&mut self, values: impl IntoIterator<Item = Value>) -> Result<bool> {
        let values: Vec<Value> = values.into_iter().collect();
        self.inner.slot.admit_all(&values, MUTABLE_SET)?;
        let before = self.inner.items.len();
        self.inner.items.extend(values);
        Ok(self.inner.items.len() != before)
    }

    pub fn remove(&mut self, value: &Value) -> bool {
        let removed = self.inner.items.shift_remove(value);
        if removed {
            self.after_removal();
        }
        removed
    }

    pub fn remove_all<'a>(&mut self, values: impl IntoIterator<Item = &'a Value>) -> bool {
        let values: FxHashSet<&Value> = values.into_iter().collect();
        self.remove_if(|item| values.contains(item))
    }

    pub fn retain_all<'a>(&mut self, values: impl IntoIterator<Item = &'a Value>) -> bool {
        let values: FxHashSet<&Value> = values.into_iter().collect();
        self.remove_if(|item| !values.contains(item))
    }

    pub fn remove_if(&mut self, mut predicate: impl FnMut(&Value) -> bool) -> bool {
        let before = self.inner.items.len();
        self.inner.items.retain(|item| !predicate(item));
        let changed = self.inner.items.len() != before;
        if changed {
            self.after_removal();
        }
        changed
    }

    pub fn clear(&mut self) {
        self.inner.items.clear();
        self.after_removal();
    }
}

impl TypedContainer for MutableSet {
    const KIND: ContainerKind = ContainerKind::MutableSet;
    type Item = Value;

    fn declared(variant: &TypedVariant<Self>) -> Self {
        MutableSet {
            inner: Set::from_parts(ValueSet::default(), variant.slot(0), Some(variant.id())),
        }
    }

    fn declared_from(
        variant: &TypedVariant<Self>,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Self> {
        Ok(MutableSet {
            inner: Set::with_slot(variant.slot(0), Some(variant.id()), items, MUTABLE_SET)?,
        })
    }
}

impl<'a> IntoIterator for &'a MutableSet {
    type Item = &'a Value;
    type IntoIter = indexmap::set::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.items.iter()
    }
}

impl fmt::Display for MutableSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}
