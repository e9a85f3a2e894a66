//! Ordered lists: `List` (read-only) and `MutableList`.
//!
//! Every insertion path goes through the list's `TypeSlot`. Derived lists
//! follow the propagation rules:
//!
//! - filtering, slicing, reordering and `distinct` keep the source slot
//! - `map` / `flat_map` infer a fresh slot from the first produced element
//! - conversions to sets and mutable lists keep the source slot
//! - `union` / `intersect` / `subtract` infer fresh
//! - `plus` keeps the source slot and validates what it appends

use crate::error::{CollectionError, Result};
use crate::grouping::{Grouping, group_items};
use crate::map::Map;
use crate::set::{MutableSet, Set, ValueSet};
use crate::value::{Value, write_items};
use crate::variant::{TypedContainer, TypedVariant, container_name, retag};
use kotc_solver::{ContainerKind, ElementType, SlotOwner, TypeConstraint, TypeSlot, VariantId};
use rand::Rng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

const LIST: SlotOwner = SlotOwner::element(ContainerKind::List);
const MUTABLE_LIST: SlotOwner = SlotOwner::element(ContainerKind::MutableList);

fn out_of_bounds(index: usize, len: usize) -> CollectionError {
    CollectionError::IndexOutOfBounds { index, len }
}

/// A read-only, type-managed list.
#[derive(Clone, Debug)]
pub struct List {
    items: Vec<Value>,
    slot: TypeSlot,
    variant: Option<VariantId>,
}

impl List {
    /// Build a list, binding its type from the first element.
    pub fn new(items: impl IntoIterator<Item = Value>) -> Result<Self> {
        Self::with_slot(TypeSlot::unset(), None, items, LIST)
    }

    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), TypeSlot::unset(), None)
    }

    /// Declare the `List[element]` variant.
    pub fn variant(element: impl Into<ElementType>) -> TypedVariant<List> {
        TypedVariant::declare(&[element.into()])
    }

    /// Shorthand for `List::variant(element).create(items)`.
    pub fn of_type(
        element: impl Into<ElementType>,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Self> {
        Self::variant(element).create(items)
    }

    fn with_slot(
        mut slot: TypeSlot,
        variant: Option<VariantId>,
        items: impl IntoIterator<Item = Value>,
        owner: SlotOwner,
    ) -> Result<Self> {
        let items: Vec<Value> = items.into_iter().collect();
        slot.admit_all(&items, owner)?;
        Ok(Self::from_parts(items, slot, variant))
    }

    pub(crate) fn from_parts(
        items: Vec<Value>,
        slot: TypeSlot,
        variant: Option<VariantId>,
    ) -> Self {
        List {
            items,
            slot,
            variant,
        }
    }

    /// A list of `items` with this list's slot and variant.
    fn derive(&self, items: Vec<Value>) -> List {
        List::from_parts(items, self.slot, retag(self.variant, ContainerKind::List))
    }

    pub(crate) fn into_mutable(self) -> MutableList {
        MutableList { inner: self }
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    /// The bound element type, `None` while unset.
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

    /// `List`, or the declared variant name such as `List[Animal]`.
    pub fn type_name(&self) -> String {
        container_name(ContainerKind::List, self.variant)
    }

    // =========================================================================
    // Element access
    // =========================================================================

    pub fn get(&self, index: usize) -> Result<&Value> {
        self.items
            .get(index)
            .ok_or_else(|| out_of_bounds(index, self.items.len()))
    }

    pub fn get_or_none(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn first(&self) -> Result<&Value> {
        self.items.first().ok_or(CollectionError::EmptyCollection {
            operation: "first",
            container: "List",
        })
    }

    pub fn last(&self) -> Result<&Value> {
        self.items.last().ok_or(CollectionError::EmptyCollection {
            operation: "last",
            container: "List",
        })
    }

    pub fn first_or_none(&self) -> Option<&Value> {
        self.items.first()
    }

    pub fn last_or_none(&self) -> Option<&Value> {
        self.items.last()
    }

    /// The only element; an error when empty or when there are several.
    pub fn single(&self) -> Result<&Value> {
        match self.items.as_slice() {
            [only] => Ok(only),
            [] => Err(CollectionError::EmptyCollection {
                operation: "single",
                container: "List",
            }),
            items => Err(CollectionError::NotSingle {
                container: "List",
                len: items.len(),
            }),
        }
    }

    /// A uniformly chosen element.
    pub fn random(&self) -> Result<&Value> {
        self.random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&Value> {
        self.items.choose(rng).ok_or(CollectionError::EmptyCollection {
            operation: "random",
            container: "List",
        })
    }

    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.items.iter().position(|item| item == value)
    }

    pub fn last_index_of(&self, value: &Value) -> Option<usize> {
        self.items.iter().rposition(|item| item == value)
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.contains(value)
    }

    // =========================================================================
    // Slot-preserving derivations
    // =========================================================================

    pub fn filter(&self, mut predicate: impl FnMut(&Value) -> bool) -> List {
        self.derive(
            self.items
                .iter()
                .filter(|item| predicate(*item))
                .cloned()
                .collect(),
        )
    }

    pub fn filter_not(&self, mut predicate: impl FnMut(&Value) -> bool) -> List {
        self.filter(|item| !predicate(item))
    }

    /// The first `n` elements.
    pub fn take(&self, n: usize) -> List {
        self.derive(self.items.iter().take(n).cloned().collect())
    }

    /// All but the first `n` elements.
    pub fn drop(&self, n: usize) -> List {
        self.derive(self.items.iter().skip(n).cloned().collect())
    }

    pub fn reversed(&self) -> List {
        self.derive(self.items.iter().rev().cloned().collect())
    }

    /// Stable sort by `compare`.
    pub fn sorted_with(&self, mut compare: impl FnMut(&Value, &Value) -> Ordering) -> List {
        let mut items = self.items.clone();
        items.sort_by(|a, b| compare(a, b));
        self.derive(items)
    }

    pub fn sorted_by_key<K: Ord>(&self, key: impl FnMut(&Value) -> K) -> List {
        let mut items = self.items.clone();
        items.sort_by_key(key);
        self.derive(items)
    }

    /// First occurrences only, in order.
    pub fn distinct(&self) -> List {
        let unique: ValueSet = self.items.iter().cloned().collect();
        self.derive(unique.into_iter().collect())
    }

    // =========================================================================
    // Transformations (fresh inference)
    // =========================================================================

    pub fn map(&self, transform: impl FnMut(&Value) -> Value) -> Result<List> {
        List::new(self.items.iter().map(transform))
    }

    pub fn flat_map<I>(&self, transform: impl FnMut(&Value) -> I) -> Result<List>
    where
        I: IntoIterator<Item = Value>,
    {
        List::new(self.items.iter().flat_map(transform))
    }

    /// Group elements by `key` into a map of lists.
    ///
    /// Every group list infers its own type from its first member; the map
    /// infers its key type from the first key and its value type from the
    /// first group.
    pub fn group_by(&self, key: impl FnMut(&Value) -> Value) -> Result<Map> {
        let mut pairs = Vec::new();
        for (group_key, members) in group_items(&self.items, key) {
            pairs.push((group_key, Value::from(List::new(members)?)));
        }
        Map::new(pairs)
    }

    pub fn grouping_by(&self, key: impl FnMut(&Value) -> Value) -> Grouping {
        Grouping::new(&self.items, key)
    }

    /// A map of the pairs `transform` produces; later keys overwrite earlier.
    pub fn associate(&self, transform: impl FnMut(&Value) -> (Value, Value)) -> Result<Map> {
        Map::new(self.items.iter().map(transform))
    }

    /// Elements keyed by `key`.
    pub fn associate_by(&self, mut key: impl FnMut(&Value) -> Value) -> Result<Map> {
        self.associate(|item| (key(item), item.clone()))
    }

    /// Elements mapped to `value`.
    pub fn associate_with(&self, mut value: impl FnMut(&Value) -> Value) -> Result<Map> {
        self.associate(|item| (item.clone(), value(item)))
    }

    pub fn reduce(&self, mut operation: impl FnMut(Value, &Value) -> Value) -> Result<Value> {
        let (first, rest) = self
            .items
            .split_first()
            .ok_or(CollectionError::EmptyCollection {
                operation: "reduce",
                container: "List",
            })?;
        Ok(rest
            .iter()
            .fold(first.clone(), |acc, item| operation(acc, item)))
    }

    pub fn fold<R>(&self, initial: R, operation: impl FnMut(R, &Value) -> R) -> R {
        self.items.iter().fold(initial, operation)
    }

    // =========================================================================
    // Appending
    // =========================================================================

    /// A copy with `value` appended, validated against this list's type.
    pub fn plus(&self, value: Value) -> Result<List> {
        self.plus_all([value])
    }

    pub fn plus_all(&self, values: impl IntoIterator<Item = Value>) -> Result<List> {
        self.appended(values, LIST)
    }

    /// `plus_all` with violations reported against `owner`.
    fn appended(
        &self,
        values: impl IntoIterator<Item = Value>,
        owner: SlotOwner,
    ) -> Result<List> {
        let mut slot = self.slot;
        let appended: Vec<Value> = values.into_iter().collect();
        slot.admit_all(&appended, owner)?;

        let mut items = Vec::with_capacity(self.items.len() + appended.len());
        items.extend_from_slice(&self.items);
        items.extend(appended);
        Ok(List::from_parts(
            items,
            slot,
            retag(self.variant, ContainerKind::List),
        ))
    }

    // =========================================================================
    // Set algebra (fresh inference)
    // =========================================================================

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

    // =========================================================================
    // Conversions (slot-preserving)
    // =========================================================================

    pub fn to_list(&self) -> List {
        self.derive(self.items.clone())
    }

    pub fn to_set(&self) -> Set {
        Set::from_parts(
            self.items.iter().cloned().collect(),
            self.slot,
            retag(self.variant, ContainerKind::Set),
        )
    }

    pub fn to_mutable_list(&self) -> MutableList {
        List::from_parts(
            self.items.clone(),
            self.slot,
            retag(self.variant, ContainerKind::MutableList),
        )
        .into_mutable()
    }

    pub fn to_mutable_set(&self) -> MutableSet {
        MutableSet::from_set(Set::from_parts(
            self.items.iter().cloned().collect(),
            self.slot,
            retag(self.variant, ContainerKind::MutableSet),
        ))
    }
}

impl TypedContainer for List {
    const KIND: ContainerKind = ContainerKind::List;
    type Item = Value;

    fn declared(variant: &TypedVariant<Self>) -> Self {
        List::from_parts(Vec::new(), variant.slot(0), Some(variant.id()))
    }

    fn declared_from(
        variant: &TypedVariant<Self>,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Self> {
        List::with_slot(variant.slot(0), Some(variant.id()), items, LIST)
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for List {}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_items(f, "[", "]", self.items.iter(), |f, item| write!(f, "{item}"))
    }
}

/// A growable, type-managed list.
///
/// All `List` queries and derivations are available through `Deref`. When
/// the last element is removed the element type resets, so the emptied list
/// accepts any type again (a declared variant returns to its declaration).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutableList {
    inner: List,
}

impl Deref for MutableList {
    type Target = List;

    fn deref(&self) -> &List {
        &self.inner
    }
}

impl MutableList {
    pub fn new(items: impl IntoIterator<Item = Value>) -> Result<Self> {
        Ok(MutableList {
            inner: List::with_slot(TypeSlot::unset(), None, items, MUTABLE_LIST)?,
        })
    }

    pub fn empty() -> Self {
        MutableList {
            inner: List::empty(),
        }
    }

    pub fn variant(element: impl Into<ElementType>) -> TypedVariant<MutableList> {
        TypedVariant::declare(&[element.into()])
    }

    pub fn of_type(
        element: impl Into<ElementType>,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Self> {
        Self::variant(element).create(items)
    }

    pub fn as_list(&self) -> &List {
        &self.inner
    }

    /// `MutableList`, or the declared variant name.
    pub fn type_name(&self) -> String {
        container_name(ContainerKind::MutableList, self.inner.variant)
    }

    /// A read-only snapshot with the same slot.
    pub fn to_list(&self) -> List {
        self.inner.to_list()
    }

    /// A read-only copy with `value` appended. Violations name `MutableList`.
    pub fn plus(&self, value: Value) -> Result<List> {
        self.plus_all([value])
    }

    pub fn plus_all(&self, values: impl IntoIterator<Item = Value>) -> Result<List> {
        self.inner.appended(values, MUTABLE_LIST)
    }

    fn after_removal(&mut self) {
        self.inner
            .slot
            .reset_if_empty(self.inner.items.len(), MUTABLE_LIST);
    }

    fn check_insert_index(&self, index: usize) -> Result<()> {
        if index > self.inner.items.len() {
            return Err(out_of_bounds(index, self.inner.items.len()));
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.inner.items.len() {
            return Err(out_of_bounds(index, self.inner.items.len()));
        }
        Ok(())
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    pub fn add(&mut self, value: Value) -> Result<()> {
        self.inner.slot.admit(&value, MUTABLE_LIST)?;
        self.inner.items.push(value);
        Ok(())
    }

    pub fn add_at(&mut self, index: usize, value: Value) -> Result<()> {
        self.check_insert_index(index)?;
        self.inner.slot.admit(&value, MUTABLE_LIST)?;
        self.inner.items.insert(index, value);
        Ok(())
    }

    /// Append every value or none of them. Returns whether the list changed.
    pub fn add_all(&mut self, values: impl IntoIterator<Item = Value>) -> Result<bool> {
        let values: Vec<Value> = values.into_iter().collect();
        self.inner.slot.admit_all(&values, MUTABLE_LIST)?;
        let changed = !values.is_empty();
        self.inner.items.extend(values);
        Ok(changed)
    }

    pub fn add_all_at(
        &mut self,
        index: usize,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<bool> {
        self.check_insert_index(index)?;
        let values: Vec<Value> = values.into_iter().collect();
        self.inner.slot.admit_all(&values, MUTABLE_LIST)?;
        let changed = !values.is_empty();
        let tail = self.inner.items.split_off(index);
        self.inner.items.extend(values);
        self.inner.items.extend(tail);
        Ok(changed)
    }

    /// Replace the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, value: Value) -> Result<Value> {
        self.check_index(index)?;
        self.inner.slot.admit(&value, MUTABLE_LIST)?;
        Ok(std::mem::replace(&mut self.inner.items[index], value))
    }

    /// Replace every element with `transform(element)`, all or nothing.
    pub fn replace_all(&mut self, transform: impl FnMut(&Value) -> Value) -> Result<()> {
        let replaced: Vec<Value> = self.inner.items.iter().map(transform).collect();
        self.inner.slot.admit_all(&replaced, MUTABLE_LIST)?;
        self.inner.items = replaced;
        Ok(())
    }

    /// Overwrite every position with `value`.
    pub fn fill(&mut self, value: Value) -> Result<()> {
        if self.inner.items.is_empty() {
            return Ok(());
        }
        self.inner.slot.admit(&value, MUTABLE_LIST)?;
        self.inner.items.fill(value);
        Ok(())
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Remove the first occurrence of `value`.
    pub fn remove(&mut self, value: &Value) -> bool {
        let Some(index) = self.inner.index_of(value) else {
            return false;
        };
        self.inner.items.remove(index);
        self.after_removal();
        true
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Value> {
        self.check_index(index)?;
        let removed = self.inner.items.remove(index);
        self.after_removal();
        Ok(removed)
    }

    pub fn remove_first(&mut self) -> Result<Value> {
        self.remove_first_or_none()
            .ok_or(CollectionError::EmptyCollection {
                operation: "remove_first",
                container: "MutableList",
            })
    }

    pub fn remove_last(&mut self) -> Result<Value> {
        self.remove_last_or_none()
            .ok_or(CollectionError::EmptyCollection {
                operation: "remove_last",
                container: "MutableList",
            })
    }

    pub fn remove_first_or_none(&mut self) -> Option<Value> {
        if self.inner.items.is_empty() {
            return None;
        }
        let removed = self.inner.items.remove(0);
        self.after_removal();
        Some(removed)
    }

    pub fn remove_last_or_none(&mut self) -> Option<Value> {
        let removed = self.inner.items.pop()?;
        self.after_removal();
        Some(removed)
    }

    /// Remove every element contained in `values`.
    pub fn remove_all<'a>(&mut self, values: impl IntoIterator<Item = &'a Value>) -> bool {
        let values: FxHashSet<&Value> = values.into_iter().collect();
        self.remove_if(|item| values.contains(item))
    }

    /// Keep only the elements contained in `values`.
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

    // =========================================================================
    // Reordering in place
    // =========================================================================

    pub fn sort_with(&mut self, mut compare: impl FnMut(&Value, &Value) -> Ordering) {
        self.inner.items.sort_by(|a, b| compare(a, b));
    }

    pub fn sort_by_key<K: Ord>(&mut self, key: impl FnMut(&Value) -> K) {
        self.inner.items.sort_by_key(key);
    }

    pub fn reverse(&mut self) {
        self.inner.items.reverse();
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.inner.items.shuffle(rng);
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// A bidirectional cursor positioned before `index`.
    pub fn list_iterator(&mut self, index: usize) -> Result<MutableListIterator<'_>> {
        self.check_insert_index(index)?;
        Ok(MutableListIterator {
            list: self,
            cursor: index,
            last_returned: None,
        })
    }

    /// A mutable window over `from..to`. Insertions through the window are
    /// checked against this list's type.
    pub fn sub_list(&mut self, from: usize, to: usize) -> Result<SubList<'_>> {
        let len = self.inner.items.len();
        if to > len {
            return Err(out_of_bounds(to, len));
        }
        if from > to {
            return Err(out_of_bounds(from, to));
        }
        Ok(SubList {
            list: self,
            from,
            to,
        })
    }
}

impl TypedContainer for MutableList {
    const KIND: ContainerKind = ContainerKind::MutableList;
    type Item = Value;

    fn declared(variant: &TypedVariant<Self>) -> Self {
        MutableList {
            inner: List::from_parts(Vec::new(), variant.slot(0), Some(variant.id())),
        }
    }

    fn declared_from(
        variant: &TypedVariant<Self>,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Self> {
        Ok(MutableList {
            inner: List::with_slot(variant.slot(0), Some(variant.id()), items, MUTABLE_LIST)?,
        })
    }
}

impl<'a> IntoIterator for &'a MutableList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.items.iter()
    }
}

impl fmt::Display for MutableList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

/// Cursor over a `MutableList` that can insert, replace and remove.
pub struct MutableListIterator<'a> {
    list: &'a mut MutableList,
    cursor: usize,
    last_returned: Option<usize>,
}

impl MutableListIterator<'_> {
    pub fn has_next(&self) -> bool {
        self.cursor < self.list.len()
    }

    pub fn has_previous(&self) -> bool {
        self.cursor > 0
    }

    pub fn next_index(&self) -> usize {
        self.cursor
    }

    /// `None` at the start of the list.
    pub fn previous_index(&self) -> Option<usize> {
        self.cursor.checked_sub(1)
    }

    pub fn next(&mut self) -> Option<&Value> {
        let index = self.cursor;
        let value = self.list.inner.items.get(index)?;
        self.cursor += 1;
        self.last_returned = Some(index);
        Some(value)
    }

    pub fn previous(&mut self) -> Option<&Value> {
        let index = self.cursor.checked_sub(1)?;
        self.cursor = index;
        self.last_returned = Some(index);
        self.list.inner.items.get(index)
    }

    /// Insert before the cursor. A following `next` is unaffected.
    pub fn add(&mut self, value: Value) -> Result<()> {
        self.list.add_at(self.cursor, value)?;
        self.cursor += 1;
        self.last_returned = None;
        Ok(())
    }

    /// Replace the element last returned by `next` or `previous`.
    pub fn set(&mut self, value: Value) -> Result<Value> {
        let index = self.last_returned.ok_or(CollectionError::IteratorState)?;
        self.list.set(index, value)
    }

    /// Remove the element last returned by `next` or `previous`.
    pub fn remove(&mut self) -> Result<Value> {
        let index = self.last_returned.take().ok_or(CollectionError::IteratorState)?;
        let removed = self.list.remove_at(index)?;
        if index < self.cursor {
            self.cursor -= 1;
        }
        Ok(removed)
    }
}

/// A mutable window into part of a `MutableList`.
pub struct SubList<'a> {
    list: &'a mut MutableList,
    from: usize,
    to: usize,
}

impl SubList<'_> {
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.list.inner.items[self.from..self.to]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.as_slice().iter()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(out_of_bounds(index, self.len()));
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<&Value> {
        self.as_slice()
            .get(index)
            .ok_or_else(|| out_of_bounds(index, self.len()))
    }

    pub fn set(&mut self, index: usize, value: Value) -> Result<Value> {
        self.check_index(index)?;
        self.list.set(self.from + index, value)
    }

    /// Append at the end of the window.
    pub fn add(&mut self, value: Value) -> Result<()> {
        self.list.add_at(self.to, value)?;
        self.to += 1;
        Ok(())
    }

    pub fn add_at(&mut self, index: usize, value: Value) -> Result<()> {
        if index > self.len() {
            return Err(out_of_bounds(index, self.len()));
        }
        self.list.add_at(self.from + index, value)?;
        self.to += 1;
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Value> {
        self.check_index(index)?;
        let removed = self.list.remove_at(self.from + index)?;
        self.to -= 1;
        Ok(removed)
    }

    /// Remove the window's elements from the backing list.
    pub fn clear(&mut self) {
        self.list.inner.items.drain(self.from..self.to);
        self.to = self.from;
        self.list.after_removal();
    }

    /// Snapshot of the window with the backing list's slot.
    pub fn to_list(&self) -> List {
        self.list.inner.derive(self.as_slice().to_vec())
    }
}
