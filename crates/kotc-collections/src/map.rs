//! Insertion-ordered maps: `Map` and `MutableMap`.
//!
//! A map keeps two slots, one for keys and one for values, and reports
//! violations against the one that failed (`MutableMap value[int]`). Every
//! write stages both slots and commits them only when the whole entry, or the
//! whole batch, passed.

use crate::error::{CollectionError, Result};
use crate::list::List;
use crate::set::Set;
use crate::value::{Value, write_items};
use crate::variant::{TypedContainer, TypedVariant, container_name, project, retag};
use indexmap::IndexMap;
use kotc_solver::{ContainerKind, ElementType, SlotOwner, TypeConstraint, TypeSlot, VariantId};
use rustc_hash::FxBuildHasher;
use std::fmt;
use std::ops::Deref;

pub(crate) type ValueMap = IndexMap<Value, Value, FxBuildHasher>;

/// Admit `pairs` into the key and value slots, all or nothing.
fn admit_entries(
    keys: &mut TypeSlot,
    values: &mut TypeSlot,
    pairs: &[(Value, Value)],
    kind: ContainerKind,
) -> Result<()> {
    let mut staged_keys = *keys;
    let mut staged_values = *values;
    for (key, value) in pairs {
        staged_keys.admit(key, SlotOwner::key(kind))?;
        staged_values.admit(value, SlotOwner::value(kind))?;
    }
    *keys = staged_keys;
    *values = staged_values;
    Ok(())
}

/// A read-only, type-managed map.
#[derive(Clone, Debug)]
pub struct Map {
    entries: ValueMap,
    keys: TypeSlot,
    values: TypeSlot,
    variant: Option<VariantId>,
}

impl Map {
    /// Build a map from `pairs`; a repeated key keeps its last value.
    pub fn new(pairs: impl IntoIterator<Item = (Value, Value)>) -> Result<Self> {
        Self::with_slots(
            TypeSlot::unset(),
            TypeSlot::unset(),
            None,
            pairs,
            ContainerKind::Map,
        )
    }

    pub fn empty() -> Self {
        Self::from_parts(
            ValueMap::default(),
            TypeSlot::unset(),
            TypeSlot::unset(),
            None,
        )
    }

    /// Declare the `Map[key, value]` variant.
    pub fn variant(
        key: impl Into<ElementType>,
        value: impl Into<ElementType>,
    ) -> TypedVariant<Map> {
        TypedVariant::declare(&[key.into(), value.into()])
    }

    pub fn of_type(
        key: impl Into<ElementType>,
        value: impl Into<ElementType>,
        pairs: impl IntoIterator<Item = (Value, Value)>,
    ) -> Result<Self> {
        Self::variant(key, value).create(pairs)
    }

    fn with_slots(
        mut keys: TypeSlot,
        mut values: TypeSlot,
        variant: Option<VariantId>,
        pairs: impl IntoIterator<Item = (Value, Value)>,
        kind: ContainerKind,
    ) -> Result<Self> {
        let pairs: Vec<(Value, Value)> = pairs.into_iter().collect();
        admit_entries(&mut keys, &mut values, &pairs, kind)?;
        Ok(Self::from_parts(pairs.into_iter().collect(), keys, values, variant))
    }

    pub(crate) fn from_parts(
        entries: ValueMap,
        keys: TypeSlot,
        values: TypeSlot,
        variant: Option<VariantId>,
    ) -> Self {
        Map {
            entries,
            keys,
            values,
            variant,
        }
    }

    /// A map of `entries` with this map's slots and variant.
    fn derive(&self, entries: ValueMap) -> Map {
        Map::from_parts(
            entries,
            self.keys,
            self.values,
            retag(self.variant, ContainerKind::Map),
        )
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn key_type(&self) -> Option<ElementType> {
        self.keys.element_type()
    }

    pub fn value_type(&self) -> Option<ElementType> {
        self.values.element_type()
    }

    pub fn key_constraint(&self) -> &TypeConstraint {
        self.keys.constraint()
    }

    pub fn value_constraint(&self) -> &TypeConstraint {
        self.values.constraint()
    }

    #[inline]
    pub fn variant_id(&self) -> Option<VariantId> {
        self.variant
    }

    /// `Map`, or the declared variant name such as `Map[str, int]`.
    pub fn type_name(&self) -> String {
        container_name(ContainerKind::Map, self.variant)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Strict lookup: a missing key is an error.
    pub fn get_value(&self, key: &Value) -> Result<&Value> {
        self.entries
            .get(key)
            .ok_or_else(|| CollectionError::KeyAbsent { key: key.clone() })
    }

    pub fn get_or_default<'a>(&'a self, key: &Value, default: &'a Value) -> &'a Value {
        self.entries.get(key).unwrap_or(default)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.contains_key(key)
    }

    pub fn contains_value(&self, value: &Value) -> bool {
        self.entries.values().any(|candidate| candidate == value)
    }

    pub fn entries(&self) -> indexmap::map::Iter<'_, Value, Value> {
        self.entries.iter()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Value, Value> {
        self.entries.iter()
    }

    /// The keys, as a set carrying the key slot.
    pub fn keys(&self) -> Set {
        Set::from_parts(
            self.entries.keys().cloned().collect(),
            self.keys,
            project(self.variant, 0, ContainerKind::Set),
        )
    }

    /// The values in entry order, as a list carrying the value slot.
    pub fn values(&self) -> List {
        List::from_parts(
            self.entries.values().cloned().collect(),
            self.values,
            project(self.variant, 1, ContainerKind::List),
        )
    }

    // =========================================================================
    // Derived maps
    // =========================================================================

    pub fn filter(&self, mut predicate: impl FnMut(&Value, &Value) -> bool) -> Map {
        self.derive(
            self.entries
                .iter()
                .filter(|&(key, value)| predicate(key, value))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    pub fn filter_keys(&self, mut predicate: impl FnMut(&Value) -> bool) -> Map {
        self.filter(|key, _| predicate(key))
    }

    pub fn filter_values(&self, mut predicate: impl FnMut(&Value) -> bool) -> Map {
        self.filter(|_, value| predicate(value))
    }

    /// Same keys and key slot; the value slot is inferred from the results.
    pub fn map_values(&self, mut transform: impl FnMut(&Value, &Value) -> Value) -> Result<Map> {
        Map::with_slots(
            self.keys,
            TypeSlot::unset(),
            None,
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), transform(key, value))),
            ContainerKind::Map,
        )
    }

    /// Same values and value slot; the key slot is inferred from the results.
    pub fn map_keys(&self, mut transform: impl FnMut(&Value, &Value) -> Value) -> Result<Map> {
        Map::with_slots(
            TypeSlot::unset(),
            self.values,
            None,
            self.entries
                .iter()
                .map(|(key, value)| (transform(key, value), value.clone())),
            ContainerKind::Map,
        )
    }

    /// A copy with the entry added or replaced, validated against this map's
    /// types.
    pub fn plus(&self, key: Value, value: Value) -> Result<Map> {
        self.plus_all([(key, value)])
    }

    pub fn plus_all(&self, pairs: impl IntoIterator<Item = (Value, Value)>) -> Result<Map> {
        self.merged(pairs, ContainerKind::Map)
    }

    /// `plus_all` with violations reported against `kind`.
    fn merged(
        &self,
        pairs: impl IntoIterator<Item = (Value, Value)>,
        kind: ContainerKind,
    ) -> Result<Map> {
        let mut keys = self.keys;
        let mut values = self.values;
        let pairs: Vec<(Value, Value)> = pairs.into_iter().collect();
        admit_entries(&mut keys, &mut values, &pairs, kind)?;

        let mut entries = self.entries.clone();
        entries.extend(pairs);
        Ok(Map::from_parts(
            entries,
            keys,
            values,
            retag(self.variant, ContainerKind::Map),
        ))
    }

    /// A copy without `key`.
    pub fn minus(&self, key: &Value) -> Map {
        let mut entries = self.entries.clone();
        entries.shift_remove(key);
        self.derive(entries)
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    pub fn to_map(&self) -> Map {
        self.derive(self.entries.clone())
    }

    pub fn to_mutable_map(&self) -> MutableMap {
        MutableMap {
            inner: Map::from_parts(
                self.entries.clone(),
                self.keys,
                self.values,
                retag(self.variant, ContainerKind::MutableMap),
            ),
        }
    }
}

impl TypedContainer for Map {
    const KIND: ContainerKind = ContainerKind::Map;
    type Item = (Value, Value);

    fn declared(variant: &TypedVariant<Self>) -> Self {
        Map::from_parts(
            ValueMap::default(),
            variant.slot(0),
            variant.slot(1),
            Some(variant.id()),
        )
    }

    fn declared_from(
        variant: &TypedVariant<Self>,
        pairs: impl IntoIterator<Item = (Value, Value)>,
    ) -> Result<Self> {
        Map::with_slots(
            variant.slot(0),
            variant.slot(1),
            Some(variant.id()),
            pairs,
            ContainerKind::Map,
        )
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Map {}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a Value, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_items(f, "{", "}", self.entries.iter(), |f, (key, value)| {
            write!(f, "{key}={value}")
        })
    }
}

/// A growable, type-managed map.
///
/// Key and value types reset together when the last entry is removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutableMap {
    inner: Map,
}

impl Deref for MutableMap {
    type Target = Map;

    fn deref(&self) -> &Map {
        &self.inner
    }
}

impl MutableMap {
    pub fn new(pairs: impl IntoIterator<Item = (Value, Value)>) -> Result<Self> {
        Ok(MutableMap {
            inner: Map::with_slots(
                TypeSlot::unset(),
                TypeSlot::unset(),
                None,
                pairs,
                ContainerKind::MutableMap,
            )?,
        })
    }

    pub fn empty() -> Self {
        MutableMap {
            inner: Map::empty(),
        }
    }

    pub fn variant(
        key: impl Into<ElementType>,
        value: impl Into<ElementType>,
    ) -> TypedVariant<MutableMap> {
        TypedVariant::declare(&[key.into(), value.into()])
    }

    pub fn of_type(
        key: impl Into<ElementType>,
        value: impl Into<ElementType>,
        pairs: impl IntoIterator<Item = (Value, Value)>,
    ) -> Result<Self> {
        Self::variant(key, value).create(pairs)
    }

    pub fn as_map(&self) -> &Map {
        &self.inner
    }

    pub fn type_name(&self) -> String {
        container_name(ContainerKind::MutableMap, self.inner.variant)
    }

    /// A read-only snapshot with the same slots.
    pub fn to_map(&self) -> Map {
        self.inner.to_map()
    }

    /// A read-only copy with the entry added or replaced. Violations name
    /// `MutableMap`.
    pub fn plus(&self, key: Value, value: Value) -> Result<Map> {
        self.plus_all([(key, value)])
    }

    pub fn plus_all(&self, pairs: impl IntoIterator<Item = (Value, Value)>) -> Result<Map> {
        self.inner.merged(pairs, ContainerKind::MutableMap)
    }

    fn after_removal(&mut self) {
        let len = self.inner.entries.len();
        self.inner
            .keys
            .reset_if_empty(len, SlotOwner::key(ContainerKind::MutableMap));
        self.inner
            .values
            .reset_if_empty(len, SlotOwner::value(ContainerKind::MutableMap));
    }

    /// Validate then store one entry, returning the value it replaced.
    fn insert_checked(&mut self, key: Value, value: Value) -> Result<Option<Value>> {
        let mut keys = self.inner.keys;
        let mut values = self.inner.values;
        keys.admit(&key, SlotOwner::key(ContainerKind::MutableMap))?;
        values.admit(&value, SlotOwner::value(ContainerKind::MutableMap))?;
        self.inner.keys = keys;
        self.inner.values = values;
        Ok(self.inner.entries.insert(key, value))
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Store `value` under `key`, returning the previous value.
    pub fn put(&mut self, key: Value, value: Value) -> Result<Option<Value>> {
        self.insert_checked(key, value)
    }

    /// Store every pair or none of them.
    pub fn put_all(&mut self, pairs: impl IntoIterator<Item = (Value, Value)>) -> Result<()> {
        let pairs: Vec<(Value, Value)> = pairs.into_iter().collect();
        admit_entries(
            &mut self.inner.keys,
            &mut self.inner.values,
            &pairs,
            ContainerKind::MutableMap,
        )?;
        self.inner.entries.extend(pairs);
        Ok(())
    }

    /// Store `value` only if `key` is absent. Returns the existing value
    /// when there was one.
    pub fn put_if_absent(&mut self, key: Value, value: Value) -> Result<Option<Value>> {
        if let Some(existing) = self.inner.entries.get(&key) {
            return Ok(Some(existing.clone()));
        }
        self.insert_checked(key, value)?;
        Ok(None)
    }

    /// The value under `key`, storing `default()` first if absent.
    pub fn get_or_put(&mut self, key: Value, default: impl FnOnce() -> Value) -> Result<Value> {
        self.compute_if_absent(key, |_| default())
    }

    /// Replace the value under `key` only if present.
    pub fn replace(&mut self, key: Value, value: Value) -> Result<Option<Value>> {
        if !self.inner.entries.contains_key(&key) {
            return Ok(None);
        }
        self.insert_checked(key, value)
    }

    /// Replace every value with `transform(key, value)`, all or nothing.
    pub fn replace_all(
        &mut self,
        mut transform: impl FnMut(&Value, &Value) -> Value,
    ) -> Result<()> {
        let replaced: Vec<Value> = self
            .inner
            .entries
            .iter()
            .map(|(key, value)| transform(key, value))
            .collect();
        self.inner
            .values
            .admit_all(&replaced, SlotOwner::value(ContainerKind::MutableMap))?;
        for (slot, value) in self.inner.entries.values_mut().zip(replaced) {
            *slot = value;
        }
        Ok(())
    }

    // =========================================================================
    // Computing
    // =========================================================================

    /// Store `remap(key, current)`, or remove the entry when it returns `None`.
    pub fn compute(
        &mut self,
        key: Value,
        remap: impl FnOnce(&Value, Option<&Value>) -> Option<Value>,
    ) -> Result<Option<Value>> {
        match remap(&key, self.inner.entries.get(&key)) {
            Some(value) => {
                self.insert_checked(key, value.clone())?;
                Ok(Some(value))
            }
            None => {
                self.remove(&key);
                Ok(None)
            }
        }
    }

    pub fn compute_if_absent(
        &mut self,
        key: Value,
        produce: impl FnOnce(&Value) -> Value,
    ) -> Result<Value> {
        if let Some(existing) = self.inner.entries.get(&key) {
            return Ok(existing.clone());
        }
        let value = produce(&key);
        self.insert_checked(key, value.clone())?;
        Ok(value)
    }

    pub fn compute_if_present(
        &mut self,
        key: Value,
        remap: impl FnOnce(&Value, &Value) -> Option<Value>,
    ) -> Result<Option<Value>> {
        let Some(existing) = self.inner.entries.get(&key) else {
            return Ok(None);
        };
        match remap(&key, existing) {
            Some(value) => {
                self.insert_checked(key, value.clone())?;
                Ok(Some(value))
            }
            None => {
                self.remove(&key);
                Ok(None)
            }
        }
    }

    /// Store `value` if `key` is absent, otherwise `combine(old, value)`;
    /// a `None` from `combine` removes the entry.
    pub fn merge(
        &mut self,
        key: Value,
        value: Value,
        combine: impl FnOnce(&Value, &Value) -> Option<Value>,
    ) -> Result<Option<Value>> {
        let merged = match self.inner.entries.get(&key) {
            Some(existing) => combine(existing, &value),
            None => Some(value),
        };
        match merged {
            Some(merged) => {
                self.insert_checked(key, merged.clone())?;
                Ok(Some(merged))
            }
            None => {
                self.remove(&key);
                Ok(None)
            }
        }
    }

    // =========================================================================
    // Removal
    // =========================================================================

    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        let removed = self.inner.entries.shift_remove(key)?;
        self.after_removal();
        Some(removed)
    }

    /// Remove `key` only while it maps to `value`.
    pub fn remove_value(&mut self, key: &Value, value: &Value) -> bool {
        if self.inner.entries.get(key) != Some(value) {
            return false;
        }
        self.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.inner.entries.clear();
        self.after_removal();
    }
}

impl TypedContainer for MutableMap {
    const KIND: ContainerKind = ContainerKind::MutableMap;
    type Item = (Value, Value);

    fn declared(variant: &TypedVariant<Self>) -> Self {
        MutableMap {
            inner: Map::from_parts(
                ValueMap::default(),
                variant.slot(0),
                variant.slot(1),
                Some(variant.id()),
            ),
        }
    }

    fn declared_from(
        variant: &TypedVariant<Self>,
        pairs: impl IntoIterator<Item = (Value, Value)>,
    ) -> Result<Self> {
        Ok(MutableMap {
            inner: Map::with_slots(
                variant.slot(0),
                variant.slot(1),
                Some(variant.id()),
                pairs,
                ContainerKind::MutableMap,
            )?,
        })
    }
}

impl<'a> IntoIterator for &'a MutableMap {
    type Item = (&'a Value, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.entries.iter()
    }
}

impl fmt::Display for MutableMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}
