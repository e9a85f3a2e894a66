//! Dynamically typed values stored in the containers.
//!
//! A `Value`'s runtime class is data: builtin payloads map to the builtin
//! `ClassId`s, user objects carry the id of their registered class, and a
//! nested container reports its own kind and variant tag.
//!
//! Equality and hashing are structural. Floats compare by bit pattern, and
//! sets and maps compare without regard to insertion order.

use crate::list::{List, MutableList};
use crate::map::{Map, MutableMap};
use crate::set::{MutableSet, Set};
use indexmap::IndexMap;
use kotc_common::limits::MAX_DISPLAY_ELEMENTS;
use kotc_solver::{
    ClassId, ContainerKind, RuntimeType, RuntimeTyped, TypeFormatter, VariantId, registry,
};
use rustc_hash::FxHasher;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// `f64` with a total order and bitwise equality, so it can live in sets and
/// map keys.
#[derive(Clone, Copy, Debug)]
pub struct Float(pub f64);

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Float {}

impl Hash for Float {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for Float {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Float {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// An instance of a user-defined class.
#[derive(Clone, Debug)]
pub struct Object {
    class: ClassId,
    fields: IndexMap<Arc<str>, Value>,
}

impl Object {
    pub fn new(class: ClassId) -> Self {
        Object {
            class,
            fields: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(Arc::from(name), value.into());
        self
    }

    #[inline]
    pub fn class(&self) -> ClassId {
        self.class
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class && self.fields.iter().eq(other.fields.iter())
    }
}

impl Eq for Object {}

impl Hash for Object {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class.hash(state);
        for (name, value) in &self.fields {
            name.hash(state);
            value.hash(state);
        }
    }
}

/// A container stored as an element of another container.
#[derive(Clone, Debug)]
pub enum Collection {
    List(List),
    MutableList(MutableList),
    Set(Set),
    MutableSet(MutableSet),
    Map(Map),
    MutableMap(MutableMap),
}

impl Collection {
    pub fn kind(&self) -> ContainerKind {
        match self {
            Collection::List(_) => ContainerKind::List,
            Collection::MutableList(_) => ContainerKind::MutableList,
            Collection::Set(_) => ContainerKind::Set,
            Collection::MutableSet(_) => ContainerKind::MutableSet,
            Collection::Map(_) => ContainerKind::Map,
            Collection::MutableMap(_) => ContainerKind::MutableMap,
        }
    }

    pub fn variant_id(&self) -> Option<VariantId> {
        match self {
            Collection::List(list) => list.variant_id(),
            Collection::MutableList(list) => list.variant_id(),
            Collection::Set(set) => set.variant_id(),
            Collection::MutableSet(set) => set.variant_id(),
            Collection::Map(map) => map.variant_id(),
            Collection::MutableMap(map) => map.variant_id(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Collection::List(list) => list.len(),
            Collection::MutableList(list) => list.len(),
            Collection::Set(set) => set.len(),
            Collection::MutableSet(set) => set.len(),
            Collection::Map(map) => map.len(),
            Collection::MutableMap(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The elements of a list, either mutability.
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Collection::List(list) => Some(list),
            Collection::MutableList(list) => Some(list.as_list()),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&Set> {
        match self {
            Collection::Set(set) => Some(set),
            Collection::MutableSet(set) => Some(set.as_set()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Collection::Map(map) => Some(map),
            Collection::MutableMap(map) => Some(map.as_map()),
            _ => None,
        }
    }
}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.as_list(), other.as_list()) {
            return a.as_slice() == b.as_slice();
        }
        if let (Some(a), Some(b)) = (self.as_set(), other.as_set()) {
            return a.len() == b.len() && a.iter().all(|value| b.contains(value));
        }
        if let (Some(a), Some(b)) = (self.as_map(), other.as_map()) {
            return a.len() == b.len()
                && a.entries().all(|(key, value)| b.get(key) == Some(value));
        }
        false
    }
}

impl Eq for Collection {}

/// Combine per-element hashes so the result does not depend on order.
fn unordered_hash<T: Hash>(items: impl Iterator<Item = T>) -> u64 {
    items.fold(0u64, |acc, item| {
        let mut hasher = FxHasher::default();
        item.hash(&mut hasher);
        acc.wrapping_add(hasher.finish())
    })
}

impl Hash for Collection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().base().hash(state);
        self.len().hash(state);
        if let Some(list) = self.as_list() {
            list.as_slice().hash(state);
        } else if let Some(set) = self.as_set() {
            unordered_hash(set.iter()).hash(state);
        } else if let Some(map) = self.as_map() {
            unordered_hash(map.entries()).hash(state);
        }
    }
}

/// A dynamically typed value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(Float),
    Str(Arc<str>),
    Bytes(Arc<[u8]>),
    Tuple(Arc<[Value]>),
    Object(Arc<Object>),
    Collection(Arc<Collection>),
}

impl Value {
    /// An instance of `class` with the given fields.
    pub fn object<'a>(class: ClassId, fields: impl IntoIterator<Item = (&'a str, Value)>) -> Self {
        let object = fields
            .into_iter()
            .fold(Object::new(class), |object, (name, value)| {
                object.with_field(name, value)
            });
        Value::Object(Arc::new(object))
    }

    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Tuple(items.into_iter().collect())
    }

    /// The runtime class, or `None` for a nested container.
    pub fn class_of(&self) -> Option<ClassId> {
        Some(match self {
            Value::None => ClassId::NONE,
            Value::Bool(_) => ClassId::BOOL,
            Value::Int(_) => ClassId::INT,
            Value::Float(_) => ClassId::FLOAT,
            Value::Str(_) => ClassId::STR,
            Value::Bytes(_) => ClassId::BYTES,
            Value::Tuple(_) => ClassId::TUPLE,
            Value::Object(object) => object.class(),
            Value::Collection(_) => return None,
        })
    }

    /// Host-style name of the runtime type: `int`, `Dog`, `List[Animal]`.
    pub fn type_name(&self) -> String {
        TypeFormatter::new(registry()).runtime_type(&self.runtime_type())
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(f.0),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Value::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        self.as_collection().and_then(Collection::as_list)
    }

    pub fn as_set(&self) -> Option<&Set> {
        self.as_collection().and_then(Collection::as_set)
    }

    pub fn as_map(&self) -> Option<&Map> {
        self.as_collection().and_then(Collection::as_map)
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }
}

impl RuntimeTyped for Value {
    fn runtime_type(&self) -> RuntimeType {
        match self {
            Value::Collection(collection) => RuntimeType::Collection {
                kind: collection.kind(),
                variant: collection.variant_id(),
            },
            other => RuntimeType::Class(other.class_of().unwrap_or(ClassId::OBJECT)),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

/// Counts above `i64::MAX` saturate.
impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(Float(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(Arc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(Arc::from(value))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(Arc::from(value))
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(Arc::new(value))
    }
}

impl From<Collection> for Value {
    fn from(value: Collection) -> Self {
        Value::Collection(Arc::new(value))
    }
}

macro_rules! collection_into_value {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Collection(Arc::new(Collection::$ty(value)))
                }
            }
        )*
    };
}

collection_into_value!(List, MutableList, Set, MutableSet, Map, MutableMap);

/// Write up to `MAX_DISPLAY_ELEMENTS` items, then `...`.
pub(crate) fn write_items<T>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    close: &str,
    items: impl Iterator<Item = T>,
    mut write_item: impl FnMut(&mut fmt::Formatter<'_>, T) -> fmt::Result,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        if i == MAX_DISPLAY_ELEMENTS {
            f.write_str("...")?;
            break;
        }
        write_item(f, item)?;
    }
    f.write_str(close)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{:?}", x.0),
            Value::Str(s) => f.write_str(s),
            Value::Bytes(bytes) => write!(f, "b{:?}", String::from_utf8_lossy(bytes)),
            Value::Tuple(items) => {
                write_items(f, "(", ")", items.iter(), |f, item| write!(f, "{item}"))
            }
            Value::Object(object) => {
                f.write_str(&registry().name(object.class()))?;
                write_items(f, "(", ")", object.fields.iter(), |f, (name, value)| {
                    write!(f, "{name}={value}")
                })
            }
            Value::Collection(collection) => match collection.as_ref() {
                Collection::List(list) => write!(f, "{list}"),
                Collection::MutableList(list) => write!(f, "{list}"),
                Collection::Set(set) => write!(f, "{set}"),
                Collection::MutableSet(set) => write!(f, "{set}"),
                Collection::Map(map) => write!(f, "{map}"),
                Collection::MutableMap(map) => write!(f, "{map}"),
            },
        }
    }
}
