//! Core type representations for the runtime element-type solver.
//!
//! Everything here is a small `Copy` handle: class ids, container kinds,
//! variant ids and the `ElementType` / `TypeConstraint` built from them.
//! Names and hierarchy live in the [`ClassRegistry`](crate::ClassRegistry).

use kotc_common::Atom;
use kotc_common::limits::VARIANT_PARAMS_INLINE;
use serde::Serialize;
use smallvec::SmallVec;

/// Handle to a runtime class registered in the class registry.
///
/// Builtin classes have fixed ids so they can be named as constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClassId(pub u32);

impl ClassId {
    pub const OBJECT: ClassId = ClassId(0);
    pub const NONE: ClassId = ClassId(1);
    pub const INT: ClassId = ClassId(2);
    pub const BOOL: ClassId = ClassId(3);
    pub const FLOAT: ClassId = ClassId(4);
    pub const STR: ClassId = ClassId(5);
    pub const BYTES: ClassId = ClassId(6);
    pub const TUPLE: ClassId = ClassId(7);

    /// First id handed out to user-defined classes.
    pub const FIRST_USER: u32 = 8;

    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

/// The six container kinds.
///
/// Mutable kinds are sub-kinds of their immutable family base, so a
/// `MutableList` satisfies any bound that accepts a `List`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ContainerKind {
    List,
    MutableList,
    Set,
    MutableSet,
    Map,
    MutableMap,
}

impl ContainerKind {
    pub const fn name(self) -> &'static str {
        match self {
            ContainerKind::List => "List",
            ContainerKind::MutableList => "MutableList",
            ContainerKind::Set => "Set",
            ContainerKind::MutableSet => "MutableSet",
            ContainerKind::Map => "Map",
            ContainerKind::MutableMap => "MutableMap",
        }
    }

    /// The immutable root of this kind's family.
    pub const fn base(self) -> ContainerKind {
        match self {
            ContainerKind::List | ContainerKind::MutableList => ContainerKind::List,
            ContainerKind::Set | ContainerKind::MutableSet => ContainerKind::Set,
            ContainerKind::Map | ContainerKind::MutableMap => ContainerKind::Map,
        }
    }

    pub const fn is_mutable(self) -> bool {
        matches!(
            self,
            ContainerKind::MutableList | ContainerKind::MutableSet | ContainerKind::MutableMap
        )
    }

    pub const fn is_map(self) -> bool {
        matches!(self, ContainerKind::Map | ContainerKind::MutableMap)
    }

    /// Number of type parameters a variant of this kind declares.
    pub const fn arity(self) -> usize {
        if self.is_map() { 2 } else { 1 }
    }

    /// `self` is `other` or a mutable refinement of it.
    pub fn is_subkind_of(self, other: ContainerKind) -> bool {
        self == other || self.base() == other
    }
}

/// Identity tag of an interned typed variant (`List[Animal]`, `Map[str, int]`).
///
/// Two requests for the same kind and parameters yield the same id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VariantId(pub u32);

/// The `T` a container slot can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// A concrete runtime class; subclass instances are accepted.
    Class(ClassId),
    /// Any container of this kind (or a mutable refinement), whatever its own
    /// element type. Inferred when the first element is itself a container.
    Collection(ContainerKind),
    /// A declared typed variant used as an element bound. Enforced one level
    /// deep: only the element's container kind is checked.
    Variant(VariantId),
    /// A type-variable placeholder. Not checkable, so never rejects.
    Param(Atom),
}

impl ElementType {
    #[inline]
    pub const fn is_reifiable(&self) -> bool {
        !matches!(self, ElementType::Param(_))
    }
}

impl From<ClassId> for ElementType {
    fn from(class: ClassId) -> Self {
        ElementType::Class(class)
    }
}

/// State of a container slot: nothing accepted yet, or bound to a type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TypeConstraint {
    #[default]
    Unset,
    Bound(ElementType),
}

impl TypeConstraint {
    #[inline]
    pub const fn is_unset(&self) -> bool {
        matches!(self, TypeConstraint::Unset)
    }

    #[inline]
    pub const fn bound(&self) -> Option<ElementType> {
        match self {
            TypeConstraint::Unset => None,
            TypeConstraint::Bound(t) => Some(*t),
        }
    }
}

/// Interned structure behind a [`VariantId`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VariantShape {
    pub kind: ContainerKind,
    pub params: SmallVec<[ElementType; VARIANT_PARAMS_INLINE]>,
}

/// What a candidate element *is* at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuntimeType {
    Class(ClassId),
    Collection {
        kind: ContainerKind,
        variant: Option<VariantId>,
    },
}

impl RuntimeType {
    pub const fn container_kind(&self) -> Option<ContainerKind> {
        match self {
            RuntimeType::Class(_) => None,
            RuntimeType::Collection { kind, .. } => Some(*kind),
        }
    }
}

/// Anything whose runtime type can be observed at insertion time.
///
/// The solver is value-agnostic; containers implement this for their element
/// representation.
pub trait RuntimeTyped {
    fn runtime_type(&self) -> RuntimeType;
}

impl RuntimeTyped for RuntimeType {
    fn runtime_type(&self) -> RuntimeType {
        *self
    }
}

/// Which slot of a container a check applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotRole {
    Element,
    Key,
    Value,
}

impl SlotRole {
    pub const fn name(self) -> &'static str {
        match self {
            SlotRole::Element => "element",
            SlotRole::Key => "key",
            SlotRole::Value => "value",
        }
    }
}

/// The container a slot belongs to, for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotOwner {
    pub kind: ContainerKind,
    pub role: SlotRole,
}

impl SlotOwner {
    pub const fn element(kind: ContainerKind) -> Self {
        SlotOwner {
            kind,
            role: SlotRole::Element,
        }
    }

    pub const fn key(kind: ContainerKind) -> Self {
        SlotOwner {
            kind,
            role: SlotRole::Key,
        }
    }

    pub const fn value(kind: ContainerKind) -> Self {
        SlotOwner {
            kind,
            role: SlotRole::Value,
        }
    }
}
