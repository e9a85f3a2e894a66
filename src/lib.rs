//! Runtime type-safe homogeneous collections.
//!
//! `kotc` holds dynamically typed [`Value`]s in lists, sets and maps that
//! still guarantee homogeneity. A container without a declared element type
//! binds to the type of its first element and resets when emptied. A typed
//! variant such as `List::variant(animal)` is bound from birth.
//!
//! ```
//! use kotc::{ClassId, List, MutableList, Value};
//!
//! let mut numbers = MutableList::new([Value::from(1), Value::from(2)]).unwrap();
//! let err = numbers.add(Value::from("three")).unwrap_err();
//! assert_eq!(err.to_string(), "Cannot add element of type 'str' to MutableList[int]");
//!
//! numbers.clear();
//! numbers.add(Value::from("now strings")).unwrap();
//!
//! let declared = List::variant(ClassId::INT).empty();
//! assert_eq!(declared.type_name(), "List[int]");
//! ```
//!
//! Crate layout:
//! - `kotc-common`: interning, limits and message templates
//! - `kotc-solver`: class registry, type predicates and type slots
//! - `kotc-collections`: the containers and the typed-variant factory

pub mod tracing_config;

pub use kotc_collections::{
    Collection, CollectionError, Float, Grouping, List, Map, MutableList, MutableListIterator,
    MutableMap, MutableSet, Object, Result, Set, SubList, TypedContainer, TypedVariant, Value,
};
pub use kotc_common::limits;
pub use kotc_solver::{
    ClassId, ClassRegistry, ContainerKind, ElementType, RegistryError, RuntimeType, RuntimeTyped,
    SlotOwner, SlotRole, TypeConstraint, TypeFormatter, TypePredicate, TypeSlot, TypeViolation,
    VariantId, infer_element_type, is_valid, registry,
};
