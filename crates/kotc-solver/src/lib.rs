//! Runtime element-type solver.
//!
//! The pieces a homogeneous container needs to enforce its element type when
//! the element type is data rather than a Rust type parameter:
//!
//! - **Class registry**: runtime classes, their bases and resolution order,
//!   plus interned typed-variant shapes (`VariantId` identity tags)
//! - **Type predicates**: does this element satisfy this constraint
//! - **Type slots**: the per-container `Unset` / `Bound(T)` lifecycle
//! - **Formatting**: host-style names used in violations and logs

mod format;
mod lifecycle;
mod predicate;
mod registry;
pub mod types;

pub use format::TypeFormatter;
pub use lifecycle::{TypeSlot, TypeViolation};
pub use predicate::{TypePredicate, infer_element_type, is_valid};
pub use registry::{ClassRegistry, RegistryError, registry};
pub use types::{
    ClassId, ContainerKind, ElementType, RuntimeType, RuntimeTyped, SlotOwner, SlotRole,
    TypeConstraint, VariantId, VariantShape,
};

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod registry_tests;
#[cfg(test)]
#[path = "tests/predicate_tests.rs"]
mod predicate_tests;
#[cfg(test)]
#[path = "tests/lifecycle_tests.rs"]
mod lifecycle_tests;
#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod format_tests;
