//! Type predicate engine.
//!
//! Decides whether a candidate element satisfies a slot's constraint:
//!
//! 1. `Unset` accepts everything.
//! 2. A non-reifiable bound (type-variable placeholder) accepts everything.
//! 3. A class bound accepts instances of the class or any subclass. Only
//!    `object` accepts containers.
//! 4. A container-kind bound (inferred `Collection(K)` or a declared variant
//!    over `K`) accepts any container whose kind is `K` or a mutable
//!    refinement of `K`, whatever that container's own element type.
//!
//! Acceptance is covariant only: a supertype instance is rejected from a
//! subtype-bound slot.

use crate::registry::{ClassRegistry, registry};
use crate::types::{ClassId, ContainerKind, ElementType, RuntimeType, TypeConstraint};

pub struct TypePredicate<'a> {
    registry: &'a ClassRegistry,
}

impl<'a> TypePredicate<'a> {
    pub fn new(registry: &'a ClassRegistry) -> Self {
        Self { registry }
    }

    pub fn is_valid(&self, element: &RuntimeType, constraint: &TypeConstraint) -> bool {
        match constraint {
            TypeConstraint::Unset => true,
            TypeConstraint::Bound(expected) => self.satisfies(element, expected),
        }
    }

    pub fn satisfies(&self, element: &RuntimeType, expected: &ElementType) -> bool {
        match expected {
            ElementType::Param(_) => true,
            ElementType::Class(class) => match element {
                RuntimeType::Class(actual) => self.registry.is_subclass(*actual, *class),
                RuntimeType::Collection { .. } => *class == ClassId::OBJECT,
            },
            ElementType::Collection(kind) => Self::is_container_of(element, *kind),
            ElementType::Variant(id) => match self.registry.variant_shape(*id) {
                Some(shape) => Self::is_container_of(element, shape.kind),
                // An id from another registry is not checkable here.
                None => true,
            },
        }
    }

    fn is_container_of(element: &RuntimeType, kind: ContainerKind) -> bool {
        element
            .container_kind()
            .is_some_and(|actual| actual.is_subkind_of(kind))
    }

    /// The bound an `Unset` slot takes from its first element.
    ///
    /// Containers bind to their family base kind, so later elements of any
    /// list (mutable or not, typed or not) are accepted alongside.
    pub fn infer(&self, element: &RuntimeType) -> ElementType {
        match element {
            RuntimeType::Class(class) => ElementType::Class(*class),
            RuntimeType::Collection { kind, .. } => ElementType::Collection(kind.base()),
        }
    }
}

/// [`TypePredicate::is_valid`] against the process-wide registry.
pub fn is_valid(element: &RuntimeType, constraint: &TypeConstraint) -> bool {
    TypePredicate::new(registry()).is_valid(element, constraint)
}

/// [`TypePredicate::infer`] against the process-wide registry.
pub fn infer_element_type(element: &RuntimeType) -> ElementType {
    TypePredicate::new(registry()).infer(element)
}
