//! Per-container type slot lifecycle.
//!
//! A `TypeSlot` is the `Unset` / `Bound(T)` state machine a container keeps
//! for its elements (maps keep one for keys and one for values):
//!
//! - `Unset --admit(e)--> Bound(type_of(e))`
//! - `Bound(T) --admit(e), e valid--> Bound(T)`
//! - `Bound(T) --admit(e), e invalid--> error, slot unchanged`
//! - `Bound(T) --reset--> Unset`, or back to the declared bound for slots that
//!   came from a typed-variant declaration
//!
//! Slots are `Copy`; batch admission stages on a copy and commits only when
//! every element passed.

use crate::format::TypeFormatter;
use crate::predicate::TypePredicate;
use crate::registry::registry;
use crate::types::{
    ContainerKind, ElementType, RuntimeType, RuntimeTyped, SlotOwner, SlotRole, TypeConstraint,
};
use kotc_common::messages::{CANNOT_ADD_ELEMENT, CANNOT_ADD_MAP_ENTRY};
use serde::Serialize;
use tracing::{debug, trace};

/// A rejected insertion.
///
/// Carries the offending element's type name, the bound it failed, and the
/// container it was headed for. Serializable so callers can report it as JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct TypeViolation {
    pub actual: String,
    pub expected: String,
    pub container: ContainerKind,
    pub role: SlotRole,
    pub message: String,
}

impl TypeViolation {
    pub fn new(actual: String, expected: String, owner: SlotOwner) -> Self {
        let container = owner.kind.name();
        let message = match owner.role {
            SlotRole::Element => {
                CANNOT_ADD_ELEMENT.format(&[actual.as_str(), container, expected.as_str()])
            }
            role => CANNOT_ADD_MAP_ENTRY.format(&[
                actual.as_str(),
                container,
                role.name(),
                expected.as_str(),
            ]),
        };
        TypeViolation {
            actual,
            expected,
            container: owner.kind,
            role: owner.role,
            message,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypeSlot {
    declared: Option<ElementType>,
    constraint: TypeConstraint,
}

impl TypeSlot {
    pub const fn unset() -> Self {
        TypeSlot {
            declared: None,
            constraint: TypeConstraint::Unset,
        }
    }

    /// A slot pre-bound by a typed-variant declaration.
    ///
    /// A placeholder declaration is remembered for naming but binds nothing;
    /// such a slot infers from its first element like an undeclared one.
    pub fn declared(ty: ElementType) -> Self {
        TypeSlot {
            declared: Some(ty),
            constraint: Self::initial_constraint(Some(ty)),
        }
    }

    fn initial_constraint(declared: Option<ElementType>) -> TypeConstraint {
        match declared {
            Some(ty) if ty.is_reifiable() => TypeConstraint::Bound(ty),
            _ => TypeConstraint::Unset,
        }
    }

    #[inline]
    pub fn constraint(&self) -> &TypeConstraint {
        &self.constraint
    }

    #[inline]
    pub fn element_type(&self) -> Option<ElementType> {
        self.constraint.bound()
    }

    #[inline]
    pub fn declared_type(&self) -> Option<ElementType> {
        self.declared
    }

    /// Validate without transitioning.
    pub fn check<E: RuntimeTyped + ?Sized>(
        &self,
        element: &E,
        owner: SlotOwner,
    ) -> Result<(), TypeViolation> {
        let actual = element.runtime_type();
        self.check_runtime(&actual, owner)
    }

    fn check_runtime(&self, actual: &RuntimeType, owner: SlotOwner) -> Result<(), TypeViolation> {
        let TypeConstraint::Bound(expected) = self.constraint else {
            return Ok(());
        };
        let registry = registry();
        if TypePredicate::new(registry).satisfies(actual, &expected) {
            trace!(container = owner.kind.name(), role = owner.role.name(), "element accepted");
            return Ok(());
        }

        let formatter = TypeFormatter::new(registry);
        let violation = TypeViolation::new(
            formatter.runtime_type(actual),
            formatter.element_type(&expected),
            owner,
        );
        debug!(
            container = owner.kind.name(),
            role = owner.role.name(),
            actual = %violation.actual,
            expected = %violation.expected,
            "element rejected"
        );
        Err(violation)
    }

    /// Validate `element` and bind the slot if it was `Unset`.
    pub fn admit<E: RuntimeTyped + ?Sized>(
        &mut self,
        element: &E,
        owner: SlotOwner,
    ) -> Result<(), TypeViolation> {
        let actual = element.runtime_type();
        if self.constraint.is_unset() {
            let registry = registry();
            let inferred = TypePredicate::new(registry).infer(&actual);
            debug!(
                container = owner.kind.name(),
                role = owner.role.name(),
                bound = %TypeFormatter::new(registry).element_type(&inferred),
                "bound element type from first element"
            );
            self.constraint = TypeConstraint::Bound(inferred);
            return Ok(());
        }
        self.check_runtime(&actual, owner)
    }

    /// Admit a batch in order, all or nothing.
    pub fn admit_all<'e, E, I>(
        &mut self,
        elements: I,
        owner: SlotOwner,
    ) -> Result<(), TypeViolation>
    where
        E: RuntimeTyped + ?Sized + 'e,
        I: IntoIterator<Item = &'e E>,
    {
        let mut staged = *self;
        for element in elements {
            staged.admit(element, owner)?;
        }
        *self = staged;
        Ok(())
    }

    /// Return to the initial state: `Unset`, or the declared bound.
    pub fn reset(&mut self, owner: SlotOwner) {
        let initial = Self::initial_constraint(self.declared);
        if self.constraint != initial {
            debug!(
                container = owner.kind.name(),
                role = owner.role.name(),
                "container emptied, element type reset"
            );
        }
        self.constraint = initial;
    }

    /// `reset` when a mutable container has just been emptied.
    #[inline]
    pub fn reset_if_empty(&mut self, len: usize, owner: SlotOwner) {
        if len == 0 {
            self.reset(owner);
        }
    }
}
