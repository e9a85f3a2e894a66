//! Typed-variant factory.
//!
//! `List::variant(animal)` returns a `TypedVariant<List>`: a factory that
//! embeds the declared element type and the interned `VariantId` tag for
//! `List[Animal]`. Containers it creates start `Bound` before any element is
//! inserted, so an empty `List[Animal]` already rejects a `str`.
//!
//! Variants for the same kind and parameters share one `VariantId`, so two
//! independent declarations behave identically and display identically.

use crate::error::Result;
use kotc_common::limits::VARIANT_PARAMS_INLINE;
use kotc_solver::{ContainerKind, ElementType, TypeFormatter, TypeSlot, VariantId, registry};
use smallvec::SmallVec;
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// A container kind that can be instantiated from a typed-variant declaration.
pub trait TypedContainer: Sized {
    const KIND: ContainerKind;

    /// What `create` consumes: values for lists and sets, pairs for maps.
    type Item;

    /// An empty container carrying the declared slots.
    fn declared(variant: &TypedVariant<Self>) -> Self;

    /// Insert `items` in order into a declared container, all or nothing.
    fn declared_from(
        variant: &TypedVariant<Self>,
        items: impl IntoIterator<Item = Self::Item>,
    ) -> Result<Self>;
}

pub struct TypedVariant<C> {
    id: VariantId,
    params: SmallVec<[ElementType; VARIANT_PARAMS_INLINE]>,
    _container: PhantomData<fn() -> C>,
}

impl<C: TypedContainer> TypedVariant<C> {
    pub(crate) fn declare(params: &[ElementType]) -> Self {
        let registry = registry();
        let id = registry.intern_variant(C::KIND, params);
        debug!(
            variant = %TypeFormatter::new(registry).variant(id),
            id = id.0,
            "declared typed variant"
        );
        TypedVariant {
            id,
            params: SmallVec::from_slice(params),
            _container: PhantomData,
        }
    }

    /// Create a container of this variant from `items`.
    pub fn create(&self, items: impl IntoIterator<Item = C::Item>) -> Result<C> {
        C::declared_from(self, items)
    }

    pub fn empty(&self) -> C {
        C::declared(self)
    }
}

impl<C> TypedVariant<C> {
    #[inline]
    pub fn id(&self) -> VariantId {
        self.id
    }

    pub fn params(&self) -> &[ElementType] {
        &self.params
    }

    /// This variant as an element bound, for containers of typed containers.
    #[inline]
    pub fn element_type(&self) -> ElementType {
        ElementType::Variant(self.id)
    }

    /// `List[Animal]`, `Map[str, int]`.
    pub fn name(&self) -> String {
        TypeFormatter::new(registry()).variant(self.id)
    }

    /// A fresh slot for the `index`th declared parameter.
    pub(crate) fn slot(&self, index: usize) -> TypeSlot {
        self.params
            .get(index)
            .map_or_else(TypeSlot::unset, |ty| TypeSlot::declared(*ty))
    }
}

impl<C> Clone for TypedVariant<C> {
    fn clone(&self) -> Self {
        TypedVariant {
            id: self.id,
            params: self.params.clone(),
            _container: PhantomData,
        }
    }
}

impl<C> PartialEq for TypedVariant<C> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<C> Eq for TypedVariant<C> {}

impl<C> fmt::Debug for TypedVariant<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedVariant")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

impl<C> fmt::Display for TypedVariant<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl<C> From<&TypedVariant<C>> for ElementType {
    fn from(variant: &TypedVariant<C>) -> Self {
        variant.element_type()
    }
}

impl<C> From<TypedVariant<C>> for ElementType {
    fn from(variant: TypedVariant<C>) -> Self {
        variant.element_type()
    }
}

/// Carry a variant tag across a kind conversion: `List[Dog]` becomes
/// `Set[Dog]` when the list becomes a set.
pub(crate) fn retag(variant: Option<VariantId>, kind: ContainerKind) -> Option<VariantId> {
    let id = variant?;
    let registry = registry();
    let shape = registry.variant_shape(id)?;
    if shape.kind == kind {
        return Some(id);
    }
    Some(registry.intern_variant(kind, &shape.params))
}

/// The tag for one side of a map variant: `Map[str, int]` yields `Set[str]`
/// for its keys and `List[int]` for its values.
pub(crate) fn project(
    variant: Option<VariantId>,
    param: usize,
    kind: ContainerKind,
) -> Option<VariantId> {
    let registry = registry();
    let shape = registry.variant_shape(variant?)?;
    let ty = shape.params.get(param)?;
    Some(registry.intern_variant(kind, std::slice::from_ref(ty)))
}

/// Display name of a container: its variant if declared, else its kind.
pub(crate) fn container_name(kind: ContainerKind, variant: Option<VariantId>) -> String {
    match variant {
        Some(id) => TypeFormatter::new(registry()).variant(id),
        None => kind.name().to_string(),
    }
}
