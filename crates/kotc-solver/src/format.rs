//! Host-style display names for element types and runtime types.
//!
//! `int`, `Dog`, `List`, `List[Animal]`, `Map[str, List[int]]`.

use crate::registry::ClassRegistry;
use crate::types::{ElementType, RuntimeType, VariantId};

pub struct TypeFormatter<'a> {
    registry: &'a ClassRegistry,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(registry: &'a ClassRegistry) -> Self {
        Self { registry }
    }

    pub fn element_type(&self, ty: &ElementType) -> String {
        match ty {
            ElementType::Class(class) => self.registry.name(*class).to_string(),
            ElementType::Collection(kind) => kind.name().to_string(),
            ElementType::Variant(id) => self.variant(*id),
            ElementType::Param(atom) => self.registry.atom_name(*atom).to_string(),
        }
    }

    /// `Kind[P1, P2]`, or `Variant#n` for an id the registry never issued.
    pub fn variant(&self, id: VariantId) -> String {
        let Some(shape) = self.registry.variant_shape(id) else {
            return format!("Variant#{}", id.0);
        };
        let params: Vec<String> = shape
            .params
            .iter()
            .map(|param| self.element_type(param))
            .collect();
        format!("{}[{}]", shape.kind.name(), params.join(", "))
    }

    /// Name of the runtime type an element actually has.
    pub fn runtime_type(&self, ty: &RuntimeType) -> String {
        match ty {
            RuntimeType::Class(class) => self.registry.name(*class).to_string(),
            RuntimeType::Collection {
                variant: Some(id), ..
            } => self.variant(*id),
            RuntimeType::Collection { kind, .. } => kind.name().to_string(),
        }
    }
}
