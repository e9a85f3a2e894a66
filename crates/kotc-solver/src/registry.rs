//! Process-wide class registry.
//!
//! Classes are global in a dynamic runtime, so the registry is too: values
//! carry a `ClassId`, and every subclass question is answered here. The
//! registry also interns typed-variant shapes into `VariantId` identity tags.
//!
//! Responsibilities:
//! - Pre-register the builtin classes at their fixed ids
//! - Define user classes with one or more bases
//! - Precompute each class's resolution order so `is_subclass` is a scan
//! - Intern type-parameter names and variant shapes

use crate::types::{ClassId, ContainerKind, ElementType, VariantId, VariantShape};
use kotc_common::limits::CLASS_TABLE_CAPACITY;
use kotc_common::{Atom, Interner};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Errors raised while defining classes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A class with this name exists and was defined with other bases.
    #[error("Class '{name}' is already defined with different bases")]
    ClassRedefined { name: String },
    /// A base id does not name a registered class.
    #[error("Unknown base class {base:?} for class '{name}'")]
    UnknownBase { name: String, base: ClassId },
}

struct ClassEntry {
    name: Atom,
    bases: SmallVec<[ClassId; 2]>,
    /// The class itself first, `object` last.
    resolution_order: Vec<ClassId>,
}

struct RegistryState {
    names: Interner,
    classes: Vec<ClassEntry>,
    by_name: FxHashMap<Atom, ClassId>,
    variants: Vec<VariantShape>,
    variant_ids: FxHashMap<VariantShape, VariantId>,
}

impl RegistryState {
    fn resolution_order_for(&self, id: ClassId, bases: &[ClassId]) -> Vec<ClassId> {
        // Concatenate base orders and keep the last occurrence of each class.
        // For single inheritance this is the plain chain; for diamonds it puts
        // shared ancestors after every class that derives from them.
        let mut chain: Vec<ClassId> = Vec::new();
        for base in bases {
            if let Some(entry) = self.classes.get(base.0 as usize) {
                chain.extend_from_slice(&entry.resolution_order);
            }
        }
        let mut order = Vec::with_capacity(chain.len() + 1);
        order.push(id);
        for (i, class) in chain.iter().enumerate() {
            if !chain[i + 1..].contains(class) && !order.contains(class) {
                order.push(*class);
            }
        }
        order
    }

    fn insert_class(&mut self, name: &str, bases: &[ClassId]) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        let atom = self.names.intern(name);
        let resolution_order = self.resolution_order_for(id, bases);
        self.classes.push(ClassEntry {
            name: atom,
            bases: SmallVec::from_slice(bases),
            resolution_order,
        });
        self.by_name.insert(atom, id);
        id
    }
}

/// Registry of runtime classes and typed-variant shapes.
///
/// Internally synchronized; all methods take `&self`.
pub struct ClassRegistry {
    state: RwLock<RegistryState>,
}

impl ClassRegistry {
    /// Create a registry holding only the builtin classes.
    pub fn new() -> Self {
        let mut state = RegistryState {
            names: Interner::new(),
            classes: Vec::with_capacity(CLASS_TABLE_CAPACITY),
            by_name: FxHashMap::default(),
            variants: Vec::new(),
            variant_ids: FxHashMap::default(),
        };
        // Order must match the ClassId constants.
        state.insert_class("object", &[]);
        state.insert_class("NoneType", &[ClassId::OBJECT]);
        state.insert_class("int", &[ClassId::OBJECT]);
        state.insert_class("bool", &[ClassId::INT]);
        state.insert_class("float", &[ClassId::OBJECT]);
        state.insert_class("str", &[ClassId::OBJECT]);
        state.insert_class("bytes", &[ClassId::OBJECT]);
        state.insert_class("tuple", &[ClassId::OBJECT]);
        debug_assert_eq!(state.classes.len() as u32, ClassId::FIRST_USER);

        ClassRegistry {
            state: RwLock::new(state),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Define a class deriving from `bases` (`object` when empty).
    ///
    /// Redefining a name with the same bases returns the existing id, so
    /// independent callers can declare the same hierarchy.
    pub fn define(&self, name: &str, bases: &[ClassId]) -> Result<ClassId, RegistryError> {
        let bases: SmallVec<[ClassId; 2]> = if bases.is_empty() {
            SmallVec::from_slice(&[ClassId::OBJECT])
        } else {
            SmallVec::from_slice(bases)
        };

        let mut state = self.write();
        let existing = state
            .names
            .get(name)
            .and_then(|atom| state.by_name.get(&atom).copied());
        if let Some(existing) = existing {
            let same = state
                .classes
                .get(existing.0 as usize)
                .is_some_and(|entry| entry.bases == bases);
            return if same {
                Ok(existing)
            } else {
                Err(RegistryError::ClassRedefined {
                    name: name.to_string(),
                })
            };
        }

        if let Some(&base) = bases
            .iter()
            .find(|base| base.0 as usize >= state.classes.len())
        {
            return Err(RegistryError::UnknownBase {
                name: name.to_string(),
                base,
            });
        }

        let id = state.insert_class(name, &bases);
        debug!(class = name, id = id.0, bases = ?bases, "defined class");
        Ok(id)
    }

    /// Find a class by name.
    pub fn lookup(&self, name: &str) -> Option<ClassId> {
        let state = self.read();
        let atom = state.names.get(name)?;
        state.by_name.get(&atom).copied()
    }

    /// The class's name, or `"<unknown>"` for an id this registry never issued.
    pub fn name(&self, id: ClassId) -> Arc<str> {
        let state = self.read();
        state
            .classes
            .get(id.0 as usize)
            .and_then(|entry| state.names.resolve_shared(entry.name))
            .unwrap_or_else(|| Arc::from("<unknown>"))
    }

    pub fn bases(&self, id: ClassId) -> Vec<ClassId> {
        self.read()
            .classes
            .get(id.0 as usize)
            .map(|entry| entry.bases.to_vec())
            .unwrap_or_default()
    }

    pub fn resolution_order(&self, id: ClassId) -> Vec<ClassId> {
        self.read()
            .classes
            .get(id.0 as usize)
            .map(|entry| entry.resolution_order.clone())
            .unwrap_or_default()
    }

    /// `child` is `parent` or derives from it, directly or transitively.
    pub fn is_subclass(&self, child: ClassId, parent: ClassId) -> bool {
        if child == parent || parent == ClassId::OBJECT {
            return true;
        }
        self.read()
            .classes
            .get(child.0 as usize)
            .is_some_and(|entry| entry.resolution_order.contains(&parent))
    }

    pub fn class_count(&self) -> usize {
        self.read().classes.len()
    }

    /// Intern the name of a type-variable placeholder.
    pub fn param(&self, name: &str) -> ElementType {
        ElementType::Param(self.write().names.intern(name))
    }

    pub fn atom_name(&self, atom: Atom) -> Arc<str> {
        self.read()
            .names
            .resolve_shared(atom)
            .unwrap_or_else(|| Arc::from(""))
    }

    /// Intern a typed-variant shape, returning its identity tag.
    pub fn intern_variant(&self, kind: ContainerKind, params: &[ElementType]) -> VariantId {
        let shape = VariantShape {
            kind,
            params: SmallVec::from_slice(params),
        };
        if let Some(&id) = self.read().variant_ids.get(&shape) {
            return id;
        }

        let mut state = self.write();
        // Another caller may have won the race between the two locks.
        if let Some(&id) = state.variant_ids.get(&shape) {
            return id;
        }
        let id = VariantId(state.variants.len() as u32);
        state.variants.push(shape.clone());
        state.variant_ids.insert(shape, id);
        id
    }

    pub fn variant_shape(&self, id: VariantId) -> Option<VariantShape> {
        self.read().variants.get(id.0 as usize).cloned()
    }

    pub fn variant_count(&self) -> usize {
        self.read().variants.len()
    }
}

static REGISTRY: Lazy<ClassRegistry> = Lazy::new(ClassRegistry::new);

/// The process-wide registry used by values and containers.
pub fn registry() -> &'static ClassRegistry {
    &REGISTRY
}
