//! Homogeneous containers over dynamically typed values.
//!
//! `List`, `Set` and `Map` (each with a `Mutable` counterpart) hold
//! [`Value`]s and enforce a single element type at runtime. The type is
//! either declared up front through a typed variant (`List::variant(animal)`)
//! or bound from the first element inserted. Every insertion path validates
//! before touching storage, so a rejected call leaves the container as it was.
//!
//! Derived containers follow fixed propagation rules: filters and
//! conversions keep the source's binding, transformations infer a fresh one.

mod error;
mod grouping;
mod list;
mod map;
mod set;
mod value;
mod variant;

pub use error::{CollectionError, Result};
pub use grouping::Grouping;
pub use list::{List, MutableList, MutableListIterator, SubList};
pub use map::{Map, MutableMap};
pub use set::{MutableSet, Set};
pub use value::{Collection, Float, Object, Value};
pub use variant::{TypedContainer, TypedVariant};

#[cfg(test)]
#[path = "tests/value_tests.rs"]
mod value_tests;
#[cfg(test)]
#[path = "tests/variant_tests.rs"]
mod variant_tests;
#[cfg(test)]
#[path = "tests/list_tests.rs"]
mod list_tests;
#[cfg(test)]
#[path = "tests/mutable_list_tests.rs"]
mod mutable_list_tests;
#[cfg(test)]
#[path = "tests/set_tests.rs"]
mod set_tests;
#[cfg(test)]
#[path = "tests/map_tests.rs"]
mod map_tests;
#[cfg(test)]
#[path = "tests/grouping_tests.rs"]
mod grouping_tests;
