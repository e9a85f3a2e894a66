//! Errors raised by container operations.

use crate::value::Value;
use kotc_solver::TypeViolation;

pub type Result<T, E = CollectionError> = std::result::Result<T, E>;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CollectionError {
    /// An element failed its container's type constraint. The container is
    /// unchanged.
    #[error(transparent)]
    TypeViolation(#[from] TypeViolation),
    /// The operation needs at least one element.
    #[error("{operation} called on an empty {container}")]
    EmptyCollection {
        operation: &'static str,
        container: &'static str,
    },
    /// Strict lookup of a key that is not in the map.
    #[error("Key {key} is missing in the map")]
    KeyAbsent { key: Value },
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    /// `single` on a container holding more than one element.
    #[error("{container} has {len} elements, expected exactly one")]
    NotSingle { container: &'static str, len: usize },
    /// A list-iterator `set` or `remove` with no element to act on.
    #[error("No current element: call next or previous first")]
    IteratorState,
}

impl CollectionError {
    pub fn type_violation(&self) -> Option<&TypeViolation> {
        match self {
            CollectionError::TypeViolation(violation) => Some(violation),
            _ => None,
        }
    }
}
