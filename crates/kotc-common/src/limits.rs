//! Centralized limits and thresholds for the kotc runtime.
//!
//! Shared constants for display truncation and inline capacities. Keeping them
//! here prevents diverging copies across the solver and container crates.

/// Maximum number of elements rendered by `Display` for a single container.
///
/// Containers larger than this print the first elements followed by `...`,
/// so error messages and logs stay bounded.
pub const MAX_DISPLAY_ELEMENTS: usize = 100;

/// Inline capacity for typed-variant parameter lists.
///
/// Lists and sets declare one parameter, maps declare two; anything beyond
/// spills to the heap.
pub const VARIANT_PARAMS_INLINE: usize = 2;

/// Initial capacity reserved for the class table in the registry.
///
/// Covers the builtin classes plus a typical handful of user classes.
pub const CLASS_TABLE_CAPACITY: usize = 32;
