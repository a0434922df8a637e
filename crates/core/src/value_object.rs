//! Value object trait: equality by value, not identity.

/// Marker trait for immutable domain values compared by their attributes
/// (a price, an image reference), as opposed to entities tracked by id.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
