//! Core traits shared across layers.

/// Trait for entities with a unique identifier.
pub trait Entity<ID> {
    /// Returns the entity's unique identifier.
    fn id(&self) -> &ID;
}

/// Trait for mapping between domain entities and DTOs.
pub trait Mapper<From, To> {
    /// Maps from source type to target type.
    fn map(from: From) -> To;
}
