//! Service types for order placement.

/// Order placement service.
///
/// Generic over the store so production wires in the database-backed
/// implementation while tests run against [`crate::storage::InMemoryStore`].
/// All writes go through one transaction per placement attempt.
#[derive(Debug, Clone)]
pub struct OrderPlacementService<S> {
    /// Store handle.
    pub(crate) store: S,
}

impl<S> OrderPlacementService<S> {
    /// Creates a placement service over a store handle.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }
}
