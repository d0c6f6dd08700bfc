//! Repository factory abstraction
//!
//! Concrete repositories are built from a database client through a factory,
//! so callers only depend on the repository trait they use.

/// A trait for database repository factories
///
/// Generic over the repository type and the configuration (usually a
/// `DbClient`) it is built from.
pub trait RepositoryFactory<R, C> {
    /// Create a new repository instance
    fn create_repository(&self, config: C) -> R;
}
