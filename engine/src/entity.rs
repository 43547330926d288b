use crate::id::Identifier;
use serde_json::Value;

/// A domain record owning exactly one identifier.
///
/// Implementors are expected to compare equal when their identifiers do.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Identifier;

    /// Type name reported by [`crate::RepoError::NotFound`].
    const NAME: &'static str;

    fn entity_id(&self) -> &Self::Id;

    /// Deterministic, plain key-value representation of the entity.
    fn to_json(&self) -> Value;
}
