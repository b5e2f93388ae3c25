use thiserror::Error;

/// Error produced when an identifier string matches none of the recognized
/// shapes.
///
/// This is fatal and never retried: identifiers are only ever produced by
/// the connector's own expansion logic, so a malformed one indicates a bug
/// in the producer rather than a transient condition.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("malformed document identifier '{identifier}'")]
pub struct MalformedIdentifier {
    identifier: String,
}

impl MalformedIdentifier {
    pub(crate) fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    /// Returns the offending identifier string.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}
