use thiserror::Error;

/// Errors surfaced while orchestrating one crawl cycle.
///
/// Note what is *not* here: an object missing upstream (absent modify date,
/// vanished ACLs) is not an error at this layer. The vendor store deletes
/// objects out from under a crawl as a matter of course, so those cases
/// resolve to [`VersionDecision::Delete`](crate::VersionDecision::Delete)
/// and the identifier is dropped.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// A queued identifier matches none of the recognized shapes. Indicates
    /// a producer bug; fatal, never retried.
    #[error(transparent)]
    MalformedIdentifier(#[from] docid::MalformedIdentifier),
    /// The job specification failed to decode. Job-fatal; requires operator
    /// correction.
    #[error(transparent)]
    Configuration(#[from] scope::ConfigurationError),
    /// A vendor-proxy request failed in transport or protocol terms. The
    /// enclosing pipeline owns the retry envelope.
    #[error("vendor proxy request failed")]
    Vendor(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ConnectorError {
    /// Wraps an arbitrary vendor-side failure.
    #[must_use]
    pub fn vendor<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Vendor(Box::new(source))
    }
}
