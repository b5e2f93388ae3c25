use thiserror::Error;

/// Error raised while decoding a job specification into its typed form.
///
/// Raised once, when the specification is first consulted, so a single bad
/// rule fails the whole job deterministically instead of corrupting a
/// subset of per-document decisions. Requires operator correction; never
/// retried.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The specification JSON could not be deserialized at all.
    #[error("invalid specification document: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// A node is missing an attribute its type requires.
    #[error("specification node '{node}' is missing required attribute '{attribute}'")]
    MissingAttribute {
        /// Node type name.
        node: String,
        /// Missing attribute name.
        attribute: String,
    },
    /// An attribute is present but carries an unrecognized value.
    #[error("specification node '{node}' has invalid {attribute} '{value}'")]
    InvalidAttribute {
        /// Node type name.
        node: String,
        /// Attribute name.
        attribute: String,
        /// The rejected value.
        value: String,
    },
    /// A path-map match expression is not a valid regular expression.
    #[error("invalid path-map expression '{pattern}'")]
    InvalidPathMap {
        /// The rejected match expression.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
}
