use thiserror::Error;

/// Error produced when a stored fingerprint cannot be parsed back into its
/// structured fields.
///
/// A fingerprint that fails to parse was either truncated in storage or
/// written by an incompatible revision; callers should treat the document
/// as never fetched and rebuild from scratch.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum FingerprintParseError {
    /// The packed data ended before all declared fields were read.
    #[error("truncated fingerprint data")]
    Truncated,
    /// A list length prefix was not a decimal count.
    #[error("invalid list count '{found}' in fingerprint")]
    InvalidCount {
        /// The text found where a count was expected.
        found: String,
    },
    /// A presence tag was neither `+` nor `-`.
    #[error("invalid presence tag '{found}' in fingerprint")]
    InvalidTag {
        /// The character found where a presence tag was expected.
        found: char,
    },
    /// A packed timestamp was not a decimal epoch-millisecond value.
    #[error("invalid timestamp '{found}' in fingerprint")]
    InvalidTimestamp {
        /// The text found where a timestamp was expected.
        found: String,
    },
}
